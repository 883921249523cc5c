//! Helpers shared across commands

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use examforge_core::error::{ExamError, Result};
use examforge_core::model::{SessionId, TestSession};
use examforge_core::store::Store;

/// Seeded generator when `--seed` is given, otherwise seeded from entropy
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load a session or fail with `NotFound`
pub fn require_session(store: &Store, session: SessionId) -> Result<TestSession> {
    store
        .db()
        .get_session(session)?
        .ok_or_else(|| ExamError::not_found("session", session))
}

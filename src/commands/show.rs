//! `examforge show` - list a session's assigned questions

use crate::cli::Cli;
use crate::commands::helpers::{print_json, require_session};
use crate::output_by_format_result;
use examforge_core::error::Result;
use examforge_core::model::SessionId;
use examforge_core::store::Store;

pub fn execute(cli: &Cli, store: &Store, session: i64) -> Result<()> {
    let session = require_session(store, SessionId(session))?;
    let questions = store.db().list_assignments(session.id)?;

    output_by_format_result!(cli.format,
        json => {
            print_json(&serde_json::json!({
                "session": session,
                "questions": questions,
            }))
        },
        human => {
            if !cli.quiet {
                println!(
                    "Session {} (user {}, specialization {}): {}, {} questions",
                    session.id,
                    session.user,
                    session.specialization,
                    session.generation_state,
                    questions.len()
                );
            }
            for q in &questions {
                println!(
                    "{:>3}. [{}] {} / {}: {}",
                    q.order, q.level, q.competency_name, q.topic_name, q.question_text
                );
            }
        }
    )
}

//! `examforge generate` - build and persist a session's question set

use crate::cli::{Cli, GenerateArgs};
use crate::commands::helpers::{print_json, require_session, rng_from_seed};
use crate::output_by_format_result;
use examforge_core::assembly::{GenerationReport, GenerationRequest, TestAssembler};
use examforge_core::error::Result;
use examforge_core::logging::GenerationMetrics;
use examforge_core::model::SessionId;
use examforge_core::store::Store;

#[tracing::instrument(skip(cli, store, args), fields(session = args.session))]
pub fn execute(cli: &Cli, store: &Store, args: &GenerateArgs) -> Result<()> {
    let session = require_session(store, SessionId(args.session))?;

    let metrics = GenerationMetrics::new();
    let assembler = TestAssembler::new(store.db(), &store.config().generation, &metrics);
    let mut rng = rng_from_seed(args.draw.seed);

    let report = assembler.generate(
        &GenerationRequest {
            session: session.id,
            specialization: session.specialization,
            triplet_target: args.draw.triplets,
        },
        &mut rng,
    )?;

    output_by_format_result!(cli.format,
        json => { print_json(&report) },
        human => { print_human(cli, &report); }
    )
}

fn print_human(cli: &Cli, report: &GenerationReport) {
    println!(
        "Generated {} questions for session {} ({}/{} triplets)",
        report.generated_count,
        report.session,
        report.generated_triplets,
        report.target_triplets
    );
    if cli.quiet {
        return;
    }

    for quota in &report.quotas {
        println!("  {:>3}  {}", quota.triplets, quota.name);
    }
    for shortfall in &report.shortfalls {
        println!(
            "warning: {} (competency {}) has {} of {} requested complete topics",
            shortfall.name, shortfall.competency, shortfall.available, shortfall.requested
        );
    }
}

//! `examforge doctor` - catalog coverage diagnostics
//!
//! Reports, per specialization, whether the catalog can fill the configured
//! triplet target. Diagnostics never fail the command; blocking verdicts are
//! listed in the output.

use crate::cli::Cli;
use crate::commands::helpers::print_json;
use crate::output_by_format_result;
use examforge_core::coverage::{coverage_report, CoverageReport};
use examforge_core::error::Result;
use examforge_core::model::Level;
use examforge_core::store::Store;

#[tracing::instrument(skip(cli, store), fields(store_root = %store.root().display()))]
pub fn execute(cli: &Cli, store: &Store) -> Result<()> {
    let report = coverage_report(store.db(), &store.config().generation)?;

    output_by_format_result!(cli.format,
        json => { print_json(&report) },
        human => { print_human(cli, &report); }
    )
}

fn print_human(cli: &Cli, report: &CoverageReport) {
    if report.specializations.is_empty() {
        println!("No specializations in catalog");
        return;
    }

    for spec in &report.specializations {
        println!(
            "{} (specialization {}): {} - {} complete topics for {} triplets",
            spec.name,
            spec.specialization,
            spec.verdict.as_str(),
            spec.available_triplets,
            report.triplet_target
        );
        if let Some(problem) = &spec.problem {
            println!("  problem: {}", problem);
        }
        if cli.quiet {
            continue;
        }
        for comp in &spec.competencies {
            let levels: Vec<String> = Level::ALL
                .iter()
                .map(|l| format!("{}={}", l, comp.questions(*l)))
                .collect();
            println!(
                "  {}{} (weight {}): {}/{} topics complete, expects {}, {}",
                if comp.at_risk { "! " } else { "" },
                comp.name,
                comp.weight,
                comp.complete_topics,
                comp.topics,
                comp.expected_triplets,
                levels.join(" ")
            );
            for partial in &comp.partial_topics {
                let missing: Vec<&str> = partial.missing.iter().map(|l| l.as_str()).collect();
                println!(
                    "      partial topic {} ({}): missing {}",
                    partial.name,
                    partial.topic,
                    missing.join(", ")
                );
            }
        }
    }

    let blocking = report.blocking_count();
    if blocking > 0 {
        println!();
        println!("{} specialization(s) cannot generate a test", blocking);
    }
}

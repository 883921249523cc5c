//! `examforge allocate` - preview competency quotas

use crate::cli::{AllocateArgs, Cli};
use crate::commands::helpers::{print_json, rng_from_seed};
use crate::output_by_format_result;
use examforge_core::assembly::TestAssembler;
use examforge_core::config::QUESTIONS_PER_TRIPLET;
use examforge_core::error::Result;
use examforge_core::logging::GenerationMetrics;
use examforge_core::model::SpecializationId;
use examforge_core::store::Store;

#[tracing::instrument(skip(cli, store, args), fields(specialization = args.specialization))]
pub fn execute(cli: &Cli, store: &Store, args: &AllocateArgs) -> Result<()> {
    let metrics = GenerationMetrics::new();
    let assembler = TestAssembler::new(store.db(), &store.config().generation, &metrics);
    let mut rng = rng_from_seed(args.draw.seed);

    let allocation = assembler.plan(
        SpecializationId(args.specialization),
        args.draw.triplets,
        &mut rng,
    )?;

    output_by_format_result!(cli.format,
        json => { print_json(&allocation) },
        human => {
            if !cli.quiet {
                println!(
                    "Specialization {}: {} triplets ({} questions){}",
                    args.specialization,
                    allocation.target,
                    u64::from(allocation.target) * u64::from(QUESTIONS_PER_TRIPLET),
                    if allocation.equal_split { ", equal split" } else { "" }
                );
            }
            for quota in &allocation.quotas {
                println!(
                    "  {:>3}  {:<32} weight {:<8} share {:>5.1}%",
                    quota.triplets,
                    quota.name,
                    quota.weight,
                    quota.share * 100.0
                );
            }
        }
    )
}

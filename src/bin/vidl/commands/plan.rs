//! `vidl plan` command

use anyhow::Result;

use crate::cli::PlanArgs;
use versioned_idl::plan;

pub fn execute(args: PlanArgs) -> Result<()> {
    let (registry, mut config) = super::load(&args.manifest)?;
    if args.jobs.is_some() {
        config.generate.jobs = args.jobs;
    }

    let plan = plan(&registry, &config.generate)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for module in plan.graph.modules() {
        println!("{} ({})", module.name, module.kind.name());
    }

    for skipped in &plan.skipped {
        println!(
            "skipped {} version {} ({}): snapshot is empty",
            skipped.interface, skipped.version, skipped.backend
        );
    }

    Ok(())
}

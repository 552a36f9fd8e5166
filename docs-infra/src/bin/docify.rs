// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::Parser;
use docs_infra::{common::{logging, workspace_utils},
                 docify::{CLIArg, DocifyConfig, plan_pipeline, run_pipeline, ui_str}};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:?}");
        process::exit(1);
    }
}

fn run() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    logging::try_initialize_logging(logging::level_filter_for(cli_arg.verbose))?;
    // % is Display, ? is Debug.
    tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);

    let project_root = match &cli_arg.project_root {
        Some(path) => path.clone(),
        None => workspace_utils::get_project_root()?,
    };

    let mut config = DocifyConfig::load(&project_root, cli_arg.config.as_deref())?;
    cli_arg.apply_overrides(&mut config);
    tracing::debug!(message = "Resolved config", config = ?config);

    // Dry-run mode: show the plan and exit
    if cli_arg.dry_run {
        let plan = plan_pipeline(&config)?;
        println!("{}", ui_str::DRY_RUN_HEADER);
        for target in &plan.remap_targets {
            println!("  {}", ui_str::format_remap_target(target));
        }
        println!("  {}", ui_str::format_generator_command(&plan.command.to_string()));
        for target in &plan.prune_targets {
            println!("  {}", ui_str::format_prune_target(target));
        }
        return Ok(());
    }

    let report = run_pipeline(&config)?;

    if cli_arg.verbose {
        for (path, outcome) in &report.restored {
            println!("{}", ui_str::format_restore(path, *outcome));
        }
    }

    if !report.generator.is_clean() {
        eprintln!("{}", ui_str::GENERATOR_PROBLEMS);
    }

    if report.prune.has_failures() {
        eprintln!("{}", ui_str::PRUNE_PROBLEMS);
        for failure in &report.prune.failures {
            eprintln!("  - {}: {}", failure.path.display(), failure.reason);
        }
    }

    println!("\n{}", ui_str::format_summary(&report));

    Ok(())
}

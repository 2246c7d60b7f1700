use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config;
use crate::pipeline;

#[derive(Args, Debug, Clone)]
pub struct DumpArgs {
    /// Path to the generator configuration file (JSON or TOML).
    #[arg(long)]
    pub config: PathBuf,

    /// Only print the declaration with this qualified name, instead of the
    /// whole Meta Unit.
    #[arg(long)]
    pub name: Option<String>,
}

/// Parse the configured target files and print the resulting Meta Unit(s)
/// as JSON, using the same stable wire schema `to_json`/`from_json` agree on.
pub fn execute(args: DumpArgs) -> Result<()> {
    let cfg = config::load(&args.config)
        .with_context(|| format!("failed to load configuration {}", args.config.display()))?;

    let mut failures = 0usize;
    for target in &cfg.target_files {
        let (status, unit, diagnostics) = pipeline::parse_target(target, &cfg);
        for diag in &diagnostics {
            eprintln!("{}: {diag}", target.display());
        }
        if status == lux_parser::ParseStatus::Failed {
            failures += 1;
            continue;
        }

        match &args.name {
            Some(name) => match unit.find_decl(name) {
                Some(decl_ref) => {
                    let decl = unit.decl(decl_ref);
                    println!("{}", serde_json::to_string_pretty(&decl.common)?);
                }
                None => {
                    eprintln!("{}: no declaration named '{name}'", target.display());
                    failures += 1;
                }
            },
            None => {
                println!("{}", serde_json::to_string_pretty(&unit.to_json())?);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} target file(s) failed");
    }
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use lux_parser::ParseStatus;

use crate::config;
use crate::pipeline;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the generator configuration file (JSON or TOML).
    #[arg(long)]
    pub config: PathBuf,
}

/// Run the full parse -> analyze -> render pipeline over every
/// `target_files` entry, writing artifacts unless `dry_run` is set.
/// Returns an error (non-zero exit) if any target file failed.
pub fn execute(args: GenerateArgs) -> Result<()> {
    let cfg = config::load(&args.config)
        .with_context(|| format!("failed to load configuration {}", args.config.display()))?;

    let mut failures = 0usize;
    for target in &cfg.target_files {
        let outcome = pipeline::generate_target(target, &cfg);
        for diag in &outcome.diagnostics {
            eprintln!("{}: {diag}", target.display());
        }

        if outcome.status == ParseStatus::Failed {
            failures += 1;
            continue;
        }
        let Some(artifacts) = outcome.artifacts else {
            continue;
        };

        let paths = match lux_codegen::artifact_paths(target, &cfg.include_roots, &cfg.out_dir, &cfg.meta_suffix) {
            Ok(paths) => paths,
            Err(err) => {
                eprintln!("{}: {err}", target.display());
                failures += 1;
                continue;
            }
        };

        if cfg.dry_run {
            log::info!("dry run: would write {}", paths.static_artifact.display());
            continue;
        }

        let writes = [
            (&paths.static_artifact, &artifacts.static_artifact),
            (&paths.dynamic_records, &artifacts.dynamic_records),
            (&paths.dynamic_functions, &artifacts.dynamic_functions),
        ];
        let mut wrote_all = true;
        for (path, contents) in writes {
            if let Err(err) = write_artifact(path, contents) {
                eprintln!("{}: {err}", path.display());
                wrote_all = false;
                break;
            }
        }
        if !wrote_all {
            failures += 1;
            continue;
        }

        if cfg.serial_meta {
            if let Some(unit) = &outcome.unit {
                let json = serde_json::to_string_pretty(&unit.to_json())?;
                if let Err(err) = write_artifact(&paths.meta_json, &json) {
                    eprintln!("{}: {err}", paths.meta_json.display());
                }
            }
        }

        log::info!("wrote {}", paths.static_artifact.display());
    }

    if failures > 0 {
        anyhow::bail!("{failures} target file(s) failed to generate");
    }
    Ok(())
}

fn write_artifact(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

//! Glues configuration, parsing and generation together; shared by the
//! `generate` and `dump` subcommands.
//!
//! The only concrete `AstAdapter` this workspace ships is
//! `InMemoryAdapter`, a hand-buildable fixture with no file-loading
//! capability of its own. A production build would plug in a
//! real libclang-backed adapter behind a feature flag; absent one, each
//! target file starts from an empty translation unit, which is enough to
//! exercise configuration, ordering and rendering end to end but will not
//! discover any declarations on its own.

use std::path::{Path, PathBuf};

use lux_analysis::{emission_order, Scc};
use lux_codegen::{GeneratedArtifacts, Generator, GeneratorConfig};
use lux_frontend::InMemoryAdapter;
use lux_meta::MetaUnit;
use lux_parser::{parse, ParseOptions, ParseStatus};

use crate::config::GeneratorFileConfig;

fn parse_options<'a>(target: &Path, config: &GeneratorFileConfig, diagnostics: &'a mut Vec<String>) -> ParseOptions<'a> {
    let mut opts = ParseOptions::new(target.display().to_string(), env!("CARGO_PKG_VERSION"));
    opts.marker_symbol = format!("{};", config.marker);
    opts.commands = config.extra_compile_options.clone();
    opts.diagnostic_sink = Box::new(move |msg: &str| diagnostics.push(msg.to_string()));
    opts
}

/// Parse a single target file per the loaded configuration.
pub fn parse_target(target: &Path, config: &GeneratorFileConfig) -> (ParseStatus, MetaUnit, Vec<String>) {
    let mut adapter = InMemoryAdapter::new();
    let mut diagnostics = Vec::new();
    let opts = parse_options(target, config, &mut diagnostics);
    let (status, unit) = parse(&mut adapter, target, opts);
    (status, unit, diagnostics)
}

pub struct GenerateOutcome {
    pub target: PathBuf,
    pub status: ParseStatus,
    pub diagnostics: Vec<String>,
    pub unit: Option<MetaUnit>,
    pub order: Vec<Scc>,
    pub artifacts: Option<GeneratedArtifacts>,
}

/// Parse then render one target file. Rendering failures (e.g. a missing
/// include path) are folded into the same diagnostics/status shape as
/// parse failures so callers only need one error-handling path.
pub fn generate_target(target: &Path, config: &GeneratorFileConfig) -> GenerateOutcome {
    let (status, unit, mut diagnostics) = parse_target(target, config);
    if status == ParseStatus::Failed {
        return GenerateOutcome {
            target: target.to_path_buf(),
            status,
            diagnostics,
            unit: None,
            order: Vec::new(),
            artifacts: None,
        };
    }

    let order = emission_order(&unit);
    let gen_config = GeneratorConfig {
        meta_suffix: config.meta_suffix.clone(),
        template_path: config.template_path.clone(),
        custom_fields: config.custom_fields_json.clone(),
    };

    let artifacts = Generator::new(&gen_config).and_then(|gen| gen.generate(&unit, &order, &gen_config));
    match artifacts {
        Ok(artifacts) => GenerateOutcome {
            target: target.to_path_buf(),
            status,
            diagnostics,
            unit: Some(unit),
            order,
            artifacts: Some(artifacts),
        },
        Err(err) => {
            diagnostics.push(err.to_string());
            GenerateOutcome {
                target: target.to_path_buf(),
                status: ParseStatus::Failed,
                diagnostics,
                unit: Some(unit),
                order,
                artifacts: None,
            }
        }
    }
}

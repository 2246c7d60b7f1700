//! Wires the Meta Unit, the emission order, and the Template Set together.
//! One `Generator` per configuration; `generate` may be called once per
//! Meta Unit to produce the static artifact plus the two dynamic
//! artifacts.

use std::path::PathBuf;

use handlebars::Handlebars;
use serde_json::Value;

use lux_analysis::Scc;
use lux_meta::MetaUnit;

use crate::context::{self, RenderContext};
use crate::error::Result;

const STATIC_ARTIFACT: &str = include_str!("templates/static_artifact.hbs");
const DYNAMIC_RECORDS: &str = include_str!("templates/dynamic_records.hbs");
const DYNAMIC_FUNCTIONS: &str = include_str!("templates/dynamic_functions.hbs");

const STATIC_ARTIFACT_NAME: &str = "static_artifact";
const DYNAMIC_RECORDS_NAME: &str = "dynamic_records";
const DYNAMIC_FUNCTIONS_NAME: &str = "dynamic_functions";

/// Generator-facing slice of the configuration file.
/// `lux_cli` owns the rest (`out_dir`, `dry_run`, ...) and only threads
/// these fields through.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub meta_suffix: String,
    /// Directory holding override `.hbs` files; falls back to the built-in
    /// templates for any file not present there.
    pub template_path: Option<PathBuf>,
    pub custom_fields: Value,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            meta_suffix: ".meta.hpp".to_string(),
            template_path: None,
            custom_fields: Value::Null,
        }
    }
}

pub struct GeneratedArtifacts {
    pub static_artifact: String,
    pub dynamic_records: String,
    pub dynamic_functions: String,
}

pub struct Generator {
    handlebars: Handlebars<'static>,
}

impl Generator {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_template_string(
            STATIC_ARTIFACT_NAME,
            Self::load(config, "static_artifact.hbs", STATIC_ARTIFACT)?,
        )?;
        handlebars.register_template_string(
            DYNAMIC_RECORDS_NAME,
            Self::load(config, "dynamic_records.hbs", DYNAMIC_RECORDS)?,
        )?;
        handlebars.register_template_string(
            DYNAMIC_FUNCTIONS_NAME,
            Self::load(config, "dynamic_functions.hbs", DYNAMIC_FUNCTIONS)?,
        )?;
        Ok(Self { handlebars })
    }

    fn load(config: &GeneratorConfig, filename: &str, builtin: &'static str) -> Result<String> {
        if let Some(dir) = &config.template_path {
            let path = dir.join(filename);
            if path.exists() {
                return Ok(std::fs::read_to_string(path)?);
            }
        }
        Ok(builtin.to_string())
    }

    /// Render the static artifact plus the two dynamic artifacts for `unit`,
    /// with types visited in the dependency-respecting order `order` gives.
    pub fn generate(&self, unit: &MetaUnit, order: &[Scc], config: &GeneratorConfig) -> Result<GeneratedArtifacts> {
        let ctx = context::build_context(unit, order, config.custom_fields.clone());
        log::info!("rendering artifacts for meta unit '{}'", unit.name());
        Ok(GeneratedArtifacts {
            static_artifact: self.render(STATIC_ARTIFACT_NAME, &ctx)?,
            dynamic_records: self.render(DYNAMIC_RECORDS_NAME, &ctx)?,
            dynamic_functions: self.render(DYNAMIC_FUNCTIONS_NAME, &ctx)?,
        })
    }

    fn render(&self, name: &str, ctx: &RenderContext) -> Result<String> {
        Ok(self.handlebars.render(name, ctx)?)
    }
}

//! Generator configuration file: loaded from JSON or TOML, selected by
//! the file's extension so either format works without a separate flag.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{ConfigError, Result};

fn default_marker() -> String {
    "LUX::META".to_string()
}

fn default_meta_suffix() -> String {
    ".meta.hpp".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorFileConfig {
    /// Annotation prefix to match; `lux_parser::ParseOptions`
    /// wants the trailing `;` appended, handled in `to_parse_options`.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Directory holding override templates; built-in defaults are used
    /// for any file not present there.
    pub template_path: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub compile_commands: Option<PathBuf>,
    pub target_files: Vec<PathBuf>,
    pub source_file: Option<String>,
    #[serde(default = "default_meta_suffix")]
    pub meta_suffix: String,
    #[serde(default)]
    pub extra_compile_options: Vec<String>,
    #[serde(default)]
    pub custom_fields_json: Value,
    #[serde(default)]
    pub serial_meta: bool,
    #[serde(default)]
    pub dry_run: bool,
    /// Roots `target_files` entries are resolved relative to, for computing
    /// each output file's path under `out_dir`.
    #[serde(default)]
    pub include_roots: Vec<PathBuf>,
}

pub fn load(path: &Path) -> Result<GeneratorFileConfig> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let config: GeneratorFileConfig = if ext == "toml" {
        toml::from_str(&text)?
    } else {
        serde_json::from_str(&text)?
    };
    if config.target_files.is_empty() {
        return Err(ConfigError::MissingKey("target_files".into()));
    }
    if config.include_roots.is_empty() {
        return Err(ConfigError::MissingKey("include_roots".into()));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str, ext: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        path.push(format!("lux_cli_config_test_{nanos}.{ext}"));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn json_config_is_loaded_with_defaults_filled_in() {
        let path = write_temp(
            r#"{"out_dir": "out", "target_files": ["a.hpp"], "include_roots": ["."]}"#,
            "json",
        );
        let cfg = load(&path).unwrap();
        assert_eq!(cfg.marker, "LUX::META");
        assert_eq!(cfg.meta_suffix, ".meta.hpp");
        assert!(!cfg.serial_meta);
        assert!(!cfg.dry_run);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn toml_config_is_selected_by_extension() {
        let path = write_temp(
            "out_dir = \"out\"\ntarget_files = [\"a.hpp\"]\ninclude_roots = [\".\"]\nmarker = \"REFL::MARK\"\n",
            "toml",
        );
        let cfg = load(&path).unwrap();
        assert_eq!(cfg.marker, "REFL::MARK");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_target_files_is_a_missing_key_error() {
        let path = write_temp(r#"{"out_dir": "out", "target_files": [], "include_roots": ["."]}"#, "json");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(_)));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let err = load(Path::new("/nonexistent/lux_cli_config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

//! `ParseOptions`: the inputs to a single `parse` call.

/// Default annotation marker prefix, matching the original
/// `LUX_REF_MARK_PREFIX` constant verbatim.
pub const DEFAULT_MARKER_SYMBOL: &str = "LUX::META;";

/// Namespaces the discovery pass never recurses into, regardless of
/// configuration.
pub const DEFAULT_SKIP_NAMESPACES: &[&str] = &["std"];

pub struct ParseOptions<'a> {
    pub name: String,
    pub version: String,
    /// Attribute payload prefix recognized as a reflection annotation.
    pub marker_symbol: String,
    /// Compiler invocation flags forwarded to `AstAdapter::open_translation_unit`.
    pub commands: Vec<String>,
    pub pch_file: Option<String>,
    /// Namespaces (by spelling) the discovery pass does not recurse into,
    /// in addition to `DEFAULT_SKIP_NAMESPACES`.
    pub skip_namespaces: Vec<String>,
    /// Invoked once per front-end diagnostic and once per absorbed
    /// per-declaration failure.
    pub diagnostic_sink: Box<dyn FnMut(&str) + 'a>,
}

impl<'a> ParseOptions<'a> {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            marker_symbol: DEFAULT_MARKER_SYMBOL.to_string(),
            commands: Vec::new(),
            pch_file: None,
            skip_namespaces: Vec::new(),
            diagnostic_sink: Box::new(|msg| log::warn!("{msg}")),
        }
    }

    pub(crate) fn skips(&self, name: &str) -> bool {
        DEFAULT_SKIP_NAMESPACES.contains(&name) || self.skip_namespaces.iter().any(|s| s == name)
    }
}

/// Outcome of a `parse` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    Success,
    Failed,
}

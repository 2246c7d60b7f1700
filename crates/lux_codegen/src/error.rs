use thiserror::Error;

/// A template refers to data the Meta Unit does not contain, or the
/// generator cannot place an output file. Fatal for the one output file
/// it concerns; other files are still attempted.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The source file being generated for falls outside every configured
    /// include root, so no relative output path can be computed.
    #[error("no configured include root contains {0}")]
    MissingIncludePath(String),

    #[error("template registration failed: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("template rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

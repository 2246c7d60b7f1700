use thiserror::Error;

/// Translation-unit-level failure from the AST front end.
/// Fatal for that file only — the caller moves on to the next target file.
#[derive(Debug, Error)]
pub enum FrontEndError {
    #[error("failed to open translation unit {path}: {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("cursor {0:?} has no associated type")]
    NoAssociatedType(u32),

    #[error("front end reported {0} fatal diagnostic(s)")]
    FatalDiagnostics(usize),
}

pub type Result<T> = std::result::Result<T, FrontEndError>;

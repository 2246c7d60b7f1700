use thiserror::Error;

/// Errors a Meta Unit can raise. Only `InvariantViolation` and the
/// serialization kinds are fatal in this crate; parse-level absorption of
/// `UnsupportedConstruct`/diagnostics happens one layer up, in `lux_parser`.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("duplicate id registered twice with different payloads: {0}")]
    IdCollision(String),

    #[error("malformed meta unit json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dangling reference while deserializing: {0}")]
    DanglingReference(String),
}

pub type Result<T> = std::result::Result<T, MetaError>;

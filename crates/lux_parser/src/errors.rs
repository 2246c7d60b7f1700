use lux_frontend::FrontEndError;
use lux_meta::MetaError;
use thiserror::Error;

/// Errors `lux_parser::parse` can surface to its caller. Only front-end
/// failure and invariant violation propagate this far — everything else
/// (diagnostics, unsupported constructs) is absorbed into the
/// `diagnostic_sink` callback instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    FrontEnd(#[from] FrontEndError),

    #[error("invariant violation while registering declarations: {0}")]
    InvariantViolation(#[from] MetaError),
}

pub type Result<T> = std::result::Result<T, ParseError>;

//! # Error types
//!
//! One error enum for the whole pipeline. Lookup-level failures live in
//! [`crate::Resolver::pubchem_api::LookupError`] and only reach the caller
//! as part of [`HofCalcError::UnparseableToken`] once every resolution stage
//! of a token has been exhausted.
use crate::Resolver::fragment_resolver::StageAttempt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HofCalcError {
    #[error("unable to interpret '{token}' as a chemical formula or find it by lookup (tried: {})",
        format_attempts(.attempts))]
    UnparseableToken {
        token: String,
        attempts: Vec<StageAttempt>,
    },
    #[error("element '{symbol}' not recognized")]
    UnrecognizedElement { symbol: String },
    #[error("no input given")]
    EmptyInput,
    #[error("total volume of the formula is zero, density is undefined")]
    DegenerateVolume,
    #[error("invalid Hofmann volume table: {0}")]
    InvalidVolumeTable(String),
    #[error("invalid value '{value}' for setting '{key}'")]
    InvalidSetting { key: String, value: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger already initialised: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_attempts(attempts: &[StageAttempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("{} ({})", a.stage, a.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

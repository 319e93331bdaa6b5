//! Fatal analysis errors.
//!
//! Indicator warm-up is not an error: it surfaces as an absent reading and
//! the rules that need it abstain.

use crate::data::DataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("data fetch failed: {0}")]
    DataFetch(#[source] DataError),

    #[error("schema validation failed: {detail}")]
    SchemaValidation { detail: String },

    #[error("insufficient history: {detail}")]
    InsufficientHistory { detail: String },
}

impl AnalysisError {
    pub fn schema(detail: impl Into<String>) -> Self {
        Self::SchemaValidation {
            detail: detail.into(),
        }
    }

    pub fn insufficient(detail: impl Into<String>) -> Self {
        Self::InsufficientHistory {
            detail: detail.into(),
        }
    }
}

/// Missing columns are schema failures and an empty post-ingest window is a
/// history failure; everything else the provider raises is a fetch failure.
impl From<DataError> for AnalysisError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::MissingColumn { .. } => Self::schema(err.to_string()),
            DataError::NoUsableBars { .. } => Self::insufficient(err.to_string()),
            other => Self::DataFetch(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_column_becomes_schema_error() {
        let err: AnalysisError = DataError::MissingColumn {
            column: "volume".into(),
            path: PathBuf::from("X.csv"),
        }
        .into();
        assert!(matches!(err, AnalysisError::SchemaValidation { .. }));
        assert!(err.to_string().contains("volume"));
    }

    #[test]
    fn network_errors_stay_fetch_errors() {
        let err: AnalysisError = DataError::NetworkUnreachable("timeout".into()).into();
        assert!(matches!(err, AnalysisError::DataFetch(_)));
        assert_eq!(err.to_string(), "data fetch failed: network unreachable: timeout");
    }
}

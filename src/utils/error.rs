// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Errors raised while reading the input document. All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Could not read input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file {path} is not a valid JSON document: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// Change statistics that could not be computed for one size.
// These stay local to that size and never abort the whole report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Base price for {size} is zero, change rate is undefined")]
    ZeroBasePrice { size: String },

    #[error("Change rate for {size} is not a finite number")]
    NonFinite { size: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Input could not be loaded: {0}")]
    Source(#[from] SourceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_converts_into_app_error() {
        let source = SourceError::Io {
            path: PathBuf::from("onlycable.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let err: AppError = source.into();
        assert!(matches!(err, AppError::Source(SourceError::Io { .. })));
        assert_eq!(
            err.to_string(),
            "Input could not be loaded: Could not read input file onlycable.json: missing"
        );
    }

    #[test]
    fn test_json_error_converts_into_app_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = json_err.into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}

//! Error types for pnlweb-core
//!
//! Report views never surface errors to the user: a failing data source turns
//! into an empty or zeroed page, and storage misses map straight to a status
//! code. `CoreError` covers what can stop the server from booting.

use serde::Serialize;
use std::io;
use thiserror::Error;

use crate::assets::AssetError;

/// Stable, machine-readable error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    AssetCopyFailed,
    InvalidFormat,
    Unreadable,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AssetCopyFailed => "ASSET_COPY_FAILED",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::Unreadable => "UNREADABLE",
        }
    }
}

/// Serializable summary of a [`CoreError`]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("asset copy: {0}")]
    Asset(#[from] AssetError),

    #[error("{path} is not valid: {message}")]
    InvalidFormat { path: String, message: String },

    #[error("could not read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Asset(_) => ErrorCode::AssetCopyFailed,
            Self::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            Self::Unreadable { .. } => ErrorCode::Unreadable,
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        let hint = match self {
            Self::InvalidFormat { path, .. } => Some(format!(
                "{} should hold grossProfit, revenue and expenses sections",
                path
            )),
            Self::Unreadable { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                Some("check data.fixtures in the config file".to_string())
            }
            Self::Asset(_) => Some("assets.target_dir must be writable".to_string()),
            Self::Unreadable { .. } => None,
        };
        ErrorDetails {
            code: self.code(),
            message: self.to_string(),
            hint,
        }
    }

    /// Log the details at `error` level
    pub fn log_details(&self) {
        let details = self.to_details();
        match &details.hint {
            Some(hint) => log::error!("[{}] {} ({})", details.code.as_str(), details.message, hint),
            None => log::error!("[{}] {}", details.code.as_str(), details.message),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn codes_follow_variants() {
        let err = CoreError::from(AssetError::Write {
            path: PathBuf::from("/srv/static/pnlweb/reports.css"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(err.code(), ErrorCode::AssetCopyFailed);
        assert!(err.to_string().contains("reports.css"));

        let err = CoreError::Unreadable {
            path: "fixtures.json".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.code().as_str(), "UNREADABLE");
        assert!(err.to_details().hint.is_none());
    }

    #[test]
    fn details_serialize_with_hint() {
        let err = CoreError::InvalidFormat {
            path: "fixtures.json".to_string(),
            message: "expected object".to_string(),
        };
        let value = serde_json::to_value(err.to_details()).unwrap();
        assert_eq!(value["code"], "INVALID_FORMAT");
        assert_eq!(value["message"], "fixtures.json is not valid: expected object");
        assert!(value["hint"].as_str().unwrap().starts_with("fixtures.json"));

        let missing = CoreError::Unreadable {
            path: "fixtures.json".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let value = serde_json::to_value(missing.to_details()).unwrap();
        assert_eq!(value["code"], ErrorCode::Unreadable.as_str());
        assert!(value["hint"].as_str().unwrap().contains("data.fixtures"));
    }
}

//! Error types for pnlweb-config

use serde::Serialize;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Machine-readable kind of a [`ConfigError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    FileNotFound,
    InvalidYaml,
    InvalidJson,
    InvalidValue,
    Unreadable,
}

impl ConfigErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::InvalidYaml => "INVALID_YAML",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidValue => "INVALID_VALUE",
            Self::Unreadable => "UNREADABLE",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{path} does not exist")]
    FileNotFound { path: String },

    #[error("{path} is not valid YAML: {message}")]
    InvalidYaml { path: String, message: String },

    /// Route and label overlays must be flat JSON objects of strings
    #[error("overlay is not a flat JSON object: {message}")]
    InvalidJson { message: String },

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("could not read {path}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            Self::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            Self::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            Self::InvalidJson { .. } => ConfigErrorCode::InvalidJson,
            Self::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            Self::Unreadable { .. } => ConfigErrorCode::Unreadable,
        }
    }

    /// `read_to_string` with a missing file reported as `FileNotFound`
    pub(crate) fn read(path: &Path) -> ConfigResult<String> {
        let display = || path.display().to_string();
        std::fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound { path: display() },
            _ => Self::Unreadable {
                path: display(),
                source,
            },
        })
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, saving or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `FolioConfig`
    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config could not be rendered as TOML
    #[error("cannot encode config as TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    /// Config file or its `.folio` directory could not be written
    #[error("cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No home directory, so `~/.folio` cannot be used
    #[error("could not determine home directory for ~/.folio")]
    NoHomeDir,

    /// A key holds a value outside its allowed range or format
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// An enumerated setting holds an unrecognised name
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A setting depends on a section that is absent
    #[error("'{key}' requires a [{section}] section")]
    MissingSection {
        key: &'static str,
        section: &'static str,
    },
}

impl ConfigError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn unknown_variant(
        kind: &'static str,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
            expected,
        }
    }
}

use crate::conf::validation::ValidationReport;
use crate::error::ProxyAddrError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO
    //-------------------------------------------------------------------------
    #[error("failed to read policy file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    //-------------------------------------------------------------------------
    // Parsing
    //-------------------------------------------------------------------------
    #[error("invalid policy file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    //-------------------------------------------------------------------------
    // Trust
    //-------------------------------------------------------------------------
    #[error("invalid trust value in {path}: {source}")]
    Trust {
        path: PathBuf,
        #[source]
        source: ProxyAddrError,
    },

    #[error("policy validation failed for {path} ({} errors)", .report.errors.len())]
    Validation {
        path: PathBuf,
        report: ValidationReport,
    },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn trust(path: impl Into<PathBuf>, source: ProxyAddrError) -> Self {
        Self::Trust {
            path: path.into(),
            source,
        }
    }
}

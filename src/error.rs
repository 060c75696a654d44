//! Error types for the alt-life core engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the alt-life core engine
#[derive(Error, Debug)]
pub enum AltLifeError {
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid save name: {0:?}")]
    InvalidSaveName(String),

    #[error("Unsupported save version {found} (expected {expected})")]
    SaveVersion { found: u32, expected: u32 },

    #[error("Background task failed: {0}")]
    Task(String),
}

#[cfg(feature = "python")]
impl From<AltLifeError> for pyo3::PyErr {
    fn from(err: AltLifeError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyIOError, PyKeyError, PyRuntimeError, PyValueError};

        let msg = err.to_string();
        match err {
            AltLifeError::ScenarioNotFound(_) => PyKeyError::new_err(msg),
            AltLifeError::Io { .. } => PyIOError::new_err(msg),
            AltLifeError::InvalidCondition(_)
            | AltLifeError::Parse { .. }
            | AltLifeError::Serialization(_)
            | AltLifeError::InvalidSaveName(_)
            | AltLifeError::SaveVersion { .. } => PyValueError::new_err(msg),
            AltLifeError::Task(_) => PyRuntimeError::new_err(msg),
        }
    }
}

/// Result type alias for the alt-life core engine
pub type Result<T> = std::result::Result<T, AltLifeError>;

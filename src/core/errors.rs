// src/core/errors.rs

//! Defines the primary error type for the generator.

use thiserror::Error;

/// The main error enum, representing the failures the generator handles
/// itself. Anything else (an unwritable root directory, for instance)
/// propagates and aborts the run.
#[derive(Error, Debug)]
pub enum ClusterGenError {
    #[error("Invalid value '{value}' for setting '{key}': expected an integer")]
    InvalidSetting { key: String, value: String },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

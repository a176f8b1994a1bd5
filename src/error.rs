//! Error handling module for JSONScript
//!
//! Provides centralized error types using thiserror. Fatal errors (workspace
//! and settings) stop the run; script errors are reported on the console and
//! the run still ends normally.

use std::path::PathBuf;

use thiserror::Error;

use crate::messages::Message;

/// Main error type for the loader
#[derive(Error, Debug)]
pub enum JsonScriptError {
    /// IO errors (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Workspace directory errors
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Settings record errors
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, JsonScriptError>;

/// Failures while resolving or creating the script directory.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Could not determine the home directory")]
    HomeNotFound,

    #[error("Failed to create directory {path:?}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal settings failures. Read and parse failures are not here: those are
/// repaired by writing the default record.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to write default settings to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{path:?} has no \"silentStartup\" entry")]
    MissingSilentStartup { path: PathBuf },
}

/// Everything that can go wrong between opening main.json and the end of the
/// payload's execution.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Failed to open {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("main.json is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("main.json is not a JSON object")]
    NotAnObject,

    #[error("main.json has no \"code\" entry")]
    MissingCode,

    #[error("\"code\" in main.json is not a string")]
    CodeNotString,

    #[error("Syntax error in code: {0}")]
    InvalidCode(String),

    #[error("Error while running code: {0}")]
    Execution(String),
}

/// The three ways a script failure is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingCode,
    InvalidCode,
    /// Catch-all. Also covers runtime errors raised by otherwise valid code.
    Unusable,
}

impl FailureKind {
    /// Console line printed for this kind of failure.
    pub fn message(self) -> Message {
        match self {
            Self::MissingCode => Message::CodeNotFound,
            Self::InvalidCode => Message::InvalidCode,
            Self::Unusable => Message::ScriptUnusable,
        }
    }
}

impl ScriptError {
    /// Collapse the detailed error into the kind shown on the console.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingCode => FailureKind::MissingCode,
            Self::InvalidCode(_) => FailureKind::InvalidCode,
            Self::Read { .. }
            | Self::Parse(_)
            | Self::NotAnObject
            | Self::CodeNotString
            | Self::Execution(_) => FailureKind::Unusable,
        }
    }
}

//! Location of the JSONScript files and creation of their directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::WorkspaceError;

/// Settings file name inside the workspace directory.
pub const SETTINGS_FILE: &str = "compilerSettings.json";
/// Script file name inside the workspace directory.
pub const SCRIPT_FILE: &str = "main.json";

/// The directory holding `compilerSettings.json` and `main.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// `<home>/Documents/JSONScript/Python`
    pub fn under_home(home: impl AsRef<Path>) -> Self {
        Self {
            dir: home
                .as_ref()
                .join("Documents")
                .join("JSONScript")
                .join("Python"),
        }
    }

    /// Workspace under the current user's home directory.
    pub fn resolve() -> Result<Self, WorkspaceError> {
        let home = dirs::home_dir().ok_or(WorkspaceError::HomeNotFound)?;
        debug!("Resolved home directory: {:?}", home);
        Ok(Self::under_home(home))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    pub fn script_path(&self) -> PathBuf {
        self.dir.join(SCRIPT_FILE)
    }

    pub fn exists(&self) -> bool {
        self.dir.exists()
    }

    /// Create the directory itself. Missing parents are an error, not
    /// created.
    pub fn create(&self) -> Result<(), WorkspaceError> {
        fs::create_dir(&self.dir).map_err(|source| WorkspaceError::Create {
            path: self.dir.clone(),
            source,
        })?;
        debug!("Created workspace directory {:?}", self.dir);
        Ok(())
    }
}

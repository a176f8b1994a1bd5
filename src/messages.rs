//! Console lines printed by the loader.
//!
//! Kept byte-for-byte stable: users and wrapper scripts match on them.

use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Message {
    #[strum(serialize = "Provided directory does not exist, creating...")]
    CreatingDirectory,
    #[strum(serialize = "Created!")]
    DirectoryCreated,
    #[strum(serialize = "Validating compilerSettings.json...")]
    ValidatingSettings,
    #[strum(serialize = "compilerSettings.json does not exist, creating...")]
    CreatingSettings,
    #[strum(serialize = "Checking main.json...")]
    CheckingScript,
    #[strum(serialize = "Fetching main.json...")]
    FetchingScript,
    #[strum(serialize = "Running main.json...")]
    RunningScript,
    #[strum(
        serialize = "The code parameter was not found in main.json. Ensure the parameter was added."
    )]
    CodeNotFound,
    #[strum(serialize = "An exception occurred while running the code. Ensure that it is valid.")]
    InvalidCode,
    #[strum(
        serialize = "Could not find main.json. Ensure the file is valid and placed in the correct directory."
    )]
    ScriptUnusable,
}

impl Message {
    /// Progress lines, the ones silent mode suppresses.
    pub fn is_progress(self) -> bool {
        matches!(
            self,
            Self::CheckingScript | Self::FetchingScript | Self::RunningScript
        )
    }
}

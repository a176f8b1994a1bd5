//! JSONScript bootstrap loader library
//!
//! Ensures `~/Documents/JSONScript/Python` and its `compilerSettings.json`
//! exist, then runs the Lua code stored under `code` in `main.json`.

pub mod bootstrap;
pub mod cli;
pub mod engine;
pub mod error;
pub mod messages;
pub mod script;
pub mod settings;
pub mod workspace;

// Re-export main types for convenience
pub use bootstrap::{Bootstrap, RunReport};
pub use engine::LuaEngine;
pub use error::{FailureKind, JsonScriptError, ScriptError, SettingsError, WorkspaceError};
pub use messages::Message;
pub use settings::CompilerSettings;
pub use workspace::Workspace;

//! The loader pipeline: directory, settings, script, execution.
//!
//! One pass per call to [`Bootstrap::run`]. Everything the user sees is
//! written to the `out` sink, payload output included, so a run can be
//! captured in full. Two stages may print without a settings record in hand
//! (directory and settings), so they are never silenced.
//!
//! Concurrent runs against the same workspace are not coordinated. Two
//! processes may both repair the settings file or race on directory
//! creation; the losing `create_dir` fails the run.

use std::io::{self, Write};

use log::{debug, info, warn};

use crate::engine::LuaEngine;
use crate::error::{Result, ScriptError};
use crate::messages::Message;
use crate::settings::{self, CompilerSettings};
use crate::script;
use crate::workspace::{SCRIPT_FILE, Workspace};

/// What a single pass did.
#[derive(Debug)]
pub struct RunReport {
    /// The workspace directory did not exist and was created.
    pub created_directory: bool,
    /// The settings file was missing or unreadable and was rewritten.
    pub repaired_settings: bool,
    pub settings: CompilerSettings,
    /// Script tier result. Reported on the console, never fatal.
    pub outcome: std::result::Result<(), ScriptError>,
}

impl RunReport {
    pub fn executed(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub struct Bootstrap {
    workspace: Workspace,
    engine: LuaEngine,
}

/// Why the script stage stopped early.
enum Interrupted {
    Script(ScriptError),
    Console(io::Error),
}

impl From<ScriptError> for Interrupted {
    fn from(err: ScriptError) -> Self {
        Self::Script(err)
    }
}

impl From<io::Error> for Interrupted {
    fn from(err: io::Error) -> Self {
        Self::Console(err)
    }
}

fn say(out: &mut dyn Write, message: Message) -> io::Result<()> {
    writeln!(out, "{message}")
}

/// Like [`say`], but dropped in silent mode.
fn progress(settings: &CompilerSettings, out: &mut dyn Write, message: Message) -> io::Result<()> {
    if settings.silent_startup {
        return Ok(());
    }
    say(out, message)
}

impl Bootstrap {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            engine: LuaEngine::new(),
        }
    }

    /// Run the whole pipeline once.
    ///
    /// Returns `Err` only for fatal problems: the directory cannot be
    /// created, the default settings cannot be written, the settings file
    /// has no `silentStartup`, or the console itself fails.
    pub fn run(&self, out: &mut dyn Write) -> Result<RunReport> {
        info!("Using workspace {:?}", self.workspace.dir());

        let created_directory = self.ensure_directory(out)?;
        let (settings, repaired_settings) = self.load_settings(out)?;

        let outcome = match self.run_script(&settings, out) {
            Ok(()) => Ok(()),
            Err(Interrupted::Console(err)) => return Err(err.into()),
            Err(Interrupted::Script(err)) => {
                warn!("main.json failed: {}", err);
                say(out, err.kind().message())?;
                Err(err)
            }
        };

        Ok(RunReport {
            created_directory,
            repaired_settings,
            settings,
            outcome,
        })
    }

    fn ensure_directory(&self, out: &mut dyn Write) -> Result<bool> {
        if self.workspace.exists() {
            debug!("Workspace directory already present");
            return Ok(false);
        }

        say(out, Message::CreatingDirectory)?;
        self.workspace.create()?;
        say(out, Message::DirectoryCreated)?;
        Ok(true)
    }

    fn load_settings(&self, out: &mut dyn Write) -> Result<(CompilerSettings, bool)> {
        let path = self.workspace.settings_path();
        say(out, Message::ValidatingSettings)?;

        let (document, repaired) = match settings::read_document(&path) {
            Ok(document) => (document, false),
            Err(err) => {
                debug!("Settings unreadable ({}), writing defaults", err);
                say(out, Message::CreatingSettings)?;
                (settings::write_default(&path)?, true)
            }
        };

        let settings = CompilerSettings::from_document(&document, &path)?;
        debug!("Loaded settings: {:?}", settings);
        Ok((settings, repaired))
    }

    fn run_script(
        &self,
        settings: &CompilerSettings,
        out: &mut dyn Write,
    ) -> std::result::Result<(), Interrupted> {
        progress(settings, out, Message::CheckingScript)?;
        let path = self.workspace.script_path();
        let mut file = script::open(&path)?;

        progress(settings, out, Message::FetchingScript)?;
        let document = script::parse(&mut file, &path)?;

        progress(settings, out, Message::RunningScript)?;
        let code = script::code(&document)?;
        self.engine.execute(SCRIPT_FILE, code, out)?;

        info!("main.json finished");
        Ok(())
    }
}

//! Script record (`main.json`) loading.
//!
//! Loading is split into the same steps the loader reports progress for:
//! open, parse, then pull out the `code` entry.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::ScriptError;

/// Key holding the source text.
pub const CODE_KEY: &str = "code";

/// Open the script file. A directory at `path` fails here, not on read.
pub fn open<P: AsRef<Path>>(path: P) -> Result<File, ScriptError> {
    let path = path.as_ref();
    let read_error = |source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    if file.metadata().map_err(read_error)?.is_dir() {
        return Err(read_error(io::Error::new(
            io::ErrorKind::IsADirectory,
            "is a directory",
        )));
    }
    Ok(file)
}

/// Read the whole file and parse it as JSON. Only malformed content is a
/// parse error; failing to read is still [`ScriptError::Read`].
pub fn parse(file: &mut File, path: &Path) -> Result<Value, ScriptError> {
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&content).map_err(ScriptError::Parse)
}

/// Extract the `code` string. Any other entries are ignored.
pub fn code(document: &Value) -> Result<&str, ScriptError> {
    let object = document.as_object().ok_or(ScriptError::NotAnObject)?;
    let code = object.get(CODE_KEY).ok_or(ScriptError::MissingCode)?;
    code.as_str().ok_or(ScriptError::CodeNotString)
}

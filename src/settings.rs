//! Settings record (`compilerSettings.json`) handling.
//!
//! On disk the only recognized entry is `silentStartup`, stored as the
//! *string* `"true"` or `"false"`. It is turned into a real boolean as soon as
//! the file is read. Anything other than the exact string `"false"` (including
//! the JSON boolean `false`) means silent.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, SettingsError};

/// Key of the startup verbosity entry.
pub const SILENT_STARTUP_KEY: &str = "silentStartup";

/// Typed view of the settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompilerSettings {
    /// Suppress the loader's own progress lines.
    pub silent_startup: bool,
}

/// On-disk shape written by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsRecord {
    #[serde(rename = "silentStartup")]
    pub silent_startup: String,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        CompilerSettings::default().to_record()
    }
}

impl CompilerSettings {
    /// Interpret a parsed settings document.
    ///
    /// A document without `silentStartup` (or one that is not an object) is
    /// fatal; it is never repaired.
    pub fn from_document(
        document: &Value,
        path: &Path,
    ) -> std::result::Result<Self, SettingsError> {
        let value = document
            .get(SILENT_STARTUP_KEY)
            .ok_or_else(|| SettingsError::MissingSilentStartup {
                path: path.to_path_buf(),
            })?;

        Ok(Self {
            silent_startup: is_silent(value),
        })
    }

    pub fn to_record(&self) -> SettingsRecord {
        SettingsRecord {
            silent_startup: self.silent_startup.to_string(),
        }
    }

    /// Write the record with four-space indentation.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), SettingsError> {
        let path = path.as_ref();
        let json = to_pretty_json(&self.to_record())?;
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Wrote settings to {:?}", path);
        Ok(())
    }
}

/// `silentStartup` is off only for the exact string `"false"`.
pub fn is_silent(value: &Value) -> bool {
    !matches!(value, Value::String(s) if s == "false")
}

/// Read and parse the settings file. Any error here is recoverable by the
/// caller through [`write_default`].
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let content = fs::read_to_string(&path)?;
    let document = serde_json::from_str(&content)?;
    Ok(document)
}

/// Overwrite (or create) the settings file with the default record and return
/// the document that was written.
pub fn write_default<P: AsRef<Path>>(path: P) -> std::result::Result<Value, SettingsError> {
    let settings = CompilerSettings::default();
    settings.save_to_file(path)?;
    Ok(serde_json::to_value(settings.to_record())?)
}

fn to_pretty_json<T: Serialize>(value: &T) -> std::result::Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_default_record() {
        assert_eq!(
            serde_json::to_value(SettingsRecord::default()).unwrap(),
            json!({"silentStartup": "false"})
        );
    }

    #[test]
    fn test_silent_interpretation() {
        assert!(!is_silent(&json!("false")));
        assert!(is_silent(&json!("true")));
        assert!(is_silent(&json!(false)), "boolean false is not the string \"false\"");
        assert!(is_silent(&json!("False")));
        assert!(is_silent(&json!(null)));
        assert!(is_silent(&json!(0)));
    }

    #[test]
    fn test_from_document() {
        let path = Path::new("compilerSettings.json");
        let settings =
            CompilerSettings::from_document(&json!({"silentStartup": "true", "other": 1}), path)
                .unwrap();
        assert!(settings.silent_startup);

        let settings =
            CompilerSettings::from_document(&json!({"silentStartup": "false"}), path).unwrap();
        assert!(!settings.silent_startup);
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let path = Path::new("compilerSettings.json");
        for document in [json!({}), json!([]), json!("false"), json!({"silent": "false"})] {
            let err = CompilerSettings::from_document(&document, path).unwrap_err();
            assert!(matches!(err, SettingsError::MissingSilentStartup { .. }));
        }
    }

    #[test]
    fn test_write_default_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("compilerSettings.json");

        let written = write_default(&path).unwrap();
        assert_eq!(written, json!({"silentStartup": "false"}));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n    \"silentStartup\": \"false\"\n}");
    }

    #[test]
    fn test_read_document_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("compilerSettings.json");
        write_default(&path).unwrap();

        let document = read_document(&path).unwrap();
        assert_eq!(document, json!({"silentStartup": "false"}));
    }

    #[test]
    fn test_read_document_failures() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("compilerSettings.json");
        assert!(read_document(&path).is_err(), "missing file");

        fs::write(&path, "{ not json").unwrap();
        assert!(read_document(&path).is_err(), "malformed file");
    }

    #[test]
    fn test_non_finite_numbers_are_unreadable() {
        // serde_json has no NaN/Infinity literals, so such a file gets repaired.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("compilerSettings.json");
        fs::write(&path, r#"{"silentStartup": "true", "x": NaN}"#).unwrap();
        assert!(read_document(&path).is_err());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("compilerSettings.json");
        let err = CompilerSettings::default().save_to_file(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Write { .. }));
    }
}

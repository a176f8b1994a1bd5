//! Embedded Lua executor for the `code` payload.
//!
//! The payload runs in the interpreter's global environment with the standard
//! library loaded. There is no sandbox: the payload can reach the filesystem
//! and the process through `io` and `os` just like any Lua program.
//!
//! # Output
//!
//! While a payload runs, the global `print` writes to the sink handed to
//! [`LuaEngine::execute`] instead of the process stdout. It keeps Lua's
//! semantics: arguments go through `tostring`, are joined by tabs and end
//! with a newline. `io.write` is not redirected: it goes through C stdio,
//! which is block buffered when stdout is a pipe, so its text can land after
//! later `print` and loader lines.

use std::io::Write;

use log::debug;
use mlua::{Function, Lua, Value, Variadic};

use crate::error::ScriptError;

pub struct LuaEngine {
    lua: Lua,
}

impl LuaEngine {
    pub fn new() -> Self {
        Self { lua: Lua::new() }
    }

    /// Run `source` once. `chunk_name` shows up in Lua error messages.
    pub fn execute(
        &self,
        chunk_name: &str,
        source: &str,
        out: &mut dyn Write,
    ) -> Result<(), ScriptError> {
        debug!("Executing chunk {} ({} bytes)", chunk_name, source.len());
        self.lua
            .scope(|scope| {
                let print = scope.create_function_mut(move |lua, args: Variadic<Value>| {
                    let line = render_print_args(lua, &args)?;
                    writeln!(out, "{line}").map_err(mlua::Error::external)
                })?;
                self.lua.globals().set("print", print)?;
                self.lua.load(source).set_name(chunk_name).exec()
            })
            .map_err(classify)
    }
}

fn render_print_args(lua: &Lua, args: &[Value]) -> mlua::Result<String> {
    let tostring: Function = lua.globals().get("tostring")?;
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        parts.push(tostring.call::<String>(arg.clone())?);
    }
    Ok(parts.join("\t"))
}

/// Syntax errors come from compiling the chunk; everything else happened
/// while it ran.
fn classify(err: mlua::Error) -> ScriptError {
    match err {
        mlua::Error::SyntaxError { message, .. } => ScriptError::InvalidCode(message),
        other => ScriptError::Execution(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(engine: &LuaEngine, source: &str) -> (Result<(), ScriptError>, String) {
        let mut out = Vec::new();
        let result = engine.execute("main.json", source, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_print_goes_to_sink() {
        let engine = LuaEngine::new();
        let (result, out) = run(&engine, "print('hello')");
        assert!(result.is_ok());
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn test_print_uses_tostring_and_tabs() {
        let engine = LuaEngine::new();
        let (result, out) = run(&engine, "print(nil, true, 1.5, 'x')");
        assert!(result.is_ok());
        assert_eq!(out, "nil\ttrue\t1.5\tx\n");

        let (_, out) = run(&engine, "print()");
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_syntax_error_is_invalid_code() {
        let engine = LuaEngine::new();
        let (result, out) = run(&engine, "def f(:");
        assert!(matches!(result, Err(ScriptError::InvalidCode(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_runtime_error_is_execution_error() {
        let engine = LuaEngine::new();
        let (result, out) = run(&engine, "print('before'); error('boom')");
        match result {
            Err(ScriptError::Execution(message)) => assert!(message.contains("boom")),
            other => panic!("expected execution error, got {other:?}"),
        }
        assert_eq!(out, "before\n");

        let (result, _) = run(&engine, "no_such_function()");
        assert!(matches!(result, Err(ScriptError::Execution(_))));
    }

    #[test]
    fn test_globals_persist_between_runs() {
        let engine = LuaEngine::new();
        let (result, _) = run(&engine, "answer = 41");
        assert!(result.is_ok());

        let (result, out) = run(&engine, "print(answer + 1)");
        assert!(result.is_ok());
        assert_eq!(out, "42\n");
    }

    #[test]
    fn test_chunk_name_in_errors() {
        let engine = LuaEngine::new();
        let (result, _) = run(&engine, "error('where')");
        match result {
            Err(ScriptError::Execution(message)) => assert!(message.contains("main.json")),
            other => panic!("expected execution error, got {other:?}"),
        }
    }
}

//! JSONScript - Main entry point
//!
//! Resolves the workspace under the user's home directory and runs one
//! bootstrap pass against the real stdout.

use std::io::{Write, stdout};

use anyhow::{Context, Result};
use log::{debug, info};

use jsonscript::{Bootstrap, Workspace, cli::Cli};

/// Initialize the logger with appropriate settings
fn init_logger(verbose: bool) {
    use env_logger::Builder;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env() // Allows RUST_LOG env var to override
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    info!("JSONScript starting up");

    let workspace = Workspace::resolve().context("Failed to locate the JSONScript directory")?;
    let bootstrap = Bootstrap::new(workspace);

    let mut out = stdout().lock();
    let report = bootstrap.run(&mut out).context("JSONScript startup failed")?;
    out.flush().context("Failed to flush stdout")?;

    debug!("Run finished: {:?}", report);
    Ok(())
}

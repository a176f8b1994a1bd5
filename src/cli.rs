use clap::Parser;

/// JSONScript - runs the code stored in ~/Documents/JSONScript/Python/main.json
#[derive(Parser, Debug)]
#[command(name = "jsonscript")]
#[command(about = "Runs the Lua code embedded in a JSONScript main.json")]
#[command(version)]
pub struct Cli {
    /// Log loader internals to stderr (same as RUST_LOG=debug).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

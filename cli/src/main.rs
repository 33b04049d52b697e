//! votepool: command-line simulator for the voting round engine.

mod scenario;

use clap::Parser;
use scenario::Scenario;
use std::path::PathBuf;
use votepool_round::EngineConfig;
use votepool_utils::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "votepool", about = "Pooled-funds voting round simulator")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "VOTEPOOL_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log output format: "human" or "json".
    #[arg(long, default_value = "human", env = "VOTEPOOL_LOG_FORMAT", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Parse and validate an engine configuration file.
    #[command(name = "check-config")]
    CheckConfig {
        #[arg(long, env = "VOTEPOOL_CONFIG")]
        config: PathBuf,
    },
    /// Replay a scenario against in-memory ledger and exchange doubles and
    /// print the outcome as JSON.
    Simulate {
        #[arg(long)]
        scenario: PathBuf,

        /// Abort on the first failing step instead of recording it.
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, &cli.log_level);

    match cli.command {
        Command::CheckConfig { config } => {
            let path = config.to_string_lossy();
            let config = EngineConfig::from_toml_file(&path)?;
            tracing::info!(path = %path, owner = %config.owner, "config is valid");
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Simulate { scenario, strict } => {
            let loaded = Scenario::from_toml_file(&scenario)?;
            tracing::info!(
                path = %scenario.display(),
                steps = loaded.steps.len(),
                strict,
                "running scenario"
            );
            let report = loaded.run(strict)?;
            let failed = report.steps.iter().filter(|s| !s.ok).count();
            if failed > 0 {
                tracing::warn!(failed, "scenario finished with failed steps");
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use panzoom::config::{ENV_MAX_ZOOM, ENV_MIN_ZOOM, ENV_RESET_ZOOM};
use panzoom::{ConfigError, ViewConfig};

mod script;

use script::ScriptError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

#[derive(Parser, Debug)]
#[command(name = "panzoom-cli", about = "Replay host events through the pan/zoom controller")]
struct Cli {
    /// Lower zoom bound.
    #[arg(long, env = ENV_MIN_ZOOM)]
    min_zoom: Option<f64>,

    /// Upper zoom bound.
    #[arg(long, env = ENV_MAX_ZOOM)]
    max_zoom: Option<f64>,

    /// Zoom applied after every reset.
    #[arg(long, env = ENV_RESET_ZOOM)]
    reset_zoom: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON-lines script and print change notifications.
    Replay { script: PathBuf },
    /// Print the effective view config.
    Config,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = effective_config(&cli)?;

    match cli.command {
        Command::Replay { script } => run_replay(&script, config),
        Command::Config => {
            println!(
                "min_zoom={} max_zoom={} reset_zoom={} fit={} center={}",
                config.min_zoom, config.max_zoom, config.reset_zoom, config.fit, config.center
            );
            Ok(())
        }
    }
}

fn effective_config(cli: &Cli) -> Result<ViewConfig, ConfigError> {
    let mut config = ViewConfig::from_env()?;
    if let Some(v) = cli.min_zoom {
        config.min_zoom = v;
    }
    if let Some(v) = cli.max_zoom {
        config.max_zoom = v;
    }
    if let Some(v) = cli.reset_zoom {
        config.reset_zoom = v;
    }
    config.validate()?;
    Ok(config)
}

fn run_replay(path: &Path, config: ViewConfig) -> Result<(), CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    let steps = script::parse(&text)?;
    let records = script::replay(&steps, config)?;
    let stdout = io::stdout();
    script::write_records(&mut stdout.lock(), &records)?;
    Ok(())
}

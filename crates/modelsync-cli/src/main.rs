//! modelsync CLI - sync local and remote model inventories into openclaw.json.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod sync;

use config::{default_config_path, Config, ConfigError, DEFAULT_OLLAMA_API_URL, OLLAMA_API_URL_ENV};
use sync::{SyncError, SyncReport};

/// Sync Ollama models (and the Z.AI catalog) into the gateway configuration
#[derive(Parser, Debug)]
#[command(name = "modelsync")]
#[command(about = "Sync tool-capable Ollama models into openclaw.json", long_about = None)]
struct Args {
    /// Config file (default: $OPENCLAW_CONFIG_DIR/openclaw.json or $HOME/.openclaw/openclaw.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ollama API base URL used for capability lookups
    #[arg(long, env = OLLAMA_API_URL_ENV, default_value = DEFAULT_OLLAMA_API_URL)]
    ollama_url: String,

    /// Do not query the remote provider catalog
    #[arg(long)]
    skip_remote: bool,

    /// Print the merged config instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let config_path = match args.config {
            Some(path) => path,
            None => default_config_path()?,
        };
        let defaults = Config::default();
        Ok(Self {
            config_path,
            ollama_api_url: args.ollama_url,
            remote_provider: if args.skip_remote {
                None
            } else {
                defaults.remote_provider.clone()
            },
            dry_run: args.dry_run,
            ..defaults
        })
    }
}

fn init_tracing(verbose: u8) {
    let directive = match verbose {
        0 => "modelsync=warn",
        1 => "modelsync=info",
        _ => "modelsync=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    ExitCode::from(report_outcome(execute(args).await))
}

async fn execute(args: Args) -> Result<SyncReport, SyncError> {
    let config = Config::try_from(args)?;
    info!(
        config = %config.config_path.display(),
        ollama_url = %config.ollama_api_url,
        dry_run = config.dry_run,
        "Starting model sync"
    );
    sync::run(&config).await
}

/// Print the outcome and return the process exit status: 0 on success, 1 on any error.
fn report_outcome(result: Result<SyncReport, SyncError>) -> u8 {
    match result {
        Ok(report) => {
            if !report.written {
                println!("{}", report.rendered);
            }
            for line in report.summary("Z.AI") {
                println!("{}", line);
            }
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

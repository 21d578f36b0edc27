mod analyze_cmd;
mod config_cmd;
mod image_source;
mod terminal_output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use analyze_cmd::AnalyzeArgs;
use glimpse_config::{config_dir, config_file_path, load_and_prepare, validate, GlimpseConfig};

#[derive(Parser)]
#[command(name = "glimpse")]
#[command(about = "Glimpse: capture an image and describe what the vision API sees")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.glimpse/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one image file
    Analyze {
        /// Image file (png, jpeg, ...) or a .b64/.txt file holding base64 text
        image: PathBuf,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Also write a JSON export into this directory
        #[arg(long)]
        export: Option<PathBuf>,
        /// Fail instead of returning placeholder results when the provider call fails
        #[arg(long)]
        strict: bool,
    },
    /// Inspect or scaffold the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config with secrets masked
    Show,
    /// Validate the effective config
    Check,
    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));

    match cli.command {
        Commands::Config { action: ConfigAction::Init { force } } => {
            config_cmd::init(&config_path, force).await
        }
        Commands::Config { action: ConfigAction::Show } => {
            config_cmd::show(&prepare(&config_path).await?)
        }
        Commands::Config { action: ConfigAction::Check } => {
            config_cmd::check(&prepare(&config_path).await?)
        }
        Commands::Analyze { image, json, export, strict } => {
            let config = prepare(&config_path).await?;
            analyze_cmd::run(&config, AnalyzeArgs { image, json, export, strict }).await
        }
    }
}

/// Load the effective config, start logging as it describes, then report
/// validation findings through the new subscriber.
async fn prepare(config_path: &Path) -> Result<GlimpseConfig> {
    let config = load_and_prepare(config_path).await?;

    let logging = config.logging.clone().unwrap_or_default();
    glimpse_logging::init_logger(
        logging.dir.unwrap_or_else(|| "logs".to_string()),
        logging.level.as_deref().unwrap_or("info"),
    );
    validate(&config).log();
    debug!(path = %config_path.display(), "Config ready");
    Ok(config)
}

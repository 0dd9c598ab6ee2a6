//! vbapi-server - HTTP front end for the employee and staff validators.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use vbapi::vbapi_config::{ConfigError, ConfigManager, ServerConfig};
use vbapi::vbapi_core::Application;
use vbapi::vbapi_log::{self, Format, Level, LogConfig};

/// Employee and staff record validation service
#[derive(Parser, Debug)]
#[command(name = "vbapi-server")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Validates employee and staff records over HTTP")]
struct Cli {
    /// Configuration file (.toml, .json or .env)
    #[arg(short, long, env = "VBAPI_CONFIG")]
    config: Option<PathBuf>,

    /// Dotenv file to read before the environment
    #[arg(long, env = "VBAPI_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// trace, debug, info, warn, error or off
    #[arg(long)]
    log_level: Option<String>,

    /// pretty, compact or json
    #[arg(long)]
    log_format: Option<String>,
}

fn load_config(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let mut manager = ConfigManager::with_prefix("VBAPI");
    manager.load_defaults(&ServerConfig::default())?;

    if let Some(ref path) = cli.config {
        manager.load_file_auto(path)?;
    }
    manager.load_dotenv(cli.env_file.as_deref())?;
    manager.load_env();

    if let Some(ref host) = cli.host {
        manager.set("host", host)?;
    }
    if let Some(port) = cli.port {
        manager.set("port", port)?;
    }
    if let Some(ref level) = cli.log_level {
        manager.set("log_level", level)?;
    }
    if let Some(ref format) = cli.log_format {
        manager.set("log_format", format)?;
    }

    manager.load_validated()
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("vbapi-server: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = LogConfig::from_env()
        .level(Level::from_str(&config.log_level).unwrap_or(Level::Info))
        .format(Format::from_str(&config.log_format).unwrap_or(Format::Json))
        .init();

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(err) => {
            vbapi_log::error!(error = %err, host = %config.host, "Cannot resolve bind address");
            return ExitCode::FAILURE;
        }
    };

    vbapi_log::info!(
        version = env!("CARGO_PKG_VERSION"),
        max_body_bytes = config.max_body_bytes,
        "Starting vbapi-server"
    );

    let app = Application::new(vbapi::router()).with_max_body_bytes(config.max_body_bytes);
    if let Err(err) = app.listen(addr).await {
        vbapi_log::error!(error = %err, address = %addr, "Server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

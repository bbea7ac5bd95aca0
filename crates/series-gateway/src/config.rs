//! Gateway configuration.

use std::path::PathBuf;

use clap::Parser;

/// Default HTTP listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3333";

/// Default location of the series document.
pub const DEFAULT_DATABASE_PATH: &str = "database.json";

/// Series gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "series-gateway")]
#[command(about = "HTTP/JSON gateway for the series store")]
#[command(version)]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// Path of the JSON document holding the series.
    #[arg(short, long, default_value = DEFAULT_DATABASE_PATH)]
    pub database: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Path of the JSON document.
    pub database_path: PathBuf,
}

impl GatewayConfig {
    /// Create a configuration for the document at `database_path`.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Default::default()
        }
    }
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        Self {
            listen_addr: args.listen.clone(),
            database_path: args.database.clone(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

use cafe_infra::ServerConfig;
use cafe_infra::config::{DEFAULT_DATA_DIR, DEFAULT_PORT};

/// Café order-fulfillment server.
#[derive(Debug, Parser)]
#[command(name = "cafe-api", version, about)]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, env = "CAFE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Data directory holding the JSON collections.
    #[arg(long, env = "CAFE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub dir: PathBuf,

    /// Wipe the data directory and reseed the starter fixture.
    #[arg(long)]
    pub reset: bool,
}

impl Cli {
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            port: self.port,
            data_dir: self.dir,
            reset: self.reset,
        }
    }
}

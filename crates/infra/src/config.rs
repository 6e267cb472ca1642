//! Server configuration.

use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "data";

/// Directory names that would collide with the source tree.
const RESERVED_DIR_NAMES: [&str; 4] = ["crates", "src", "target", "tests"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("port {0} is out of range (1-65535)")]
    InvalidPort(u32),

    #[error("data directory name {name:?} is invalid: {reason}")]
    InvalidDataDir { name: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    /// Wipe the data directory and reseed it on startup.
    pub reset: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            reset: false,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(0));
        }
        validate_dir_name(&self.data_dir.to_string_lossy())
    }
}

/// Data directories are plain lowercase names such as `data` or `cafe-2`.
pub fn validate_dir_name(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &'static str| -> Result<(), ConfigError> {
        Err(ConfigError::InvalidDataDir {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name is empty");
    }
    if name == "." {
        return invalid("name cannot be the current directory");
    }
    if name.parse::<IpAddr>().is_ok() {
        return invalid("name looks like an IP address");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return invalid("only lowercase letters, digits, '.' and '-' are allowed");
    }
    if ["..", "--", "-.", ".-"].iter().any(|seq| name.contains(seq)) {
        return invalid("name contains a repeated or mixed separator");
    }
    if RESERVED_DIR_NAMES.iter().any(|reserved| name.contains(reserved)) {
        return invalid("name collides with a source directory");
    }
    Ok(())
}

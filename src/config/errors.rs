use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file [{path}]: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error
    },
    #[error("Failed to parse config file [{path}]: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String)
}

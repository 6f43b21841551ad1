mod app_config;
mod errors;

pub use app_config::AppConfig;
pub use errors::ConfigError;

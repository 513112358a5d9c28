/// Remote service configuration from config.toml and environment variables
pub mod service;

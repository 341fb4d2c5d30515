/// Application settings loading from config.toml
pub mod app;

/// Bot token loading from environment variables
pub mod credentials;

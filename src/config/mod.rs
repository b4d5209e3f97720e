pub mod config;
pub use config::{Config, Error, Result, CONFIG_PATH_ENV_VAR};

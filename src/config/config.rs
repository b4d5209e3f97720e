//! Config module.
//!
//! This module contains the representation of the user
//! configuration.

use log::{debug, trace};
use serde::Deserialize;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
    result,
};
use thiserror::Error;

use crate::SmtpConfig;

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV_VAR: &str = "SENDMAIL_SHIM_CONFIG";

pub const DEFAULT_CONFIG_DIR_NAME: &str = "sendmail-shim";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot find user config directory")]
    GetConfigDirError,
    #[error("cannot read config file {1}")]
    ReadConfigFileError(#[source] io::Error, PathBuf),
    #[error("cannot parse config file {1}")]
    ParseConfigFileError(#[source] toml::de::Error, PathBuf),
    #[error("cannot expand log file path {1}")]
    ExpandLogFilePathError(#[source] shellexpand::LookupError<env::VarError>, String),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the user configuration.
#[derive(Debug, Default, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Represents the send log file path. Nothing is logged when
    /// undefined.
    pub log_file: Option<PathBuf>,
    /// Represents the SMTP sender configuration.
    pub smtp: SmtpConfig,
}

impl Config {
    /// Gets the config file path, from the environment variable or
    /// from the user config directory.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }

        dirs::config_dir()
            .map(|dir| {
                dir.join(DEFAULT_CONFIG_DIR_NAME)
                    .join(DEFAULT_CONFIG_FILE_NAME)
            })
            .ok_or(Error::GetConfigDirError)
    }

    /// Reads and parses the given TOML config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        trace!(">> read config file");

        let path = path.as_ref();
        debug!("config file path: {:?}", path);

        let content = fs::read_to_string(path)
            .map_err(|err| Error::ReadConfigFileError(err, path.to_owned()))?;
        let config = toml::from_str(&content)
            .map_err(|err| Error::ParseConfigFileError(err, path.to_owned()))?;

        trace!("<< read config file");
        Ok(config)
    }

    pub fn from_default_path() -> Result<Self> {
        Self::from_path(Self::path()?)
    }

    /// Gets the send log file path, with `~` and environment
    /// variables expanded.
    pub fn log_file(&self) -> Result<Option<PathBuf>> {
        let path = match self.log_file.as_ref() {
            Some(path) => path,
            None => return Ok(None),
        };

        let path = match path.to_str() {
            Some(path) => shellexpand::full(path)
                .map(|path| PathBuf::from(path.into_owned()))
                .map_err(|err| Error::ExpandLogFilePathError(err, path.to_owned()))?,
            None => path.to_owned(),
        };

        Ok(Some(path))
    }
}

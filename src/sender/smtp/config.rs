//! SMTP config module.
//!
//! This module contains the representation of the SMTP email sender
//! configuration.

use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use serde::Deserialize;
use std::{num::ParseIntError, result};
use thiserror::Error;

use crate::process;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse smtp server {0:?}: missing port")]
    ParseServerMissingPortError(String),
    #[error("cannot parse smtp server {0:?}: too many colons")]
    ParseServerHostError(String),
    #[error("cannot parse smtp server port of {1:?}")]
    ParseServerPortError(#[source] ParseIntError, String),
    #[error("cannot get smtp password")]
    GetPasswdError(#[source] process::Error),
    #[error("cannot get smtp password: password is empty")]
    GetPasswdEmptyError,
    #[error("cannot get smtp password: neither passwd nor passwd-cmd is defined")]
    GetPasswdMissingError,
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the internal sender config.
#[derive(Debug, Default, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SmtpConfig {
    /// Represents the SMTP server address, as `host:port`.
    pub server: String,
    /// Represents the SMTP server login.
    pub login: String,
    /// Represents the SMTP password.
    pub passwd: Option<String>,
    /// Represents the SMTP password command, used when no password
    /// is given.
    pub passwd_cmd: Option<String>,
    /// Enables StartTLS when the server offers it.
    pub starttls: Option<bool>,
    /// Trusts any certificate.
    pub insecure: Option<bool>,
}

impl SmtpConfig {
    /// Splits the server address into its host and port. The port
    /// is mandatory.
    pub fn host_and_port(&self) -> Result<(&str, u16)> {
        let (host, port) = self
            .server
            .rsplit_once(':')
            .ok_or_else(|| Error::ParseServerMissingPortError(self.server.clone()))?;

        let host = match host.strip_prefix('[') {
            Some(host) => host
                .strip_suffix(']')
                .ok_or_else(|| Error::ParseServerHostError(self.server.clone()))?,
            None if host.contains(':') => {
                return Err(Error::ParseServerHostError(self.server.clone()))
            }
            None => host,
        };

        let port = port
            .parse()
            .map_err(|err| Error::ParseServerPortError(err, self.server.clone()))?;

        Ok((host, port))
    }

    /// Builds the internal SMTP sender credentials.
    pub fn credentials(&self) -> Result<SmtpCredentials> {
        let passwd = match (self.passwd.as_ref(), self.passwd_cmd.as_ref()) {
            (Some(passwd), _) => passwd.to_owned(),
            (None, Some(cmd)) => process::run(cmd)
                .map_err(Error::GetPasswdError)?
                .lines()
                .next()
                .map(ToOwned::to_owned)
                .unwrap_or_default(),
            (None, None) => return Err(Error::GetPasswdMissingError),
        };

        if passwd.is_empty() {
            return Err(Error::GetPasswdEmptyError);
        }

        Ok(SmtpCredentials::new(self.login.to_owned(), passwd))
    }

    pub fn starttls(&self) -> bool {
        self.starttls.unwrap_or(true)
    }

    pub fn insecure(&self) -> bool {
        self.insecure.unwrap_or_default()
    }
}

use chrono::{DateTime, Local};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::{io, result, str};
use thiserror::Error;

use crate::{Addr, Addrs};

pub(crate) const CRLF: &str = "\r\n";

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read email from input")]
    ReadInputError(#[source] io::Error),
    #[error("cannot decode email input as utf-8")]
    DecodeInputError(#[source] str::Utf8Error),
    #[error("cannot parse header line {0:?}: missing colon")]
    MalformedHeaderError(String),
    #[error("cannot parse from header {0:?}: expected one address, found {1}")]
    ParseFromAddrError(String, usize),
    #[error("cannot build email: no sender")]
    MissingSenderError,
    #[error("cannot build email: no recipient")]
    MissingRecipientError,
}

pub type Result<T> = result::Result<T, Error>;

/// Representation of the email being submitted.
///
/// Address fields left to [`None`] are still writable: the first
/// source setting a field (command line arguments, then headers)
/// owns it. A field set to [`Some`] never holds an empty list.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub timestamp: DateTime<Local>,
    pub from: Option<Addr>,
    pub reply_to: Option<Addrs>,
    pub to: Option<Addrs>,
    pub cc: Option<Addrs>,
    pub bcc: Option<Addrs>,
    pub subject: String,
    /// Unrecognized header lines, each one ending with CRLF.
    pub extra_headers: String,
    pub body: String,
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl Email {
    pub fn new() -> Self {
        Self {
            timestamp: Local::now(),
            from: None,
            reply_to: None,
            to: None,
            cc: None,
            bcc: None,
            subject: String::new(),
            extra_headers: String::new(),
            body: String::new(),
        }
    }

    /// Renders the email into its raw, CRLF-delimited form.
    ///
    /// Headers come in a fixed order. The Bcc addresses are never
    /// rendered, they only take part in the envelope.
    pub fn to_sendable_msg(&self) -> Result<String> {
        trace!(">> build sendable email");

        let from = self
            .from
            .as_ref()
            .filter(|addr| !addr.addr.is_empty())
            .ok_or(Error::MissingSenderError)?;

        let to = self
            .to
            .as_ref()
            .filter(|addrs| matches!(addrs.first(), Some(addr) if !addr.addr.is_empty()))
            .ok_or(Error::MissingRecipientError)?;

        let mut msg = String::new();

        msg.push_str(&format!("From: {}{}", from, CRLF));
        // sender and envelope sender are the same person here
        msg.push_str(&format!("Sender: {}{}", from, CRLF));

        if let Some(addrs) = self.reply_to.as_ref().filter(|addrs| !addrs.is_empty()) {
            msg.push_str(&format!("Reply-To: {}{}", addrs, CRLF));
        }

        msg.push_str(&format!("To: {}{}", to, CRLF));

        if let Some(addrs) = self.cc.as_ref().filter(|addrs| !addrs.is_empty()) {
            msg.push_str(&format!("CC: {}{}", addrs, CRLF));
        }

        msg.push_str(&format!("Subject: {}{}", self.subject, CRLF));
        msg.push_str(&self.extra_headers);
        msg.push_str(CRLF);
        msg.push_str(&self.body);

        debug!("sendable email: {:?}", msg);
        trace!("<< build sendable email");
        Ok(msg)
    }
}

//! Envelope module.
//!
//! This module contains the delivery envelope of an email, which is
//! distinct from the addresses shown in its headers.

use crate::Email;

use super::email::{Error, Result};

/// Represents the addresses given to the transport.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Envelope {
    /// Represents the envelope sender address.
    pub from: String,
    /// Represents all the recipient addresses: To, then Cc, then
    /// Bcc. Duplicates are kept.
    pub to: Vec<String>,
}

impl Email {
    /// Builds the delivery envelope of the email.
    pub fn envelope(&self) -> Result<Envelope> {
        let from = self
            .from
            .as_ref()
            .map(|addr| addr.addr.clone())
            .filter(|addr| !addr.is_empty())
            .ok_or(Error::MissingSenderError)?;

        let to = [&self.to, &self.cc, &self.bcc]
            .into_iter()
            .flatten()
            .flat_map(|addrs| addrs.iter())
            .map(|addr| addr.addr.clone())
            .collect();

        Ok(Envelope { from, to })
    }
}

//! Sender module.
//!
//! This module contains the sender interface and the function
//! dispatching an email to it.

use log::{debug, trace, warn};
use std::result;
use thiserror::Error;

use crate::{email, Email, Envelope, SendLog};

#[cfg(feature = "smtp-sender")]
use super::smtp;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    EmailError(#[from] email::Error),
    #[cfg(feature = "smtp-sender")]
    #[error(transparent)]
    SmtpError(#[from] smtp::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents a transport able to deliver a raw email to the
/// addresses of an envelope.
pub trait Sender {
    fn send(&mut self, envelope: &Envelope, msg: &[u8]) -> Result<()>;
}

/// Renders the email, builds its envelope then hands both to the
/// given sender. Returns the raw email that was sent.
pub fn send_email(sender: &mut dyn Sender, email: &Email) -> Result<Vec<u8>> {
    trace!(">> send email");

    let msg = email.to_sendable_msg()?.into_bytes();
    let envelope = email.envelope()?;
    debug!("envelope: {:?}", envelope);

    sender.send(&envelope, &msg)?;

    trace!("<< send email");
    Ok(msg)
}

/// Appends the email to the given send log then sends it. The record
/// is written before the email is composed, so an email failing
/// composition or delivery is still logged. A send log error never
/// prevents the delivery.
pub fn log_and_send_email(
    sender: &mut dyn Sender,
    email: &Email,
    send_log: Option<&SendLog>,
) -> Result<Vec<u8>> {
    trace!(">> log and send email");

    match send_log {
        Some(send_log) => {
            if let Err(err) = send_log.append(email) {
                warn!("cannot append email to send log, skipping it");
                debug!("{:?}", err);
            }
        }
        None => debug!("no send log configured, skipping it"),
    }

    let msg = send_email(sender, email)?;

    trace!("<< log and send email");
    Ok(msg)
}

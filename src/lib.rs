//! Sendmail-compatible mail submission.
//!
//! This library turns a sendmail-like invocation (command line
//! arguments plus a raw email on the standard input) into a well
//! formed email, then hands it over to an SMTP server.
//!
//! ```rust
//! use sendmail_shim::Email;
//!
//! let mut email = Email::new();
//! email.populate_from_args(&["-falice@localhost", "bob@localhost"]);
//! email.populate_from_input(b"Subject: Hello\n\nHello, world!").unwrap();
//!
//! let msg = email.to_sendable_msg().unwrap();
//! assert!(msg.starts_with("From: alice@localhost\r\n"));
//! assert!(msg.ends_with("\r\n\r\nHello, world!"));
//! ```

pub(crate) mod process;

pub mod config;
pub use config::Config;

pub mod domain;
pub use domain::*;

pub mod history;
pub use history::SendLog;

pub mod sender;
pub use sender::{log_and_send_email, send_email, Sender};
pub use sender::smtp::{self, SmtpConfig};
#[cfg(feature = "smtp-sender")]
pub use sender::Smtp;

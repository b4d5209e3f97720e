pub mod sender;
pub use sender::{log_and_send_email, send_email, Error, Result, Sender};

pub mod smtp;
pub use smtp::SmtpConfig;
#[cfg(feature = "smtp-sender")]
pub use smtp::Smtp;

//! History module.
//!
//! This module keeps track of the emails handed to the sender.

pub mod send_log;
pub use send_log::{Error, Result, SendLog};

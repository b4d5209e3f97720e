//! Email module.
//!
//! This module contains everything needed to turn a sendmail-like
//! invocation into a sendable email.

mod addr;
pub use addr::*;

mod args;

mod reader;

mod envelope;
pub use envelope::*;

mod email;
pub use email::*;

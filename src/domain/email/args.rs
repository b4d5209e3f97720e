//! Command line arguments module.
//!
//! This module fills an [`Email`] from the arguments of a
//! sendmail-like invocation.

use log::{debug, trace};
use regex::Regex;
use std::sync::OnceLock;

use crate::{Addr, Addrs, Email};

/// Flags introducing the envelope sender, either glued to the
/// address (`-falice@localhost`) or followed by it.
const SENDER_FLAGS: [&str; 2] = ["-f", "-r"];

/// Flag telling that recipients are read from the email headers.
const RECIPIENTS_FROM_HEADERS_FLAG: &str = "-t";

fn sender_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^-[fr]([^@\s]+@[^@\s]+)").unwrap())
}

fn addr_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^@\s]+@[^@\s]+").unwrap())
}

fn is_flag(arg: &str) -> bool {
    arg.starts_with('-')
}

impl Email {
    /// Populates the envelope sender and the bare recipients from
    /// command line arguments (program name excluded).
    ///
    /// Must run before [`Email::populate_from_input`] so that the
    /// arguments take precedence over the headers.
    pub fn populate_from_args<S: AsRef<str>>(&mut self, args: &[S]) {
        trace!(">> populate email from args");

        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        // indexes of arguments consumed as flag values
        let mut values = Vec::new();
        let mut sender = None;

        for (i, arg) in args.iter().enumerate() {
            if let Some(captures) = sender_regex().captures(arg) {
                sender = captures.get(1).map(|m| m.as_str());
            } else if SENDER_FLAGS.contains(arg) {
                let next = args
                    .get(i + 1)
                    .filter(|next| !is_flag(next) && addr_regex().is_match(next));
                if let Some(next) = next {
                    sender = Some(*next);
                    values.push(i + 1);
                }
            }
        }

        if let Some(sender) = sender {
            debug!("envelope sender from args: {}", sender);
            self.from = Some(Addr::bare(sender));
        }

        if args.contains(&RECIPIENTS_FROM_HEADERS_FLAG) {
            debug!("recipients will be read from headers");
            trace!("<< populate email from args");
            return;
        }

        for (i, arg) in args.iter().enumerate() {
            if arg.is_empty() || is_flag(arg) || values.contains(&i) {
                continue;
            }

            if addr_regex().is_match(arg) {
                debug!("recipient from args: {}", arg);
                self.to
                    .get_or_insert_with(Addrs::default)
                    .push(Addr::bare(*arg));
            }
        }

        trace!("<< populate email from args");
    }
}

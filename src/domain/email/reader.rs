//! Email reader module.
//!
//! This module fills an [`Email`] from a raw, loosely formatted
//! message: an optional header section, a blank line, then the body.

use log::{debug, trace};
use std::{borrow::Cow, io::Read, str};

use crate::{from_slice_to_addrs, parse_addrs, Addrs, Email};

use super::email::{Error, Result, CRLF};

/// Sets the given field from an address list, unless the field is
/// already owned by a previous source.
fn set_addrs_if_unset(field: &mut Option<Addrs>, val: &str) {
    if field.is_none() {
        *field = from_slice_to_addrs(val);
    }
}

impl Email {
    /// Reads the whole input then populates the email from it.
    pub fn populate_from_reader<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let mut input = Vec::new();
        reader
            .read_to_end(&mut input)
            .map_err(Error::ReadInputError)?;
        self.populate_from_input(&input)
    }

    /// Populates the email from a raw message.
    ///
    /// Input using bare line feeds is converted to CRLF first. When
    /// there is no blank line, or when the first line does not look
    /// like a header, the whole input becomes the body.
    pub fn populate_from_input(&mut self, input: &[u8]) -> Result<()> {
        trace!(">> populate email from input");

        let input = str::from_utf8(input).map_err(Error::DecodeInputError)?;
        let input = if input.contains(CRLF) {
            Cow::Borrowed(input)
        } else {
            Cow::Owned(input.replace('\n', CRLF))
        };

        let Some((headers, body)) = input.split_once("\r\n\r\n") else {
            debug!("no header section found");
            self.body = input.to_string();
            trace!("<< populate email from input");
            return Ok(());
        };

        for (i, line) in headers.split(CRLF).enumerate() {
            let Some((name, val)) = line.split_once(':') else {
                if i != 0 {
                    return Err(Error::MalformedHeaderError(line.to_owned()));
                }
                debug!("first line is not a header, reading input as body");
                self.body = input.to_string();
                trace!("<< populate email from input");
                return Ok(());
            };

            let val = val.trim_matches(' ');

            match name.to_lowercase().as_str() {
                "from" => {
                    if self.from.is_none() {
                        let addrs = parse_addrs(val);
                        if addrs.len() != 1 {
                            return Err(Error::ParseFromAddrError(val.to_owned(), addrs.len()));
                        }
                        self.from = addrs.into_iter().next();
                    }
                }
                "sender" => debug!("ignoring sender header {:?}", val),
                "reply-to" => set_addrs_if_unset(&mut self.reply_to, val),
                "to" => set_addrs_if_unset(&mut self.to, val),
                "cc" => set_addrs_if_unset(&mut self.cc, val),
                "bcc" => set_addrs_if_unset(&mut self.bcc, val),
                "subject" => self.subject = val.to_owned(),
                _ => {
                    self.extra_headers.push_str(line);
                    self.extra_headers.push_str(CRLF);
                }
            }
        }

        self.body = body.to_owned();

        trace!("<< populate email from input");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use concat_with::concat_line;

    use crate::{email::Error, Addr, Addrs, Email};

    fn email_from_input(input: &str) -> Email {
        let mut email = Email::new();
        email.populate_from_input(input.as_bytes()).unwrap();
        email
    }

    #[test]
    fn test_headers_and_body() {
        let email = email_from_input(concat_line!(
            "From: Alice <alice@localhost>",
            "Reply-To: reply@localhost",
            "To: Bob <bob@localhost>, carol@localhost",
            "Cc: dave@localhost",
            "Bcc: eve@localhost",
            "Subject:   Plain message  ",
            "",
            "Hello!",
            "",
            "Bye.",
        ));

        assert_eq!(Some(Addr::new("Alice", "alice@localhost")), email.from);
        assert_eq!(
            Some(Addrs::from(vec![Addr::bare("reply@localhost")])),
            email.reply_to
        );
        assert_eq!(
            Some(Addrs::from(vec![
                Addr::new("Bob", "bob@localhost"),
                Addr::bare("carol@localhost"),
            ])),
            email.to
        );
        assert_eq!(
            Some(Addrs::from(vec![Addr::bare("dave@localhost")])),
            email.cc
        );
        assert_eq!(
            Some(Addrs::from(vec![Addr::bare("eve@localhost")])),
            email.bcc
        );
        assert_eq!("Plain message", email.subject);
        assert_eq!("", email.extra_headers);
        assert_eq!("Hello!\r\n\r\nBye.", email.body);
    }

    #[test]
    fn test_crlf_input_kept_as_is() {
        let email = email_from_input("To: bob@localhost\r\n\r\nline\nwith bare lf\r\n");
        assert_eq!("line\nwith bare lf\r\n", email.body);
    }

    #[test]
    fn test_header_names_case_insensitive() {
        let email = email_from_input("FROM: alice@localhost\nsUbJeCt: Hi\nTO: bob@localhost\n\n");
        assert_eq!(Some(Addr::bare("alice@localhost")), email.from);
        assert_eq!("Hi", email.subject);
        assert!(email.to.is_some());
        assert_eq!("", email.body);
    }

    #[test]
    fn test_extra_headers_preserved() {
        let email = email_from_input(concat_line!(
            "X-Mailer: test",
            "To: bob@localhost",
            "Message-ID: <1@localhost>",
            "Content-Type: text/plain; charset=utf-8",
            "Sender: someone@localhost",
            "",
            "Hello!",
        ));

        assert_eq!(
            concat!(
                "X-Mailer: test\r\n",
                "Message-ID: <1@localhost>\r\n",
                "Content-Type: text/plain; charset=utf-8\r\n",
            ),
            email.extra_headers
        );
    }

    #[test]
    fn test_no_header_section() {
        let email = email_from_input("just a body, no headers");
        assert_eq!("just a body, no headers", email.body);
        assert_eq!("", email.subject);
        assert_eq!(None, email.to);
    }

    #[test]
    fn test_first_line_not_a_header() {
        let email = email_from_input("Dear Bob\nTo: bob@localhost\n\nBye");
        assert_eq!("Dear Bob\r\nTo: bob@localhost\r\n\r\nBye", email.body);
        assert_eq!(None, email.to);
    }

    #[test]
    fn test_malformed_header() {
        let mut email = Email::new();
        let res = email.populate_from_input(b"To: bob@localhost\nnot a header\n\nBody");
        assert!(matches!(res, Err(Error::MalformedHeaderError(line)) if line == "not a header"));
    }

    #[test]
    fn test_from_header_needs_one_addr() {
        let mut email = Email::new();
        let res = email.populate_from_input(b"From: a@localhost, b@localhost\n\n");
        assert!(matches!(res, Err(Error::ParseFromAddrError(_, 2))));

        let mut email = Email::new();
        let res = email.populate_from_input(b"From: \n\n");
        assert!(matches!(res, Err(Error::ParseFromAddrError(_, 0))));
    }

    #[test]
    fn test_from_header_not_checked_when_already_set() {
        let mut email = Email::new();
        email.populate_from_args(&["-falice@localhost"]);
        email
            .populate_from_input(b"From: a@localhost, b@localhost\n\n")
            .unwrap();
        assert_eq!(Some(Addr::bare("alice@localhost")), email.from);
    }

    #[test]
    fn test_first_header_wins() {
        let email = email_from_input(concat_line!(
            "To: bob@localhost",
            "To: carol@localhost",
            "Cc:",
            "Cc: dave@localhost",
            "Subject: first",
            "Subject: second",
            "",
            "",
        ));

        assert_eq!(
            Some(Addrs::from(vec![Addr::bare("bob@localhost")])),
            email.to
        );
        // an empty list does not own the field
        assert_eq!(
            Some(Addrs::from(vec![Addr::bare("dave@localhost")])),
            email.cc
        );
        assert_eq!("second", email.subject);
    }

    #[test]
    fn test_args_take_precedence() {
        let mut email = Email::new();
        email.populate_from_args(&["-falice@localhost", "carol@localhost"]);
        email
            .populate_from_input(b"From: Mallory <mallory@localhost>\nTo: bob@localhost\n\nHi")
            .unwrap();

        assert_eq!(Some(Addr::bare("alice@localhost")), email.from);
        assert_eq!(
            Some(Addrs::from(vec![Addr::bare("carol@localhost")])),
            email.to
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let mut email = Email::new();
        let res = email.populate_from_input(&[0xff, 0xfe, b'\n']);
        assert!(matches!(res, Err(Error::DecodeInputError(_))));
    }

    #[test]
    fn test_populate_from_reader() {
        let mut email = Email::new();
        email
            .populate_from_reader(&mut "Subject: Hi\n\nHello".as_bytes())
            .unwrap();
        assert_eq!("Hi", email.subject);
        assert_eq!("Hello", email.body);
    }
}

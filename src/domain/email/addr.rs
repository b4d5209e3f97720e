//! Module related to email addresses.
//!
//! This module regroups email address entities, the address list
//! parser and the address formatter.
//!
//! The parser is deliberately loose: it splits on every comma and
//! stops display names at angle brackets, so a display name
//! containing a comma or an angle bracket is mis-split. Quoted
//! display names are not understood either.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{Deref, DerefMut},
    sync::OnceLock,
};

const ADDRS_PATTERN: &str = r"(?P<name>[^<>,]+)?(?:\s*<\s*(?P<addr>[^<>,]+)>)?(?:,\s*)?";

fn addrs_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(ADDRS_PATTERN).unwrap())
}

/// Represents a single email address with an optional display name.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Addr {
    /// Represents the display name, empty when not given.
    pub name: String,
    /// Represents the address itself.
    #[serde(rename = "address")]
    pub addr: String,
}

impl Addr {
    pub fn new<N: ToString, A: ToString>(name: N, addr: A) -> Self {
        Self {
            name: name.to_string(),
            addr: addr.to_string(),
        }
    }

    /// Builds an address without display name.
    pub fn bare<A: ToString>(addr: A) -> Self {
        Self::new("", addr)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.addr)
        } else {
            write!(f, "{} <{}>", self.name, self.addr)
        }
    }
}

/// Represents an ordered list of email addresses.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Addrs(Vec<Addr>);

impl Deref for Addrs {
    type Target = Vec<Addr>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Addrs {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Addr>> for Addrs {
    fn from(addrs: Vec<Addr>) -> Self {
        Self(addrs)
    }
}

impl FromIterator<Addr> for Addrs {
    fn from_iter<T: IntoIterator<Item = Addr>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Addrs {
    type Item = Addr;
    type IntoIter = std::vec::IntoIter<Addr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Addrs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut glue = "";
        for addr in self.iter() {
            write!(f, "{}{}", glue, addr)?;
            glue = ",";
        }
        Ok(())
    }
}

/// Parses a comma-separated list of addresses.
///
/// Each unit is an optional display name followed by an optional
/// address between angle brackets. A unit without angle brackets is
/// a bare address. Empty units, from consecutive or trailing commas,
/// are dropped.
pub fn parse_addrs<S: AsRef<str>>(addrs: S) -> Addrs {
    addrs_regex()
        .captures_iter(addrs.as_ref())
        .filter_map(|captures| {
            let name = captures.name("name").map_or("", |m| m.as_str());
            let addr = captures.name("addr").map_or("", |m| m.as_str());
            let name = name.trim_matches(' ');
            let addr = addr.trim_matches(' ');

            match (name.is_empty(), addr.is_empty()) {
                (true, true) => None,
                // the name group also captures bare addresses
                (false, true) => Some(Addr::bare(name)),
                _ => Some(Addr::new(name, addr)),
            }
        })
        .collect()
}

/// Parses a comma-separated list of addresses, returning [`None`]
/// when the list is empty.
pub fn from_slice_to_addrs<S: AsRef<str>>(addrs: S) -> Option<Addrs> {
    let addrs = parse_addrs(addrs);
    if addrs.is_empty() {
        None
    } else {
        Some(addrs)
    }
}

use log::{debug, trace};
use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
    result,
};
use thiserror::Error;

use crate::Email;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot serialize send log record")]
    SerializeRecordError(#[source] serde_json::Error),
    #[error("cannot open send log file {1}")]
    OpenLogFileError(#[source] io::Error, PathBuf),
    #[error("cannot write send log file {1}")]
    WriteLogFileError(#[source] io::Error, PathBuf),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents an append-only log of sent emails, one JSON record per
/// line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SendLog {
    path: PathBuf,
}

impl SendLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the email to the log file, creating the file if
    /// needed.
    pub fn append(&self, email: &Email) -> Result<()> {
        trace!(">> append email to send log");

        let mut record = serde_json::to_vec(email).map_err(Error::SerializeRecordError)?;
        record.push(b'\n');

        let mut opts = OpenOptions::new();
        opts.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o644);
        }

        let mut file = opts
            .open(&self.path)
            .map_err(|err| Error::OpenLogFileError(err, self.path.clone()))?;
        file.write_all(&record)
            .map_err(|err| Error::WriteLogFileError(err, self.path.clone()))?;
        debug!("email appended to send log {:?}", self.path);

        trace!("<< append email to send log");
        Ok(())
    }
}

//! SMTP module.
//!
//! This module contains the representation of the SMTP email sender.

use lettre::{
    self,
    address::AddressError,
    transport::smtp::{
        client::{Tls, TlsParameters},
        SmtpTransport,
    },
    Transport,
};
use log::{debug, info, trace};
use std::{convert::TryFrom, result};
use thiserror::Error;

use crate::{
    sender::{self, Sender},
    Envelope,
};

use super::config::{self, SmtpConfig};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot build smtp tls parameters")]
    BuildTlsParamsError(#[source] lettre::transport::smtp::Error),
    #[error("cannot parse envelope address {1:?}")]
    ParseEnvelopeAddrError(#[source] AddressError, String),
    #[error("cannot build envelope")]
    BuildEnvelopeError(#[source] lettre::error::Error),
    #[error("cannot send email")]
    SendError(#[source] lettre::transport::smtp::Error),

    #[error(transparent)]
    SmtpConfigError(#[from] config::Error),
}

pub type Result<T> = result::Result<T, Error>;

impl TryFrom<&Envelope> for lettre::address::Envelope {
    type Error = Error;

    fn try_from(envelope: &Envelope) -> Result<Self> {
        let parse = |addr: &String| -> Result<lettre::Address> {
            addr.parse::<lettre::Address>()
                .map_err(|err| Error::ParseEnvelopeAddrError(err, addr.to_owned()))
        };

        let from = parse(&envelope.from)?;
        let to = envelope.to.iter().map(parse).collect::<Result<Vec<_>>>()?;

        lettre::address::Envelope::new(Some(from), to).map_err(Error::BuildEnvelopeError)
    }
}

pub struct Smtp<'a> {
    config: &'a SmtpConfig,
    transport: Option<SmtpTransport>,
}

impl<'a> Smtp<'a> {
    pub fn new(config: &'a SmtpConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    fn build_transport(&self) -> Result<SmtpTransport> {
        let (host, port) = self.config.host_and_port()?;
        debug!("smtp server: {}:{}", host, port);

        let tls = if self.config.starttls() {
            let params = TlsParameters::builder(host.to_owned())
                .dangerous_accept_invalid_hostnames(self.config.insecure())
                .dangerous_accept_invalid_certs(self.config.insecure())
                .build()
                .map_err(Error::BuildTlsParamsError)?;
            Tls::Opportunistic(params)
        } else {
            Tls::None
        };

        Ok(SmtpTransport::builder_dangerous(host)
            .port(port)
            .tls(tls)
            .credentials(self.config.credentials()?)
            .build())
    }

    fn transport(&mut self) -> Result<&SmtpTransport> {
        let transport = match self.transport.take() {
            Some(transport) => transport,
            None => self.build_transport()?,
        };

        Ok(self.transport.insert(transport))
    }
}

impl<'a> Sender for Smtp<'a> {
    fn send(&mut self, envelope: &Envelope, msg: &[u8]) -> sender::Result<()> {
        trace!(">> send email via smtp");

        let lettre_envelope = lettre::address::Envelope::try_from(envelope)?;
        let res = self
            .transport()?
            .send_raw(&lettre_envelope, msg)
            .map_err(Error::SendError)?;
        info!("email sent to {} recipient(s): {:?}", envelope.to.len(), res);

        trace!("<< send email via smtp");
        Ok(())
    }
}

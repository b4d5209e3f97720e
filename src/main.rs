use anyhow::{Context, Result};
use env_logger::{Builder as LoggerBuilder, Env};
use log::{debug, error, warn};
use std::{env, io, process};

use sendmail_shim::{log_and_send_email, Config, Email, SendLog, Smtp};

fn main() -> Result<()> {
    LoggerBuilder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let config = Config::from_default_path().context("cannot load configuration")?;

    let args: Vec<String> = env::args().skip(1).collect();
    debug!("args: {:?}", args);

    let mut email = Email::new();
    email.populate_from_args(&args);
    email
        .populate_from_reader(&mut io::stdin().lock())
        .context("cannot read email from standard input")?;

    let send_log = match config.log_file() {
        Ok(path) => path.map(SendLog::new),
        Err(err) => {
            warn!("{:?}", anyhow::Error::new(err));
            None
        }
    };

    let mut smtp = Smtp::new(&config.smtp);
    if let Err(err) = log_and_send_email(&mut smtp, &email, send_log.as_ref()) {
        error!("{:?}", anyhow::Error::new(err));
        process::exit(1);
    }

    Ok(())
}

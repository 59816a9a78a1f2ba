use anyhow::Context;
use dpi_config::{Config, EmailEnvironment};
use dpi_di::Provide;
use dpi_notify_contracts::NotifyService;

use crate::environment::{types::Notify, Provider};

pub fn check_config(
    config: Config,
    environment: EmailEnvironment,
    verbose: bool,
) -> anyhow::Result<()> {
    if verbose {
        println!("{config:#?}");
    }

    let mut provider = Provider::new(&config, environment)?;
    let notify: Notify = provider.provide();
    let dispatch = notify
        .resolve_config()
        .context("Email service is not properly configured")?;

    if verbose {
        println!("{dispatch:#?}");
    }

    Ok(())
}

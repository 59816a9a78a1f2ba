use clap::Subcommand;
use dpi_config::{Config, EmailEnvironment};
use dpi_di::Provide;
use dpi_models::email_address::EmailAddress;
use dpi_notify_contracts::{Notification, NotifyService};
use tracing::info;

use crate::environment::{types::Notify, Provider};

#[derive(Debug, Subcommand)]
pub enum NotifyCommand {
    /// Send a test notification through the configured channel
    Test { recipient: EmailAddress },
}

impl NotifyCommand {
    pub async fn invoke(self, config: Config, environment: EmailEnvironment) -> anyhow::Result<()> {
        match self {
            NotifyCommand::Test { recipient } => test(config, environment, recipient).await,
        }
    }
}

async fn test(
    config: Config,
    environment: EmailEnvironment,
    recipient: EmailAddress,
) -> anyhow::Result<()> {
    let mut provider = Provider::new(&config, environment)?;
    let notify: Notify = provider.provide();

    let mut dispatch = notify.resolve_config()?;
    dispatch.recipient = recipient;

    info!(
        channel = %dispatch.channel.kind(),
        recipient = %dispatch.recipient,
        "Sending test notification"
    );

    let notification = Notification {
        subject: "Email Deliverability Test".into(),
        html: "<p>Email deliverability seems to be working!</p>".into(),
        text: "Email deliverability seems to be working!".into(),
        reply_to: dispatch.sender.clone(),
    };

    notify.dispatch(&dispatch, notification).await?;

    info!("Test notification sent");

    Ok(())
}

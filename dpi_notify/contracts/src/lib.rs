use std::{future::Future, str::FromStr, time::Duration};

use dpi_models::{email_address::EmailAddress, Sensitive};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotifyService: Send + Sync + 'static {
    /// Resolve the dispatch configuration from the configuration state of this
    /// process.
    ///
    /// Fails if the selected channel is unknown or any setting it requires is
    /// missing. There is no fallback to another channel.
    fn resolve_config(&self) -> Result<DispatchConfig, DispatchConfigError>;

    /// Send a notification through the channel selected by `config`.
    fn dispatch(
        &self,
        config: &DispatchConfig,
        notification: Notification,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub sender: EmailAddress,
    pub recipient: EmailAddress,
    pub channel: ChannelConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelConfig {
    Sendgrid { api_key: Sensitive<String> },
    Resend { api_key: Sensitive<String> },
    Smtp(SmtpConfig),
}

impl ChannelConfig {
    pub fn kind(&self) -> ChannelKind {
        match self {
            Self::Sendgrid { .. } => ChannelKind::Sendgrid,
            Self::Resend { .. } => ChannelKind::Resend,
            Self::Smtp(_) => ChannelKind::Smtp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Sensitive<String>,
}

impl SmtpConfig {
    pub const DEFAULT_PORT: u16 = 587;

    /// Whether the connection is wrapped in TLS right away instead of being
    /// upgraded using STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Sendgrid,
    Resend,
    Smtp,
}

impl ChannelKind {
    pub const ALL: [Self; 3] = [Self::Sendgrid, Self::Resend, Self::Smtp];

    /// The name used to select this channel in the configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sendgrid => "sendgrid",
            Self::Resend => "resend",
            Self::Smtp => "smtp",
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Sendgrid => "SendGrid",
            Self::Resend => "Resend",
            Self::Smtp => "SMTP",
        })
    }
}

impl FromStr for ChannelKind {
    type Err = DispatchConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| DispatchConfigError::InvalidProvider(s.into()))
    }
}

/// A rendered notification, independent of the channel it is sent through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: EmailAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchConfigError {
    #[error("Invalid email provider: {0}. Must be one of: sendgrid, resend, smtp")]
    InvalidProvider(String),
    #[error("EMAIL_TO or CONTACT_EMAIL environment variable is required")]
    MissingRecipient,
    #[error("{variable} environment variable is required")]
    MissingVariable { variable: &'static str },
    #[error("SMTP_HOST, SMTP_USER, and SMTP_PASSWORD environment variables are required")]
    IncompleteSmtp,
    #[error("{variable} is not a valid email address: {value}")]
    InvalidAddress {
        variable: &'static str,
        value: String,
    },
    #[error("SMTP_PORT is not a valid port: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The provider answered with a non-success status.
    #[error("{channel} API error: {status} - {body}")]
    Rejected {
        channel: ChannelKind,
        status: u16,
        body: String,
    },
    /// The message could not be built or the provider could not be reached.
    #[error("Failed to send email via {channel}: {message}")]
    Failed {
        channel: ChannelKind,
        message: String,
    },
    #[error("Failed to send email via {channel}: timed out after {timeout:?}")]
    TimedOut {
        channel: ChannelKind,
        timeout: Duration,
    },
}

impl TransportError {
    pub fn failed(channel: ChannelKind, err: impl std::fmt::Display) -> Self {
        Self::Failed {
            channel,
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "mock")]
impl MockNotifyService {
    pub fn with_resolve_config(
        mut self,
        result: Result<DispatchConfig, DispatchConfigError>,
    ) -> Self {
        self.expect_resolve_config()
            .once()
            .return_once(move || result);
        self
    }

    pub fn with_dispatch(
        mut self,
        config: DispatchConfig,
        notification: Notification,
        result: Result<(), TransportError>,
    ) -> Self {
        self.expect_dispatch()
            .once()
            .with(
                mockall::predicate::eq(config),
                mockall::predicate::eq(notification),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}

use std::{sync::Arc, time::Duration};

use dpi_di::Build;
use dpi_models::Sensitive;
use dpi_notify_contracts::{
    ChannelConfig, DispatchConfig, DispatchConfigError, Notification, NotifyService,
    TransportError,
};
use dpi_utils::trace_instrument;
use url::Url;

use crate::http::HttpClient;

mod http;
mod resend;
mod resolve;
mod sendgrid;
mod smtp;

const SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";
const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone, Build)]
pub struct NotifyServiceImpl {
    config: NotifyServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct NotifyServiceConfig {
    environment: Arc<NotifyEnvironment>,
    timeout: Duration,
    sendgrid_endpoint: Arc<Url>,
    resend_endpoint: Arc<Url>,
}

impl NotifyServiceConfig {
    pub fn new(
        environment: NotifyEnvironment,
        timeout: Duration,
        sendgrid_endpoint_override: Option<Url>,
        resend_endpoint_override: Option<Url>,
    ) -> Self {
        Self {
            environment: environment.into(),
            timeout,
            sendgrid_endpoint: sendgrid_endpoint_override
                .unwrap_or_else(|| SENDGRID_ENDPOINT.parse().unwrap())
                .into(),
            resend_endpoint: resend_endpoint_override
                .unwrap_or_else(|| RESEND_ENDPOINT.parse().unwrap())
                .into(),
        }
    }
}

/// Snapshot of the email related environment variables, taken once at
/// startup. Blank values are treated like unset ones.
#[derive(Debug, Clone, Default)]
pub struct NotifyEnvironment {
    pub email_provider: Option<String>,
    pub email_from: Option<String>,
    pub smtp_from: Option<String>,
    pub email_to: Option<String>,
    pub contact_email: Option<String>,
    pub sendgrid_api_key: Option<Sensitive<String>>,
    pub resend_api_key: Option<Sensitive<String>>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<String>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<Sensitive<String>>,
}

impl NotifyService for NotifyServiceImpl {
    #[trace_instrument(skip(self))]
    fn resolve_config(&self) -> Result<DispatchConfig, DispatchConfigError> {
        resolve::resolve(&self.config.environment)
    }

    #[trace_instrument(skip(self, config, notification), fields(channel = %config.channel.kind()))]
    async fn dispatch(
        &self,
        config: &DispatchConfig,
        notification: Notification,
    ) -> Result<(), TransportError> {
        let send = async {
            match &config.channel {
                ChannelConfig::Sendgrid { api_key } => {
                    sendgrid::send(
                        &self.client,
                        &self.config.sendgrid_endpoint,
                        api_key,
                        config,
                        &notification,
                    )
                    .await
                }
                ChannelConfig::Resend { api_key } => {
                    resend::send(
                        &self.client,
                        &self.config.resend_endpoint,
                        api_key,
                        config,
                        &notification,
                    )
                    .await
                }
                ChannelConfig::Smtp(smtp) => smtp::send(smtp, config, notification).await,
            }
        };

        tokio::time::timeout(self.config.timeout, send)
            .await
            .map_err(|_| TransportError::TimedOut {
                channel: config.channel.kind(),
                timeout: self.config.timeout,
            })?
    }
}

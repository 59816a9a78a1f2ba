use dpi_api_rest::RestServerConfig;
use dpi_config::{Config, EmailEnvironment};
use dpi_di::provider;
use dpi_notify_impl::{NotifyEnvironment, NotifyServiceConfig};

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        // API
        rest_server_config: RestServerConfig,

        // Notify
        notify_service_config: NotifyServiceConfig,
    }
}

impl Provider {
    pub fn new(config: &Config, environment: EmailEnvironment) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig::new(&config.http.cors_allowed_origins)?;

        // Notify
        let notify_service_config = NotifyServiceConfig::new(
            notify_environment(environment),
            config.notify.timeout.into(),
            config.notify.sendgrid_endpoint_override.clone(),
            config.notify.resend_endpoint_override.clone(),
        );

        Ok(Self {
            _cache: Default::default(),
            rest_server_config,
            notify_service_config,
        })
    }
}

fn notify_environment(environment: EmailEnvironment) -> NotifyEnvironment {
    let EmailEnvironment {
        email_provider,
        email_from,
        smtp_from,
        email_to,
        contact_email,
        sendgrid_api_key,
        resend_api_key,
        smtp_host,
        smtp_port,
        smtp_user,
        smtp_password,
    } = environment;

    NotifyEnvironment {
        email_provider,
        email_from,
        smtp_from,
        email_to,
        contact_email,
        sendgrid_api_key,
        resend_api_key,
        smtp_host,
        smtp_port,
        smtp_user,
        smtp_password,
    }
}

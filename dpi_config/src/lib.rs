use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use dpi_models::Sensitive;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Loads the given config files and applies the overrides (toml snippets) on
/// top of them. Later sources take precedence.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, &source| {
            builder.add_source(File::from_str(source, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// Takes a snapshot of the email related environment variables.
pub fn load_environment() -> anyhow::Result<EmailEnvironment> {
    load_environment_from(Environment::default())
}

fn load_environment_from(source: Environment) -> anyhow::Result<EmailEnvironment> {
    config::Config::builder()
        .add_source(source)
        .build()?
        .try_deserialize()
        .context("Failed to load environment")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotifyConfig {
    pub timeout: Duration,
    pub sendgrid_endpoint_override: Option<Url>,
    pub resend_endpoint_override: Option<Url>,
}

/// The environment variables which select and configure the delivery
/// channel. Everything else in the environment is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct EmailEnvironment {
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

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn load_default_config() {
        let config = load(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
        assert_eq!(config.http.address, "127.0.0.1:8000".parse().unwrap());
        assert!(config.http.cors_allowed_origins.is_empty());
        assert_eq!(*config.notify.timeout, std::time::Duration::from_secs(10));
        assert_eq!(config.notify.sendgrid_endpoint_override, None);
    }

    #[test]
    fn load_override() {
        let config = load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &[
                "http.cors_allowed_origins = [\"https://digitalpropertyinsights.com.au\"]",
                "notify.resend_endpoint_override = \"http://127.0.0.1:9000/emails\"",
            ],
        )
        .unwrap();
        assert_eq!(
            config.http.cors_allowed_origins,
            ["https://digitalpropertyinsights.com.au"]
        );
        assert_eq!(
            config.notify.resend_endpoint_override.unwrap().as_str(),
            "http://127.0.0.1:9000/emails"
        );
    }

    #[test]
    fn missing_file() {
        let err = load(&[Path::new("/nonexistent/dpi.toml")]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dpi.toml"));
    }

    #[test]
    fn environment() {
        let source = Environment::default().source(Some(HashMap::from(
            [
                ("EMAIL_PROVIDER", "resend"),
                ("EMAIL_TO", "team@example.com"),
                ("RESEND_API_KEY", "re_123"),
                ("SMTP_PORT", "2525"),
                ("HOME", "/root"),
            ]
            .map(|(k, v)| (k.to_owned(), v.to_owned())),
        )));

        let env = load_environment_from(source).unwrap();

        assert_eq!(env.email_provider.as_deref(), Some("resend"));
        assert_eq!(env.email_to.as_deref(), Some("team@example.com"));
        assert_eq!(env.resend_api_key.as_deref().map(String::as_str), Some("re_123"));
        assert_eq!(env.smtp_port.as_deref(), Some("2525"));
        assert_eq!(env.email_from, None);
        assert_eq!(env.sendgrid_api_key, None);
    }
}

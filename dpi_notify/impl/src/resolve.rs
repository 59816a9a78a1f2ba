use dpi_models::{email_address::EmailAddress, Sensitive};
use dpi_notify_contracts::{
    ChannelConfig, ChannelKind, DispatchConfig, DispatchConfigError, SmtpConfig,
};

use crate::NotifyEnvironment;

const DEFAULT_SENDER: &str = "noreply@example.com";

pub(crate) fn resolve(env: &NotifyEnvironment) -> Result<DispatchConfig, DispatchConfigError> {
    let kind = match non_blank(&env.email_provider) {
        Some(provider) => provider.parse()?,
        None => ChannelKind::Smtp,
    };

    let (variable, sender) =
        first_set([("EMAIL_FROM", &env.email_from), ("SMTP_FROM", &env.smtp_from)])
            .unwrap_or(("EMAIL_FROM", DEFAULT_SENDER));
    let sender = parse_address(variable, sender)?;

    let (variable, recipient) =
        first_set([("EMAIL_TO", &env.email_to), ("CONTACT_EMAIL", &env.contact_email)])
            .ok_or(DispatchConfigError::MissingRecipient)?;
    let recipient = parse_address(variable, recipient)?;

    let channel = match kind {
        ChannelKind::Sendgrid => ChannelConfig::Sendgrid {
            api_key: secret("SENDGRID_API_KEY", &env.sendgrid_api_key)?,
        },
        ChannelKind::Resend => ChannelConfig::Resend {
            api_key: secret("RESEND_API_KEY", &env.resend_api_key)?,
        },
        ChannelKind::Smtp => ChannelConfig::Smtp(resolve_smtp(env)?),
    };

    Ok(DispatchConfig {
        sender,
        recipient,
        channel,
    })
}

fn resolve_smtp(env: &NotifyEnvironment) -> Result<SmtpConfig, DispatchConfigError> {
    let (Some(host), Some(username), Ok(password)) = (
        non_blank(&env.smtp_host),
        non_blank(&env.smtp_user),
        secret("SMTP_PASSWORD", &env.smtp_password),
    ) else {
        return Err(DispatchConfigError::IncompleteSmtp);
    };

    let port = match non_blank(&env.smtp_port) {
        Some(port) => port
            .parse()
            .ok()
            .filter(|&port| port != 0)
            .ok_or_else(|| DispatchConfigError::InvalidPort(port.into()))?,
        None => SmtpConfig::DEFAULT_PORT,
    };

    Ok(SmtpConfig {
        host: host.into(),
        port,
        username: username.into(),
        password,
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|x| !x.is_empty())
}

fn first_set<'a, const N: usize>(
    candidates: [(&'static str, &'a Option<String>); N],
) -> Option<(&'static str, &'a str)> {
    candidates
        .into_iter()
        .find_map(|(variable, value)| non_blank(value).map(|value| (variable, value)))
}

fn secret(
    variable: &'static str,
    value: &Option<Sensitive<String>>,
) -> Result<Sensitive<String>, DispatchConfigError> {
    value
        .as_ref()
        .map(|x| x.trim())
        .filter(|x| !x.is_empty())
        .map(|x| Sensitive(x.to_owned()))
        .ok_or(DispatchConfigError::MissingVariable { variable })
}

fn parse_address(variable: &'static str, value: &str) -> Result<EmailAddress, DispatchConfigError> {
    value
        .parse()
        .map_err(|_| DispatchConfigError::InvalidAddress {
            variable,
            value: value.into(),
        })
}

use dpi_notify_contracts::{ChannelKind, DispatchConfig, Notification, TransportError};
use serde::Serialize;
use url::Url;

use crate::http::HttpClient;

const CHANNEL: ChannelKind = ChannelKind::Resend;

pub(crate) async fn send(
    client: &HttpClient,
    endpoint: &Url,
    api_key: &str,
    config: &DispatchConfig,
    notification: &Notification,
) -> Result<(), TransportError> {
    let response = client
        .post(endpoint.clone())
        .bearer_auth(api_key)
        .json(&SendEmailRequest {
            from: config.sender.as_str(),
            to: config.recipient.as_str(),
            reply_to: notification.reply_to.as_str(),
            subject: &notification.subject,
            html: &notification.html,
            text: &notification.text,
        })
        .send()
        .await
        .map_err(|err| TransportError::failed(CHANNEL, err))?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response
        .text()
        .await
        .map_err(|err| TransportError::failed(CHANNEL, err))?;

    // Resend reports errors as JSON objects, which are passed on in compact form.
    let body = serde_json::from_str::<serde_json::Value>(&body)
        .map(|json| json.to_string())
        .unwrap_or(body);

    Err(TransportError::Rejected {
        channel: CHANNEL,
        status: status.as_u16(),
        body,
    })
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

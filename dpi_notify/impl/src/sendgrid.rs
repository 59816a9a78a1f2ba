use dpi_notify_contracts::{ChannelKind, DispatchConfig, Notification, TransportError};
use serde::Serialize;
use url::Url;

use crate::http::HttpClient;

const CHANNEL: ChannelKind = ChannelKind::Sendgrid;

pub(crate) async fn send(
    client: &HttpClient,
    endpoint: &Url,
    api_key: &str,
    config: &DispatchConfig,
    notification: &Notification,
) -> Result<(), TransportError> {
    let request = MailSendRequest {
        personalizations: [Personalization {
            to: [Address {
                email: config.recipient.as_str(),
            }],
        }],
        from: Address {
            email: config.sender.as_str(),
        },
        reply_to: Address {
            email: notification.reply_to.as_str(),
        },
        subject: &notification.subject,
        content: [
            Content {
                r#type: "text/plain",
                value: &notification.text,
            },
            Content {
                r#type: "text/html",
                value: &notification.html,
            },
        ],
    };

    let response = client
        .post(endpoint.clone())
        .bearer_auth(api_key)
        .json(&request)
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

    Err(TransportError::Rejected {
        channel: CHANNEL,
        status: status.as_u16(),
        body,
    })
}

#[derive(Serialize)]
struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    reply_to: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    r#type: &'a str,
    value: &'a str,
}

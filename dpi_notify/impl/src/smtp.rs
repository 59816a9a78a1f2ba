use dpi_notify_contracts::{ChannelKind, DispatchConfig, Notification, SmtpConfig, TransportError};
use lettre::{
    message::MultiPart,
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

const CHANNEL: ChannelKind = ChannelKind::Smtp;

/// Opens a session, sends the message and closes the session again.
///
/// The transport is not pooled, so the connection never outlives this call.
pub(crate) async fn send(
    smtp: &SmtpConfig,
    config: &DispatchConfig,
    notification: Notification,
) -> Result<(), TransportError> {
    let failed = |err| TransportError::failed(CHANNEL, err);

    let message = Message::builder()
        .from(config.sender.clone().into())
        .to(config.recipient.clone().into())
        .reply_to(notification.reply_to.into())
        .subject(notification.subject)
        .multipart(MultiPart::alternative_plain_html(
            notification.text,
            notification.html,
        ))
        .map_err(|err| failed(err.to_string()))?;

    let tls_parameters =
        TlsParameters::new(smtp.host.clone()).map_err(|err| failed(err.to_string()))?;
    let tls = if smtp.implicit_tls() {
        Tls::Wrapper(tls_parameters)
    } else {
        Tls::Opportunistic(tls_parameters)
    };

    let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
        .port(smtp.port)
        .tls(tls)
        .credentials(Credentials::new(
            smtp.username.clone(),
            smtp.password.0.clone(),
        ))
        .build();

    transport
        .send(message)
        .await
        .map(|_| ())
        .map_err(|err| failed(err.to_string()))
}

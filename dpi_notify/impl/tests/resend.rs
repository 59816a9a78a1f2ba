use std::time::Duration;

use dpi_di::{provider, Provide};
use dpi_models::Sensitive;
use dpi_notify_contracts::{
    ChannelConfig, ChannelKind, DispatchConfig, Notification, NotifyService, TransportError,
};
use dpi_notify_impl::{NotifyEnvironment, NotifyServiceConfig, NotifyServiceImpl};
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn ok() {
    // Arrange
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/emails")
        .match_header("authorization", "Bearer re_test-key")
        .match_body(Matcher::Json(json!({
            "from": "noreply@example.com",
            "to": "team@example.com",
            "reply_to": "jo@example.com",
            "subject": "New Contact Form Submission: Pricing",
            "html": "<p>How much?</p>",
            "text": "How much?",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794"}"#)
        .create_async()
        .await;

    let sut = make_sut(&server, Duration::from_secs(10));

    // Act
    let result = sut.dispatch(&make_config(), make_notification()).await;

    // Assert
    result.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn rejected_json() {
    // Arrange
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/emails")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "name": "validation_error", "message": "Invalid `from` field." }"#)
        .create_async()
        .await;

    let sut = make_sut(&server, Duration::from_secs(10));

    // Act
    let result = sut.dispatch(&make_config(), make_notification()).await;

    // Assert
    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"Resend API error: 422 - {"message":"Invalid `from` field.","name":"validation_error"}"#
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn rejected_text() {
    // Arrange
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/emails")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let sut = make_sut(&server, Duration::from_secs(10));

    // Act
    let result = sut.dispatch(&make_config(), make_notification()).await;

    // Assert
    assert_eq!(
        result.unwrap_err(),
        TransportError::Rejected {
            channel: ChannelKind::Resend,
            status: 502,
            body: "Bad Gateway".into(),
        }
    );
    mock.assert_async().await;
}

fn make_config() -> DispatchConfig {
    DispatchConfig {
        sender: "noreply@example.com".parse().unwrap(),
        recipient: "team@example.com".parse().unwrap(),
        channel: ChannelConfig::Resend {
            api_key: Sensitive("re_test-key".into()),
        },
    }
}

fn make_notification() -> Notification {
    Notification {
        subject: "New Contact Form Submission: Pricing".into(),
        html: "<p>How much?</p>".into(),
        text: "How much?".into(),
        reply_to: "jo@example.com".parse().unwrap(),
    }
}

fn make_sut(server: &Server, timeout: Duration) -> NotifyServiceImpl {
    provider! {
        Provider { notify_service_config: NotifyServiceConfig, }
    }

    let mut provider = Provider {
        _cache: Default::default(),
        notify_service_config: NotifyServiceConfig::new(
            NotifyEnvironment::default(),
            timeout,
            None,
            Some(format!("{}/emails", server.url()).parse().unwrap()),
        ),
    };

    provider.provide()
}

use dpi_core_contact_contracts::{ContactSendMessageError, ContactService};
use dpi_di::Build;
use dpi_notify_contracts::NotifyService;
use dpi_shared_contracts::time::TimeService;
use dpi_templates_contracts::TemplateService;
use dpi_utils::trace_instrument;
use tracing::{debug, error, info};

pub use render::{render_notification, SENT_AT_FORMAT, SUBJECT_PREFIX};
pub use validate::validate_submission;

mod render;
mod validate;

#[derive(Debug, Clone, Build)]
pub struct ContactServiceImpl<Notify, Template, Time> {
    notify: Notify,
    template: Template,
    time: Time,
}

impl<Notify, Template, Time> ContactService for ContactServiceImpl<Notify, Template, Time>
where
    Notify: NotifyService,
    Template: TemplateService,
    Time: TimeService,
{
    #[trace_instrument(skip(self, form))]
    async fn send_message(&self, form: serde_json::Value) -> Result<(), ContactSendMessageError> {
        let submission = validate_submission(&form).inspect_err(|err| {
            debug!("Rejected contact form submission: {err}");
        })?;

        let config = self.notify.resolve_config().map_err(|err| {
            error!("Email configuration error: {err}");
            ContactSendMessageError::NotConfigured(err)
        })?;

        let notification = render_notification(&self.template, submission, self.time.now())?;

        self.notify
            .dispatch(&config, notification)
            .await
            .inspect_err(|err| error!("Failed to send contact notification: {err}"))?;

        info!(channel = %config.channel.kind(), "Contact notification sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use dpi_core_contact_contracts::ContactValidationError;
    use dpi_models::{email_address::EmailAddress, Sensitive};
    use dpi_notify_contracts::{
        ChannelConfig, ChannelKind, DispatchConfig, DispatchConfigError, MockNotifyService,
        Notification, SmtpConfig, TransportError,
    };
    use dpi_shared_contracts::time::MockTimeService;
    use dpi_templates_contracts::{
        ContactNotification, ContactNotificationHtmlTemplate, ContactNotificationTextTemplate,
        MockTemplateService,
    };
    use dpi_utils::assert_matches;
    use serde_json::json;

    use super::*;

    type Sut = ContactServiceImpl<MockNotifyService, MockTemplateService, MockTimeService>;

    #[tokio::test]
    async fn ok() {
        // Arrange
        let config = smtp_config();
        let (templates, time) = render_mocks();

        let notify = MockNotifyService::new()
            .with_resolve_config(Ok(config.clone()))
            .with_dispatch(config, expected_notification(), Ok(()));

        let sut = Sut {
            notify,
            template: templates,
            time,
        };

        // Act
        let result = sut.send_message(form()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn normalized_email_is_reply_to() {
        // Arrange
        let config = smtp_config();
        let (templates, time) = render_mocks();

        let notify = MockNotifyService::new()
            .with_resolve_config(Ok(config.clone()))
            .with_dispatch(config, expected_notification(), Ok(()));

        let sut = Sut {
            notify,
            template: templates,
            time,
        };

        let mut form = form();
        form["email"] = json!("  JO@Example.com ");
        form["name"] = json!(" Jo Smith");

        // Act
        let result = sut.send_message(form).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn invalid_submission() {
        // Arrange
        let sut = Sut {
            notify: MockNotifyService::new(),
            template: MockTemplateService::new(),
            time: MockTimeService::new(),
        };

        let mut form = form();
        form["subject"] = json!("   ");

        // Act
        let result = sut.send_message(form).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSendMessageError::Validation(
                ContactValidationError::Subject
            ))
        );
    }

    #[tokio::test]
    async fn not_configured() {
        // Arrange
        let notify = MockNotifyService::new().with_resolve_config(Err(
            DispatchConfigError::MissingVariable {
                variable: "SENDGRID_API_KEY",
            },
        ));

        let sut = Sut {
            notify,
            template: MockTemplateService::new(),
            time: MockTimeService::new(),
        };

        // Act
        let result = sut.send_message(form()).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Email service is not properly configured");
        assert_matches!(
            err,
            ContactSendMessageError::NotConfigured(DispatchConfigError::MissingVariable {
                variable: "SENDGRID_API_KEY"
            })
        );
    }

    #[tokio::test]
    async fn transport_error() {
        // Arrange
        let config = smtp_config();
        let (templates, time) = render_mocks();

        let error = TransportError::Failed {
            channel: ChannelKind::Smtp,
            message: "permanent error (535): authentication failed".into(),
        };

        let notify = MockNotifyService::new()
            .with_resolve_config(Ok(config.clone()))
            .with_dispatch(config, expected_notification(), Err(error.clone()));

        let sut = Sut {
            notify,
            template: templates,
            time,
        };

        // Act
        let result = sut.send_message(form()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Transport(err)) if *err == error);
    }

    fn form() -> serde_json::Value {
        json!({
            "name": "Jo Smith",
            "email": "jo@example.com",
            "subject": "Pricing",
            "message": "How much?",
        })
    }

    fn smtp_config() -> DispatchConfig {
        DispatchConfig {
            sender: "noreply@example.com".parse().unwrap(),
            recipient: "team@digitalpropertyinsights.com.au".parse().unwrap(),
            channel: ChannelConfig::Smtp(SmtpConfig {
                host: "smtp.example.com".into(),
                port: 587,
                username: "mailer".into(),
                password: Sensitive("hunter2".into()),
            }),
        }
    }

    fn render_mocks() -> (MockTemplateService, MockTimeService) {
        let context = ContactNotification {
            name: "Jo Smith".into(),
            email: "jo@example.com".into(),
            phone: None,
            company: None,
            subject: "Pricing".into(),
            message: "How much?".into(),
            sent_at: "2024-03-07 09:05:01 UTC".into(),
        };

        let templates = MockTemplateService::new()
            .with_render(
                ContactNotificationHtmlTemplate(context.clone()),
                "<p>How much?</p>".into(),
            )
            .with_render(ContactNotificationTextTemplate(context), "How much?".into());

        let time = MockTimeService::new()
            .with_now(Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap());

        (templates, time)
    }

    fn expected_notification() -> Notification {
        Notification {
            subject: "New Contact Form Submission: Pricing".into(),
            html: "<p>How much?</p>".into(),
            text: "How much?".into(),
            reply_to: "jo@example.com".parse::<EmailAddress>().unwrap(),
        }
    }
}

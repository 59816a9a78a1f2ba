use chrono::{DateTime, Utc};
use dpi_models::contact::ContactSubmission;
use dpi_notify_contracts::Notification;
use dpi_templates_contracts::{
    ContactNotification, ContactNotificationHtmlTemplate, ContactNotificationTextTemplate,
    TemplateService,
};

pub const SUBJECT_PREFIX: &str = "New Contact Form Submission: ";
pub const SENT_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Renders the HTML and plain text bodies of the notification about a
/// submission. Replies go to the submitter.
pub fn render_notification(
    templates: &impl TemplateService,
    submission: ContactSubmission,
    now: DateTime<Utc>,
) -> anyhow::Result<Notification> {
    let subject = format!("{SUBJECT_PREFIX}{}", *submission.subject);

    let context = ContactNotification {
        name: submission.name.into_inner(),
        email: submission.email.to_string(),
        phone: submission.phone.map(|x| x.into_inner()),
        company: submission.company.map(|x| x.into_inner()),
        subject: submission.subject.into_inner(),
        message: submission.message.into_inner(),
        sent_at: now.format(SENT_AT_FORMAT).to_string(),
    };

    let html = templates.render(&ContactNotificationHtmlTemplate(context.clone()))?;
    let text = templates.render(&ContactNotificationTextTemplate(context))?;

    Ok(Notification {
        subject,
        html,
        text,
        reply_to: submission.email,
    })
}

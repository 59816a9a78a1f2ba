use std::future::Future;

use dpi_notify_contracts::{DispatchConfigError, TransportError};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Validate a submitted contact form and notify the site operators about
    /// it.
    ///
    /// The submission is processed exactly once. It is neither retried nor
    /// stored.
    fn send_message(
        &self,
        form: serde_json::Value,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error("Email service is not properly configured")]
    NotConfigured(#[source] DispatchConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The first rule violated by a submitted contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Name is required and must be a non-empty string")]
    Name,
    #[error("Valid email address is required")]
    Email,
    #[error("Subject is required and must be a non-empty string")]
    Subject,
    #[error("Message is required and must be a non-empty string")]
    Message,
    #[error("Name must be less than 100 characters")]
    NameTooLong,
    #[error("Subject must be less than 200 characters")]
    SubjectTooLong,
    #[error("Message must be less than 5000 characters")]
    MessageTooLong,
    #[error("Invalid phone number format")]
    Phone,
    #[error("Company name must be less than 150 characters")]
    CompanyTooLong,
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        form: serde_json::Value,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}

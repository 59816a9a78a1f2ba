use dpi_core_contact_contracts::ContactValidationError;
use dpi_models::{
    contact::{
        is_valid_email, ContactCompany, ContactMessageContent, ContactName, ContactPhone,
        ContactSubject, ContactSubmission,
    },
    email_address::EmailAddress,
};
use serde_json::{Map, Value};

/// Checks the raw form against the submission rules and normalizes it.
///
/// Rules are checked in a fixed order and only the first violation is
/// reported.
pub fn validate_submission(raw: &Value) -> Result<ContactSubmission, ContactValidationError> {
    let form = raw.as_object().ok_or(ContactValidationError::InvalidBody)?;

    let name = required(form, "name").ok_or(ContactValidationError::Name)?;
    let email = required(form, "email")
        .map(str::to_lowercase)
        .filter(|email| is_valid_email(email))
        .and_then(|email| email.parse::<EmailAddress>().ok())
        .ok_or(ContactValidationError::Email)?;
    let subject = required(form, "subject").ok_or(ContactValidationError::Subject)?;
    let message = required(form, "message").ok_or(ContactValidationError::Message)?;

    let name = ContactName::try_new(name).map_err(|_| ContactValidationError::NameTooLong)?;
    let subject =
        ContactSubject::try_new(subject).map_err(|_| ContactValidationError::SubjectTooLong)?;
    let message = ContactMessageContent::try_new(message)
        .map_err(|_| ContactValidationError::MessageTooLong)?;

    let phone = optional(form, "phone")
        .map_err(|_| ContactValidationError::Phone)?
        .map(ContactPhone::try_new)
        .transpose()
        .map_err(|_| ContactValidationError::Phone)?;
    let company = optional(form, "company")
        .map_err(|_| ContactValidationError::CompanyTooLong)?
        .map(ContactCompany::try_new)
        .transpose()
        .map_err(|_| ContactValidationError::CompanyTooLong)?;

    Ok(ContactSubmission {
        name,
        email,
        subject,
        message,
        phone,
        company,
    })
}

/// A string field which must not be blank.
fn required<'a>(form: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    form.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// A string field which may be absent, `null` or blank. Any other type is an
/// error.
fn optional<'a>(form: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, ()> {
    match form.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.trim()).filter(|value| !value.is_empty())),
        Some(_) => Err(()),
    }
}

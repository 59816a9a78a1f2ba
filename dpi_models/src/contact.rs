use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;

use crate::email_address::EmailAddress;

/// A validated and normalized contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: EmailAddress,
    pub subject: ContactSubject,
    pub message: ContactMessageContent,
    pub phone: Option<ContactPhone>,
    pub company: Option<ContactCompany>,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 200),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactSubject(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 5000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactMessageContent(String);

#[nutype(
    sanitize(trim),
    validate(predicate = |phone| is_valid_phone(phone)),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactPhone(String);

#[nutype(
    sanitize(trim),
    validate(len_char_max = 150),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactCompany(String);

/// Maximum length of a submitted email address.
pub const EMAIL_MAX_LEN: usize = 255;

/// Basic syntactic email pattern. Deliverability is never checked.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Loose international phone number pattern, matched after all whitespace has
/// been removed.
pub static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,9}$").unwrap()
});

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= EMAIL_MAX_LEN && EMAIL_REGEX.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    let compact = phone
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    PHONE_REGEX.is_match(&compact)
}

//! Input validation for public form submissions.
//!
//! For collecting multiple validation errors and returning them as an
//! ApiError, use the `ValidationErrorBuilder` from the `error` module.

use lazy_static::lazy_static;
use regex::Regex;

use crate::api::error::{ApiError, ValidationErrorBuilder};
use crate::db::{ContactRequest, SubmitQuoteRequest};

lazy_static! {
    /// Loose email shape check; deliverability is the sender's problem.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Phone numbers: optional leading +, then 7-15 digits once spaces and
    /// dashes are stripped.
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9]{7,15}$").unwrap();
}

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().chars().count() < 2 {
        return Err("Name must be at least 2 characters".to_string());
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), String> {
    let stripped: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if !PHONE_REGEX.is_match(&stripped) {
        return Err("Invalid phone number".to_string());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email address".to_string());
    }
    Ok(())
}

pub fn validate_message(message: &str) -> Result<(), String> {
    if message.trim().chars().count() < 10 {
        return Err("Message must be at least 10 characters".to_string());
    }
    Ok(())
}

pub fn validate_contact(request: &ContactRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_name(&request.name) {
        errors.add("name", e);
    }
    if let Err(e) = validate_phone(&request.phone) {
        errors.add("phone", e);
    }
    if let Err(e) = validate_email(&request.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_message(&request.message) {
        errors.add("message", e);
    }
    errors.finish()
}

pub fn validate_quote(request: &SubmitQuoteRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if request.items.is_empty() {
        errors.add("items", "At least one item is required");
    }
    match &request.contact_info {
        None => {
            errors.add("contactInfo", "Contact details are required");
        }
        Some(info) => {
            if let Err(e) = validate_name(&info.name) {
                errors.add("contactInfo.name", e);
            }
            if let Err(e) = validate_phone(&info.phone) {
                errors.add("contactInfo.phone", e);
            }
            if let Err(e) = validate_email(&info.email) {
                errors.add("contactInfo.email", e);
            }
        }
    }
    errors.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_separators_and_plus() {
        assert!(validate_phone("+1 555 010 0000").is_ok());
        assert!(validate_phone("055-123-4567").is_ok());
        assert!(validate_phone("5551234").is_ok());
    }

    #[test]
    fn phone_rejects_letters_and_short_numbers() {
        assert!(validate_phone("call-me").is_err());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a @b.co").is_err());
    }

    #[test]
    fn contact_collects_all_field_errors() {
        let request = ContactRequest {
            name: "x".to_string(),
            phone: "nope".to_string(),
            email: "nope".to_string(),
            company: None,
            message: "short".to_string(),
        };
        let err = validate_contact(&request).unwrap_err();
        // Four fields, four errors; exact shape is covered by error.rs tests.
        assert!(err.to_string().contains("4 fields"));
    }
}

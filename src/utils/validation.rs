use lazy_static::lazy_static;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const INVALID_INTEGER: &str = "A valid integer is required.";
pub const INVALID_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
pub const INVALID_PK: &str = "Incorrect type. Expected pk value.";
pub const INVALID_PK_LIST: &str = "Expected a list of pk values.";

lazy_static! {
    /// Letters, digits and `@ . + - _`.
    pub static ref USERNAME_RE: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();
}

/// Run the derived validations, returning the (possibly empty) error set so
/// callers can keep adding to it.
pub fn validate_payload<T: Validate>(payload: &T) -> ValidationErrors {
    match payload.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    }
}

/// Take `value`, else `fallback`, else record a "required" error on `field`.
pub fn required<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<T>,
    fallback: Option<T>,
) -> Option<T> {
    let resolved = value.or(fallback);
    if resolved.is_none() {
        let mut err = ValidationError::new("required");
        err.message = Some(REQUIRED.into());
        errors.add(field, err);
    }
    resolved
}

/// Email may be left blank; anything else must be an address.
pub fn validate_email_or_blank(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || validator::validate_email(email) {
        return Ok(());
    }
    let mut err = ValidationError::new("email");
    err.message = Some("Enter a valid email address.".into());
    Err(err)
}

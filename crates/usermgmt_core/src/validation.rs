//! Write-time validation rules for `User`.
//!
//! # Responsibility
//! - Check a user's field values before create/update.
//! - Report every violation, not only the first one.
//!
//! # Invariants
//! - Validation is a pure function of field values and the supplied date.
//! - Validation never consults a repository.
//! - Rules run in a fixed order: Forename, Surname, Email, DateOfBirth.

use crate::model::user::User;
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

const NAME_MAX_CHARS: usize = 50;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s'-]+$").expect("valid name regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Category of a single rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    Required,
    InvalidCharacters,
    TooLong,
    InvalidFormat,
    FutureDate,
}

/// One violated rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// External field name, e.g. `Forename`.
    pub field: &'static str,
    pub kind: ValidationErrorKind,
    /// Human-readable message suitable for form redisplay.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Non-empty set of violations returned to service callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", summarize(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Violations reported for one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |error| error.field == field)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates `user` against the local calendar date.
pub fn validate_user(user: &User) -> Vec<ValidationError> {
    validate_user_on(user, Local::now().date_naive())
}

/// Validates `user`, treating `today` as the latest allowed date of birth.
pub fn validate_user_on(user: &User, today: NaiveDate) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_name("Forename", &user.forename, &mut errors);
    check_name("Surname", &user.surname, &mut errors);
    check_email(&user.email, &mut errors);
    check_date_of_birth(user.date_of_birth, today, &mut errors);
    errors
}

/// Like `validate_user`, but as a `Result` for `?` call sites.
pub fn ensure_valid(user: &User) -> Result<(), ValidationErrors> {
    let errors = validate_user(user);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn check_name(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(
            field,
            ValidationErrorKind::Required,
            format!("{field} is required."),
        ));
        return;
    }

    if !NAME_RE.is_match(value) {
        errors.push(ValidationError::new(
            field,
            ValidationErrorKind::InvalidCharacters,
            format!("{field} can only contain letters, spaces, apostrophes or hyphens."),
        ));
    }

    if value.chars().count() > NAME_MAX_CHARS {
        errors.push(ValidationError::new(
            field,
            ValidationErrorKind::TooLong,
            format!("{field} must be under {NAME_MAX_CHARS} characters."),
        ));
    }
}

fn check_email(value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(
            "Email",
            ValidationErrorKind::Required,
            "Email is required.",
        ));
        return;
    }

    if !EMAIL_RE.is_match(value) {
        errors.push(ValidationError::new(
            "Email",
            ValidationErrorKind::InvalidFormat,
            "Invalid email address.",
        ));
    }
}

fn check_date_of_birth(
    value: Option<NaiveDate>,
    today: NaiveDate,
    errors: &mut Vec<ValidationError>,
) {
    match value {
        None => errors.push(ValidationError::new(
            "DateOfBirth",
            ValidationErrorKind::Required,
            "Date of birth is required.",
        )),
        Some(date) if date > today => errors.push(ValidationError::new(
            "DateOfBirth",
            ValidationErrorKind::FutureDate,
            "Date of birth cannot be in the future.",
        )),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_user, validate_user_on, ValidationErrorKind};
    use crate::model::user::User;
    use chrono::{Days, Local, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).expect("fixed today is a valid date")
    }

    fn valid_user() -> User {
        User::new(
            "Kyle",
            "Cowan",
            "KyleCowan@gmail.com",
            true,
            NaiveDate::from_ymd_opt(2025, 1, 1),
        )
    }

    fn kinds_for(user: &User, field: &str) -> Vec<ValidationErrorKind> {
        validate_user_on(user, today())
            .into_iter()
            .filter(|error| error.field == field)
            .map(|error| error.kind)
            .collect()
    }

    #[test]
    fn valid_user_passes() {
        assert!(validate_user_on(&valid_user(), today()).is_empty());
    }

    #[test]
    fn names_allow_spaces_apostrophes_and_hyphens() {
        let mut user = valid_user();
        user.forename = "Mary-Jane O'Neil".to_string();
        user.surname = "de la Cruz".to_string();
        assert!(validate_user_on(&user, today()).is_empty());
    }

    #[test]
    fn blank_name_reports_only_required() {
        let mut user = valid_user();
        user.forename = "   ".to_string();
        assert_eq!(kinds_for(&user, "Forename"), [ValidationErrorKind::Required]);
    }

    #[test]
    fn digits_in_name_report_exactly_one_error() {
        let mut user = valid_user();
        user.forename = "Kyle123".to_string();
        let errors = validate_user_on(&user, today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "Forename");
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidCharacters);
    }

    #[test]
    fn over_long_surname_is_too_long_only() {
        let mut user = valid_user();
        user.surname = "C".repeat(51);
        assert_eq!(kinds_for(&user, "Surname"), [ValidationErrorKind::TooLong]);

        user.surname = "C".repeat(50);
        assert!(kinds_for(&user, "Surname").is_empty());
    }

    #[test]
    fn over_long_name_with_bad_characters_reports_both() {
        let mut user = valid_user();
        user.forename = "K1".repeat(30);
        assert_eq!(
            kinds_for(&user, "Forename"),
            [
                ValidationErrorKind::InvalidCharacters,
                ValidationErrorKind::TooLong
            ]
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["abc", "kyle@", "@example.com", "kyle@@example.com", "ky le@x.com"] {
            let mut user = valid_user();
            user.email = email.to_string();
            assert_eq!(
                kinds_for(&user, "Email"),
                [ValidationErrorKind::InvalidFormat],
                "email `{email}` should be rejected"
            );
        }
    }

    #[test]
    fn empty_email_is_required() {
        let mut user = valid_user();
        user.email.clear();
        assert_eq!(kinds_for(&user, "Email"), [ValidationErrorKind::Required]);
    }

    #[test]
    fn missing_date_of_birth_is_required() {
        let mut user = valid_user();
        user.date_of_birth = None;
        let errors = validate_user_on(&user, today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Date of birth is required.");
    }

    #[test]
    fn date_of_birth_today_is_allowed_but_tomorrow_is_not() {
        let mut user = valid_user();
        user.date_of_birth = Some(today());
        assert!(kinds_for(&user, "DateOfBirth").is_empty());

        user.date_of_birth = today().succ_opt();
        assert_eq!(
            kinds_for(&user, "DateOfBirth"),
            [ValidationErrorKind::FutureDate]
        );
    }

    #[test]
    fn all_violations_are_reported_in_field_order() {
        let user = User::new("", "C0wan", "nope", false, None);
        let fields: Vec<_> = validate_user_on(&user, today())
            .into_iter()
            .map(|error| error.field)
            .collect();
        assert_eq!(fields, ["Forename", "Surname", "Email", "DateOfBirth"]);
    }

    #[test]
    fn validate_user_uses_local_today() {
        let mut user = valid_user();
        user.date_of_birth = Local::now().date_naive().checked_add_days(Days::new(2));
        let kinds: Vec<_> = validate_user(&user)
            .into_iter()
            .filter(|error| error.field == "DateOfBirth")
            .map(|error| error.kind)
            .collect();
        assert_eq!(kinds, [ValidationErrorKind::FutureDate]);

        user.date_of_birth = NaiveDate::from_ymd_opt(1990, 4, 2);
        assert!(validate_user(&user).is_empty());
    }
}

//! Client-side form validation.
//!
//! Each form type turns raw input strings into the request body it guards.
//! Nothing here touches the network: a form that fails validation never
//! produces a request.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{LoginRequest, RegisterRequest, Transaction, TransactionInput};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 255;
pub const USERNAME_MIN_CHARS: usize = 2;
pub const PASSWORD_MIN_CHARS: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Form fields that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Description,
    Amount,
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
        }
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("Must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Must be at most {max} characters")]
    TooLong { max: usize },
    #[error("Amount must be a number")]
    NotANumber,
    #[error("Amount must be greater than zero")]
    NotPositive,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Passwords don't match")]
    PasswordsDoNotMatch,
}

/// Field-level errors collected from one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error, keeping the first one reported for a field.
    pub fn insert(&mut self, field: Field, error: ValidationError) {
        self.0.entry(field).or_insert(error);
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    /// Inline message for `field`, if it failed.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    fn check(&mut self, field: Field, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.insert(field, error);
        }
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.label(), error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

fn validate_length(value: &str, min: usize, max: Option<usize>) -> Result<(), ValidationError> {
    let count = value.trim().chars().count();
    if count == 0 && min > 0 {
        return Err(ValidationError::Required);
    }
    if count < min {
        return Err(ValidationError::TooShort { min });
    }
    match max {
        Some(max) if count > max => Err(ValidationError::TooLong { max }),
        _ => Ok(()),
    }
}

/// Parses a positive, finite amount.
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber)?;
    if !amount.is_finite() {
        return Err(ValidationError::NotANumber);
    }
    if amount <= 0.0 {
        return Err(ValidationError::NotPositive);
    }
    Ok(amount)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    if EMAIL_PATTERN.is_match(trimmed) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required);
    }
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::TooShort {
            min: PASSWORD_MIN_CHARS,
        });
    }
    Ok(())
}

/// Raw contents of the transaction composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub name: String,
    pub description: String,
    pub amount: String,
    pub is_expense: bool,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            amount: String::new(),
            is_expense: true,
        }
    }
}

impl From<&Transaction> for TransactionDraft {
    fn from(transaction: &Transaction) -> Self {
        Self {
            name: transaction.name.clone(),
            description: transaction.description.clone(),
            amount: transaction.amount.to_string(),
            is_expense: transaction.is_expense,
        }
    }
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<TransactionInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            Field::Name,
            validate_length(&self.name, NAME_MIN_CHARS, Some(NAME_MAX_CHARS)),
        );
        errors.check(
            Field::Description,
            validate_length(&self.description, 0, Some(DESCRIPTION_MAX_CHARS)),
        );
        let amount = parse_amount(&self.amount).map_err(|error| errors.insert(Field::Amount, error));

        match amount {
            Ok(amount) => errors.into_result(|| TransactionInput {
                name: self.name.trim().to_string(),
                description: self.description.trim().to_string(),
                amount,
                is_expense: self.is_expense,
            }),
            Err(()) => Err(errors),
        }
    }
}

/// Raw contents of the login tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(Field::Username, validate_length(&self.username, 1, None));
        errors.check(Field::Password, validate_password(&self.password));
        errors.into_result(|| LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Raw contents of the signup tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            Field::Username,
            validate_length(&self.username, USERNAME_MIN_CHARS, None),
        );
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Password, validate_password(&self.password));
        if self.password != self.confirm_password {
            errors.insert(Field::ConfirmPassword, ValidationError::PasswordsDoNotMatch);
        }
        errors.into_result(|| RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

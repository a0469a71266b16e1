//! Users

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{required_text, ValidationError};

const MAX_NAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 255;

/// One `@`, no whitespace, non-empty local part and domain
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("invalid email regex"));

/// User record from `users`
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Stored as supplied by the caller (expected to be a hash)
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Validated payload for inserting a user
#[derive(Debug, Clone)]
pub struct NewUser {
    name: String,
    email: String,
    password: String,
}

impl NewUser {
    /// Create a user payload, validating each field.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::NewUser;
    ///
    /// assert!(NewUser::new("Eva Stanley", "sebastianguerra@ymail.com", "hash").is_ok());
    /// assert!(NewUser::new("Eva Stanley", "not-an-email", "hash").is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let email = email.into();
        let password = password.into();

        required_text("name", &name, MAX_NAME_LEN)?;
        required_text("email", &email, MAX_EMAIL_LEN)?;
        if !EMAIL_RE.is_match(&email) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like local@domain",
            });
        }
        if password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }

        Ok(Self {
            name: name.trim().to_owned(),
            email,
            password,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Attach an id, producing the stored record.
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
        }
    }
}

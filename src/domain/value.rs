use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Mailgun private API key.
///
/// Invariant: non-empty after trimming. `Debug` output never shows the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Environment variable the step reads the key from.
    pub const VAR: &'static str = "MAILGUN_API_KEY";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::VAR });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Mailgun sending domain (`mg.example.com`).
///
/// Invariant: non-empty after trimming.
pub struct Domain(String);

impl Domain {
    /// Environment variable the step reads the domain from.
    pub const VAR: &'static str = "MAILGUN_DOMAIN";

    /// Create a validated [`Domain`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::VAR });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated domain.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender mailbox (`from`), e.g. `Name <postmaster@domain>`.
pub struct Sender(String);

impl Sender {
    /// Form field name used by Mailgun (`from`).
    pub const FIELD: &'static str = "from";

    /// Display name used for every notification sent by the step.
    pub const DISPLAY_NAME: &'static str = "Bitrise Mailgun Step";

    /// Create a validated [`Sender`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The step's fixed sender: the `postmaster` mailbox of `domain`.
    pub fn postmaster(domain: &Domain) -> Self {
        Self(format!(
            "{} <postmaster@{}>",
            Self::DISPLAY_NAME,
            domain.as_str()
        ))
    }

    /// Borrow the sender as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Recipient list (`to`). Mailgun accepts a comma-separated list, which is passed through as is.
///
/// Invariant: non-empty after trimming.
pub struct Recipient(String);

impl Recipient {
    /// Form field name used by Mailgun (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated [`Recipient`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated recipient.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Email subject (`subject`).
///
/// Invariant: non-empty after trimming. The original value is preserved.
pub struct Subject(String);

impl Subject {
    /// Form field name used by Mailgun (`subject`).
    pub const FIELD: &'static str = "subject";

    /// Create a validated [`Subject`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the subject as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Email body, either HTML markup or plain text depending on the request's
/// [`MessageType`](crate::domain::MessageType).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageBody(String);

impl MessageBody {
    /// Name used in validation errors. The form field itself depends on the message type.
    pub const FIELD: &'static str = "body";

    /// Create a validated message body.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the body as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

use std::fmt;
use std::str::FromStr;

use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageBody, Recipient, Sender, Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How Mailgun should render the message body.
pub enum MessageType {
    #[default]
    Html,
    Text,
}

impl MessageType {
    /// Form field carrying the body. Mailgun tells HTML from plain text by the key, not the value.
    pub fn body_field(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "text",
        }
    }

    /// Parse `html` or `text`; anything else is rejected.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "html" => Ok(Self::Html),
            "text" => Ok(Self::Text),
            other => Err(ValidationError::UnsupportedMessageType {
                value: other.to_owned(),
            }),
        }
    }
}

impl FromStr for MessageType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.body_field())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of the CI build that triggered the step.
pub enum BuildOutcome {
    Succeeded,
    Failed,
}

impl BuildOutcome {
    /// Interpret `STEPLIB_BUILD_STATUS`: only `"0"` is a success, a missing value is a failure.
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("0") => Self::Succeeded,
            _ => Self::Failed,
        }
    }

    pub fn is_failed(self) -> bool {
        self == Self::Failed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A fully resolved message, ready to be encoded for Mailgun.
pub struct MessageRequest {
    from: Sender,
    to: Recipient,
    body: MessageBody,
    message_type: MessageType,
    subject: Option<Subject>,
}

impl MessageRequest {
    pub fn new(
        from: Sender,
        to: Recipient,
        body: MessageBody,
        message_type: MessageType,
        subject: Option<Subject>,
    ) -> Self {
        Self {
            from,
            to,
            body,
            message_type,
            subject,
        }
    }

    pub fn from(&self) -> &Sender {
        &self.from
    }

    pub fn to(&self) -> &Recipient {
        &self.to
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }
}

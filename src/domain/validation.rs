use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    UnsupportedMessageType { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::UnsupportedMessageType { value } => {
                write!(f, "unsupported message type: {value} (expected html or text)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

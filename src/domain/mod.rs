//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{BuildOutcome, MessageRequest, MessageType};
pub use response::{SendMessageResponse, Status};
pub use validation::ValidationError;
pub use value::{ApiKey, Domain, MessageBody, Recipient, Sender, Subject};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_rejects_empty() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::VAR
            })
        ));
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("key-secret").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
        assert_eq!(key.as_str(), "key-secret");
    }

    #[test]
    fn recipient_trims_and_rejects_empty() {
        assert_eq!(Recipient::new(" a@x.com ").unwrap().as_str(), "a@x.com");
        assert!(matches!(
            Recipient::new(""),
            Err(ValidationError::Empty {
                field: Recipient::FIELD
            })
        ));
    }

    #[test]
    fn body_preserves_whitespace() {
        let body = MessageBody::new("  hi\n").unwrap();
        assert_eq!(body.as_str(), "  hi\n");
        assert!(MessageBody::new(" \n ").is_err());
    }

    #[test]
    fn subject_rejects_blank() {
        assert!(Subject::new("").is_err());
        assert!(Subject::new("   ").is_err());
        assert_eq!(Subject::new("Build #1").unwrap().as_str(), "Build #1");
    }

    #[test]
    fn postmaster_sender_uses_domain() {
        let domain = Domain::new("mg.example.com").unwrap();
        assert_eq!(
            Sender::postmaster(&domain).as_str(),
            "Bitrise Mailgun Step <postmaster@mg.example.com>"
        );
        assert_eq!(
            Sender::new(" Ops <ops@x.com> ").unwrap().as_str(),
            "Ops <ops@x.com>"
        );
        assert!(Sender::new("").is_err());
    }

    #[test]
    fn message_type_parses_known_values_only() {
        assert_eq!(MessageType::parse("html"), Ok(MessageType::Html));
        assert_eq!("text".parse::<MessageType>(), Ok(MessageType::Text));
        assert_eq!(
            MessageType::parse("HTML"),
            Err(ValidationError::UnsupportedMessageType {
                value: "HTML".to_owned()
            })
        );
        assert!(matches!(
            MessageType::parse(""),
            Err(ValidationError::UnsupportedMessageType { .. })
        ));
    }

    #[test]
    fn message_type_keys_body_field() {
        assert_eq!(MessageType::Html.body_field(), "html");
        assert_eq!(MessageType::Text.body_field(), "text");
        assert_eq!(MessageType::default(), MessageType::Html);
        assert_eq!(MessageType::Text.to_string(), "text");
    }

    #[test]
    fn build_outcome_only_zero_is_success() {
        assert_eq!(BuildOutcome::from_status(Some("0")), BuildOutcome::Succeeded);
        assert_eq!(BuildOutcome::from_status(Some("1")), BuildOutcome::Failed);
        assert_eq!(BuildOutcome::from_status(Some("")), BuildOutcome::Failed);
        assert_eq!(BuildOutcome::from_status(None), BuildOutcome::Failed);
        assert!(BuildOutcome::Failed.is_failed());
        assert!(!BuildOutcome::Succeeded.is_failed());
    }
}

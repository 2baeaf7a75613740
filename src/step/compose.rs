//! Picks the message variant (recipient, subject, body) for the build outcome.

use tracing::info;

use crate::domain::{BuildOutcome, MessageRequest, MessageType, Sender};
use crate::step::settings::{ERROR_EMAIL_MESSAGE, ERROR_EMAIL_SUBJECT, ERROR_SEND_TO, Settings};

/// Build the request to send.
///
/// A failed build prefers each `MAILGUN_ERROR_*` override and falls back to the
/// normal value for that field alone. A successful build always uses the normal values.
pub fn build_message_request(
    settings: &Settings,
    outcome: BuildOutcome,
    message_type: MessageType,
) -> MessageRequest {
    let to = choose(
        outcome,
        settings.error_send_to.as_ref(),
        Some(&settings.send_to),
        ERROR_SEND_TO,
    )
    .unwrap_or(&settings.send_to);
    let body = choose(
        outcome,
        settings.error_message.as_ref(),
        Some(&settings.message),
        ERROR_EMAIL_MESSAGE,
    )
    .unwrap_or(&settings.message);
    let subject = choose(
        outcome,
        settings.error_subject.as_ref(),
        settings.subject.as_ref(),
        ERROR_EMAIL_SUBJECT,
    );

    let request = MessageRequest::new(
        Sender::postmaster(&settings.domain),
        to.clone(),
        body.clone(),
        message_type,
        subject.cloned(),
    );
    info!(
        from = request.from().as_str(),
        to = request.to().as_str(),
        subject = request.subject().map(|s| s.as_str()),
        %message_type,
        "message request built"
    );
    request
}

fn choose<'a, T>(
    outcome: BuildOutcome,
    error: Option<&'a T>,
    normal: Option<&'a T>,
    name: &str,
) -> Option<&'a T> {
    match (outcome, error) {
        (BuildOutcome::Failed, Some(value)) => Some(value),
        (BuildOutcome::Failed, None) => {
            info!("build failed, but {name} is not defined; using default");
            normal
        }
        (BuildOutcome::Succeeded, _) => normal,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::domain::{MessageBody, Recipient, Subject};
    use crate::step::settings::RawSettings;

    use super::*;

    fn settings(
        subject: Option<&str>,
        error_to: Option<&str>,
        error_subject: Option<&str>,
        error_body: Option<&str>,
    ) -> Settings {
        Settings::load(RawSettings {
            api_key: Some("key-test".to_owned()),
            domain: Some("mg.example.com".to_owned()),
            send_to: Some("a@x.com".to_owned()),
            email_message: Some("hi".to_owned()),
            email_subject: subject.map(str::to_owned),
            error_send_to: error_to.map(str::to_owned),
            error_email_subject: error_subject.map(str::to_owned),
            error_email_message: error_body.map(str::to_owned),
            ..Default::default()
        })
        .unwrap()
    }

    fn fields(request: &MessageRequest) -> (&str, &str, Option<&str>) {
        (
            request.to().as_str(),
            request.body().as_str(),
            request.subject().map(Subject::as_str),
        )
    }

    #[rstest]
    #[case(None, None, None, ("a@x.com", "hi", Some("ok")))]
    #[case(Some("b@x.com"), None, None, ("b@x.com", "hi", Some("ok")))]
    #[case(None, Some("FAILED"), None, ("a@x.com", "hi", Some("FAILED")))]
    #[case(None, None, Some("boom"), ("a@x.com", "boom", Some("ok")))]
    #[case(Some("b@x.com"), Some("FAILED"), None, ("b@x.com", "hi", Some("FAILED")))]
    #[case(Some("b@x.com"), None, Some("boom"), ("b@x.com", "boom", Some("ok")))]
    #[case(None, Some("FAILED"), Some("boom"), ("a@x.com", "boom", Some("FAILED")))]
    #[case(Some("b@x.com"), Some("FAILED"), Some("boom"), ("b@x.com", "boom", Some("FAILED")))]
    fn failed_build_falls_back_per_field(
        #[case] error_to: Option<&str>,
        #[case] error_subject: Option<&str>,
        #[case] error_body: Option<&str>,
        #[case] expected: (&str, &str, Option<&str>),
    ) {
        let settings = settings(Some("ok"), error_to, error_subject, error_body);
        let request = build_message_request(&settings, BuildOutcome::Failed, MessageType::Html);

        assert_eq!(fields(&request), expected);
    }

    #[rstest]
    #[case(None, None, None)]
    #[case(Some("b@x.com"), None, None)]
    #[case(None, Some("FAILED"), Some("boom"))]
    #[case(Some("b@x.com"), Some("FAILED"), Some("boom"))]
    fn successful_build_ignores_overrides(
        #[case] error_to: Option<&str>,
        #[case] error_subject: Option<&str>,
        #[case] error_body: Option<&str>,
    ) {
        let settings = settings(Some("ok"), error_to, error_subject, error_body);
        let request =
            build_message_request(&settings, BuildOutcome::Succeeded, MessageType::Html);

        assert_eq!(fields(&request), ("a@x.com", "hi", Some("ok")));
    }

    #[test]
    fn subject_can_end_up_absent() {
        let settings = settings(None, Some("b@x.com"), None, None);

        let request = build_message_request(&settings, BuildOutcome::Failed, MessageType::Text);
        assert_eq!(fields(&request), ("b@x.com", "hi", None));

        let request =
            build_message_request(&settings, BuildOutcome::Succeeded, MessageType::Text);
        assert_eq!(fields(&request), ("a@x.com", "hi", None));
    }

    #[test]
    fn error_subject_used_without_default_subject() {
        let settings = settings(None, None, Some("FAILED"), None);
        let request = build_message_request(&settings, BuildOutcome::Failed, MessageType::Html);

        assert_eq!(fields(&request), ("a@x.com", "hi", Some("FAILED")));
    }

    #[test]
    fn sender_and_message_type_are_carried() {
        let settings = settings(None, None, None, None);
        let request = build_message_request(&settings, BuildOutcome::Failed, MessageType::Text);

        assert_eq!(
            request.from().as_str(),
            "Bitrise Mailgun Step <postmaster@mg.example.com>"
        );
        assert_eq!(request.message_type(), MessageType::Text);
        assert_eq!(request.to(), &Recipient::new("a@x.com").unwrap());
        assert_eq!(request.body(), &MessageBody::new("hi").unwrap());
    }
}

use serde::Deserialize;

use crate::domain::{MessageRequest, Recipient, SendMessageResponse, Sender, Status, Subject};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct SendMessageJsonResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub fn encode_message_form(request: &MessageRequest) -> Vec<(String, String)> {
    let mut params = vec![
        (Sender::FIELD.to_owned(), request.from().as_str().to_owned()),
        (Recipient::FIELD.to_owned(), request.to().as_str().to_owned()),
        (
            request.message_type().body_field().to_owned(),
            request.body().as_str().to_owned(),
        ),
    ];

    if let Some(subject) = request.subject() {
        params.push((Subject::FIELD.to_owned(), subject.as_str().to_owned()));
    }

    params
}

pub fn decode_send_message_json_response(
    json: &str,
) -> Result<SendMessageResponse, TransportError> {
    let parsed: SendMessageJsonResponse = serde_json::from_str(json)?;

    let id = parsed.id.filter(|id| !id.trim().is_empty());
    let status = if id.is_some() {
        Status::Queued
    } else {
        Status::Rejected
    };

    Ok(SendMessageResponse {
        status,
        id,
        message: parsed.message,
    })
}

//! Environment configuration for the step.
//!
//! `clap` reads the environment into [`RawSettings`]; [`Settings::load`] turns that into
//! validated domain values. Empty and whitespace-only values count as absent.

use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use crate::domain::{
    ApiKey, BuildOutcome, Domain, MessageBody, MessageType, Recipient, Subject, ValidationError,
};

pub const API_KEY: &str = "MAILGUN_API_KEY";
pub const DOMAIN: &str = "MAILGUN_DOMAIN";
pub const SEND_TO: &str = "MAILGUN_SEND_TO";
pub const EMAIL_MESSAGE: &str = "MAILGUN_EMAIL_MESSAGE";
pub const EMAIL_SUBJECT: &str = "MAILGUN_EMAIL_SUBJECT";
pub const ERROR_SEND_TO: &str = "MAILGUN_ERROR_SEND_TO";
pub const ERROR_EMAIL_SUBJECT: &str = "MAILGUN_ERROR_EMAIL_SUBJECT";
pub const ERROR_EMAIL_MESSAGE: &str = "MAILGUN_ERROR_EMAIL_MESSAGE";
pub const MESSAGE_TYPE: &str = "MAILGUN_MESSAGE_TYPE";
pub const BUILD_STATUS: &str = "STEPLIB_BUILD_STATUS";
pub const FORMATTED_OUTPUT_PATH: &str = "BITRISE_STEP_FORMATTED_OUTPUT_FILE_PATH";

/// Step inputs exactly as found in the environment (or on the command line).
#[derive(Debug, Clone, Default, Args)]
pub struct RawSettings {
    /// Mailgun private API key
    #[arg(long, env = API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Mailgun sending domain
    #[arg(long, env = DOMAIN)]
    pub domain: Option<String>,

    /// Default recipient(s)
    #[arg(long, env = SEND_TO)]
    pub send_to: Option<String>,

    /// Default message body
    #[arg(long, env = EMAIL_MESSAGE)]
    pub email_message: Option<String>,

    /// Default subject
    #[arg(long, env = EMAIL_SUBJECT)]
    pub email_subject: Option<String>,

    /// Recipient(s) used when the build failed
    #[arg(long, env = ERROR_SEND_TO)]
    pub error_send_to: Option<String>,

    /// Subject used when the build failed
    #[arg(long, env = ERROR_EMAIL_SUBJECT)]
    pub error_email_subject: Option<String>,

    /// Message body used when the build failed
    #[arg(long, env = ERROR_EMAIL_MESSAGE)]
    pub error_email_message: Option<String>,

    /// `html` or `text`; anything else falls back to `html`
    #[arg(long, env = MESSAGE_TYPE)]
    pub message_type: Option<String>,

    /// `0` when the build succeeded
    #[arg(long, env = BUILD_STATUS)]
    pub build_status: Option<String>,

    /// Formatted output file rendered by the CI system
    #[arg(long, env = FORMATTED_OUTPUT_PATH)]
    pub formatted_output_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required variables that are unset or empty, in declaration order.
    #[error("required configuration is missing: {}", .names.join(", "))]
    Missing { names: Vec<&'static str> },
}

/// Validated, immutable step configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub domain: Domain,
    pub send_to: Recipient,
    pub message: MessageBody,
    pub subject: Option<Subject>,
    pub error_send_to: Option<Recipient>,
    pub error_subject: Option<Subject>,
    pub error_message: Option<MessageBody>,
    pub message_type: MessageType,
    pub outcome: BuildOutcome,
    pub formatted_output_path: Option<PathBuf>,
}

impl Settings {
    /// Validate raw inputs. Fails with every missing required variable at once.
    pub fn load(raw: RawSettings) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let api_key = required(raw.api_key, API_KEY, &mut missing, |v| ApiKey::new(v));
        let domain = required(raw.domain, DOMAIN, &mut missing, |v| Domain::new(v));
        let send_to = required(raw.send_to, SEND_TO, &mut missing, |v| Recipient::new(v));
        let message = required(raw.email_message, EMAIL_MESSAGE, &mut missing, |v| {
            MessageBody::new(v)
        });

        let (Some(api_key), Some(domain), Some(send_to), Some(message)) =
            (api_key, domain, send_to, message)
        else {
            return Err(ConfigError::Missing { names: missing });
        };

        let settings = Self {
            api_key,
            domain,
            send_to,
            message,
            subject: optional(raw.email_subject, |v| Subject::new(v)),
            error_send_to: optional(raw.error_send_to, |v| Recipient::new(v)),
            error_subject: optional(raw.error_email_subject, |v| Subject::new(v)),
            error_message: optional(raw.error_email_message, |v| MessageBody::new(v)),
            message_type: message_type(raw.message_type.as_deref()),
            outcome: BuildOutcome::from_status(raw.build_status.as_deref()),
            formatted_output_path: raw
                .formatted_output_path
                .filter(|path| !path.as_os_str().is_empty()),
        };

        for name in settings.missing_optional() {
            info!("{name} is not provided");
        }

        Ok(settings)
    }

    /// Optional message variables that were not provided.
    pub fn missing_optional(&self) -> Vec<&'static str> {
        [
            (EMAIL_SUBJECT, self.subject.is_none()),
            (ERROR_SEND_TO, self.error_send_to.is_none()),
            (ERROR_EMAIL_SUBJECT, self.error_subject.is_none()),
            (ERROR_EMAIL_MESSAGE, self.error_message.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect()
    }
}

fn required<T>(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
    parse: impl FnOnce(String) -> Result<T, ValidationError>,
) -> Option<T> {
    let parsed = optional(value, parse);
    if parsed.is_none() {
        missing.push(name);
    }
    parsed
}

fn optional<T>(
    value: Option<String>,
    parse: impl FnOnce(String) -> Result<T, ValidationError>,
) -> Option<T> {
    value.and_then(|value| parse(value).ok())
}

fn message_type(value: Option<&str>) -> MessageType {
    match value.filter(|value| !value.is_empty()) {
        None => MessageType::default(),
        Some(value) => MessageType::parse(value).unwrap_or_else(|err| {
            warn!(error = %err, "{MESSAGE_TYPE} not recognised, using html");
            MessageType::Html
        }),
    }
}

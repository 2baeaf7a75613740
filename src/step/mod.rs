//! The CI step: load settings, build the message, send it, report the outcome.

pub mod compose;
pub mod report;
pub mod settings;

use tracing::{error, info};

use crate::client::{MailgunClient, MailgunError};
use crate::domain::SendMessageResponse;

pub use compose::build_message_request;
pub use report::FormattedOutput;
pub use settings::{ConfigError, RawSettings, Settings};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to send message: {0}")]
    Send(#[from] MailgunError),
}

/// Run the step once against the Mailgun API.
///
/// Both error kinds are written to the formatted output before returning. The binary
/// exits with status 1 for either, so a failed send is visible to the CI system.
pub async fn run(raw: RawSettings) -> Result<SendMessageResponse, StepError> {
    run_with(raw, |settings| {
        MailgunClient::new(settings.api_key.clone(), settings.domain.clone())
    })
    .await
}

async fn run_with<F>(raw: RawSettings, connect: F) -> Result<SendMessageResponse, StepError>
where
    F: FnOnce(&Settings) -> MailgunClient,
{
    let output = FormattedOutput::new(raw.formatted_output_path.clone());
    output.clear();
    if let Some(path) = output.path() {
        info!(path = %path.display(), "writing formatted output");
    }

    let settings = match Settings::load(raw) {
        Ok(settings) => settings,
        Err(err) => {
            let ConfigError::Missing { names } = &err;
            for name in names {
                output.report_error(&format!("${name} is not provided!"));
            }
            error!(error = %err, "invalid configuration");
            return Err(err.into());
        }
    };

    for name in settings.missing_optional() {
        output.section(&format!("${name} is not provided!"));
    }

    let request = build_message_request(&settings, settings.outcome, settings.message_type);
    let client = connect(&settings);
    info!(endpoint = %client.redacted_endpoint(), "sending message");

    match client.send_message(&request).await {
        Ok(response) => {
            info!(
                id = response.id.as_deref(),
                message = response.message.as_deref(),
                "message queued"
            );
            output.report_success(
                request.from().as_str(),
                request.to().as_str(),
                request.body().as_str(),
            );
            Ok(response)
        }
        Err(err) => {
            error!(error = %err, "failed to send message");
            output.report_error(&err.to_string());
            Err(err.into())
        }
    }
}

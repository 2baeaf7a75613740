//! Mailgun build-notification step for CI pipelines.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! Mailgun's wire format, a small client layer issuing the request, and the `step`
//! module wiring environment configuration to a single send.
//!
//! ```rust,no_run
//! use mailgun_step::{
//!     ApiKey, Domain, MailgunClient, MessageBody, MessageRequest, MessageType, Recipient, Sender,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let domain = Domain::new("mg.example.com")?;
//!     let client = MailgunClient::new(ApiKey::new("key-...")?, domain.clone());
//!     let request = MessageRequest::new(
//!         Sender::postmaster(&domain),
//!         Recipient::new("team@example.com")?,
//!         MessageBody::new("Build finished")?,
//!         MessageType::Text,
//!         None,
//!     );
//!     let _resp = client.send_message(&request).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod step;
mod transport;

pub use client::{MailgunClient, MailgunClientBuilder, MailgunError};
pub use domain::{
    ApiKey, BuildOutcome, Domain, MessageBody, MessageRequest, MessageType, Recipient,
    SendMessageResponse, Sender, Status, Subject, ValidationError,
};
pub use step::{ConfigError, FormattedOutput, RawSettings, Settings, StepError};

//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{ApiKey, Domain, MessageRequest, SendMessageResponse, Status};

const DEFAULT_API_HOST: &str = "api.mailgun.net";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

/// Failure while talking to the server, split by the stage it happened in.
#[derive(Debug)]
pub(crate) enum HttpError {
    /// The request could not be sent or no response head arrived.
    Send(BoxError),
    /// The response head arrived but the body could not be read.
    Body(BoxError),
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, HttpError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, HttpError>> {
        Box::pin(async move {
            // Credentials embedded in the URL are turned into a basic-auth header by reqwest.
            let response = self
                .client
                .post(url)
                .form(&params)
                .send()
                .await
                .map_err(|err| HttpError::Send(Box::new(err)))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|err| HttpError::Body(Box::new(err)))?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MailgunClient`].
///
/// Every variant aborts the single send attempt; nothing is retried.
pub enum MailgunError {
    /// HTTP client / transport failure (DNS, TLS, connection refused, timeouts).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] BoxError),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    /// Mailgun answered without queueing the message.
    #[error("message was not queued: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },
}

#[derive(Debug, Clone)]
/// Builder for [`MailgunClient`].
///
/// Use this when you need to customize the API host, endpoint, timeout, or user-agent.
pub struct MailgunClientBuilder {
    api_key: ApiKey,
    domain: Domain,
    api_host: String,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MailgunClientBuilder {
    /// Create a builder for the default API host with no timeout/user-agent override.
    pub fn new(api_key: ApiKey, domain: Domain) -> Self {
        Self {
            api_key,
            domain,
            api_host: DEFAULT_API_HOST.to_owned(),
            endpoint: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API host (`api.mailgun.net`), e.g. `api.eu.mailgun.net`.
    pub fn api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Override the full messages endpoint URL. Takes precedence over [`Self::api_host`].
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`MailgunClient`].
    pub fn build(self) -> Result<MailgunClient, MailgunError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| MailgunError::Transport(Box::new(err)))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| messages_endpoint(&self.api_host, &self.api_key, &self.domain));

        Ok(MailgunClient {
            api_key: self.api_key,
            domain: self.domain,
            endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Mailgun messages API client.
///
/// Sends one form-encoded `POST` to
/// `https://api:<api key>@api.mailgun.net/v3/<domain>/messages` per call and
/// expects a JSON response carrying the queued message id.
pub struct MailgunClient {
    api_key: ApiKey,
    domain: Domain,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl MailgunClient {
    /// Create a client for the default API host.
    ///
    /// For more customization, use [`MailgunClient::builder`].
    pub fn new(api_key: ApiKey, domain: Domain) -> Self {
        let endpoint = messages_endpoint(DEFAULT_API_HOST, &api_key, &domain);
        Self {
            api_key,
            domain,
            endpoint,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey, domain: Domain) -> MailgunClientBuilder {
        MailgunClientBuilder::new(api_key, domain)
    }

    #[cfg(test)]
    pub(crate) fn with_transport(
        api_key: ApiKey,
        domain: Domain,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        let endpoint = messages_endpoint(DEFAULT_API_HOST, &api_key, &domain);
        Self {
            api_key,
            domain,
            endpoint,
            http,
        }
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The messages endpoint, including the embedded credential.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The messages endpoint with the credential masked, safe for logs.
    pub fn redacted_endpoint(&self) -> String {
        match url::Url::parse(&self.endpoint) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("***"));
                }
                url.to_string()
            }
            Err(_) => "<invalid endpoint>".to_owned(),
        }
    }

    /// Send a message through Mailgun.
    ///
    /// Errors:
    /// - [`MailgunError::Transport`] when the request cannot be sent,
    /// - [`MailgunError::BodyRead`] when the response body cannot be read,
    /// - [`MailgunError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`MailgunError::Parse`] when the body is not the expected JSON,
    /// - [`MailgunError::Rejected`] when Mailgun did not return a message id.
    pub async fn send_message(
        &self,
        request: &MessageRequest,
    ) -> Result<SendMessageResponse, MailgunError> {
        let params = crate::transport::encode_message_form(request);
        tracing::debug!(
            endpoint = %self.redacted_endpoint(),
            fields = ?params.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            "posting message"
        );

        let response = self
            .http
            .post_form(&self.endpoint, params)
            .await
            .map_err(|err| match err {
                HttpError::Send(err) => MailgunError::Transport(err),
                HttpError::Body(err) => MailgunError::BodyRead(err),
            })?;

        tracing::debug!(status = response.status, body = %response.body, "mailgun responded");

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(MailgunError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let parsed = crate::transport::decode_send_message_json_response(&response.body)
            .map_err(|err| MailgunError::Parse(Box::new(err)))?;

        if parsed.status != Status::Queued {
            return Err(MailgunError::Rejected {
                message: parsed.message,
            });
        }

        Ok(parsed)
    }
}

fn messages_endpoint(api_host: &str, api_key: &ApiKey, domain: &Domain) -> String {
    format!(
        "https://api:{}@{}/v3/{}/messages",
        query_escape(api_key.as_str()),
        api_host,
        query_escape(domain.as_str())
    )
}

fn query_escape(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

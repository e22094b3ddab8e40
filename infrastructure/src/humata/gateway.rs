//! Humata adapter for the [`QaGateway`] port.

use super::error::{HumataError, Result};
use super::protocol::{AskPayload, CreateConversationRequest, DATA_PREFIX, EVENT_STREAM};
use super::stream::spawn_line_reader;
use async_trait::async_trait;
use relay_application::{AskReply, AskRequest, FragmentStream, GatewayError, QaGateway};
use relay_domain::DocumentId;
use relay_domain::util::preview;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Default Humata API root.
pub const DEFAULT_BASE_URL: &str = "https://app.humata.ai/api/v1";

/// Characters of an unreadable body kept for error messages.
const RAW_PREVIEW_CHARS: usize = 200;

/// Gateway that talks to the Humata HTTP API with a bearer token.
#[derive(Clone)]
pub struct HumataGateway {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HumataGateway {
    /// Create a gateway for `base_url`.
    ///
    /// `timeout` bounds each request as a whole, including the time spent
    /// reading a streamed answer.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        accept: &str,
    ) -> Result<reqwest::Response> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, accept)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            info!("POST {} returned {}", url, status);
            return Err(HumataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn read_json(response: reqwest::Response) -> Result<Value> {
        parse_json(&response.text().await?)
    }
}

fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| HumataError::Parse {
        error: e.to_string(),
        raw: preview(text, RAW_PREVIEW_CHARS),
    })
}

/// True when the first non-blank line of `text` is a `data:` record.
fn looks_like_event_stream(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.starts_with(DATA_PREFIX))
}

fn is_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with(EVENT_STREAM))
}

#[async_trait]
impl QaGateway for HumataGateway {
    async fn create_conversation(
        &self,
        document_id: &DocumentId,
    ) -> std::result::Result<Value, GatewayError> {
        let request = CreateConversationRequest {
            document_ids: vec![document_id.as_str().to_string()],
        };
        let response = self
            .post("conversations", &request, "application/json")
            .await?;
        Ok(Self::read_json(response).await?)
    }

    async fn ask(&self, request: &AskRequest) -> std::result::Result<AskReply, GatewayError> {
        let accept = if request.stream {
            "text/event-stream, application/json"
        } else {
            "application/json"
        };
        let response = self
            .post("ask", &AskPayload::from(request), accept)
            .await?;

        if is_event_stream(response.headers()) {
            debug!("Reading streamed answer for session {}", request.session_id);
            Ok(AskReply::Stream(spawn_line_reader(response)))
        } else {
            let text = response.text().await.map_err(HumataError::from)?;
            match parse_json(&text) {
                Ok(body) => Ok(AskReply::Full(body)),
                // Records streamed under another content type
                Err(_) if looks_like_event_stream(&text) => {
                    debug!("Reading untyped event-stream body for session {}", request.session_id);
                    Ok(AskReply::Stream(FragmentStream::from_lines(text.lines())))
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

impl std::fmt::Debug for HumataGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumataGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

//! Session store — the cached upstream conversation.
//!
//! [`SessionStore`] owns at most one [`Session`] (an arena of one) behind an
//! async mutex. The lock is held across the upstream create-conversation
//! call, so requests racing on a cold cache issue a single creation and all
//! receive the same session.
//!
//! ```text
//! get_or_create(doc) ──lock──► cached & bound to doc? ──yes──► clone
//!                                       │ no
//!                                       ▼
//!                          POST /conversations ──► extract id ──► cache
//! ```

use crate::ports::exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger};
use crate::ports::qa_gateway::{GatewayError, QaGateway};
use relay_domain::util::preview;
use relay_domain::{DocumentId, Session, SessionIdFields};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Why a conversation could not be created.
///
/// Variants are kept apart for logging; callers usually treat them as one
/// failure kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionCreationError {
    #[error("upstream rejected conversation creation (status {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("conversation response could not be parsed: {0}")]
    MalformedBody(String),

    #[error("conversation response has none of the identifier fields [{tried}]: {body}")]
    MissingIdentifier { tried: String, body: String },

    #[error("could not reach upstream: {0}")]
    Transport(String),
}

impl SessionCreationError {
    /// Short machine-readable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionCreationError::Rejected { .. } => "rejected",
            SessionCreationError::MalformedBody(_) => "malformed_body",
            SessionCreationError::MissingIdentifier { .. } => "missing_identifier",
            SessionCreationError::Transport(_) => "transport",
        }
    }
}

impl From<GatewayError> for SessionCreationError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Rejected { status, body } => {
                SessionCreationError::Rejected { status, body }
            }
            GatewayError::MalformedBody(body) => SessionCreationError::MalformedBody(body),
            other => SessionCreationError::Transport(other.to_string()),
        }
    }
}

/// A session handed out by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredSession {
    pub session: Session,
    /// True if this call created the session upstream.
    pub created: bool,
}

/// Cache of the single active upstream conversation.
pub struct SessionStore {
    gateway: Arc<dyn QaGateway>,
    id_fields: SessionIdFields,
    slot: Mutex<Option<Session>>,
    exchange_logger: Arc<dyn ExchangeLogger>,
}

impl SessionStore {
    pub fn new(gateway: Arc<dyn QaGateway>) -> Self {
        Self {
            gateway,
            id_fields: SessionIdFields::default(),
            slot: Mutex::new(None),
            exchange_logger: Arc::new(NoExchangeLogger),
        }
    }

    /// Override the accepted identifier field names.
    pub fn with_id_fields(mut self, id_fields: SessionIdFields) -> Self {
        self.id_fields = id_fields;
        self
    }

    pub fn with_exchange_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.exchange_logger = logger;
        self
    }

    /// Return the cached session for `document_id`, creating one if needed.
    pub async fn get_or_create(
        &self,
        document_id: &DocumentId,
    ) -> Result<Session, SessionCreationError> {
        self.acquire(document_id).await.map(|a| a.session)
    }

    /// Like [`get_or_create`](Self::get_or_create), also reporting whether
    /// the session was created by this call.
    pub async fn acquire(
        &self,
        document_id: &DocumentId,
    ) -> Result<AcquiredSession, SessionCreationError> {
        let mut slot = self.slot.lock().await;

        if let Some(session) = slot.as_ref()
            && session.is_bound_to(document_id)
        {
            debug!("Reusing session {} for document {}", session.id(), document_id);
            return Ok(AcquiredSession {
                session: session.clone(),
                created: false,
            });
        }

        if let Some(stale) = slot.take() {
            info!(
                "Dropping session {} bound to document {} (requested {})",
                stale.id(),
                stale.document_id(),
                document_id
            );
        }

        let session = self.create(document_id).await?;
        *slot = Some(session.clone());
        drop(slot);

        self.log_lifecycle("session_created", &session);
        Ok(AcquiredSession {
            session,
            created: true,
        })
    }

    /// Drop `session` from the cache if it is still the cached one.
    ///
    /// Returns true if something was dropped. A stale handle (the cache has
    /// already moved on to a newer session) leaves the cache untouched.
    pub async fn invalidate(&self, session: &Session) -> bool {
        let mut slot = self.slot.lock().await;
        if slot.as_ref() != Some(session) {
            debug!("Session {} already gone from cache", session.id());
            return false;
        }

        *slot = None;
        drop(slot);

        info!("Invalidated session {}", session.id());
        self.log_lifecycle("session_invalidated", session);
        true
    }

    /// The currently cached session, if any.
    pub async fn current(&self) -> Option<Session> {
        self.slot.lock().await.clone()
    }

    /// Record a lifecycle event. Must be called with the cache unlocked.
    fn log_lifecycle(&self, event_type: &'static str, session: &Session) {
        self.exchange_logger.log(ExchangeEvent::new(
            event_type,
            serde_json::json!({
                "session_id": session.id(),
                "document_id": session.document_id().as_str(),
            }),
        ));
    }

    async fn create(&self, document_id: &DocumentId) -> Result<Session, SessionCreationError> {
        info!("Creating upstream conversation for document {}", document_id);

        let result = self
            .gateway
            .create_conversation(document_id)
            .await
            .map_err(SessionCreationError::from)
            .and_then(|body| {
                self.id_fields.extract(&body).ok_or_else(|| {
                    SessionCreationError::MissingIdentifier {
                        tried: self.id_fields.names().join(", "),
                        body: preview(&body.to_string(), 200),
                    }
                })
            });

        match result {
            Ok(id) => {
                let session = Session::new(id, document_id.clone());
                info!("Created session {}", session.id());
                Ok(session)
            }
            Err(e) => {
                warn!("Session creation failed ({}): {}", e.kind(), e);
                Err(e)
            }
        }
    }
}

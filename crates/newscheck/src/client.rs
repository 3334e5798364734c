use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::schema::{detail_from_body, VerificationResult};
use crate::transport::{CheckTransport, HttpTransport, RawResponse, VerificationRequest};
use crate::validator::{validate, Statement, ValidationError};

/// The one value a renderer reads. Exactly one member is live at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(VerificationResult),
    Failed(CheckError),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&VerificationResult> {
        match self {
            RequestState::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CheckError> {
        match self {
            RequestState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Why a submission ended in `Failed`. `Display` is the user-facing message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("Failed to get a response: {0}")]
    Network(String),

    #[error("{0}")]
    Server(String),

    #[error("An unknown error occurred.")]
    UnknownServer,

    #[error("Invalid response from server: {0}")]
    Decode(String),
}

/// Map a settled HTTP exchange to its outcome. Never invents a result.
pub fn classify(response: &RawResponse) -> Result<VerificationResult, CheckError> {
    if response.status.is_success() {
        return VerificationResult::from_json(&response.body)
            .map_err(|e| CheckError::Decode(e.to_string()));
    }
    match detail_from_body(&response.body) {
        Some(detail) => Err(CheckError::Server(detail)),
        None => Err(CheckError::UnknownServer),
    }
}

/// Owns the request lifecycle and is the only writer of `RequestState`.
///
/// `submit` takes `&mut self`, so a second submission cannot start while one
/// is in flight. Readers follow the state through `subscribe`.
pub struct VerificationClient<T = HttpTransport> {
    transport: T,
    state: watch::Sender<RequestState>,
}

impl VerificationClient<HttpTransport> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(HttpTransport::new(base_url))
    }
}

impl<T: CheckTransport> VerificationClient<T> {
    pub fn with_transport(transport: T) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self { transport, state }
    }

    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Validate `raw` and submit it. Invalid input leaves the state untouched
    /// and makes no call.
    pub async fn submit_raw(&mut self, raw: &str) -> Result<RequestState, ValidationError> {
        let statement = validate(raw)?;
        Ok(self.submit(statement).await)
    }

    /// Run one verification round trip and return the state it settled in.
    pub async fn submit(&mut self, statement: Statement) -> RequestState {
        let request = VerificationRequest::new(statement);

        // Loading must be visible before the only suspension point.
        self.state.send_replace(RequestState::Loading);
        info!(
            request_id = %request.request_id,
            endpoint = %self.transport.endpoint(),
            "verification: submitted"
        );

        let next = match self.transport.send(&request).await {
            Ok(resp) => {
                debug!(request_id = %request.request_id, status = %resp.status, "verification: response");
                match classify(&resp) {
                    Ok(result) => {
                        info!(
                            request_id = %request.request_id,
                            verdict = %result.verdict,
                            confidence = result.confidence,
                            sources = result.sources.len(),
                            "verification: succeeded"
                        );
                        RequestState::Succeeded(result)
                    }
                    Err(e) => {
                        warn!(request_id = %request.request_id, status = %resp.status, error = ?e, "verification: failed");
                        RequestState::Failed(e)
                    }
                }
            }
            Err(e) => {
                warn!(request_id = %request.request_id, error = %e, "verification: transport error");
                RequestState::Failed(CheckError::Network(e.0))
            }
        };

        self.state.send_replace(next.clone());
        next
    }
}

use crate::{Error, Result};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

// Request states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Normalizing,
    Invoking,
    Composed(Outcome),
}

// Request events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    Normalized,
    Rejected,
    BackendResponded,
    BackendFailed,
}

/// Per-request lifecycle: `Normalizing -> Invoking -> Composed`, no way back.
pub struct RequestStateMachine {
    state: RequestState,
    request_id: Uuid,
}

impl RequestStateMachine {
    pub fn new(request_id: Uuid) -> Self {
        debug!("Starting request {}", request_id);
        Self {
            state: RequestState::Normalizing,
            request_id,
        }
    }

    pub fn current_state(&self) -> RequestState {
        self.state
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn transition(&mut self, event: RequestEvent) -> Result<()> {
        let old_state = self.state;

        let new_state = match (old_state, event) {
            (RequestState::Normalizing, RequestEvent::Normalized) => RequestState::Invoking,
            (RequestState::Normalizing, RequestEvent::Rejected) => {
                RequestState::Composed(Outcome::Failure)
            }
            (RequestState::Invoking, RequestEvent::BackendResponded) => {
                RequestState::Composed(Outcome::Success)
            }
            (RequestState::Invoking, RequestEvent::BackendFailed) => {
                RequestState::Composed(Outcome::Failure)
            }
            _ => {
                warn!(
                    "Invalid transition for request {} from {:?} with event {:?}",
                    self.request_id, old_state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", old_state),
                    requested: format!("{:?}", event),
                });
            }
        };

        info!(
            "Request {} state transition: {:?} -> {:?} (event: {:?})",
            self.request_id, old_state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, RequestState::Composed(_))
    }
}

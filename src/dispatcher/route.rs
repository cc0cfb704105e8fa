//! Pure turn routing
//!
//! Decides, from session and request shape alone, which terminal state a turn
//! reaches. No hooks are called here; the same inputs always give the same
//! state. Session setup for new sessions runs before routing, in the executor.

use crate::request::{DialogState, IncomingRequest, RequestType, Session};
use std::fmt;
use thiserror::Error;

/// Terminal states of the per-turn state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    /// No linked account; answer with the fixed link-account response
    NotLinked,
    Launched,
    /// Slot filling still open; hand the turn back to the platform dialog manager
    DialogContinue,
    IntentDispatch { intent: String },
    Ended,
}

impl TurnState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnState::NotLinked => "not_linked",
            TurnState::Launched => "launched",
            TurnState::DialogContinue => "dialog_continue",
            TurnState::IntentDispatch { .. } => "intent_dispatch",
            TurnState::Ended => "ended",
        }
    }
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that stop a turn before or during dispatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("No handler registered for intent '{0}'")]
    UnknownIntent(String),
    #[error("Unrecognized request type '{0}'")]
    UnrecognizedRequestType(String),
    #[error("IntentRequest carries no intent payload")]
    MissingIntent,
}

/// Route a turn to its terminal state.
///
/// The link check comes first, so an unlinked session reaches `NotLinked`
/// whatever the request type or dialog state.
///
/// # Errors
///
/// Returns [`DispatchError::UnrecognizedRequestType`] for request types outside
/// launch/intent/session-ended on a linked session, and
/// [`DispatchError::MissingIntent`] for an intent request without a payload.
pub fn route(session: &Session, request: &IncomingRequest) -> Result<TurnState, DispatchError> {
    if !session.is_linked() {
        return Ok(TurnState::NotLinked);
    }

    match &request.request_type {
        RequestType::Launch => Ok(TurnState::Launched),

        RequestType::Intent if request.dialog_state.is_some_and(DialogState::is_open) => {
            Ok(TurnState::DialogContinue)
        }

        RequestType::Intent => {
            let intent = request.intent.as_ref().ok_or(DispatchError::MissingIntent)?;
            Ok(TurnState::IntentDispatch {
                intent: intent.name.clone(),
            })
        }

        RequestType::SessionEnded => Ok(TurnState::Ended),

        RequestType::Other(raw) => Err(DispatchError::UnrecognizedRequestType(raw.clone())),
    }
}

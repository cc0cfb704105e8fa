//! Turn execution
//!
//! Runs session setup, asks [`route`] for the terminal state, then performs
//! exactly one terminal action: a built-in response or a call into the skill.

use super::registry::IntentRegistry;
use super::route::{route, DispatchError, TurnState};
use super::skill::{Skill, Turn};
use crate::config::DispatcherConfig;
use crate::request::{IncomingRequest, RequestEnvelope, Session};
use crate::response::{self, ResponseEnvelope};
use serde_json::Value;

/// What a dispatched turn produced
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    Respond(ResponseEnvelope),
    /// Session-ended turn; the platform expects no reply
    Ended,
}

impl TurnOutcome {
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            TurnOutcome::Respond(envelope) => Some(envelope),
            TurnOutcome::Ended => None,
        }
    }

    pub fn into_envelope(self) -> Option<ResponseEnvelope> {
        match self {
            TurnOutcome::Respond(envelope) => Some(envelope),
            TurnOutcome::Ended => None,
        }
    }
}

/// Per-skill dispatcher. Immutable once built; share it freely across threads.
pub struct TurnDispatcher<S> {
    skill: S,
    intents: IntentRegistry,
    config: DispatcherConfig,
}

impl<S: Skill> TurnDispatcher<S> {
    pub fn new(skill: S, intents: IntentRegistry) -> Self {
        Self::with_config(skill, intents, DispatcherConfig::default())
    }

    pub fn with_config(skill: S, intents: IntentRegistry, config: DispatcherConfig) -> Self {
        tracing::debug!(intents = ?intents.names(), "Turn dispatcher ready");
        Self {
            skill,
            intents,
            config,
        }
    }

    pub fn skill(&self) -> &S {
        &self.skill
    }

    pub fn intents(&self) -> &IntentRegistry {
        &self.intents
    }

    /// Dispatch one parsed inbound document.
    ///
    /// # Errors
    ///
    /// See [`TurnDispatcher::dispatch_turn`].
    pub fn dispatch(&self, envelope: &RequestEnvelope) -> Result<TurnOutcome, DispatchError> {
        self.dispatch_turn(
            &envelope.version,
            &envelope.session,
            &envelope.request,
            &envelope.context,
        )
    }

    /// Dispatch one turn to completion.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownIntent`] when the intent has no
    /// registered handler, [`DispatchError::UnrecognizedRequestType`] for an
    /// unknown request type on a linked session, and
    /// [`DispatchError::MissingIntent`] for an intent request with no payload.
    pub fn dispatch_turn(
        &self,
        version: &str,
        session: &Session,
        request: &IncomingRequest,
        context: &Value,
    ) -> Result<TurnOutcome, DispatchError> {
        let version = if version.is_empty() {
            self.config.default_version.as_str()
        } else {
            version
        };
        let turn = Turn::new(version, session, request, context);

        if session.is_new {
            tracing::debug!(session_id = ?session.session_id, "Starting new session");
            self.skill.on_session_started(&turn);
        }

        let state = match route(session, request) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(request_type = %request.request_type, error = %e, "Turn rejected");
                return Err(e);
            }
        };
        let terminal = state.as_str();

        tracing::debug!(
            request_type = %request.request_type,
            dialog_state = ?request.dialog_state,
            terminal,
            "Turn routed"
        );

        let outcome = match state {
            TurnState::NotLinked => TurnOutcome::Respond(response::link_account(version)),
            TurnState::Launched => TurnOutcome::Respond(checked(self.skill.on_launch(&turn))),
            TurnState::DialogContinue => TurnOutcome::Respond(response::delegate_dialog(version)),
            TurnState::IntentDispatch { intent: name } => {
                let Some(handler) = self.intents.get(&name) else {
                    tracing::warn!(intent = %name, "No handler registered for intent");
                    return Err(DispatchError::UnknownIntent(name));
                };
                // route() only yields IntentDispatch when the payload is present
                let intent = request.intent.as_ref().ok_or(DispatchError::MissingIntent)?;
                TurnOutcome::Respond(checked(handler.handle(intent, &turn)))
            }
            TurnState::Ended => {
                tracing::info!(reason = ?request.reason, "Session ended by platform");
                self.skill.on_session_ended(&turn);
                TurnOutcome::Ended
            }
        };

        tracing::info!(request_type = %request.request_type, terminal, "Turn complete");
        Ok(outcome)
    }
}

/// Log shape problems in application-built envelopes without rejecting them
fn checked(envelope: ResponseEnvelope) -> ResponseEnvelope {
    for warning in envelope.shape_warnings() {
        tracing::warn!(%warning, "Response shape violates platform contract");
    }
    envelope
}

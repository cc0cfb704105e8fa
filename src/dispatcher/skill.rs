//! Application-supplied hooks and the per-turn view handed to them

use crate::request::{IncomingRequest, Session};
use crate::response::{self, Card, OutputSpeech, Reprompt, ResponseEnvelope};
use serde_json::Value;

/// Lifecycle hooks a concrete skill must supply
pub trait Skill: Send + Sync {
    /// Setup work for a brand-new session. Runs before any routing decision.
    fn on_session_started(&self, turn: &Turn<'_>);

    /// Response for a launch with no specific intent
    fn on_launch(&self, turn: &Turn<'_>) -> ResponseEnvelope;

    /// Cleanup after the platform ended the session. No reply is spoken.
    fn on_session_ended(&self, turn: &Turn<'_>);
}

/// Read-only view of one turn
///
/// Borrowed from the inbound request for the duration of dispatch. The
/// response helpers stamp the request's version onto every envelope.
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    pub version: &'a str,
    pub session: &'a Session,
    pub request: &'a IncomingRequest,
    pub context: &'a Value,
}

impl<'a> Turn<'a> {
    pub fn new(
        version: &'a str,
        session: &'a Session,
        request: &'a IncomingRequest,
        context: &'a Value,
    ) -> Self {
        Self {
            version,
            session,
            request,
            context,
        }
    }

    pub fn tell(&self, speech: OutputSpeech) -> ResponseEnvelope {
        response::tell(self.version, speech)
    }

    pub fn tell_with_card(&self, speech: OutputSpeech, card: Card) -> ResponseEnvelope {
        response::tell_with_card(self.version, speech, card)
    }

    pub fn ask(&self, speech: OutputSpeech, reprompt: Reprompt) -> ResponseEnvelope {
        response::ask(self.version, speech, reprompt)
    }

    pub fn ask_with_card(
        &self,
        speech: OutputSpeech,
        reprompt: Reprompt,
        card: Card,
    ) -> ResponseEnvelope {
        response::ask_with_card(self.version, speech, reprompt, card)
    }

    /// Copy the incoming session attributes onto `envelope` unchanged.
    /// An empty attribute map leaves the envelope untouched.
    pub fn echo_attributes(&self, envelope: ResponseEnvelope) -> ResponseEnvelope {
        if self.session.attributes.is_empty() {
            envelope
        } else {
            envelope.with_session_attributes(self.session.attributes.clone())
        }
    }
}

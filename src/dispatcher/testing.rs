//! Test doubles for dispatcher tests
//!
//! `RecordingSkill` records every hook call so tests can assert ordering and
//! counts without a real skill.

use super::skill::{Skill, Turn};
use crate::request::{Session, User};
use crate::response::{self, OutputSpeech, Reprompt, ResponseEnvelope};
use serde_json::Value;
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingSkill {
    calls: Mutex<Vec<&'static str>>,
    last_context: Mutex<Option<Value>>,
}

impl RecordingSkill {
    pub fn launch_envelope(version: &str) -> ResponseEnvelope {
        response::ask(
            version,
            OutputSpeech::plain("Welcome. What would you like?"),
            Reprompt::plain("What would you like?"),
        )
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, hook: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == hook).count()
    }

    pub fn last_context(&self) -> Option<Value> {
        self.last_context.lock().unwrap().clone()
    }

    fn record(&self, hook: &'static str, turn: &Turn<'_>) {
        self.calls.lock().unwrap().push(hook);
        *self.last_context.lock().unwrap() = Some(turn.context.clone());
    }
}

impl Skill for RecordingSkill {
    fn on_session_started(&self, turn: &Turn<'_>) {
        self.record("session_started", turn);
    }

    fn on_launch(&self, turn: &Turn<'_>) -> ResponseEnvelope {
        self.record("launch", turn);
        Self::launch_envelope(turn.version)
    }

    fn on_session_ended(&self, turn: &Turn<'_>) {
        self.record("session_ended", turn);
    }
}

pub fn linked_session(token: &str) -> Session {
    Session {
        user: User {
            user_id: Some("amzn1.ask.account.test".to_string()),
            access_token: Some(token.to_string()),
        },
        ..Session::default()
    }
}

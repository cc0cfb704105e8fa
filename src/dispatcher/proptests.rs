//! Property-based tests for turn dispatch
//!
//! These check the routing invariants across arbitrary sessions and requests.

use super::testing::RecordingSkill;
use super::*;
use crate::request::{DialogState, IncomingRequest, Intent, RequestType, Session, User};
use crate::response::{self, OutputSpeech, Reprompt, ResponseEnvelope};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const REGISTERED: [&str; 2] = ["HelloIntent", "OrderIntent"];

// ============================================================================
// Test Helpers
// ============================================================================

struct Harness {
    dispatcher: TurnDispatcher<RecordingSkill>,
    hits: HashMap<&'static str, Arc<AtomicUsize>>,
}

impl Harness {
    fn new() -> Self {
        let mut registry = IntentRegistry::new();
        let mut hits = HashMap::new();
        for name in REGISTERED {
            let counter = Arc::new(AtomicUsize::new(0));
            let seen = Arc::clone(&counter);
            registry
                .register_fn(name, move |intent, turn| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    handler_envelope(turn.version, intent)
                })
                .unwrap();
            hits.insert(name, counter);
        }
        Self {
            dispatcher: TurnDispatcher::new(RecordingSkill::default(), registry),
            hits,
        }
    }

    fn total_handler_calls(&self) -> usize {
        self.hits.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    fn handler_calls(&self, name: &str) -> usize {
        self.hits.get(name).map_or(0, |c| c.load(Ordering::SeqCst))
    }

    fn skill(&self) -> &RecordingSkill {
        self.dispatcher.skill()
    }
}

fn handler_envelope(version: &str, intent: &Intent) -> ResponseEnvelope {
    response::tell(version, OutputSpeech::plain(format!("handled {}", intent.name)))
}

fn not_linked_envelope() -> Value {
    json!({
        "version": "1.0",
        "response": {
            "outputSpeech": {
                "type": "PlainText",
                "text": "Please go to your Alexa app and link your account."
            },
            "card": { "type": "LinkAccount" },
            "shouldEndSession": true
        }
    })
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_session() -> impl Strategy<Value = Session> {
    (any::<bool>(), proptest::option::of("[a-zA-Z0-9]{1,16}")).prop_map(|(is_new, token)| {
        Session {
            is_new,
            user: User {
                user_id: None,
                access_token: token,
            },
            ..Session::default()
        }
    })
}

fn arb_linked_session() -> impl Strategy<Value = Session> {
    (any::<bool>(), "[a-zA-Z0-9]{1,16}").prop_map(|(is_new, token)| Session {
        is_new,
        user: User {
            user_id: None,
            access_token: Some(token),
        },
        ..Session::default()
    })
}

fn arb_intent_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("HelloIntent".to_string()),
        Just("OrderIntent".to_string()),
        Just("Stop".to_string()),
        "[A-Z][a-zA-Z]{2,12}Intent",
    ]
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    (arb_intent_name(), proptest::option::of("[a-z]{1,8}")).prop_map(|(name, size)| {
        let intent = Intent::new(name);
        match size {
            Some(size) => intent.with_slot("size", size),
            None => intent,
        }
    })
}

fn arb_dialog_state() -> impl Strategy<Value = Option<DialogState>> {
    prop_oneof![
        Just(None),
        Just(Some(DialogState::Started)),
        Just(Some(DialogState::InProgress)),
        Just(Some(DialogState::Completed)),
    ]
}

fn arb_open_dialog_state() -> impl Strategy<Value = DialogState> {
    prop_oneof![Just(DialogState::Started), Just(DialogState::InProgress)]
}

fn arb_closed_dialog_state() -> impl Strategy<Value = Option<DialogState>> {
    prop_oneof![Just(None), Just(Some(DialogState::Completed))]
}

fn arb_request() -> impl Strategy<Value = IncomingRequest> {
    prop_oneof![
        Just(IncomingRequest::launch()),
        (arb_intent(), arb_dialog_state()).prop_map(|(intent, state)| IncomingRequest {
            dialog_state: state,
            ..IncomingRequest::intent(intent)
        }),
        "[A-Z_]{3,20}".prop_map(IncomingRequest::session_ended),
        "[A-Z][a-zA-Z.]{3,20}".prop_map(|raw| IncomingRequest {
            request_type: RequestType::from(raw),
            ..IncomingRequest::launch()
        }),
    ]
}

fn arb_speech() -> impl Strategy<Value = OutputSpeech> {
    prop_oneof![
        "[a-zA-Z ,.?]{0,40}".prop_map(OutputSpeech::plain),
        "[a-zA-Z ]{0,40}".prop_map(|s| OutputSpeech::ssml(format!("<speak>{s}</speak>"))),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn new_session_starts_exactly_once_before_routing(
        session in arb_session(),
        request in arb_request(),
    ) {
        let harness = Harness::new();
        let _ = harness.dispatcher.dispatch_turn("1.0", &session, &request, &Value::Null);

        let calls = harness.skill().calls();
        if session.is_new {
            prop_assert_eq!(harness.skill().count("session_started"), 1);
            prop_assert_eq!(calls.first().copied(), Some("session_started"));
        } else {
            prop_assert_eq!(harness.skill().count("session_started"), 0);
        }
    }

    #[test]
    fn unlinked_session_always_gets_link_account(
        is_new in any::<bool>(),
        request in arb_request(),
    ) {
        let harness = Harness::new();
        let session = Session { is_new, ..Session::default() };
        let outcome = harness
            .dispatcher
            .dispatch_turn("1.0", &session, &request, &Value::Null)
            .unwrap();

        let envelope = outcome.envelope().unwrap();
        prop_assert_eq!(serde_json::to_value(envelope).unwrap(), not_linked_envelope());
        prop_assert_eq!(harness.total_handler_calls(), 0);
        prop_assert_eq!(harness.skill().count("launch"), 0);
        prop_assert_eq!(harness.skill().count("session_ended"), 0);
    }

    #[test]
    fn open_dialog_always_delegates(
        session in arb_linked_session(),
        intent in arb_intent(),
        state in arb_open_dialog_state(),
    ) {
        let harness = Harness::new();
        let request = IncomingRequest::intent(intent).with_dialog_state(state);
        let outcome = harness
            .dispatcher
            .dispatch_turn("1.0", &session, &request, &Value::Null)
            .unwrap();

        let body = &outcome.envelope().unwrap().response;
        prop_assert!(body.has_dialog_delegate());
        prop_assert_eq!(body.directives.as_ref().map(Vec::len), Some(1));
        prop_assert!(body.output_speech.is_none());
        prop_assert!(body.card.is_none());
        prop_assert_ne!(body.should_end_session, Some(true));
        prop_assert_eq!(harness.total_handler_calls(), 0);
    }

    #[test]
    fn closed_dialog_invokes_registered_handler_once(
        session in arb_linked_session(),
        intent in arb_intent(),
        state in arb_closed_dialog_state(),
    ) {
        let harness = Harness::new();
        let request = IncomingRequest {
            dialog_state: state,
            ..IncomingRequest::intent(intent.clone())
        };
        let result = harness.dispatcher.dispatch_turn("1.0", &session, &request, &Value::Null);

        if REGISTERED.contains(&intent.name.as_str()) {
            let outcome = result.unwrap();
            prop_assert_eq!(harness.handler_calls(&intent.name), 1);
            prop_assert_eq!(harness.total_handler_calls(), 1);
            prop_assert_eq!(outcome, TurnOutcome::Respond(handler_envelope("1.0", &intent)));
        } else {
            prop_assert_eq!(result, Err(DispatchError::UnknownIntent(intent.name.clone())));
            prop_assert_eq!(harness.total_handler_calls(), 0);
        }
    }

    #[test]
    fn tell_and_ask_are_idempotent_and_exclusive(
        speech in arb_speech(),
        reprompt in arb_speech(),
    ) {
        let told = response::tell("1.0", speech.clone());
        prop_assert_eq!(&told, &response::tell("1.0", speech.clone()));
        prop_assert!(told.response.reprompt.is_none());
        prop_assert!(told.ends_session());

        let asked = response::ask("1.0", speech.clone(), Reprompt::new(reprompt.clone()));
        prop_assert_eq!(&asked, &response::ask("1.0", speech, Reprompt::new(reprompt)));
        prop_assert!(asked.response.reprompt.is_some());
        prop_assert!(!asked.ends_session());
        prop_assert!(asked.shape_warnings().is_empty());
    }
}

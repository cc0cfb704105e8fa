//! Turn dispatcher and response-envelope builder for voice-assistant skills
//!
//! One inbound request per conversational turn is routed through session
//! setup, an account-link check and a request-type switch to either a
//! built-in response or an application hook. Responses are assembled with
//! absent optional fields omitted from the wire shape.

pub mod config;
pub mod demo;
pub mod dispatcher;
pub mod request;
pub mod response;

pub use config::DispatcherConfig;
pub use dispatcher::{
    DispatchError, IntentHandler, IntentRegistry, Skill, Turn, TurnDispatcher, TurnOutcome,
};
pub use request::{DialogState, IncomingRequest, Intent, RequestEnvelope, RequestType, Session};
pub use response::{
    Card, Directive, OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope, ResponseError,
};

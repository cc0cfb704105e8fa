//! Pure construction of response bodies and envelopes
//!
//! `tell*` end the session and never carry a reprompt. `ask*` keep it open and
//! always carry one. No other combination is reachable through these helpers.

use super::shape::ShapeWarning;
use super::types::{Card, Directive, OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope};
use serde_json::{Map, Value};
use thiserror::Error;

/// Speech of the not-linked response; fixed by the platform contract
pub const LINK_ACCOUNT_PROMPT: &str = "Please go to your Alexa app and link your account.";

/// Errors raised while assembling an envelope
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("Missing required envelope field: {0}")]
    MissingRequiredField(&'static str),
    #[error("Dialog.Delegate cannot be combined with shouldEndSession = true")]
    DelegateEndsSession,
}

/// The five independently optional parts of a response body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseParts {
    pub output_speech: Option<OutputSpeech>,
    pub card: Option<Card>,
    pub reprompt: Option<Reprompt>,
    pub should_end_session: Option<bool>,
    pub directives: Option<Vec<Directive>>,
}

/// Copy each supplied part into a body. Unsupplied parts stay absent.
pub fn build_response(parts: ResponseParts) -> ResponseBody {
    let ResponseParts {
        output_speech,
        card,
        reprompt,
        should_end_session,
        directives,
    } = parts;
    ResponseBody {
        output_speech,
        card,
        reprompt,
        should_end_session,
        directives,
    }
}

/// Assemble an envelope from its parts.
///
/// # Errors
///
/// Returns [`ResponseError::MissingRequiredField`] when `version` is missing or
/// empty, or when `response` is missing.
pub fn build_full_response(
    version: Option<&str>,
    session_attributes: Option<Map<String, Value>>,
    response: Option<ResponseBody>,
) -> Result<ResponseEnvelope, ResponseError> {
    let mut builder = EnvelopeBuilder::new();
    if let Some(version) = version {
        builder = builder.version(version);
    }
    if let Some(attributes) = session_attributes {
        builder = builder.session_attributes(attributes);
    }
    if let Some(response) = response {
        builder = builder.response(response);
    }
    builder.build()
}

/// Incremental envelope construction with required-field checks on `build`
#[derive(Debug, Clone, Default)]
pub struct EnvelopeBuilder {
    version: Option<String>,
    session_attributes: Option<Map<String, Value>>,
    response: Option<ResponseBody>,
}

impl EnvelopeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn session_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.session_attributes = Some(attributes);
        self
    }

    pub fn response(mut self, response: ResponseBody) -> Self {
        self.response = Some(response);
        self
    }

    /// # Errors
    ///
    /// Fails when `version` or `response` was never supplied, or when the body
    /// delegates the dialog while also ending the session.
    pub fn build(self) -> Result<ResponseEnvelope, ResponseError> {
        let version = self
            .version
            .filter(|v| !v.is_empty())
            .ok_or(ResponseError::MissingRequiredField("version"))?;
        let response = self
            .response
            .ok_or(ResponseError::MissingRequiredField("response"))?;

        let envelope = ResponseEnvelope {
            version,
            session_attributes: self.session_attributes,
            response,
        };
        if envelope.shape_warnings().contains(&ShapeWarning::DelegateEndsSession) {
            return Err(ResponseError::DelegateEndsSession);
        }
        Ok(envelope)
    }
}

fn envelope(version: &str, response: ResponseBody) -> ResponseEnvelope {
    ResponseEnvelope {
        version: version.to_string(),
        session_attributes: None,
        response,
    }
}

/// Speak and end the session
pub fn tell(version: &str, speech: OutputSpeech) -> ResponseEnvelope {
    envelope(
        version,
        build_response(ResponseParts {
            output_speech: Some(speech),
            should_end_session: Some(true),
            ..ResponseParts::default()
        }),
    )
}

/// Speak, show a card, and end the session
pub fn tell_with_card(version: &str, speech: OutputSpeech, card: Card) -> ResponseEnvelope {
    envelope(
        version,
        build_response(ResponseParts {
            output_speech: Some(speech),
            card: Some(card),
            should_end_session: Some(true),
            ..ResponseParts::default()
        }),
    )
}

/// Speak and keep the session open for the user's answer
pub fn ask(version: &str, speech: OutputSpeech, reprompt: Reprompt) -> ResponseEnvelope {
    envelope(
        version,
        build_response(ResponseParts {
            output_speech: Some(speech),
            reprompt: Some(reprompt),
            should_end_session: Some(false),
            ..ResponseParts::default()
        }),
    )
}

pub fn ask_with_card(
    version: &str,
    speech: OutputSpeech,
    reprompt: Reprompt,
    card: Card,
) -> ResponseEnvelope {
    envelope(
        version,
        build_response(ResponseParts {
            output_speech: Some(speech),
            card: Some(card),
            reprompt: Some(reprompt),
            should_end_session: Some(false),
            ..ResponseParts::default()
        }),
    )
}

/// Defer remaining slot filling to the platform dialog manager
pub fn delegate_dialog(version: &str) -> ResponseEnvelope {
    envelope(
        version,
        build_response(ResponseParts {
            directives: Some(vec![Directive::dialog_delegate()]),
            ..ResponseParts::default()
        }),
    )
}

/// Ask the user to link their account in the companion app
pub fn link_account(version: &str) -> ResponseEnvelope {
    tell_with_card(
        version,
        OutputSpeech::plain(LINK_ACCOUNT_PROMPT),
        Card::link_account(),
    )
}

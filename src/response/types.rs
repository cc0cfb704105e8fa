//! Outbound envelope types
//!
//! Every optional field is skipped when absent. The platform treats a missing
//! key differently from a present-but-empty one, so nothing here serializes
//! `null` or `{}` in place of an absent value.

use crate::request::Intent;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DIALOG_DELEGATE: &str = "Dialog.Delegate";

/// Spoken output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    pub fn plain(text: impl Into<String>) -> Self {
        OutputSpeech::PlainText { text: text.into() }
    }

    pub fn ssml(ssml: impl Into<String>) -> Self {
        OutputSpeech::Ssml { ssml: ssml.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::PlainText { text } => text,
            OutputSpeech::Ssml { ssml } => ssml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Simple,
    Standard,
    LinkAccount,
}

/// Visual supplement shown in the companion app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body of a `Simple` card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Body of a `Standard` card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<CardImage>,
}

impl Card {
    pub fn simple(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            ..Self::bare(CardType::Simple)
        }
    }

    pub fn standard(title: impl Into<String>, text: impl Into<String>, image: Option<CardImage>) -> Self {
        Self {
            title: Some(title.into()),
            text: Some(text.into()),
            image,
            ..Self::bare(CardType::Standard)
        }
    }

    /// Prompts the user to link their account; carries no other fields
    pub fn link_account() -> Self {
        Self::bare(CardType::LinkAccount)
    }

    fn bare(card_type: CardType) -> Self {
        Self {
            card_type,
            title: None,
            content: None,
            text: None,
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image_url: Option<String>,
}

/// Speech played when the user stays silent on an open turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl Reprompt {
    pub fn new(output_speech: OutputSpeech) -> Self {
        Self { output_speech }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(OutputSpeech::plain(text))
    }
}

/// Instruction to a platform subsystem, e.g. `Dialog.Delegate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    #[serde(rename = "type")]
    pub directive_type: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Directive {
    pub fn new(directive_type: impl Into<String>) -> Self {
        Self {
            directive_type: directive_type.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Hand remaining slot collection to the platform dialog manager
    pub fn dialog_delegate() -> Self {
        Self::new(DIALOG_DELEGATE)
    }

    /// Delegate while overriding slot values the platform should continue with
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the intent cannot be encoded as JSON.
    pub fn dialog_delegate_with(intent: &Intent) -> Result<Self, serde_json::Error> {
        let updated = serde_json::to_value(intent)?;
        Ok(Self::dialog_delegate().with_field("updatedIntent", updated))
    }

    pub fn is_dialog_delegate(&self) -> bool {
        self.directive_type == DIALOG_DELEGATE
    }
}

/// Inner `response` object of the envelope
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directives: Option<Vec<Directive>>,
}

impl ResponseBody {
    pub fn has_dialog_delegate(&self) -> bool {
        self.directives
            .as_deref()
            .is_some_and(|d| d.iter().any(Directive::is_dialog_delegate))
    }
}

/// Top-level document returned to the platform for one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<Map<String, Value>>,
    pub response: ResponseBody,
}

impl ResponseEnvelope {
    pub fn with_session_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.session_attributes = Some(attributes);
        self
    }

    pub fn ends_session(&self) -> bool {
        self.response.should_end_session == Some(true)
    }
}

//! Inbound turn payload
//!
//! One `RequestEnvelope` arrives per conversational turn. The dispatcher only
//! reads these types; nothing here is mutated during dispatch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Full inbound document for a single turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub session: Session,
    pub request: IncomingRequest,
    /// Device and application identifiers, forwarded to hooks untouched
    #[serde(default)]
    pub context: Value,
}

/// Platform-tracked session state for the current turn
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "new", default)]
    pub is_new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user: User,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl Session {
    /// Whether the user has completed account linking
    pub fn is_linked(&self) -> bool {
        self.user.access_token.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// The request half of the inbound document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingRequest {
    #[serde(rename = "type")]
    pub request_type: RequestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_state: Option<DialogState>,
    /// Only set on `SessionEndedRequest`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl IncomingRequest {
    pub fn launch() -> Self {
        Self::of_type(RequestType::Launch)
    }

    pub fn intent(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            ..Self::of_type(RequestType::Intent)
        }
    }

    pub fn session_ended(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::of_type(RequestType::SessionEnded)
        }
    }

    pub fn with_dialog_state(mut self, state: DialogState) -> Self {
        self.dialog_state = Some(state);
        self
    }

    fn of_type(request_type: RequestType) -> Self {
        Self {
            request_type,
            request_id: None,
            intent: None,
            dialog_state: None,
            reason: None,
        }
    }
}

/// Kind of turn. Unknown wire values are kept so the dispatcher can report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestType {
    Launch,
    Intent,
    SessionEnded,
    Other(String),
}

impl RequestType {
    pub fn as_str(&self) -> &str {
        match self {
            RequestType::Launch => "LaunchRequest",
            RequestType::Intent => "IntentRequest",
            RequestType::SessionEnded => "SessionEndedRequest",
            RequestType::Other(raw) => raw,
        }
    }
}

impl From<String> for RequestType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "LaunchRequest" => RequestType::Launch,
            "IntentRequest" => RequestType::Intent,
            "SessionEndedRequest" => RequestType::SessionEnded,
            _ => RequestType::Other(raw),
        }
    }
}

impl From<RequestType> for String {
    fn from(request_type: RequestType) -> Self {
        request_type.as_str().to_string()
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform dialog-manager progress for multi-turn slot collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogState {
    Started,
    InProgress,
    Completed,
}

impl DialogState {
    /// Slot filling is still being driven by the platform
    pub fn is_open(self) -> bool {
        matches!(self, DialogState::Started | DialogState::InProgress)
    }
}

/// Intent payload handed to registered handlers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub slots: HashMap<String, Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<String>,
    /// Fields this model does not name, kept so the payload reaches handlers whole
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Intent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: HashMap::new(),
            confirmation_status: None,
            extra: Map::new(),
        }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.slots.insert(
            name.clone(),
            Slot {
                name,
                value: Some(value.into()),
                extra: Map::new(),
            },
        );
        self
    }

    /// Value of a filled slot, `None` when the slot is missing or unfilled
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|s| s.value.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// `confirmationStatus`, `resolutions` and anything else the platform sends
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Slot {
    pub fn confirmation_status(&self) -> Option<&str> {
        self.extra.get("confirmationStatus").and_then(Value::as_str)
    }
}

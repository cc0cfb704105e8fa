//! Dispatcher configuration

pub const DEFAULT_RESPONSE_VERSION: &str = "1.0";

/// Settings for the responses the dispatcher builds on its own.
/// The not-linked speech is fixed, see [`crate::response::LINK_ACCOUNT_PROMPT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Envelope version used when the inbound request carries none
    pub default_version: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            default_version: DEFAULT_RESPONSE_VERSION.to_string(),
        }
    }
}

impl DispatcherConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            default_version: read("SKILL_RESPONSE_VERSION").unwrap_or(defaults.default_version),
        }
    }
}

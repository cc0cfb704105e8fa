//! Shape checks on finished envelopes
//!
//! These report contract problems without rejecting the envelope. The
//! dispatcher logs them for responses produced by application code.

use super::types::ResponseEnvelope;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeWarning {
    /// `shouldEndSession` is false but there is nothing to replay on silence
    OpenTurnWithoutReprompt,
    /// A `Dialog.Delegate` directive on a turn that ends the session
    DelegateEndsSession,
}

impl fmt::Display for ShapeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeWarning::OpenTurnWithoutReprompt => {
                f.write_str("session left open without a reprompt")
            }
            ShapeWarning::DelegateEndsSession => {
                f.write_str("Dialog.Delegate combined with shouldEndSession = true")
            }
        }
    }
}

impl ResponseEnvelope {
    pub fn shape_warnings(&self) -> Vec<ShapeWarning> {
        let body = &self.response;
        let mut warnings = Vec::new();
        if body.should_end_session == Some(false) && body.reprompt.is_none() {
            warnings.push(ShapeWarning::OpenTurnWithoutReprompt);
        }
        if body.should_end_session == Some(true) && body.has_dialog_delegate() {
            warnings.push(ShapeWarning::DelegateEndsSession);
        }
        warnings
    }
}

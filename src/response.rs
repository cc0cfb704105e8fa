//! Response envelope model and builders
//!
//! Pure, side-effect-free construction of the two-level envelope the platform
//! renders as speech, card and reprompt.

mod builder;
mod shape;
mod types;

pub use builder::{
    ask, ask_with_card, build_full_response, build_response, delegate_dialog, link_account, tell,
    tell_with_card, EnvelopeBuilder, ResponseError, ResponseParts, LINK_ACCOUNT_PROMPT,
};
pub use shape::ShapeWarning;
pub use types::{
    Card, CardImage, CardType, Directive, OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope,
    DIALOG_DELEGATE,
};

//! Turn dispatcher
//!
//! Per-turn state machine: session setup, account-link check, then routing on
//! request type to a built-in response or an application hook.

mod executor;
mod registry;
mod route;
mod skill;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod testing;

pub use executor::{TurnDispatcher, TurnOutcome};
pub use registry::{FnHandler, IntentHandler, IntentRegistry, RegistryError};
pub use route::{route, DispatchError, TurnState};
pub use skill::{Skill, Turn};

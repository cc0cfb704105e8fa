//! Bundled greeting skill used by the harness binary

use crate::dispatcher::{IntentRegistry, RegistryError, Skill, Turn};
use crate::request::Intent;
use crate::response::{Card, OutputSpeech, Reprompt, ResponseEnvelope};

const SKILL_NAME: &str = "Greeter";

pub struct GreeterSkill;

impl Skill for GreeterSkill {
    fn on_session_started(&self, turn: &Turn<'_>) {
        tracing::info!(session_id = ?turn.session.session_id, "Greeter session started");
    }

    fn on_launch(&self, turn: &Turn<'_>) -> ResponseEnvelope {
        turn.ask_with_card(
            OutputSpeech::plain("Welcome to Greeter. Tell me your name and I will say hello."),
            Reprompt::plain("What is your name?"),
            Card::simple(SKILL_NAME, "Say: my name is ..."),
        )
    }

    fn on_session_ended(&self, turn: &Turn<'_>) {
        tracing::info!(reason = ?turn.request.reason, "Greeter session ended");
    }
}

fn hello(intent: &Intent, turn: &Turn<'_>) -> ResponseEnvelope {
    let speech = match intent.slot_value("name") {
        Some(name) => format!("Hello, {name}!"),
        None => "Hello there!".to_string(),
    };
    let card = Card::simple(SKILL_NAME, speech.clone());
    turn.echo_attributes(turn.tell_with_card(OutputSpeech::plain(speech), card))
}

fn help(_: &Intent, turn: &Turn<'_>) -> ResponseEnvelope {
    turn.ask(
        OutputSpeech::plain("You can say: my name is Sam."),
        Reprompt::plain("What is your name?"),
    )
}

fn goodbye(_: &Intent, turn: &Turn<'_>) -> ResponseEnvelope {
    turn.tell(OutputSpeech::plain("Goodbye."))
}

/// Handlers for every intent the greeter understands
///
/// # Errors
///
/// Only fails if the same intent is registered twice.
pub fn greeter_intents() -> Result<IntentRegistry, RegistryError> {
    let mut registry = IntentRegistry::new();
    registry.register_fn("HelloIntent", hello)?;
    registry.register_fn("AMAZON.HelpIntent", help)?;
    registry.register_fn("AMAZON.StopIntent", goodbye)?;
    registry.register_fn("AMAZON.CancelIntent", goodbye)?;
    Ok(registry)
}

//! skill-harness - run one turn through the bundled greeter skill
//!
//! Reads an inbound request document from the file named by the first
//! argument, or stdin when none is given, and prints the response envelope.

use skill_turn::demo::{greeter_intents, GreeterSkill};
use skill_turn::{DispatcherConfig, RequestEnvelope, TurnDispatcher, TurnOutcome};
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only the envelope
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skill_turn=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let raw = match std::env::args().nth(1) {
        Some(path) => {
            tracing::debug!(%path, "Reading request document");
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let request: RequestEnvelope = serde_json::from_str(&raw)?;

    let config = DispatcherConfig::from_env();
    let dispatcher = TurnDispatcher::with_config(GreeterSkill, greeter_intents()?, config);

    match dispatcher.dispatch(&request)? {
        TurnOutcome::Respond(envelope) => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        TurnOutcome::Ended => tracing::info!("Session ended; no response body"),
    }

    Ok(())
}

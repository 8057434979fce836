//! User interaction.
//!
//! [`UserInterface`] is the capability every front end must provide: lifecycle,
//! messages, streamed text and questions. [`RichPresentation`] holds the
//! optional presentation hooks. [`ConsoleSession`] implements both for a
//! terminal or a stdio pipe.

mod console;
mod error;
mod input;
mod presentation;
mod types;

pub use console::ConsoleSession;
pub use error::UiError;
#[cfg(test)]
pub use input::ScriptedInput;
pub use input::{spawn_interrupt_watcher, InputError, LineInput, ReadlineInput};
pub use presentation::RichPresentation;
pub use types::{Buttons, Question, UiSource, UserInput};

use async_trait::async_trait;

#[async_trait]
pub trait UserInterface: Send {
    /// Mark the interface ready. Idempotent.
    async fn start(&mut self);

    /// Release the input channel. Idempotent.
    async fn stop(&mut self);

    async fn send_message(&mut self, message: &str, source: Option<&UiSource>);

    /// Send part of a streamed response. `None` ends the stream.
    async fn send_stream_chunk(&mut self, chunk: Option<&str>, source: Option<&UiSource>);

    /// Ask a question and wait for the answer. Never times out.
    async fn ask_question(&mut self, question: Question) -> Result<UserInput, UiError>;

    /// Tell the user their API key expired.
    async fn send_key_expired(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            self.send_message(message, None).await;
        }
    }
}

/// A complete front end, as handed to the orchestrator.
pub trait Frontend: UserInterface + RichPresentation {}

impl<T: UserInterface + RichPresentation> Frontend for T {}

//! Output strategies.
//!
//! Each [`OutputMode`] has one [`Renderer`] that turns session operations into
//! text. The console session and the bootstrap guard hold a renderer and never
//! branch on the mode themselves.
//!
//! The renderer also owns the answer-resolution step of an elicitation, which
//! is where the two modes differ in behaviour: the human renderer re-prompts on
//! invalid input, the structured renderer accepts whatever the caller sent.

mod envelope;
mod human;
mod json;
mod sink;

pub use envelope::StatusEvent;
pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use sink::Sink;
#[cfg(test)]
pub use sink::SharedBuffer;

use crate::ui::{Question, UiSource, UserInput};

/// Process-wide output format, chosen once from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Structured,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Structured
        } else {
            OutputMode::Human
        }
    }

    /// Build the renderer for this mode.
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            OutputMode::Human => Box::new(HumanRenderer),
            OutputMode::Structured => Box::new(JsonRenderer),
        }
    }
}

/// Output stream an emission is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Stdout,
    Stderr,
}

/// Rendered text bound for a specific stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub target: Target,
    pub text: String,
}

impl Emission {
    pub fn stdout(text: impl Into<String>) -> Self {
        Self {
            target: Target::Stdout,
            text: text.into(),
        }
    }

    pub fn stderr(text: impl Into<String>) -> Self {
        Self {
            target: Target::Stderr,
            text: text.into(),
        }
    }
}

/// Outcome of checking one input line against a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Accept(UserInput),
    /// Reject the line; write the text and read another line.
    Retry(String),
}

/// Formatting contract shared by all output modes.
pub trait Renderer: Send + Sync {
    fn mode(&self) -> OutputMode;

    fn message(&self, message: &str, source: Option<&UiSource>) -> String;

    /// `None` marks the end of a stream.
    fn stream_chunk(&self, chunk: Option<&str>) -> String;

    /// Text written before waiting for an answer.
    fn question(&self, question: &Question) -> String;

    /// Decide what a trimmed input line means for `question`.
    fn resolve(&self, question: &Question, choice: &str) -> Resolution;

    /// Lifecycle status; `None` when the mode has nothing to show.
    fn status(&self, event: &StatusEvent) -> Option<String>;

    /// Bootstrap failure report. The first line is the summary.
    fn diagnostic(&self, lines: &[String]) -> Emission;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(OutputMode::from_json_flag(true), OutputMode::Structured);
        assert_eq!(OutputMode::from_json_flag(false), OutputMode::Human);
    }

    #[test]
    fn test_renderer_matches_mode() {
        assert_eq!(OutputMode::Human.renderer().mode(), OutputMode::Human);
        assert_eq!(
            OutputMode::Structured.renderer().mode(),
            OutputMode::Structured
        );
    }
}

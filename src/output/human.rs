//! Plain console rendering for people at a terminal.

use std::fmt::Write as _;

use super::{Emission, OutputMode, Renderer, Resolution, StatusEvent};
use crate::ui::{Question, UiSource, UserInput};

pub const CHOOSE_OPTION_PROMPT: &str = "Please choose one of available options";
pub const INVALID_INPUT_PROMPT: &str = "Please provide a valid input";

pub struct HumanRenderer;

fn with_source(text: &str, source: Option<&UiSource>) -> String {
    match source {
        Some(source) => format!("[{}] {}\n", source, text),
        None => format!("{}\n", text),
    }
}

impl Renderer for HumanRenderer {
    fn mode(&self) -> OutputMode {
        OutputMode::Human
    }

    fn message(&self, message: &str, source: Option<&UiSource>) -> String {
        with_source(message, source)
    }

    fn stream_chunk(&self, chunk: Option<&str>) -> String {
        match chunk {
            Some(chunk) => chunk.to_string(),
            None => "\n".to_string(),
        }
    }

    fn question(&self, question: &Question) -> String {
        let mut text = with_source(&question.text, question.source.as_ref());
        if let Some(buttons) = &question.buttons {
            for (id, label) in buttons.iter() {
                let marker = if question.default.as_deref() == Some(id) {
                    " (default)"
                } else {
                    ""
                };
                let _ = writeln!(text, "  [{}]: {}{}", id, label, marker);
            }
        }
        text
    }

    fn resolve(&self, question: &Question, choice: &str) -> Resolution {
        let choice = match question.default_value() {
            Some(default) if choice.is_empty() => default,
            _ => choice,
        };

        if question.is_button(choice) {
            return Resolution::Accept(UserInput::button(choice));
        }
        if question.buttons_only {
            return Resolution::Retry(format!("{}\n", CHOOSE_OPTION_PROMPT));
        }
        if !choice.is_empty() || question.allow_empty {
            return Resolution::Accept(UserInput::text(choice));
        }
        Resolution::Retry(format!("{}\n", INVALID_INPUT_PROMPT))
    }

    fn status(&self, event: &StatusEvent) -> Option<String> {
        match event {
            StatusEvent::Starting { .. } => None,
            StatusEvent::Done { .. } => Some("Finished.\n".to_string()),
        }
    }

    fn diagnostic(&self, lines: &[String]) -> Emission {
        let mut text = String::new();
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        Emission::stderr(text)
    }
}

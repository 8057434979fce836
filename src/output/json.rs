//! Line-delimited JSON rendering for programmatic callers.

use serde::Serialize;
use tracing::warn;

use super::envelope::{ErrorEvent, InputRequest, InputRequestEvent, MessageEvent, StreamEvent};
use super::{Emission, OutputMode, Renderer, Resolution, StatusEvent};
use crate::ui::{Question, UiSource, UserInput};

pub struct JsonRenderer;

/// Serialize one envelope as a single newline-terminated line.
fn line<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(mut text) => {
            text.push('\n');
            text
        }
        Err(e) => {
            warn!("Failed to serialize envelope: {}", e);
            String::new()
        }
    }
}

impl Renderer for JsonRenderer {
    fn mode(&self) -> OutputMode {
        OutputMode::Structured
    }

    fn message(&self, message: &str, source: Option<&UiSource>) -> String {
        line(&MessageEvent {
            message,
            source: source.map(UiSource::display_name),
        })
    }

    fn stream_chunk(&self, chunk: Option<&str>) -> String {
        line(&StreamEvent { stream: chunk })
    }

    fn question(&self, question: &Question) -> String {
        line(&InputRequestEvent {
            input_request: InputRequest::from(question),
        })
    }

    /// The remote caller is trusted: no retry, unmatched input is free text.
    fn resolve(&self, question: &Question, choice: &str) -> Resolution {
        if question.is_button(choice) {
            Resolution::Accept(UserInput::button(choice))
        } else {
            Resolution::Accept(UserInput::text(choice))
        }
    }

    fn status(&self, event: &StatusEvent) -> Option<String> {
        Some(line(event))
    }

    fn diagnostic(&self, lines: &[String]) -> Emission {
        let summary = lines.first().map(String::as_str).unwrap_or_default();
        Emission::stdout(line(&ErrorEvent { error: summary }))
    }
}

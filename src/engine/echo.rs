//! Built-in interactive engine that plays tasks back to the user.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::Orchestrator;
use crate::ui::{Frontend, Question, UiError, UiSource};

/// Exit code when the console was closed mid-conversation.
pub const SESSION_CLOSED_EXIT_CODE: i32 = 1;

pub struct EchoOrchestrator {
    source: UiSource,
}

impl EchoOrchestrator {
    pub fn new() -> Self {
        Self {
            source: UiSource::new("Pilot"),
        }
    }

    /// Pre-filled with the previous task so it can be refined.
    fn task_question(&self, previous: Option<&str>) -> Question {
        let question = Question::new("What should we work on?")
            .with_placeholder("Describe the task")
            .with_hint("One line; press Enter to submit")
            .with_source(self.source.clone());
        match previous {
            Some(previous) => question.with_initial_text(previous),
            None => question,
        }
    }

    fn continue_question(&self) -> Question {
        Question::new("Continue?")
            .with_buttons([("y", "Yes"), ("n", "No")])
            .with_default("n")
            .buttons_only()
            .with_source(self.source.clone())
    }
}

fn session_ended(prompt: &str, err: UiError) -> i32 {
    if err.is_closed() {
        debug!("Session closed at the {} prompt", prompt);
    } else {
        warn!("{} prompt failed: {}", prompt, err);
    }
    SESSION_CLOSED_EXIT_CODE
}

impl Default for EchoOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Orchestrator for EchoOrchestrator {
    async fn run(&mut self, ui: &mut dyn Frontend) -> i32 {
        ui.send_message(
            "Describe a task and it will be played back to you.",
            Some(&self.source),
        )
        .await;
        ui.loading_finished().await;

        let mut previous: Option<String> = None;
        loop {
            let task = match ui.ask_question(self.task_question(previous.as_deref())).await {
                Ok(answer) => answer,
                Err(e) => return session_ended("task", e),
            };

            let text = task.entered_text().unwrap_or_default().to_string();
            debug!("Playing back {} bytes", text.len());
            for (i, word) in text.split_whitespace().enumerate() {
                let chunk = if i == 0 {
                    word.to_string()
                } else {
                    format!(" {}", word)
                };
                ui.send_stream_chunk(Some(&chunk), Some(&self.source)).await;
            }
            ui.send_stream_chunk(None, Some(&self.source)).await;
            previous = Some(text);

            match ui.ask_question(self.continue_question()).await {
                Ok(answer) if answer.selected_button() == Some("y") => continue,
                Ok(_) => return 0,
                Err(e) => return session_ended("continue", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{OutputMode, SharedBuffer, Sink};
    use crate::ui::{ConsoleSession, ScriptedInput, UserInterface};
    use serde_json::Value;

    async fn run_with(mode: OutputMode, input: ScriptedInput) -> (i32, SharedBuffer) {
        let out = SharedBuffer::default();
        let sink = Sink::new(Box::new(out.clone()), Box::new(SharedBuffer::default()));
        let mut ui = ConsoleSession::new(mode.renderer(), sink, Box::new(input));
        ui.start().await;
        let code = EchoOrchestrator::new().run(&mut ui).await;
        (code, out)
    }

    #[tokio::test]
    async fn test_human_round_then_default_stop() {
        let (code, out) =
            run_with(OutputMode::Human, ScriptedInput::new(["build  a todo app", ""])).await;

        assert_eq!(code, 0);
        let text = out.contents();
        assert!(text.starts_with("[Pilot] Describe a task"));
        assert!(text.contains("[Pilot] What should we work on?\nbuild a todo app\n"));
        assert!(text.contains("  [n]: No (default)\n"));
    }

    #[tokio::test]
    async fn test_continue_loops() {
        let input = ScriptedInput::new(["one", "y", "two", "n"]);
        let prefills = input.prefills();
        let (code, out) = run_with(OutputMode::Human, input).await;

        // The second task prompt starts from the first task.
        assert_eq!(prefills.lock().unwrap()[2], Some("one".to_string()));

        assert_eq!(code, 0);
        let text = out.contents();
        assert_eq!(text.matches("What should we work on?").count(), 2);
        assert!(text.contains("\none\n"));
        assert!(text.contains("\ntwo\n"));
    }

    #[tokio::test]
    async fn test_closed_session_exit_code() {
        let input = ScriptedInput::new(["task"]).then_interrupt();
        let (code, _out) = run_with(OutputMode::Human, input).await;
        assert_eq!(code, SESSION_CLOSED_EXIT_CODE);
    }

    #[tokio::test]
    async fn test_structured_transcript() {
        let (code, out) =
            run_with(OutputMode::Structured, ScriptedInput::new(["hi there", "n"])).await;
        assert_eq!(code, 0);

        let events: Vec<Value> = out
            .lines()
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events[0]["source"], "Pilot");
        assert_eq!(
            events[1]["input_request"]["placeholder"],
            "Describe the task"
        );
        assert_eq!(events[2]["stream"], "hi");
        assert_eq!(events[3]["stream"], " there");
        assert!(events[4]["stream"].is_null());
        assert_eq!(events[5]["input_request"]["buttons"]["y"], "Yes");
        assert_eq!(events.len(), 6);
    }
}

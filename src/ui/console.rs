//! Console session: the question/answer loop over stdio.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::error::UiError;
use super::input::LineInput;
use super::presentation::RichPresentation;
use super::types::{Question, UiSource, UserInput};
use super::UserInterface;
use crate::output::{OutputMode, Renderer, Resolution, Sink, StatusEvent, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    Started,
    Stopped,
    /// Input was interrupted or ended. No further transitions.
    Closed,
}

/// Console front end that renders through one output strategy and owns the
/// line input channel exclusively.
pub struct ConsoleSession {
    renderer: Box<dyn Renderer>,
    sink: Sink,
    input: Option<Box<dyn LineInput>>,
    state: SessionState,
}

impl ConsoleSession {
    pub fn new(renderer: Box<dyn Renderer>, sink: Sink, input: Box<dyn LineInput>) -> Self {
        Self {
            renderer,
            sink,
            input: Some(input),
            state: SessionState::Created,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.renderer.mode()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Emit a process lifecycle status in the session's format.
    pub fn send_status(&mut self, event: &StatusEvent) {
        if let Some(text) = self.renderer.status(event) {
            self.write(&text);
        }
    }

    /// Fire-and-forget write. A failed write is logged and dropped.
    fn write(&mut self, text: &str) {
        if self.state == SessionState::Created {
            warn!("Console output before start");
        }
        if let Err(e) = self.sink.write(Target::Stdout, text) {
            warn!("Failed to write console output: {}", e);
        }
    }

    async fn read_line(&mut self, prefill: Option<&str>) -> Result<String, UiError> {
        let input = self.input.as_mut().ok_or(UiError::Closed)?;
        let result = input.read_line(prefill).await;
        match result {
            Ok(line) => Ok(line),
            Err(e) => {
                debug!("Console input closed: {}", e);
                self.state = SessionState::Closed;
                self.input = None;
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl UserInterface for ConsoleSession {
    async fn start(&mut self) {
        if self.state == SessionState::Created {
            debug!("Starting console UI");
            self.state = SessionState::Started;
        }
    }

    async fn stop(&mut self) {
        if self.input.take().is_some() {
            debug!("Stopping console UI");
        }
        if self.state != SessionState::Closed {
            self.state = SessionState::Stopped;
        }
    }

    async fn send_message(&mut self, message: &str, source: Option<&UiSource>) {
        let text = self.renderer.message(message, source);
        self.write(&text);
    }

    async fn send_stream_chunk(&mut self, chunk: Option<&str>, _source: Option<&UiSource>) {
        let text = self.renderer.stream_chunk(chunk);
        self.write(&text);
    }

    async fn ask_question(&mut self, question: Question) -> Result<UserInput, UiError> {
        match self.state {
            SessionState::Created => return Err(UiError::NotStarted),
            SessionState::Stopped | SessionState::Closed => return Err(UiError::Closed),
            SessionState::Started => {}
        }

        let prompt = self.renderer.question(&question);
        self.sink.write(Target::Stdout, &prompt)?;

        // Only the first read is pre-filled.
        let mut prefill = question.initial_text.as_deref();
        loop {
            let line = self.read_line(prefill.take()).await?;
            match self.renderer.resolve(&question, line.trim()) {
                Resolution::Accept(answer) => return Ok(answer),
                Resolution::Retry(reprompt) => self.sink.write(Target::Stdout, &reprompt)?,
            }
        }
    }
}

impl RichPresentation for ConsoleSession {}

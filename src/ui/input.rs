//! Line input channel.
//!
//! The terminal implementation runs rustyline on a blocking thread so the
//! session can await it, and races it against Ctrl-C so an interrupt delivered
//! as a signal (e.g. by a parent process) also ends the wait.

use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;
use tokio::sync::Notify;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input interrupted")]
    Interrupted,
    #[error("end of input")]
    Eof,
    #[error("input failed: {0}")]
    Io(#[from] io::Error),
}

impl From<ReadlineError> for InputError {
    fn from(err: ReadlineError) -> Self {
        match err {
            ReadlineError::Interrupted => InputError::Interrupted,
            ReadlineError::Eof => InputError::Eof,
            ReadlineError::Io(e) => InputError::Io(e),
            other => InputError::Io(io::Error::other(other.to_string())),
        }
    }
}

/// Source of answer lines for the console session.
#[async_trait]
pub trait LineInput: Send {
    /// Read one line. `initial` is placed in the line buffer as editable text.
    async fn read_line(&mut self, initial: Option<&str>) -> Result<String, InputError>;
}

/// Routes Ctrl-C either to the read in progress or to process exit.
///
/// The watcher task is the only signal listener, so each interrupt is
/// consumed exactly once.
#[derive(Default)]
pub struct Interrupts {
    reading: AtomicBool,
    notify: Notify,
}

impl Interrupts {
    #[cfg(test)]
    pub fn is_reading(&self) -> bool {
        self.reading.load(Ordering::SeqCst)
    }

    /// Hand an interrupt to the waiting read. Returns `false` when no read is
    /// in progress and the caller should shut down instead.
    pub fn deliver(&self) -> bool {
        if self.reading.swap(false, Ordering::SeqCst) {
            self.notify.notify_waiters();
            true
        } else {
            false
        }
    }

    /// Await `read` unless an interrupt is delivered first.
    pub async fn race<F>(&self, read: F) -> Result<String, InputError>
    where
        F: Future<Output = Result<String, InputError>>,
    {
        let interrupted = self.notify.notified();
        tokio::pin!(interrupted);
        // Register before publishing the flag so a delivery cannot be missed.
        interrupted.as_mut().enable();
        self.reading.store(true, Ordering::SeqCst);

        let outcome = tokio::select! {
            result = read => result,
            _ = &mut interrupted => {
                debug!("Interrupt received while waiting for input");
                Err(InputError::Interrupted)
            }
        };
        self.reading.store(false, Ordering::SeqCst);
        outcome
    }
}

/// Exit the process on Ctrl-C unless a read is waiting; a waiting read
/// turns the interrupt into [`InputError::Interrupted`] instead.
pub fn spawn_interrupt_watcher(interrupts: Arc<Interrupts>, exit_code: i32) {
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
                return;
            }
            if !interrupts.deliver() {
                debug!("Interrupted outside a prompt");
                std::process::exit(exit_code);
            }
        }
    });
}

/// Terminal line editor with in-memory history.
///
/// An interrupted read leaves its blocking thread parked in the editor until
/// the terminal yields a line, so the binary ends with `process::exit` rather
/// than waiting for the runtime to drain.
pub struct ReadlineInput {
    /// `None` once a read was abandoned by an interrupt.
    editor: Option<DefaultEditor>,
    interrupts: Arc<Interrupts>,
}

impl ReadlineInput {
    pub fn new() -> Result<Self, InputError> {
        let editor = DefaultEditor::new()?;
        Ok(Self {
            editor: Some(editor),
            interrupts: Arc::default(),
        })
    }

    /// Shared with the interrupt watcher.
    pub fn interrupts(&self) -> Arc<Interrupts> {
        self.interrupts.clone()
    }
}

#[async_trait]
impl LineInput for ReadlineInput {
    async fn read_line(&mut self, initial: Option<&str>) -> Result<String, InputError> {
        let mut editor = self.editor.take().ok_or(InputError::Eof)?;
        let initial = initial.unwrap_or_default().to_string();

        let read = tokio::task::spawn_blocking(move || {
            let result = editor.readline_with_initial("", (initial.as_str(), ""));
            if let Ok(line) = &result {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
            }
            (editor, result)
        });

        let editor_slot = &mut self.editor;
        self.interrupts
            .race(async move {
                match read.await {
                    Ok((editor, result)) => {
                        *editor_slot = Some(editor);
                        result.map_err(InputError::from)
                    }
                    Err(e) => Err(InputError::Io(io::Error::other(e))),
                }
            })
            .await
    }
}

/// Pre-recorded input for tests. Records the pre-fill passed to each read.
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedInput {
    lines: std::collections::VecDeque<Result<String, InputError>>,
    prefills: Prefills,
}

#[cfg(test)]
pub type Prefills = std::sync::Arc<std::sync::Mutex<Vec<Option<String>>>>;

#[cfg(test)]
impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(|l| Ok(l.into())).collect(),
            prefills: Prefills::default(),
        }
    }

    /// Handle to the recorded pre-fills that outlives a move into a session.
    pub fn prefills(&self) -> Prefills {
        self.prefills.clone()
    }

    pub fn then_interrupt(mut self) -> Self {
        self.lines.push_back(Err(InputError::Interrupted));
        self
    }
}

#[cfg(test)]
#[async_trait]
impl LineInput for ScriptedInput {
    async fn read_line(&mut self, initial: Option<&str>) -> Result<String, InputError> {
        self.prefills
            .lock()
            .unwrap()
            .push(initial.map(str::to_string));
        self.lines.pop_front().unwrap_or(Err(InputError::Eof))
    }
}

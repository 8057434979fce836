use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod engine;
mod output;
mod startup;
mod ui;

use cli::Cli;
use engine::{EchoOrchestrator, EngineLoader, Orchestrator};
use output::{OutputMode, Renderer, Sink, StatusEvent};
use startup::{BootstrapGuard, BootstrapVerdict, Environment, InterpreterProbe, ManifestLoader};
use ui::{ConsoleSession, InputError, LineInput, ReadlineInput, UserInterface};

/// Exit code when Ctrl-C arrives outside a prompt.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let (known, passthrough) = cli::split_known_args(std::env::args());
    let cli = Cli::parse_from(known);

    // Initialize logging. Stdout carries the protocol, so logs go to stderr.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if !passthrough.is_empty() {
        debug!("Passing through unrecognized arguments: {:?}", passthrough);
    }

    // An interrupted read can leave a blocking thread parked in the line
    // editor; exiting here skips waiting on it during runtime shutdown.
    let exit_code = run(cli).await?;
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let mode = OutputMode::from_json_flag(cli.json);

    let root = cli::resolve_root(cli.root)?;
    let probe = InterpreterProbe::new(&cli.python);
    let environment = Environment::detect(root, cli.python.clone(), &probe).await;
    let loader = ManifestLoader::new(&environment, probe, || {
        Box::new(EchoOrchestrator::new()) as Box<dyn Orchestrator>
    });

    run_with(&environment, &loader, mode.renderer(), Sink::stdio(), || {
        let input = ReadlineInput::new()?;
        ui::spawn_interrupt_watcher(input.interrupts(), INTERRUPTED_EXIT_CODE);
        Ok(Box::new(input) as Box<dyn LineInput>)
    })
    .await
}

/// Bootstrap, then drive the engine over a console session.
///
/// The input channel is only opened once the environment is known to be
/// usable.
async fn run_with<F>(
    environment: &Environment,
    loader: &dyn EngineLoader,
    renderer: Box<dyn Renderer>,
    mut sink: Sink,
    open_input: F,
) -> Result<i32>
where
    F: FnOnce() -> Result<Box<dyn LineInput>, InputError>,
{
    let guard = BootstrapGuard::new(environment, renderer.as_ref());
    let mut engine = match guard.check(loader).await {
        BootstrapVerdict::Ready(engine) => engine,
        BootstrapVerdict::NotReady(reason) => {
            debug!("Environment not ready: {}", reason);
            return Ok(guard.report(&reason, &mut sink));
        }
    };

    let input = open_input()?;
    let mut session = ConsoleSession::new(renderer, sink, input);
    debug!("Console session using {:?} output", session.mode());

    session.start().await;
    session.send_status(&StatusEvent::Starting {
        message: "Launching pilot in JSON mode".to_string(),
    });

    let exit_code = engine.run(&mut session).await;
    debug!(
        "Engine finished with exit code {} ({:?})",
        exit_code,
        session.state()
    );

    session.stop().await;
    session.send_status(&StatusEvent::Done { exit_code });

    Ok(exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::output::SharedBuffer;
    use crate::startup::LoadError;
    use crate::ui::{Frontend, ScriptedInput};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    /// Engine that finishes immediately with a fixed code.
    struct FixedExit(i32);

    #[async_trait]
    impl Orchestrator for FixedExit {
        async fn run(&mut self, _ui: &mut dyn Frontend) -> i32 {
            self.0
        }
    }

    enum StubLoader {
        Ready(i32),
        Missing(&'static str),
    }

    #[async_trait]
    impl EngineLoader for StubLoader {
        async fn load(&self) -> Result<Box<dyn Orchestrator>, LoadError> {
            match self {
                StubLoader::Ready(code) => Ok(Box::new(FixedExit(*code))),
                StubLoader::Missing(name) => Err(LoadError::MissingDependency {
                    name: name.to_string(),
                }),
            }
        }
    }

    struct Run {
        code: i32,
        out: SharedBuffer,
        err: SharedBuffer,
        input_opened: bool,
    }

    async fn run_stub(mode: OutputMode, loader: StubLoader) -> Run {
        let dir = TempDir::new().unwrap();
        let environment = Environment::new(dir.path().to_path_buf(), "python3".into(), None);
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let sink = Sink::new(Box::new(out.clone()), Box::new(err.clone()));
        let mut input_opened = false;

        let code = run_with(&environment, &loader, mode.renderer(), sink, || {
            input_opened = true;
            Ok(Box::new(ScriptedInput::default()) as Box<dyn LineInput>)
        })
        .await
        .unwrap();

        Run {
            code,
            out,
            err,
            input_opened,
        }
    }

    fn json_lines(out: &SharedBuffer) -> Vec<Value> {
        out.lines()
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_structured_run_brackets_engine_with_status() {
        let run = run_stub(OutputMode::Structured, StubLoader::Ready(0)).await;

        assert_eq!(run.code, 0);
        assert!(run.input_opened);
        assert_eq!(
            json_lines(&run.out),
            vec![
                json!({"status": "starting", "message": "Launching pilot in JSON mode"}),
                json!({"status": "done", "exit_code": 0})
            ]
        );
    }

    #[tokio::test]
    async fn test_engine_exit_code_is_passed_through() {
        let run = run_stub(OutputMode::Structured, StubLoader::Ready(7)).await;

        assert_eq!(run.code, 7);
        let events = json_lines(&run.out);
        assert_eq!(events.last().unwrap(), &json!({"status": "done", "exit_code": 7}));
    }

    #[tokio::test]
    async fn test_structured_failed_bootstrap_emits_only_error() {
        let run = run_stub(OutputMode::Structured, StubLoader::Missing("foo")).await;

        assert_eq!(run.code, 255);
        assert!(!run.input_opened);
        assert!(run.err.contents().is_empty());
        assert_eq!(
            json_lines(&run.out),
            vec![json!({
                "error": "Runtime environment for pilot is not set up: module `foo` is missing."
            })]
        );
    }

    #[tokio::test]
    async fn test_human_run_ends_with_finished() {
        let run = run_stub(OutputMode::Human, StubLoader::Ready(0)).await;

        assert_eq!(run.code, 0);
        assert_eq!(run.out.contents(), "Finished.\n");
    }

    #[tokio::test]
    async fn test_human_failed_bootstrap_writes_stderr_only() {
        let run = run_stub(OutputMode::Human, StubLoader::Missing("foo")).await;

        assert_eq!(run.code, 255);
        assert!(!run.input_opened);
        assert!(run.out.contents().is_empty());
        assert!(run.err.lines()[0].contains("module `foo` is missing"));
    }
}

use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use chrono::Utc;
use cloudpdf_core::{
    update, ChatTurn, Effect, InputFile, Msg, Phase, Speaker, ToolKind, WorkspaceState,
    WorkspaceView,
};
use cloudpdf_engine::{AtomicFileWriter, EngineConfig, SimSettings};
use cloudpdf_logging::cloud_info;
use indicatif::{ProgressBar, ProgressStyle};

use crate::effects::EffectRunner;
use crate::settings::Settings;

const IDLE_POLL: Duration = Duration::from_millis(50);
const CHAT_REPLY_TIMEOUT: Duration = Duration::from_secs(60);

/// Drives one job from intake to completion: owns the workspace state,
/// pumps engine messages through `update`, and renders when the state says
/// something changed.
pub fn run(
    tool: ToolKind,
    inputs: Vec<InputFile>,
    settings: &Settings,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(
        msg_tx,
        EngineConfig {
            sim: SimSettings::default(),
            collaborator: settings.collaborator(),
        },
    );

    let bar = progress_bar();
    let mut state = WorkspaceState::new(tool);
    state = apply(state, Msg::FilesAdded(inputs), &runner, &bar)?;
    state = apply(state, Msg::StartRequested, &runner, &bar)?;

    // Pump engine messages until the run reaches a terminal phase.
    loop {
        match state.phase() {
            Phase::Completed => break,
            Phase::Failed => {
                bar.abandon();
                let error = state
                    .view()
                    .error
                    .unwrap_or_else(|| "unknown error".to_string());
                bail!("processing failed: {error}");
            }
            _ => {}
        }
        state = match msg_rx.recv_timeout(IDLE_POLL) {
            Ok(msg) => apply(state, msg, &runner, &bar)?,
            Err(mpsc::RecvTimeoutError::Timeout) => apply(state, Msg::Tick, &runner, &bar)?,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                bail!("engine event loop ended unexpectedly")
            }
        };
    }
    bar.finish_and_clear();

    report_outcome(&state.view(), output_dir)?;

    if tool == ToolKind::AiChat {
        chat_loop(state, &runner, &msg_rx, &bar)?;
    }
    Ok(())
}

/// One transition: update, forward effects, render if dirty.
fn apply(
    state: WorkspaceState,
    msg: Msg,
    runner: &EffectRunner,
    bar: &ProgressBar,
) -> anyhow::Result<WorkspaceState> {
    let (mut state, effects) = update(state, msg);
    let mut forwarded = Vec::with_capacity(effects.len());
    for effect in effects {
        match effect {
            Effect::StartRejected { .. } => {
                bail!("add at least one input file before starting")
            }
            other => forwarded.push(other),
        }
    }
    runner.run(forwarded);
    if state.consume_dirty() {
        render(&state.view(), bar);
    }
    Ok(state)
}

fn render(view: &WorkspaceView, bar: &ProgressBar) {
    if view.phase == Phase::Running {
        bar.set_position(u64::from(view.progress));
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

fn report_outcome(view: &WorkspaceView, output_dir: &Path) -> anyhow::Result<()> {
    let result = view
        .result
        .as_ref()
        .context("completed without a result artifact")?;
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let path = writer.write(&result.filename, &result.bytes)?;
    println!(
        "Saved {} ({} bytes, {})",
        path.display(),
        result.bytes.len(),
        result.media_type
    );
    cloud_info!("artifact written at {}", Utc::now().to_rfc3339());

    if let Some(report) = view.compression {
        println!(
            "Compression: {:.2} MB down to {:.2} MB ({}% smaller)",
            megabytes(report.original_bytes),
            megabytes(report.compressed_bytes),
            report.savings_percent
        );
    }
    if let Some(summary) = &view.summary {
        println!();
        println!("AI summary:");
        println!("{summary}");
    }
    Ok(())
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Interactive question loop over the completed document. Each message is
/// answered independently by the collaborator; a blank line (or EOF) ends
/// the session.
fn chat_loop(
    mut state: WorkspaceState,
    runner: &EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
    bar: &ProgressBar,
) -> anyhow::Result<()> {
    use std::io::{BufRead, Write};

    for turn in &state.view().transcript {
        print_turn(turn);
    }
    println!("(blank line to finish)");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim().to_string();
        if message.is_empty() {
            break;
        }

        let turns_before = state.view().transcript.len();
        let replies_before = state.view().settled_replies;
        state = apply(state, Msg::ChatSubmitted { text: message }, runner, bar)?;

        // Wait until this request settles: the reply counter grows by one
        // whether the collaborator answered or failed.
        let deadline = Instant::now() + CHAT_REPLY_TIMEOUT;
        loop {
            if Instant::now() >= deadline {
                println!("(the assistant did not answer in time)");
                break;
            }
            state = match msg_rx.recv_timeout(IDLE_POLL) {
                Ok(msg) => apply(state, msg, runner, bar)?,
                Err(mpsc::RecvTimeoutError::Timeout) => state,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    bail!("engine event loop ended unexpectedly")
                }
            };
            let view = state.view();
            if view.settled_replies > replies_before {
                if view.transcript.len() > turns_before + 1 {
                    if let Some(turn) = view.transcript.last() {
                        print_turn(turn);
                    }
                } else if let Some(error) = &view.error {
                    println!("(assistant unavailable: {error})");
                }
                break;
            }
        }
    }
    Ok(())
}

fn print_turn(turn: &ChatTurn) {
    match turn.speaker {
        Speaker::Assistant => println!("assistant: {}", turn.text),
        Speaker::User => println!("you: {}", turn.text),
    }
}

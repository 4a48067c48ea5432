use bytes::Bytes;

use crate::view_model::{FileRowView, WorkspaceView};
use crate::ToolKind;

/// Generation counter identifying one processing run. Bumped on every start
/// and every reset so events from a superseded run can be discarded.
pub type RunId = u64;

/// Lifecycle phase of the workspace's single job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Collecting,
    Running,
    Completed,
    Failed,
}

/// One input file supplied by the intake surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

/// The fabricated output of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultArtifact {
    pub bytes: Bytes,
    pub media_type: String,
    pub filename: String,
}

/// Fabricated size statistics attached to a compress run. The numbers bear
/// no relation to the (unchanged) result bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionReport {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub savings_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One turn of the document chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// Everything a successful run hands back to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRun {
    pub artifact: ResultArtifact,
    pub compression: Option<CompressionReport>,
    pub summary: Option<String>,
    pub greeting: Option<String>,
}

/// Opaque description of why a run (or chat request) failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFault {
    pub message: String,
}

/// State for one tool workspace: a single job and its lifecycle.
///
/// Mutated only through [`crate::update`]; observers read via [`Self::view`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceState {
    tool: ToolKind,
    phase: Phase,
    inputs: Vec<InputFile>,
    run: RunId,
    progress: u8,
    result: Option<ResultArtifact>,
    compression: Option<CompressionReport>,
    summary: Option<String>,
    transcript: Vec<ChatTurn>,
    settled_replies: u64,
    error: Option<String>,
    dirty: bool,
}

impl WorkspaceState {
    pub fn new(tool: ToolKind) -> Self {
        Self {
            tool,
            phase: Phase::Idle,
            inputs: Vec::new(),
            run: 0,
            progress: 0,
            result: None,
            compression: None,
            summary: None,
            transcript: Vec::new(),
            settled_replies: 0,
            error: None,
            dirty: false,
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Identifier of the current (or most recent) run.
    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn inputs(&self) -> &[InputFile] {
        &self.inputs
    }

    pub fn view(&self) -> WorkspaceView {
        WorkspaceView {
            tool: self.tool,
            phase: self.phase,
            files: self
                .inputs
                .iter()
                .map(|file| FileRowView {
                    name: file.name.clone(),
                    media_type: file.media_type.clone(),
                    size_bytes: file.bytes.len() as u64,
                })
                .collect(),
            progress: self.progress,
            can_start: self.phase == Phase::Collecting && !self.inputs.is_empty(),
            result: self.result.clone(),
            compression: self.compression,
            summary: self.summary.clone(),
            transcript: self.transcript.clone(),
            settled_replies: self.settled_replies,
            error: self.error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it. The render loop uses this to
    /// coalesce redraws.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn add_inputs(&mut self, files: Vec<InputFile>) {
        self.inputs.extend(files);
        if self.phase == Phase::Idle && !self.inputs.is_empty() {
            self.phase = Phase::Collecting;
        }
        self.mark_dirty();
    }

    pub(crate) fn remove_input(&mut self, index: usize) {
        if index >= self.inputs.len() {
            return;
        }
        self.inputs.remove(index);
        if self.inputs.is_empty() {
            self.phase = Phase::Idle;
        }
        self.mark_dirty();
    }

    pub(crate) fn clear_inputs(&mut self) {
        if self.inputs.is_empty() {
            return;
        }
        self.inputs.clear();
        self.phase = Phase::Idle;
        self.mark_dirty();
    }

    /// Moves to `Running`, clearing every artifact of the previous run and
    /// bumping the run generation. Returns the new run id.
    pub(crate) fn begin_run(&mut self) -> RunId {
        self.run += 1;
        self.phase = Phase::Running;
        self.progress = 0;
        self.result = None;
        self.compression = None;
        self.summary = None;
        self.transcript.clear();
        self.settled_replies = 0;
        self.error = None;
        self.mark_dirty();
        self.run
    }

    /// Applies a progress tick. Ticks for a stale run, or arriving outside
    /// `Running`, are ignored. Progress is capped at 95 until completion.
    pub(crate) fn apply_progress(&mut self, run: RunId, delta: u8) {
        if run != self.run || self.phase != Phase::Running {
            return;
        }
        self.progress = self.progress.saturating_add(delta).min(95);
        self.mark_dirty();
    }

    /// Applies the terminal outcome of a run. Stale completions are ignored.
    pub(crate) fn apply_finished(&mut self, run: RunId, outcome: Result<CompletedRun, RunFault>) {
        if run != self.run || self.phase != Phase::Running {
            return;
        }
        match outcome {
            Ok(completed) => {
                self.progress = 100;
                self.result = Some(completed.artifact);
                self.compression = completed.compression;
                self.summary = completed.summary;
                if let Some(greeting) = completed.greeting {
                    self.transcript.push(ChatTurn {
                        speaker: Speaker::Assistant,
                        text: greeting,
                    });
                }
                self.phase = Phase::Completed;
            }
            Err(fault) => {
                self.progress = 0;
                self.error = Some(fault.message);
                self.phase = Phase::Failed;
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn push_user_turn(&mut self, text: String) {
        self.transcript.push(ChatTurn {
            speaker: Speaker::User,
            text,
        });
        self.mark_dirty();
    }

    /// Applies a chat reply. Every accepted reply, success or failure,
    /// bumps the settled counter so a waiting front-end can tell this
    /// request's outcome apart from the previous one.
    pub(crate) fn apply_chat_reply(&mut self, run: RunId, reply: Result<String, RunFault>) {
        if run != self.run || self.phase != Phase::Completed {
            return;
        }
        match reply {
            Ok(text) => self.transcript.push(ChatTurn {
                speaker: Speaker::Assistant,
                text,
            }),
            Err(fault) => self.error = Some(fault.message),
        }
        self.settled_replies += 1;
        self.mark_dirty();
    }

    /// Clears the job back to `Idle` as if the run never existed, bumping the
    /// run generation so in-flight events become stale. Returns the
    /// superseded run id so its timers can be torn down.
    pub(crate) fn reset(&mut self) -> RunId {
        let superseded = self.run;
        self.run += 1;
        self.phase = Phase::Idle;
        self.inputs.clear();
        self.progress = 0;
        self.result = None;
        self.compression = None;
        self.summary = None;
        self.transcript.clear();
        self.settled_replies = 0;
        self.error = None;
        self.mark_dirty();
        superseded
    }

    /// True when nothing would change on reset.
    pub(crate) fn is_pristine(&self) -> bool {
        self.phase == Phase::Idle && self.inputs.is_empty() && self.result.is_none()
    }
}

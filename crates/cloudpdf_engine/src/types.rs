use std::fmt;

use bytes::Bytes;

use crate::tool::ToolKind;

/// Generation counter identifying one processing run.
pub type RunId = u64;

/// One input file, as handed over by the intake surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

/// Everything the engine needs to drive one simulated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub run: RunId,
    pub tool: ToolKind,
    pub inputs: Vec<InputFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// One progress tick; the receiver accumulates and clamps.
    Progress { run: RunId, delta: u8 },
    /// Terminal outcome for a run. Emitted exactly once per run, never after
    /// the run was cancelled.
    RunCompleted {
        run: RunId,
        result: Result<RunArtifacts, RunError>,
    },
    /// Collaborator reply for a post-completion chat request.
    ChatReply {
        run: RunId,
        result: Result<String, RunError>,
    },
}

/// The fabricated output of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultArtifact {
    /// Byte-identical to the first input; only the label changes.
    pub bytes: Bytes,
    pub media_type: String,
    pub filename: String,
}

/// Fabricated size statistics for a compress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionReport {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub savings_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArtifacts {
    pub artifact: ResultArtifact,
    pub compression: Option<CompressionReport>,
    pub summary: Option<String>,
    pub greeting: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    pub kind: RunFailure,
    pub message: String,
}

impl RunError {
    pub(crate) fn new(kind: RunFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunFailure {
    /// The AI text service could not be reached or answered with an error.
    CollaboratorUnavailable,
    /// A run request arrived without any input to fabricate a result from.
    MissingInput,
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunFailure::CollaboratorUnavailable => write!(f, "collaborator unavailable"),
            RunFailure::MissingInput => write!(f, "missing input"),
        }
    }
}

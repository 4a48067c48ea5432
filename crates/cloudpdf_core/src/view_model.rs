use crate::{ChatTurn, CompressionReport, Phase, ResultArtifact, ToolKind};

/// Read-only snapshot of the workspace for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceView {
    pub tool: ToolKind,
    pub phase: Phase,
    pub files: Vec<FileRowView>,
    /// Percent in `[0, 100]`; meaningful only while `Running` or `Completed`.
    pub progress: u8,
    pub can_start: bool,
    pub result: Option<ResultArtifact>,
    pub compression: Option<CompressionReport>,
    pub summary: Option<String>,
    pub transcript: Vec<ChatTurn>,
    /// Count of chat replies applied so far, failures included. Grows by
    /// exactly one per answered request, so a front-end can wait on it.
    pub settled_replies: u64,
    pub error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
}

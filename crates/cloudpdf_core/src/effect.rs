use crate::{InputFile, RunId, ToolKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Launch the processing run in the engine.
    BeginRun {
        run: RunId,
        tool: ToolKind,
        inputs: Vec<InputFile>,
    },
    /// Tear down any timers still pending for a superseded run.
    CancelRun { run: RunId },
    /// A start request was rejected; the state did not change.
    StartRejected { reason: StartRejection },
    /// Ask the collaborator for a chat reply about the named document.
    RequestChatReply {
        run: RunId,
        document: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRejection {
    /// Processing needs at least one input file.
    NoInputs,
}

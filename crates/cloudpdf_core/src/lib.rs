//! CloudPDF core: pure job-lifecycle state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod tool;
mod update;
mod view_model;

pub use effect::{Effect, StartRejection};
pub use msg::Msg;
pub use state::{
    ChatTurn, CompletedRun, CompressionReport, InputFile, Phase, ResultArtifact, RunFault, RunId,
    Speaker, WorkspaceState,
};
pub use tool::{ToolCategory, ToolKind, UnknownTool};
pub use update::update;
pub use view_model::{FileRowView, WorkspaceView};

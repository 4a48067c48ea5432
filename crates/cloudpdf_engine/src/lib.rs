//! CloudPDF engine: simulated job processing and collaborator access.
mod collaborator;
mod engine;
mod extract;
mod naming;
mod persist;
mod simulate;
mod tool;
mod types;

pub use collaborator::{
    chat_instructions, CollaboratorError, CollaboratorSettings, HttpCollaborator, TextCollaborator,
    SUMMARIZE_INSTRUCTIONS,
};
pub use engine::{EngineConfig, EngineHandle};
pub use extract::{NameSketchExtractor, TextExtractor};
pub use naming::download_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use simulate::{
    run_chat, run_simulation, ChannelEventSink, EventSink, SimSettings, CHAT_GREETING,
};
pub use tool::{PostProcess, ToolKind, ToolProfile};
pub use types::{
    CompressionReport, EngineEvent, InputFile, ResultArtifact, RunArtifacts, RunError, RunFailure,
    RunId, RunRequest,
};

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use cloudpdf_core::{CompletedRun, Effect, Msg, RunFault};
use cloudpdf_engine::{EngineConfig, EngineEvent, EngineHandle, RunRequest};
use cloudpdf_logging::{cloud_debug, cloud_info};

/// Bridges core effects to engine commands and engine events back to core
/// messages on a polling thread.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, config: EngineConfig) -> Self {
        let engine = EngineHandle::new(config);
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::BeginRun { run, tool, inputs } => {
                    cloud_info!("BeginRun run={} tool={} inputs={}", run, tool, inputs.len());
                    self.engine.begin_run(RunRequest {
                        run,
                        tool: map_tool(tool),
                        inputs: inputs.into_iter().map(map_input).collect(),
                    });
                }
                Effect::CancelRun { run } => {
                    cloud_info!("CancelRun run={}", run);
                    self.engine.cancel_run(run);
                }
                Effect::StartRejected { reason } => {
                    // Presentation handles the user-facing message.
                    cloud_debug!("start rejected: {:?}", reason);
                }
                Effect::RequestChatReply {
                    run,
                    document,
                    message,
                } => {
                    self.engine.chat(run, document, message);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let msg = match event {
                    EngineEvent::Progress { run, delta } => Msg::ProgressTicked { run, delta },
                    EngineEvent::RunCompleted { run, result } => Msg::RunFinished {
                        run,
                        outcome: result.map(map_artifacts).map_err(map_error),
                    },
                    EngineEvent::ChatReply { run, result } => Msg::ChatReplyArrived {
                        run,
                        reply: result.map_err(map_error),
                    },
                };
                if msg_tx.send(msg).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_tool(tool: cloudpdf_core::ToolKind) -> cloudpdf_engine::ToolKind {
    match tool {
        cloudpdf_core::ToolKind::Merge => cloudpdf_engine::ToolKind::Merge,
        cloudpdf_core::ToolKind::Split => cloudpdf_engine::ToolKind::Split,
        cloudpdf_core::ToolKind::Compress => cloudpdf_engine::ToolKind::Compress,
        cloudpdf_core::ToolKind::PdfToWord => cloudpdf_engine::ToolKind::PdfToWord,
        cloudpdf_core::ToolKind::PdfToJpg => cloudpdf_engine::ToolKind::PdfToJpg,
        cloudpdf_core::ToolKind::JpgToPdf => cloudpdf_engine::ToolKind::JpgToPdf,
        cloudpdf_core::ToolKind::Watermark => cloudpdf_engine::ToolKind::Watermark,
        cloudpdf_core::ToolKind::Rotate => cloudpdf_engine::ToolKind::Rotate,
        cloudpdf_core::ToolKind::AiChat => cloudpdf_engine::ToolKind::AiChat,
        cloudpdf_core::ToolKind::AiSummarize => cloudpdf_engine::ToolKind::AiSummarize,
    }
}

fn map_input(file: cloudpdf_core::InputFile) -> cloudpdf_engine::InputFile {
    cloudpdf_engine::InputFile {
        name: file.name,
        media_type: file.media_type,
        bytes: file.bytes,
    }
}

fn map_artifacts(artifacts: cloudpdf_engine::RunArtifacts) -> CompletedRun {
    CompletedRun {
        artifact: cloudpdf_core::ResultArtifact {
            bytes: artifacts.artifact.bytes,
            media_type: artifacts.artifact.media_type,
            filename: artifacts.artifact.filename,
        },
        compression: artifacts
            .compression
            .map(|report| cloudpdf_core::CompressionReport {
                original_bytes: report.original_bytes,
                compressed_bytes: report.compressed_bytes,
                savings_percent: report.savings_percent,
            }),
        summary: artifacts.summary,
        greeting: artifacts.greeting,
    }
}

fn map_error(err: cloudpdf_engine::RunError) -> RunFault {
    RunFault {
        message: err.message,
    }
}

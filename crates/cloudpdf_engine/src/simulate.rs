use std::sync::{mpsc, Arc};
use std::time::Duration;

use cloudpdf_logging::{cloud_info, cloud_warn};
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::collaborator::TextCollaborator;
use crate::extract::TextExtractor;
use crate::tool::PostProcess;
use crate::types::{
    CompressionReport, EngineEvent, InputFile, ResultArtifact, RunArtifacts, RunError, RunFailure,
    RunId, RunRequest,
};
use crate::naming::download_filename;

/// Fixed greeting that opens an ai-chat transcript. No collaborator call is
/// made for it.
pub const CHAT_GREETING: &str = "I've analyzed your document. What would you like to know?";

/// Timing of the fabricated run. Both durations are design constants of the
/// product, independent of input size; tests shorten them.
#[derive(Debug, Clone)]
pub struct SimSettings {
    /// Spacing of progress ticks.
    pub tick_interval: Duration,
    /// Fabricated minimum wall-time before a run completes.
    pub completion_delay: Duration,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            completion_delay: Duration::from_millis(2500),
        }
    }
}

/// Receives engine events as they are emitted.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Drives one fabricated run: a progress ticker plus a fixed completion
/// delay, both torn down by the cancellation token. A cancelled run emits
/// nothing at all — to every observer it behaves as if it never happened.
pub async fn run_simulation(
    request: RunRequest,
    settings: SimSettings,
    collaborator: Arc<dyn TextCollaborator>,
    extractor: Arc<dyn TextExtractor>,
    token: CancellationToken,
    sink: Arc<dyn EventSink>,
) {
    let run = request.run;
    cloud_info!(
        "run {} started: tool={:?} inputs={}",
        run,
        request.tool,
        request.inputs.len()
    );

    // The ticker animates progress on a child token so the completion path
    // can silence it before emitting the terminal event.
    let ticker_token = token.child_token();
    let ticker = {
        let sink = sink.clone();
        let ticker_token = ticker_token.clone();
        let tick_interval = settings.tick_interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_interval);
            // The first interval tick resolves immediately; skip it so ticks
            // are evenly spaced from the start of the run.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = ticker_token.cancelled() => break,
                    _ = interval.tick() => {
                        let delta = rand::thread_rng().gen_range(0..=15u8);
                        sink.emit(EngineEvent::Progress { run, delta });
                    }
                }
            }
        })
    };

    let cancelled = tokio::select! {
        _ = token.cancelled() => true,
        _ = tokio::time::sleep(settings.completion_delay) => false,
    };
    if cancelled {
        ticker_token.cancel();
        let _ = ticker.await;
        cloud_info!("run {} cancelled before completion", run);
        return;
    }

    // Fabricate the result. The collaborator call may suspend, so the run
    // stays cancellable while it is in flight; ticks keep animating
    // meanwhile, still capped below completion by the receiver.
    let result = tokio::select! {
        _ = token.cancelled() => {
            ticker_token.cancel();
            let _ = ticker.await;
            cloud_info!("run {} cancelled during synthesis", run);
            return;
        }
        result = synthesize(&request, collaborator.as_ref(), extractor.as_ref()) => result,
    };

    ticker_token.cancel();
    let _ = ticker.await;
    match &result {
        Ok(_) => cloud_info!("run {} completed", run),
        Err(err) => cloud_warn!("run {} failed: {}", run, err.kind),
    }
    sink.emit(EngineEvent::RunCompleted { run, result });
}

async fn synthesize(
    request: &RunRequest,
    collaborator: &dyn TextCollaborator,
    extractor: &dyn TextExtractor,
) -> Result<RunArtifacts, RunError> {
    let first = request
        .inputs
        .first()
        .ok_or_else(|| RunError::new(RunFailure::MissingInput, "run started without inputs"))?;
    let profile = request.tool.profile();

    // The "processed" result is the first input's bytes under a new label.
    let artifact = ResultArtifact {
        bytes: first.bytes.clone(),
        media_type: profile
            .result_media_type
            .map(str::to_string)
            .unwrap_or_else(|| first.media_type.clone()),
        filename: download_filename(request.tool, Some(&first.name)),
    };

    let mut artifacts = RunArtifacts {
        artifact,
        compression: None,
        summary: None,
        greeting: None,
    };

    match profile.post {
        PostProcess::None => {}
        PostProcess::CompressionReport => {
            artifacts.compression = Some(fabricate_compression(&request.inputs));
        }
        PostProcess::Summarize => {
            let text = extractor.extract(&first.name);
            let summary = collaborator.summarize(&text).await.map_err(|err| {
                RunError::new(RunFailure::CollaboratorUnavailable, err.to_string())
            })?;
            artifacts.summary = Some(summary);
        }
        PostProcess::ChatGreeting => {
            artifacts.greeting = Some(CHAT_GREETING.to_string());
        }
    }

    Ok(artifacts)
}

/// Size statistics with a savings ratio drawn uniformly from 40-60%. The
/// numbers are unrelated to the (unchanged) result bytes.
fn fabricate_compression(inputs: &[InputFile]) -> CompressionReport {
    let original: u64 = inputs.iter().map(|file| file.bytes.len() as u64).sum();
    let ratio = rand::thread_rng().gen_range(0.40..=0.60);
    let compressed = ((original as f64) * (1.0 - ratio)).round() as u64;
    CompressionReport {
        original_bytes: original,
        compressed_bytes: compressed.min(original),
        savings_percent: (ratio * 100.0).round() as u8,
    }
}

/// Answers one post-completion chat message. Stateless: the context is
/// re-extracted and sent in full on every call.
pub async fn run_chat(
    run: RunId,
    document: String,
    message: String,
    collaborator: Arc<dyn TextCollaborator>,
    extractor: Arc<dyn TextExtractor>,
    sink: Arc<dyn EventSink>,
) {
    let context = extractor.extract(&document);
    let result = collaborator
        .chat(&context, &message)
        .await
        .map_err(|err| RunError::new(RunFailure::CollaboratorUnavailable, err.to_string()));
    if let Err(err) = &result {
        cloud_warn!("chat reply for run {} failed: {}", run, err.message);
    }
    sink.emit(EngineEvent::ChatReply { run, result });
}

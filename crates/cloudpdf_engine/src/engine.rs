use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use cloudpdf_logging::cloud_error;
use tokio_util::sync::CancellationToken;

use crate::collaborator::{CollaboratorSettings, HttpCollaborator, TextCollaborator};
use crate::extract::{NameSketchExtractor, TextExtractor};
use crate::simulate::{run_chat, run_simulation, ChannelEventSink, EventSink, SimSettings};
use crate::types::{EngineEvent, RunId, RunRequest};

enum EngineCommand {
    BeginRun(RunRequest),
    CancelRun {
        run: RunId,
    },
    Chat {
        run: RunId,
        document: String,
        message: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub sim: SimSettings,
    pub collaborator: CollaboratorSettings,
}

/// Front door of the engine: commands in, events out.
///
/// Owns a dedicated thread with a tokio runtime; each run lives as a task
/// under its own cancellation token so a reset can tear it down without a
/// trace.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

type RunRegistry = Arc<Mutex<HashMap<RunId, CancellationToken>>>;

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let collaborator: Arc<dyn TextCollaborator> =
            Arc::new(HttpCollaborator::new(config.collaborator));
        let extractor: Arc<dyn TextExtractor> = Arc::new(NameSketchExtractor);
        let sim = config.sim;

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    cloud_error!("engine runtime failed to start: {err}");
                    return;
                }
            };
            let runs: RunRegistry = Arc::new(Mutex::new(HashMap::new()));
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::BeginRun(request) => {
                        let token = CancellationToken::new();
                        register(&runs, request.run, token.clone());
                        let run = request.run;
                        let sink = sink.clone();
                        let collaborator = collaborator.clone();
                        let extractor = extractor.clone();
                        let sim = sim.clone();
                        let runs = runs.clone();
                        runtime.spawn(async move {
                            run_simulation(request, sim, collaborator, extractor, token, sink)
                                .await;
                            deregister(&runs, run);
                        });
                    }
                    EngineCommand::CancelRun { run } => {
                        if let Some(token) = deregister(&runs, run) {
                            token.cancel();
                        }
                    }
                    EngineCommand::Chat {
                        run,
                        document,
                        message,
                    } => {
                        runtime.spawn(run_chat(
                            run,
                            document,
                            message,
                            collaborator.clone(),
                            extractor.clone(),
                            sink.clone(),
                        ));
                    }
                }
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn begin_run(&self, request: RunRequest) {
        let _ = self.cmd_tx.send(EngineCommand::BeginRun(request));
    }

    pub fn cancel_run(&self, run: RunId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelRun { run });
    }

    pub fn chat(&self, run: RunId, document: impl Into<String>, message: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Chat {
            run,
            document: document.into(),
            message: message.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        match self.event_rx.lock() {
            Ok(rx) => rx.try_recv().ok(),
            Err(err) => {
                cloud_error!("engine event receiver lock poisoned: {err}");
                None
            }
        }
    }
}

fn register(runs: &RunRegistry, run: RunId, token: CancellationToken) {
    match runs.lock() {
        Ok(mut guard) => {
            guard.insert(run, token);
        }
        Err(err) => cloud_error!("run registry lock poisoned: {err}"),
    }
}

fn deregister(runs: &RunRegistry, run: RunId) -> Option<CancellationToken> {
    match runs.lock() {
        Ok(mut guard) => guard.remove(&run),
        Err(err) => {
            cloud_error!("run registry lock poisoned: {err}");
            None
        }
    }
}

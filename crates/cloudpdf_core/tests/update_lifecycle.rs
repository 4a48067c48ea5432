use bytes::Bytes;
use cloudpdf_core::{
    update, CompletedRun, CompressionReport, Effect, InputFile, Msg, Phase, ResultArtifact,
    RunFault, StartRejection, ToolKind, WorkspaceState,
};

fn init_logging() {
    cloudpdf_logging::initialize_for_tests();
}

fn input(name: &str, payload: &'static [u8]) -> InputFile {
    InputFile {
        name: name.to_string(),
        media_type: "application/pdf".to_string(),
        bytes: Bytes::from_static(payload),
    }
}

fn ready_workspace(tool: ToolKind) -> WorkspaceState {
    let state = WorkspaceState::new(tool);
    let (state, _effects) = update(
        state,
        Msg::FilesAdded(vec![input("report.pdf", b"%PDF-1.7 report body")]),
    );
    state
}

fn completed_run(filename: &str) -> CompletedRun {
    CompletedRun {
        artifact: ResultArtifact {
            bytes: Bytes::from_static(b"%PDF-1.7 report body"),
            media_type: "application/pdf".to_string(),
            filename: filename.to_string(),
        },
        compression: None,
        summary: None,
        greeting: None,
    }
}

#[test]
fn start_with_no_inputs_is_rejected_without_state_change() {
    init_logging();
    let state = WorkspaceState::new(ToolKind::Merge);
    let before = state.clone();

    let (mut next, effects) = update(state, Msg::StartRequested);

    assert_eq!(next, before);
    assert_eq!(
        effects,
        vec![Effect::StartRejected {
            reason: StartRejection::NoInputs,
        }]
    );
    assert!(!next.consume_dirty());
}

#[test]
fn start_emits_begin_run_with_the_collected_inputs() {
    init_logging();
    let state = ready_workspace(ToolKind::PdfToWord);
    let inputs = state.inputs().to_vec();

    let (state, effects) = update(state, Msg::StartRequested);

    assert_eq!(state.view().phase, Phase::Running);
    assert_eq!(state.view().progress, 0);
    assert_eq!(
        effects,
        vec![Effect::BeginRun {
            run: 1,
            tool: ToolKind::PdfToWord,
            inputs,
        }]
    );
}

#[test]
fn second_start_while_running_is_not_queued() {
    init_logging();
    let state = ready_workspace(ToolKind::Merge);
    let (state, _effects) = update(state, Msg::StartRequested);

    let (state, effects) = update(state, Msg::StartRequested);
    assert_eq!(state.view().phase, Phase::Running);
    assert_eq!(state.run(), 1);
    assert!(effects.is_empty());
}

#[test]
fn progress_is_monotonic_and_capped_below_completion() {
    init_logging();
    let state = ready_workspace(ToolKind::Compress);
    let (mut state, _effects) = update(state, Msg::StartRequested);
    let run = state.run();

    let mut last = 0;
    for delta in [12, 0, 15, 9, 15, 15, 15, 15, 15, 15] {
        let (next, effects) = update(state, Msg::ProgressTicked { run, delta });
        state = next;
        assert!(effects.is_empty());
        let progress = state.view().progress;
        assert!(progress >= last, "progress went backwards: {last} -> {progress}");
        assert!(progress <= 95, "progress exceeded the pre-completion cap");
        last = progress;
    }
    assert_eq!(last, 95);

    let (state, _effects) = update(
        state,
        Msg::RunFinished {
            run,
            outcome: Ok(completed_run("report_cloudpdf.pdf")),
        },
    );
    assert_eq!(state.view().progress, 100);
    assert_eq!(state.view().phase, Phase::Completed);
}

#[test]
fn completion_stores_the_result_artifact() {
    init_logging();
    let state = ready_workspace(ToolKind::PdfToWord);
    let (state, _effects) = update(state, Msg::StartRequested);
    let run = state.run();

    let mut completed = completed_run("report_cloudpdf.docx");
    completed.artifact.media_type =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string();
    let (state, effects) = update(
        state,
        Msg::RunFinished {
            run,
            outcome: Ok(completed.clone()),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Completed);
    let result = view.result.expect("result artifact");
    assert_eq!(result, completed.artifact);
    // Files stay listed so the user can see what was processed.
    assert_eq!(view.files.len(), 1);
}

#[test]
fn compression_report_rides_along_with_completion() {
    init_logging();
    let state = ready_workspace(ToolKind::Compress);
    let (state, _effects) = update(state, Msg::StartRequested);
    let run = state.run();

    let mut completed = completed_run("report_cloudpdf.pdf");
    completed.compression = Some(CompressionReport {
        original_bytes: 1000,
        compressed_bytes: 470,
        savings_percent: 53,
    });
    let (state, _effects) = update(
        state,
        Msg::RunFinished {
            run,
            outcome: Ok(completed),
        },
    );

    let report = state.view().compression.expect("compression report");
    assert_eq!(report.original_bytes, 1000);
    assert!(report.compressed_bytes <= report.original_bytes);
    assert!((40..=60).contains(&report.savings_percent));
}

#[test]
fn failed_run_keeps_inputs_and_never_sets_a_result() {
    init_logging();
    let state = ready_workspace(ToolKind::AiSummarize);
    let (state, _effects) = update(state, Msg::StartRequested);
    let run = state.run();

    let (state, effects) = update(
        state,
        Msg::RunFinished {
            run,
            outcome: Err(RunFault {
                message: "collaborator unavailable: http status 503".to_string(),
            }),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, Phase::Failed);
    assert!(view.result.is_none());
    assert_eq!(view.files.len(), 1);
    assert_eq!(
        view.error.as_deref(),
        Some("collaborator unavailable: http status 503")
    );
}

#[test]
fn stale_run_events_are_ignored_after_reset() {
    init_logging();
    let state = ready_workspace(ToolKind::Merge);
    let (state, _effects) = update(state, Msg::StartRequested);
    let superseded = state.run();

    let (mut state, effects) = update(state, Msg::ResetRequested);
    assert_eq!(effects, vec![Effect::CancelRun { run: superseded }]);
    assert_eq!(state.view().phase, Phase::Idle);
    assert!(state.view().files.is_empty());
    assert!(state.consume_dirty());

    // A tick and a completion from the superseded run arrive late; the job
    // must behave as if that run never existed.
    let (mut state, effects) = update(
        state,
        Msg::ProgressTicked {
            run: superseded,
            delta: 10,
        },
    );
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.view().progress, 0);

    let (mut state, effects) = update(
        state,
        Msg::RunFinished {
            run: superseded,
            outcome: Ok(completed_run("report_cloudpdf.pdf")),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.view().phase, Phase::Idle);
    assert!(state.view().result.is_none());
}

#[test]
fn reset_after_completion_clears_every_artifact() {
    init_logging();
    let state = ready_workspace(ToolKind::Compress);
    let (state, _effects) = update(state, Msg::StartRequested);
    let run = state.run();
    let mut completed = completed_run("report_cloudpdf.pdf");
    completed.compression = Some(CompressionReport {
        original_bytes: 20,
        compressed_bytes: 10,
        savings_percent: 50,
    });
    let (state, _effects) = update(
        state,
        Msg::RunFinished {
            run,
            outcome: Ok(completed),
        },
    );

    let (state, effects) = update(state, Msg::ResetRequested);
    assert_eq!(effects, vec![Effect::CancelRun { run }]);
    let view = state.view();
    assert_eq!(view.phase, Phase::Idle);
    assert!(view.files.is_empty());
    assert!(view.result.is_none());
    assert!(view.compression.is_none());
    assert!(view.transcript.is_empty());
    assert_eq!(view.progress, 0);
}

#[test]
fn reset_of_a_pristine_workspace_is_a_noop() {
    init_logging();
    let state = WorkspaceState::new(ToolKind::Merge);
    let (mut next, effects) = update(state.clone(), Msg::ResetRequested);

    assert_eq!(next, state);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn failed_run_recovers_only_through_reset() {
    init_logging();
    let state = ready_workspace(ToolKind::AiSummarize);
    let (state, _effects) = update(state, Msg::StartRequested);
    let run = state.run();
    let (state, _effects) = update(
        state,
        Msg::RunFinished {
            run,
            outcome: Err(RunFault {
                message: "collaborator unavailable".to_string(),
            }),
        },
    );
    assert_eq!(state.view().phase, Phase::Failed);

    // No retry-in-place: a fresh start request is ignored.
    let (state, effects) = update(state, Msg::StartRequested);
    assert_eq!(state.view().phase, Phase::Failed);
    assert!(effects.is_empty());

    let (state, _effects) = update(state, Msg::ResetRequested);
    assert_eq!(state.view().phase, Phase::Idle);
    assert!(state.view().error.is_none());
}

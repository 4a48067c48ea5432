use crate::{Effect, Msg, Phase, StartRejection, ToolKind, WorkspaceState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WorkspaceState, msg: Msg) -> (WorkspaceState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesAdded(files) => {
            if files.is_empty() {
                return (state, Vec::new());
            }
            // Intake is only open before a run starts; later phases must
            // first be reset by the user.
            match state.phase() {
                Phase::Idle | Phase::Collecting => {}
                Phase::Running | Phase::Completed | Phase::Failed => {
                    return (state, Vec::new());
                }
            }
            state.add_inputs(files);
            Vec::new()
        }
        Msg::FileRemoved { index } => {
            match state.phase() {
                Phase::Idle | Phase::Collecting => {}
                Phase::Running | Phase::Completed | Phase::Failed => {
                    return (state, Vec::new());
                }
            }
            state.remove_input(index);
            Vec::new()
        }
        Msg::InputsCleared => {
            match state.phase() {
                Phase::Idle | Phase::Collecting => {}
                Phase::Running | Phase::Completed | Phase::Failed => {
                    return (state, Vec::new());
                }
            }
            state.clear_inputs();
            Vec::new()
        }
        Msg::StartRequested => {
            // A second start while a run is in flight is rejected, not
            // queued; Completed/Failed require an explicit reset first.
            match state.phase() {
                Phase::Idle | Phase::Collecting => {}
                Phase::Running | Phase::Completed | Phase::Failed => {
                    return (state, Vec::new());
                }
            }
            if state.inputs().is_empty() {
                return (
                    state,
                    vec![Effect::StartRejected {
                        reason: StartRejection::NoInputs,
                    }],
                );
            }
            let inputs = state.inputs().to_vec();
            let tool = state.tool();
            let run = state.begin_run();
            vec![Effect::BeginRun { run, tool, inputs }]
        }
        Msg::ProgressTicked { run, delta } => {
            state.apply_progress(run, delta);
            Vec::new()
        }
        Msg::RunFinished { run, outcome } => {
            state.apply_finished(run, outcome);
            Vec::new()
        }
        Msg::ChatSubmitted { text } => {
            let text = text.trim().to_string();
            if text.is_empty()
                || state.phase() != Phase::Completed
                || state.tool() != ToolKind::AiChat
            {
                return (state, Vec::new());
            }
            let Some(document) = state.inputs().first().map(|file| file.name.clone()) else {
                return (state, Vec::new());
            };
            let run = state.run();
            state.push_user_turn(text.clone());
            vec![Effect::RequestChatReply {
                run,
                document,
                message: text,
            }]
        }
        Msg::ChatReplyArrived { run, reply } => {
            state.apply_chat_reply(run, reply);
            Vec::new()
        }
        Msg::ResetRequested => {
            if state.is_pristine() {
                return (state, Vec::new());
            }
            let superseded = state.reset();
            vec![Effect::CancelRun { run: superseded }]
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

use cloudpdf_core::{update, Msg, ToolKind, WorkspaceState};

#[test]
fn update_is_noop() {
    let state = WorkspaceState::new(ToolKind::Merge);
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn render_tick_is_noop() {
    let state = WorkspaceState::new(ToolKind::Compress);
    let (next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

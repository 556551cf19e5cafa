#[derive(Debug, Clone, Copy, Default)]
pub struct RepaintDecisionInputs {
    pub worker_state_changed: bool,
    pub has_pending_actions: bool,
    pub has_pointer_activity: bool,
    pub has_scroll_activity: bool,
    pub has_input_events: bool,
    pub has_active_jobs: bool,
}

pub fn should_request_repaint_now(inputs: RepaintDecisionInputs) -> bool {
    inputs.worker_state_changed
        || inputs.has_pending_actions
        || inputs.has_pointer_activity
        || inputs.has_scroll_activity
        || inputs.has_input_events
}

pub fn should_request_periodic_repaint(inputs: RepaintDecisionInputs) -> bool {
    !should_request_repaint_now(inputs) && inputs.has_active_jobs
}

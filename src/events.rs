use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventPhase {
    Capture,
    Target,
    Bubble,
}

/// Mutable state threaded through one synchronous dispatch.
#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) event_phase: EventPhase,
    pub(crate) detail: Option<String>,
    pub(crate) bubbles: bool,
    pub(crate) cancelable: bool,
    pub(crate) default_prevented: bool,
    pub(crate) propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId, bubbles: bool, cancelable: bool) -> Self {
        EventState {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            event_phase: EventPhase::Target,
            detail: None,
            bubbles,
            cancelable,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub(crate) fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) behavior: Behavior,
    pub(crate) capture: bool,
}

/// Listeners keyed by node and event type. Adding the same behavior twice for
/// the same node, type and phase is a no-op, mirroring `addEventListener`
/// dedup semantics.
#[derive(Debug, Clone, Default)]
pub(crate) struct ListenerStore {
    listeners: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node: NodeId, event_type: &str, listener: Listener) {
        let for_type = self
            .listeners
            .entry(node)
            .or_default()
            .entry(event_type.to_string())
            .or_default();
        if !for_type.contains(&listener) {
            for_type.push(listener);
        }
    }

    pub(crate) fn listeners_for(&self, node: NodeId, event_type: &str) -> Vec<Listener> {
        self.listeners
            .get(&node)
            .and_then(|by_type| by_type.get(event_type))
            .cloned()
            .unwrap_or_default()
    }
}

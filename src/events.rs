//! Edge- and level-triggered notifications about a spring's state.

use crate::observer::SpringObserver;

/// Notification emitted by a spring's event check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpringEvent {
    /// Every enabled member arrived on target and settled. Fires once per arrival.
    TargetReached,
    /// Some enabled member's candidate moved away from its committed value.
    /// Fires on every tick where that holds.
    CurrentValueChanged,
    /// Some member got clamped. Fires once until no member is clamped.
    ClampingApplied,
}

/// Snapshot of the conditions an [`EventNotifier`] watches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventState {
    pub on_target_and_settled: bool,
    pub value_changed: bool,
    pub clamped: bool,
}

/// Turns per-tick [`EventState`] snapshots into events.
///
/// `TargetReached` and `ClampingApplied` are edge-triggered: the notifier
/// latches after firing and re-arms only once the condition has cleared.
/// The first check after [`reset`](Self::reset) only latches the
/// target-reached state, so a spring that starts at rest does not report
/// an arrival it never made.
#[derive(Clone, Debug, Default)]
pub struct EventNotifier {
    target_reached: Option<bool>,
    clamping_applied: bool,
}

impl EventNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all latched state.
    pub fn reset(&mut self) {
        self.target_reached = None;
        self.clamping_applied = false;
    }

    /// Compare `state` with the latched one and emit events to `observer`.
    pub fn notify<O: SpringObserver>(&mut self, state: EventState, observer: &mut O) {
        if state.on_target_and_settled && self.target_reached == Some(false) {
            observer.on_event(SpringEvent::TargetReached);
        }
        self.target_reached = Some(state.on_target_and_settled);

        if state.value_changed {
            observer.on_event(SpringEvent::CurrentValueChanged);
        }

        if state.clamped && !self.clamping_applied {
            observer.on_event(SpringEvent::ClampingApplied);
        }
        self.clamping_applied = state.clamped;
    }
}

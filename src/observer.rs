//! Host-side observation of spring events and faults.

use crate::error::SpringError;
use crate::events::SpringEvent;
use alloc::vec::Vec as AllocVec;

/// Trait for observing what springs report during updates.
///
/// Implement this to react to events (UI callbacks, audio triggers) or to
/// surface faults. All methods have default no-op implementations.
pub trait SpringObserver {
    /// Called for every event a spring's event check emits.
    fn on_event(&mut self, _event: SpringEvent) {}

    /// Called after a spring recovered from a fault.
    fn on_fault(&mut self, _fault: &SpringError) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpObserver;

impl SpringObserver for NoOpObserver {}

/// Observer that queues everything it sees for the host to poll.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: AllocVec<SpringEvent>,
    faults: AllocVec<SpringError>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SpringEvent] {
        &self.events
    }

    pub fn faults(&self) -> &[SpringError] {
        &self.faults
    }

    /// Number of queued occurrences of `event`.
    pub fn count(&self, event: SpringEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> AllocVec<SpringEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.faults.clear();
    }
}

impl SpringObserver for EventLog {
    fn on_event(&mut self, event: SpringEvent) {
        self.events.push(event);
    }

    fn on_fault(&mut self, fault: &SpringError) {
        self.faults.push(fault.clone());
    }
}

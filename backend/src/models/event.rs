//! Event logging for a single simulation run.
//!
//! Every successful firing during a run is recorded in order, so the run
//! analyzer can count firings per transition and a caller can replay what
//! happened at any step.
//!
//! # Example
//!
//! ```rust
//! use production_line_sim_core::line::TransitionKind;
//! use production_line_sim_core::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::Fired { time: 0.0, transition: TransitionKind::Produce });
//! log.log(Event::ToolOccupied { time: 3.0 });
//!
//! assert_eq!(log.count(TransitionKind::Produce), 1);
//! assert_eq!(log.count(TransitionKind::ToolOccupy), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::line::TransitionKind;

/// Simulation event capturing one firing.
///
/// Events are logged in the order they occur within a step: the hazard first,
/// then the priority pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The stochastic hazard took the tool out of service
    ToolOccupied { time: f64 },

    /// A transition of the priority pass fired
    Fired {
        time: f64,
        transition: TransitionKind,
    },
}

impl Event {
    /// Simulated time the event occurred at
    pub fn time(&self) -> f64 {
        match self {
            Event::ToolOccupied { time } => *time,
            Event::Fired { time, .. } => *time,
        }
    }

    /// The transition that fired
    pub fn transition(&self) -> TransitionKind {
        match self {
            Event::ToolOccupied { .. } => TransitionKind::ToolOccupy,
            Event::Fired { transition, .. } => *transition,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ToolOccupied { .. } => "tool_occupied",
            Event::Fired { .. } => "fired",
        }
    }
}

/// Event log for storing and querying simulation events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events that happened at a given simulated time
    pub fn events_at(&self, time: f64) -> Vec<&Event> {
        self.events.iter().filter(|e| e.time() == time).collect()
    }

    /// Get the firings of one transition
    pub fn events_of(&self, transition: TransitionKind) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.transition() == transition)
            .collect()
    }

    /// Number of firings of one transition
    pub fn count(&self, transition: TransitionKind) -> usize {
        self.events
            .iter()
            .filter(|e| e.transition() == transition)
            .count()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(time: f64, transition: TransitionKind) -> Event {
        Event::Fired { time, transition }
    }

    #[test]
    fn test_event_accessors() {
        let event = fired(42.0, TransitionKind::Work);
        assert_eq!(event.time(), 42.0);
        assert_eq!(event.transition(), TransitionKind::Work);
        assert_eq!(event.event_type(), "fired");

        let hazard = Event::ToolOccupied { time: 7.0 };
        assert_eq!(hazard.transition(), TransitionKind::ToolOccupy);
        assert_eq!(hazard.event_type(), "tool_occupied");
    }

    #[test]
    fn test_event_log_query_by_time() {
        let mut log = EventLog::new();
        log.log(fired(1.0, TransitionKind::Produce));
        log.log(fired(1.0, TransitionKind::Work));
        log.log(fired(2.0, TransitionKind::Process1));

        assert_eq!(log.events_at(1.0).len(), 2);
        assert_eq!(log.events_at(2.0).len(), 1);
        assert!(log.events_at(3.0).is_empty());
    }

    #[test]
    fn test_event_log_query_by_transition() {
        let mut log = EventLog::new();
        log.log(fired(0.0, TransitionKind::Produce));
        log.log(fired(40.0, TransitionKind::Produce));
        log.log(Event::ToolOccupied { time: 41.0 });

        assert_eq!(log.events_of(TransitionKind::Produce).len(), 2);
        assert_eq!(log.count(TransitionKind::ToolOccupy), 1);
        assert_eq!(log.count(TransitionKind::ToolRelease), 0);
    }

    #[test]
    fn test_event_log_clear() {
        let mut log = EventLog::new();
        log.log(fired(0.0, TransitionKind::Produce));
        assert_eq!(log.len(), 1);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_string(&fired(3.0, TransitionKind::Process2)).unwrap();
        assert_eq!(json, r#"{"type":"fired","time":3.0,"transition":"process2"}"#);
    }
}

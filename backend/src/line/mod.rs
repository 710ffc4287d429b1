//! Production line topology
//!
//! The fixed eight-place / six-transition network the simulator runs:
//!
//! ```text
//! produce:      production            -> production, buffer1
//! work:         buffer1, tool         -> tool, buffer2, buffer3
//! process1:     buffer2, robot1       -> robot1
//! process2:     buffer3, robot2       -> robot2
//! tool_occupy:  tool                  -> tool_occupied
//! tool_release: tool_occupied         -> tool
//! ```
//!
//! `production` regenerates itself (an unbounded upstream source), `work`
//! hands the tool straight back, and each robot is a single-capacity
//! resource. Every arc has cost 1.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::petri::{Arc, Marking, PetriNet, PetriNetError, PlaceId, TransitionId};

/// The six transitions of the production line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Produce,
    Work,
    Process1,
    Process2,
    ToolOccupy,
    ToolRelease,
}

impl TransitionKind {
    /// All transitions, in network order
    pub const ALL: [TransitionKind; 6] = [
        TransitionKind::Produce,
        TransitionKind::Work,
        TransitionKind::Process1,
        TransitionKind::Process2,
        TransitionKind::ToolOccupy,
        TransitionKind::ToolRelease,
    ];

    /// Per-step attempt order of the deterministic transitions
    ///
    /// `tool_release` goes first so a returning tool can be used by `work` in
    /// the same step; the rest follow the flow of material. Changing this
    /// order changes the statistics.
    pub const FIRING_ORDER: [TransitionKind; 5] = [
        TransitionKind::ToolRelease,
        TransitionKind::Produce,
        TransitionKind::Work,
        TransitionKind::Process1,
        TransitionKind::Process2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransitionKind::Produce => "produce",
            TransitionKind::Work => "work",
            TransitionKind::Process1 => "process1",
            TransitionKind::Process2 => "process2",
            TransitionKind::ToolOccupy => "tool_occupy",
            TransitionKind::ToolRelease => "tool_release",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Work-in-process buffers whose levels are traced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Buffer {
    Buffer1,
    Buffer2,
    Buffer3,
}

impl Buffer {
    pub const ALL: [Buffer; 3] = [Buffer::Buffer1, Buffer::Buffer2, Buffer::Buffer3];

    pub fn name(self) -> &'static str {
        match self {
            Buffer::Buffer1 => "buffer1",
            Buffer::Buffer2 => "buffer2",
            Buffer::Buffer3 => "buffer3",
        }
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Place handles of the production network
#[derive(Debug, Clone, Copy)]
pub struct LinePlaces {
    pub production: PlaceId,
    pub buffer1: PlaceId,
    pub tool: PlaceId,
    pub tool_occupied: PlaceId,
    pub buffer2: PlaceId,
    pub buffer3: PlaceId,
    pub robot1: PlaceId,
    pub robot2: PlaceId,
}

/// The production network together with its initial marking
///
/// Owned by one simulation instance and reset before every run; parallel
/// runs each need their own clone.
///
/// # Example
/// ```
/// use production_line_sim_core::line::{Buffer, ProductionLine, TransitionKind};
///
/// let mut line = ProductionLine::new().unwrap();
/// assert!(line.fire(TransitionKind::Produce));
/// assert_eq!(line.buffer_level(Buffer::Buffer1), 1);
///
/// line.reset();
/// assert_eq!(line.buffer_level(Buffer::Buffer1), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ProductionLine {
    net: PetriNet,
    places: LinePlaces,
    transitions: [TransitionId; 6],
    initial_marking: Marking,
}

impl ProductionLine {
    /// Build the network at its initial marking
    ///
    /// production = robot1 = robot2 = tool = 1, everything else empty.
    pub fn new() -> Result<Self, PetriNetError> {
        let mut net = PetriNet::new("Production");

        let places = LinePlaces {
            production: net.add_place("production", 1)?,
            buffer1: net.add_place("buffer1", 0)?,
            tool: net.add_place("tool", 1)?,
            tool_occupied: net.add_place("tool_occupied", 0)?,
            buffer2: net.add_place("buffer2", 0)?,
            buffer3: net.add_place("buffer3", 0)?,
            robot1: net.add_place("robot1", 1)?,
            robot2: net.add_place("robot2", 1)?,
        };

        let p = places;
        let transitions = [
            net.add_transition(
                TransitionKind::Produce.name(),
                vec![Arc::new(p.production, 1)],
                vec![Arc::new(p.production, 1), Arc::new(p.buffer1, 1)],
            )?,
            net.add_transition(
                TransitionKind::Work.name(),
                vec![Arc::new(p.buffer1, 1), Arc::new(p.tool, 1)],
                vec![
                    Arc::new(p.tool, 1),
                    Arc::new(p.buffer2, 1),
                    Arc::new(p.buffer3, 1),
                ],
            )?,
            net.add_transition(
                TransitionKind::Process1.name(),
                vec![Arc::new(p.buffer2, 1), Arc::new(p.robot1, 1)],
                vec![Arc::new(p.robot1, 1)],
            )?,
            net.add_transition(
                TransitionKind::Process2.name(),
                vec![Arc::new(p.buffer3, 1), Arc::new(p.robot2, 1)],
                vec![Arc::new(p.robot2, 1)],
            )?,
            net.add_transition(
                TransitionKind::ToolOccupy.name(),
                vec![Arc::new(p.tool, 1)],
                vec![Arc::new(p.tool_occupied, 1)],
            )?,
            net.add_transition(
                TransitionKind::ToolRelease.name(),
                vec![Arc::new(p.tool_occupied, 1)],
                vec![Arc::new(p.tool, 1)],
            )?,
        ];

        let initial_marking = net.marking();
        Ok(Self {
            net,
            places,
            transitions,
            initial_marking,
        })
    }

    pub fn net(&self) -> &PetriNet {
        &self.net
    }

    pub fn places(&self) -> &LinePlaces {
        &self.places
    }

    pub fn initial_marking(&self) -> &Marking {
        &self.initial_marking
    }

    /// Restore the initial marking
    pub fn reset(&mut self) {
        self.net.set_marking(&self.initial_marking);
    }

    pub fn transition_id(&self, kind: TransitionKind) -> TransitionId {
        self.transitions[kind.index()]
    }

    pub fn buffer_place(&self, buffer: Buffer) -> PlaceId {
        match buffer {
            Buffer::Buffer1 => self.places.buffer1,
            Buffer::Buffer2 => self.places.buffer2,
            Buffer::Buffer3 => self.places.buffer3,
        }
    }

    pub fn buffer_level(&self, buffer: Buffer) -> u32 {
        self.net.tokens(self.buffer_place(buffer))
    }

    /// Whether the tool is in service (at least one token on `tool`)
    pub fn tool_available(&self) -> bool {
        self.net.tokens(self.places.tool) >= 1
    }

    pub fn is_enabled(&self, kind: TransitionKind) -> bool {
        self.net.is_enabled(self.transition_id(kind))
    }

    pub fn fire(&mut self, kind: TransitionKind) -> bool {
        let id = self.transition_id(kind);
        self.net.fire(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_ids_follow_kind_order() {
        let line = ProductionLine::new().unwrap();
        for kind in TransitionKind::ALL {
            let id = line.transition_id(kind);
            assert_eq!(line.net().transition(id).name(), kind.name());
        }
    }

    #[test]
    fn test_buffer_names_match_places() {
        let line = ProductionLine::new().unwrap();
        for buffer in Buffer::ALL {
            assert_eq!(line.net().place(line.buffer_place(buffer)).name(), buffer.name());
        }
    }

    #[test]
    fn test_serde_names_match_display() {
        for kind in TransitionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
        for buffer in Buffer::ALL {
            let json = serde_json::to_string(&buffer).unwrap();
            assert_eq!(json, format!("\"{}\"", buffer));
        }
    }
}

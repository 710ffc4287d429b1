//! Per-run trace
//!
//! Everything the single-run driver records: the event log, one buffer-level
//! sample per step, tool availability per step, and the work-availability
//! flags the tool work rate is computed from. A trace lives from the start of
//! a run until it has been analyzed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::line::Buffer;
use crate::models::event::EventLog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTrace {
    /// Every firing, in order
    pub events: EventLog,

    /// Level of each buffer at the start of every step
    pub buffer_levels: BTreeMap<Buffer, Vec<u32>>,

    /// Whether the tool was in service at the start of every step
    pub tool_state: Vec<bool>,

    /// One entry per `work` firing (the tool availability sampled at the
    /// start of that step) and one `false` per hazard occupation
    ///
    /// The hazard entries carry no information about `work`; they are kept so
    /// the tool work rate matches the established statistics.
    pub work_when_tool_available: Vec<bool>,
}

impl RunTrace {
    /// Empty trace with room for `num_steps` samples
    pub fn with_capacity(num_steps: usize) -> Self {
        Self {
            events: EventLog::new(),
            buffer_levels: Buffer::ALL
                .into_iter()
                .map(|b| (b, Vec::with_capacity(num_steps)))
                .collect(),
            tool_state: Vec::with_capacity(num_steps),
            work_when_tool_available: Vec::new(),
        }
    }

    /// Record the start-of-step sample
    pub fn record_step(&mut self, levels: [u32; 3], tool_available: bool) {
        for (buffer, level) in Buffer::ALL.into_iter().zip(levels) {
            self.buffer_levels.entry(buffer).or_default().push(level);
        }
        self.tool_state.push(tool_available);
    }

    /// Number of recorded steps
    pub fn num_samples(&self) -> usize {
        self.tool_state.len()
    }

    /// Samples of one buffer (empty if never recorded)
    pub fn levels(&self, buffer: Buffer) -> &[u32] {
        self.buffer_levels
            .get(&buffer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Steps at which the tool was out of service
    pub fn unavailable_steps(&self) -> usize {
        self.tool_state.iter().filter(|&&available| !available).count()
    }
}

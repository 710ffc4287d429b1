//! Token-flow (Petri net) primitive
//!
//! Generic places, weighted arcs and transitions with enabling and firing
//! rules. Nothing in this module knows about time or randomness; the
//! production line and the simulation driver are built on top of it.
//!
//! # Critical Invariants
//!
//! 1. **Non-negativity**: token counts are unsigned and a firing only consumes
//!    what an enabled transition has checked is present
//! 2. **Atomic firing**: all inputs are consumed, then all outputs produced, or
//!    nothing happens at all
//! 3. **Unique names**: a network never holds two places (or two transitions)
//!    with the same name

mod dot;
mod net;

pub use net::{Arc, FiringOutcome, Marking, PetriNet, Place, PlaceId, Transition, TransitionId};

use thiserror::Error;

/// Errors raised by network construction and name lookup
///
/// Every variant is a programming error: the fixed production topology never
/// produces them once built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PetriNetError {
    #[error("Place '{0}' not found")]
    PlaceNotFound(String),

    #[error("Transition '{0}' not found")]
    TransitionNotFound(String),

    #[error("Place '{0}' already exists")]
    DuplicatePlace(String),

    #[error("Transition '{0}' already exists")]
    DuplicateTransition(String),
}

/// Firing script replayed against [`demo_net`]
pub const DEMO_SEQUENCE: [&str; 4] = ["t1", "t1", "t2", "t1"];

/// Small four-place network used to exercise the primitive on its own
///
/// Replaying [`DEMO_SEQUENCE`] fires, fails, fires, fires.
///
/// # Example
/// ```
/// use production_line_sim_core::petri::{demo_net, DEMO_SEQUENCE};
///
/// let mut net = demo_net().unwrap();
/// let outcomes = net.run(&DEMO_SEQUENCE).unwrap();
/// let fired: Vec<bool> = outcomes.iter().map(|o| o.fired).collect();
/// assert_eq!(fired, vec![true, false, true, true]);
/// ```
pub fn demo_net() -> Result<PetriNet, PetriNetError> {
    let mut net = PetriNet::new("Petri Net");
    let p1 = net.add_place("p1", 1)?;
    let p2 = net.add_place("p2", 2)?;
    let p3 = net.add_place("p3", 3)?;
    let p4 = net.add_place("p4", 2)?;

    net.add_transition(
        "t1",
        vec![Arc::new(p1, 1), Arc::new(p2, 1)],
        vec![Arc::new(p2, 1), Arc::new(p3, 1)],
    )?;
    net.add_transition(
        "t2",
        vec![Arc::new(p2, 1), Arc::new(p3, 1)],
        vec![Arc::new(p4, 1), Arc::new(p1, 1)],
    )?;

    Ok(net)
}

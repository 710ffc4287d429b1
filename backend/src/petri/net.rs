//! Places, arcs, transitions and the network that owns them
//!
//! Arcs refer to places by [`PlaceId`] (an index into the owning network)
//! rather than by reference, so a network can be cloned and reset freely.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PetriNetError;

/// Index of a place within its network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(usize);

impl PlaceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a transition within its network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionId(usize);

impl TransitionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Named token counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    name: String,
    tokens: u32,
}

impl Place {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tokens(&self) -> u32 {
        self.tokens
    }
}

/// Weighted edge between a transition and a place
///
/// The same type serves as an input arc (consumption weight) and an output
/// arc (production weight).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub place: PlaceId,
    pub cost: u32,
}

impl Arc {
    pub fn new(place: PlaceId, cost: u32) -> Self {
        Self { place, cost }
    }
}

/// Named atomic operation moving tokens from input to output places
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    name: String,
    input_arcs: Vec<Arc>,
    output_arcs: Vec<Arc>,
}

impl Transition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_arcs(&self) -> &[Arc] {
        &self.input_arcs
    }

    pub fn output_arcs(&self) -> &[Arc] {
        &self.output_arcs
    }

    /// Total tokens requested from `place` across all input arcs
    fn demand_on(&self, place: PlaceId) -> u64 {
        self.input_arcs
            .iter()
            .filter(|arc| arc.place == place)
            .map(|arc| u64::from(arc.cost))
            .sum()
    }
}

/// Token counts of every place, in place order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marking(Vec<u32>);

impl Marking {
    pub fn tokens(&self, place: PlaceId) -> u32 {
        self.0[place.0]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Sum of tokens over all places
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&t| u64::from(t)).sum()
    }
}

/// Result of one step of a replayed firing script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiringOutcome {
    pub transition: String,
    pub fired: bool,
}

/// Named collection of places and transitions
///
/// # Example
/// ```
/// use production_line_sim_core::petri::{Arc, PetriNet};
///
/// let mut net = PetriNet::new("pipeline");
/// let input = net.add_place("input", 2).unwrap();
/// let output = net.add_place("output", 0).unwrap();
/// let mv = net
///     .add_transition("move", vec![Arc::new(input, 1)], vec![Arc::new(output, 1)])
///     .unwrap();
///
/// assert!(net.fire(mv));
/// assert!(net.fire(mv));
/// assert!(!net.fire(mv));
/// assert_eq!(net.tokens(output), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PetriNet {
    name: String,
    places: Vec<Place>,
    transitions: Vec<Transition>,
}

impl PetriNet {
    /// Create an empty network
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            places: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a place holding `tokens` initial tokens
    ///
    /// # Errors
    /// [`PetriNetError::DuplicatePlace`] if the name is already taken
    pub fn add_place(&mut self, name: &str, tokens: u32) -> Result<PlaceId, PetriNetError> {
        if self.places.iter().any(|p| p.name == name) {
            return Err(PetriNetError::DuplicatePlace(name.to_string()));
        }
        self.places.push(Place {
            name: name.to_string(),
            tokens,
        });
        Ok(PlaceId(self.places.len() - 1))
    }

    /// Add a transition with ordered input and output arcs
    ///
    /// # Errors
    /// [`PetriNetError::DuplicateTransition`] if the name is already taken
    ///
    /// # Panics
    /// Panics if an arc refers to a place that does not belong to this network
    pub fn add_transition(
        &mut self,
        name: &str,
        input_arcs: Vec<Arc>,
        output_arcs: Vec<Arc>,
    ) -> Result<TransitionId, PetriNetError> {
        if self.transitions.iter().any(|t| t.name == name) {
            return Err(PetriNetError::DuplicateTransition(name.to_string()));
        }
        for arc in input_arcs.iter().chain(output_arcs.iter()) {
            assert!(
                arc.place.0 < self.places.len(),
                "arc of transition '{}' refers to unknown place index {}",
                name,
                arc.place.0
            );
        }
        self.transitions.push(Transition {
            name: name.to_string(),
            input_arcs,
            output_arcs,
        });
        Ok(TransitionId(self.transitions.len() - 1))
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Every arc of every transition, inputs before outputs
    pub fn arcs(&self) -> impl Iterator<Item = &Arc> + '_ {
        self.transitions
            .iter()
            .flat_map(|t| t.input_arcs.iter().chain(t.output_arcs.iter()))
    }

    pub fn place(&self, id: PlaceId) -> &Place {
        &self.places[id.0]
    }

    pub fn transition(&self, id: TransitionId) -> &Transition {
        &self.transitions[id.0]
    }

    pub fn tokens(&self, id: PlaceId) -> u32 {
        self.places[id.0].tokens
    }

    /// Look up a place by name
    pub fn find_place(&self, name: &str) -> Result<PlaceId, PetriNetError> {
        self.places
            .iter()
            .position(|p| p.name == name)
            .map(PlaceId)
            .ok_or_else(|| PetriNetError::PlaceNotFound(name.to_string()))
    }

    /// Look up a transition by name
    pub fn find_transition(&self, name: &str) -> Result<TransitionId, PetriNetError> {
        self.transitions
            .iter()
            .position(|t| t.name == name)
            .map(TransitionId)
            .ok_or_else(|| PetriNetError::TransitionNotFound(name.to_string()))
    }

    /// Whether every input place holds at least the tokens its arcs consume
    ///
    /// Several input arcs on the same place add up.
    pub fn is_enabled(&self, id: TransitionId) -> bool {
        let transition = &self.transitions[id.0];
        transition
            .input_arcs
            .iter()
            .all(|arc| u64::from(self.places[arc.place.0].tokens) >= transition.demand_on(arc.place))
    }

    /// Fire a transition if it is enabled
    ///
    /// Consumes every input arc, then produces every output arc. Returns
    /// `false` without touching the marking when the transition is not enabled.
    pub fn fire(&mut self, id: TransitionId) -> bool {
        if !self.is_enabled(id) {
            return false;
        }

        let transition = &self.transitions[id.0];
        for arc in &transition.input_arcs {
            self.places[arc.place.0].tokens -= arc.cost;
        }
        for arc in &transition.output_arcs {
            self.places[arc.place.0].tokens += arc.cost;
        }
        true
    }

    /// Replay a firing script by transition name
    ///
    /// Transitions that are not enabled are reported as not fired; the script
    /// keeps going.
    ///
    /// # Errors
    /// [`PetriNetError::TransitionNotFound`] on the first unknown name; earlier
    /// steps of the script have already fired.
    pub fn run<S: AsRef<str>>(
        &mut self,
        firing_sequence: &[S],
    ) -> Result<Vec<FiringOutcome>, PetriNetError> {
        let mut outcomes = Vec::with_capacity(firing_sequence.len());

        for name in firing_sequence {
            let id = self.find_transition(name.as_ref())?;
            let fired = self.fire(id);
            if fired {
                debug!(net = %self.name, transition = name.as_ref(), "fired");
            } else {
                debug!(net = %self.name, transition = name.as_ref(), "did not fire");
            }
            outcomes.push(FiringOutcome {
                transition: name.as_ref().to_string(),
                fired,
            });
        }

        Ok(outcomes)
    }

    /// Snapshot of the current token counts
    pub fn marking(&self) -> Marking {
        Marking(self.places.iter().map(|p| p.tokens).collect())
    }

    /// Overwrite every token count from a snapshot of this network
    ///
    /// # Panics
    /// Panics if the marking was taken from a network with a different number
    /// of places
    pub fn set_marking(&mut self, marking: &Marking) {
        assert_eq!(
            marking.0.len(),
            self.places.len(),
            "marking has {} places, net '{}' has {}",
            marking.0.len(),
            self.name,
            self.places.len()
        );
        for (place, &tokens) in self.places.iter_mut().zip(marking.0.iter()) {
            place.tokens = tokens;
        }
    }
}

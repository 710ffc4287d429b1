//! Property tests for the Petri net primitive
//!
//! Random networks and firing scripts must keep token accounting exact:
//! a transition fires exactly when it is enabled, a failed firing leaves the
//! marking untouched, and a successful one moves exactly its arc costs.

use proptest::prelude::*;

use production_line_sim_core::petri::{demo_net, Arc, PetriNet, PlaceId, TransitionId, DEMO_SEQUENCE};
use production_line_sim_core::PetriNetError;

#[derive(Debug, Clone)]
struct NetShape {
    tokens: Vec<u32>,
    transitions: Vec<(Vec<(usize, u32)>, Vec<(usize, u32)>)>,
}

fn net_shape() -> impl Strategy<Value = NetShape> {
    (1usize..6).prop_flat_map(|num_places| {
        let arcs = || prop::collection::vec((0..num_places, 1u32..4), 0..4);
        (
            prop::collection::vec(0u32..6, num_places),
            prop::collection::vec((arcs(), arcs()), 1..5),
        )
            .prop_map(|(tokens, transitions)| NetShape {
                tokens,
                transitions,
            })
    })
}

fn build(shape: &NetShape) -> (PetriNet, Vec<PlaceId>, Vec<TransitionId>) {
    let mut net = PetriNet::new("random");
    let places: Vec<PlaceId> = shape
        .tokens
        .iter()
        .enumerate()
        .map(|(i, &tokens)| net.add_place(&format!("p{}", i), tokens).unwrap())
        .collect();

    let to_arcs = |arcs: &[(usize, u32)]| -> Vec<Arc> {
        arcs.iter()
            .map(|&(place, cost)| Arc::new(places[place], cost))
            .collect()
    };

    let transitions = shape
        .transitions
        .iter()
        .enumerate()
        .map(|(i, (inputs, outputs))| {
            net.add_transition(&format!("t{}", i), to_arcs(inputs), to_arcs(outputs))
                .unwrap()
        })
        .collect();

    (net, places, transitions)
}

/// Tokens a transition adds to (positive) or removes from each place
fn net_effect(shape: &NetShape, transition: usize) -> Vec<i64> {
    let mut effect = vec![0i64; shape.tokens.len()];
    let (inputs, outputs) = &shape.transitions[transition];
    for &(place, cost) in inputs {
        effect[place] -= i64::from(cost);
    }
    for &(place, cost) in outputs {
        effect[place] += i64::from(cost);
    }
    effect
}

proptest! {
    #[test]
    fn prop_firing_moves_exactly_arc_costs(
        shape in net_shape(),
        script in prop::collection::vec(0usize..5, 0..40),
    ) {
        let (mut net, places, transitions) = build(&shape);

        for step in script {
            let index = step % transitions.len();
            let id = transitions[index];

            let before = net.marking();
            let enabled = net.is_enabled(id);
            let fired = net.fire(id);
            let after = net.marking();

            prop_assert_eq!(fired, enabled);

            if fired {
                let effect = net_effect(&shape, index);
                for (i, place) in places.iter().enumerate() {
                    let expected = i64::from(before.tokens(*place)) + effect[i];
                    prop_assert!(expected >= 0);
                    prop_assert_eq!(i64::from(after.tokens(*place)), expected);
                }
                let total_effect: i64 = effect.iter().sum();
                prop_assert_eq!(after.total() as i64, before.total() as i64 + total_effect);
            } else {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn prop_enabled_means_inputs_cover_summed_demand(shape in net_shape()) {
        let (net, places, transitions) = build(&shape);

        for (index, id) in transitions.iter().enumerate() {
            let mut demand = vec![0u64; places.len()];
            for &(place, cost) in &shape.transitions[index].0 {
                demand[place] += u64::from(cost);
            }
            let covered = places
                .iter()
                .enumerate()
                .all(|(i, place)| u64::from(net.tokens(*place)) >= demand[i]);

            prop_assert_eq!(net.is_enabled(*id), covered);
        }
    }

    #[test]
    fn prop_adding_tokens_never_disables(shape in net_shape(), extra in 1u32..4) {
        let (net, _, transitions) = build(&shape);

        let mut richer = shape.clone();
        for tokens in richer.tokens.iter_mut() {
            *tokens += extra;
        }
        let (richer_net, _, _) = build(&richer);

        for id in transitions {
            if net.is_enabled(id) {
                prop_assert!(richer_net.is_enabled(id));
            }
        }
    }

    #[test]
    fn prop_set_marking_restores_state(
        shape in net_shape(),
        script in prop::collection::vec(0usize..5, 0..20),
    ) {
        let (mut net, _, transitions) = build(&shape);
        let initial = net.marking();

        for step in script {
            net.fire(transitions[step % transitions.len()]);
        }
        net.set_marking(&initial);

        prop_assert_eq!(net.marking(), initial);
    }
}

#[test]
fn test_demo_sequence_outcomes() {
    let mut net = demo_net().unwrap();
    let outcomes = net.run(&DEMO_SEQUENCE).unwrap();

    let fired: Vec<bool> = outcomes.iter().map(|o| o.fired).collect();
    assert_eq!(fired, vec![true, false, true, true]);
    assert_eq!(outcomes[0].transition, "t1");
    assert_eq!(outcomes[2].transition, "t2");
}

#[test]
fn test_demo_final_marking() {
    let mut net = demo_net().unwrap();
    net.run(&DEMO_SEQUENCE).unwrap();

    // p1: 1 -1 +1 -1, p2: 2 -1+1 -1 -1+1, p3: 3 +1 -1 +1, p4: 2 +1
    let tokens: Vec<u32> = ["p1", "p2", "p3", "p4"]
        .iter()
        .map(|name| net.tokens(net.find_place(name).unwrap()))
        .collect();
    assert_eq!(tokens, vec![0, 1, 4, 3]);
}

#[test]
fn test_unknown_transition_in_script() {
    let mut net = demo_net().unwrap();
    let err = net.run(&["t1", "t9"]).unwrap_err();

    assert_eq!(err, PetriNetError::TransitionNotFound("t9".to_string()));
    // t1 fired before the lookup failed
    assert_eq!(net.tokens(net.find_place("p1").unwrap()), 0);
}

#[test]
fn test_duplicate_names_rejected() {
    let mut net = PetriNet::new("dup");
    let p = net.add_place("p", 1).unwrap();
    assert_eq!(
        net.add_place("p", 0),
        Err(PetriNetError::DuplicatePlace("p".to_string()))
    );

    net.add_transition("t", vec![Arc::new(p, 1)], vec![]).unwrap();
    assert_eq!(
        net.add_transition("t", vec![], vec![]),
        Err(PetriNetError::DuplicateTransition("t".to_string()))
    );
}

#[test]
fn test_repeated_input_arcs_sum_demand() {
    let mut net = PetriNet::new("sum");
    let p = net.add_place("p", 1).unwrap();
    let t = net
        .add_transition("t", vec![Arc::new(p, 1), Arc::new(p, 1)], vec![])
        .unwrap();

    assert!(!net.is_enabled(t));
    assert!(!net.fire(t));
    assert_eq!(net.tokens(p), 1);
}

//! Graphviz DOT rendering of a network
//!
//! Places are drawn as filled circles labelled with their token count,
//! transitions as rectangles, arcs as edges labelled with their cost.

use std::fmt::Write;

use super::PetriNet;

impl PetriNet {
    /// Render the network and its current marking as a DOT digraph
    ///
    /// # Example
    /// ```
    /// use production_line_sim_core::petri::demo_net;
    ///
    /// let dot = demo_net().unwrap().to_dot();
    /// assert!(dot.starts_with("digraph"));
    /// assert!(dot.contains("\"p1\" -> \"t1\" [label=\"1\"]"));
    /// ```
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "digraph \"{}\" {{", escape(self.name()));

        for place in self.places() {
            let _ = writeln!(
                out,
                "    \"{name}\" [shape=circle, style=filled, fillcolor=yellow, fixedsize=true, width=1.5, height=1.5, label=\"{name}\\n{tokens}\"];",
                name = escape(place.name()),
                tokens = place.tokens()
            );
        }

        for transition in self.transitions() {
            let t_name = escape(transition.name());
            let _ = writeln!(out, "    \"{}\" [shape=rectangle];", t_name);
            for arc in transition.input_arcs() {
                let _ = writeln!(
                    out,
                    "    \"{}\" -> \"{}\" [label=\"{}\"];",
                    escape(self.place(arc.place).name()),
                    t_name,
                    arc.cost
                );
            }
            for arc in transition.output_arcs() {
                let _ = writeln!(
                    out,
                    "    \"{}\" -> \"{}\" [label=\"{}\"];",
                    t_name,
                    escape(self.place(arc.place).name()),
                    arc.cost
                );
            }
        }

        out.push_str("}\n");
        out
    }
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

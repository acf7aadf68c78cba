//! The example flowchart: an input/validate/process loop with an error branch that fans out and
//! joins again before the output.

use strata::graphlib::{Graph, GraphOptions};
use strata::{EdgeLabel, GraphLabel, NodeLabel, RankDir};

pub const NODE_WIDTH: f64 = 50.0;
pub const NODE_HEIGHT: f64 = 30.0;

pub const NODES: [(&str, &str); 9] = [
    ("A", "Input"),
    ("B", "Validate"),
    ("C", "Process"),
    ("D", "Error Handler"),
    ("E", "More Data?"),
    ("F", "Output"),
    ("G", "Log Error"),
    ("H", "Notify Admin"),
    ("I", "Cleanup"),
];

pub const EDGES: [(&str, &str, Option<&str>); 11] = [
    ("A", "B", None),
    ("B", "C", Some("valid")),
    ("B", "D", Some("invalid")),
    ("C", "E", None),
    ("E", "A", Some("yes")),
    ("E", "F", Some("no")),
    ("D", "G", None),
    ("D", "H", None),
    ("G", "I", None),
    ("H", "I", None),
    ("I", "F", None),
];

pub fn complex_graph() -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g = Graph::new(GraphOptions::multigraph());
    g.set_graph(GraphLabel {
        rankdir: RankDir::TB,
        ..Default::default()
    });
    for (id, label) in NODES {
        g.set_node(id, NodeLabel::new(label, NODE_WIDTH, NODE_HEIGHT));
    }
    // Edge labels carry text only; with no size they take no room in the layout.
    for (v, w, label) in EDGES {
        let label = label.map_or_else(EdgeLabel::default, EdgeLabel::labeled);
        g.set_edge(v, w, label);
    }
    g
}

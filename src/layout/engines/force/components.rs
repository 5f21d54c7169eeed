//! Connected-component analysis for force-directed layout.
//!
//! Force-directed layout only attracts along real edges, so disconnected
//! components would drift apart indefinitely. This module partitions the
//! visible vertices into maximal connected components, plants one hidden
//! anchor vertex per component, and interconnects the anchors so the
//! components stay mutually attracted. The caller removes the anchors once
//! the simulation is done.

use std::collections::HashSet;

use log::debug;

use crate::graph::{Graph, Vertex, VertexId};
use crate::style::EdgeStyle;

/// Weight of the hidden edge tying a component member to its anchor.
const MEMBER_WEIGHT: f32 = 1.0;

/// Weight of the hidden edges interconnecting the anchors themselves.
const ANCHOR_WEIGHT: f32 = 3.0;

/// Inserts one hidden anchor vertex per connected component and ties every
/// member to it. With more than one component the anchors are pairwise
/// interconnected; with a single component nothing is inserted and the
/// returned list is empty.
pub(crate) fn insert_anchors(graph: &mut Graph) -> Vec<VertexId> {
    let components = find_components(graph);
    if components.len() <= 1 {
        return Vec::new();
    }

    debug!(components = components.len(); "Anchoring disconnected components");

    let mut anchors = Vec::with_capacity(components.len());
    for members in &components {
        let anchor = graph.insert_vertex(Vertex::new_hidden("component_center"));
        for &member in members {
            graph
                .insert_edge("", MEMBER_WEIGHT, member, anchor, EdgeStyle::default())
                .expect("anchor endpoints are live")
                .set_hidden(true);
        }
        anchors.push(anchor);
    }

    for &first in &anchors {
        for &second in &anchors {
            if first != second {
                graph
                    .insert_edge("", ANCHOR_WEIGHT, first, second, EdgeStyle::default())
                    .expect("anchor endpoints are live")
                    .set_hidden(true);
            }
        }
    }

    anchors
}

/// Removes previously inserted anchors together with their hidden edges.
pub(crate) fn remove_anchors(graph: &mut Graph, anchors: &[VertexId]) {
    for &anchor in anchors {
        graph.remove_vertex(anchor);
    }
}

/// Partitions the visible vertices into maximal connected components,
/// treating the graph as undirected.
///
/// Iterative depth-first search over outgoing and reverse adjacency,
/// skipping hidden vertices and hidden edges.
fn find_components(graph: &Graph) -> Vec<Vec<VertexId>> {
    let mut visited: HashSet<VertexId> = HashSet::new();
    let mut components = Vec::new();

    for (start, vertex) in graph.vertices() {
        if vertex.is_hidden() || visited.contains(&start) {
            continue;
        }

        let mut members = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let current = graph.vertex(id).expect("adjacency references live vertices");
            if current.is_hidden() || !visited.insert(id) {
                continue;
            }
            members.push(id);

            for edge in current.edges() {
                if !edge.is_hidden() {
                    stack.push(edge.to());
                }
            }
            for &back in current.reverse_neighbors() {
                stack.push(back);
            }
        }
        components.push(members);
    }

    components
}

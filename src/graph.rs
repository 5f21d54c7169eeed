//! Mutable graph data model: vertices, edges and adjacency traversal.
//!
//! Vertices live in a slab owned by [`Graph`] and are addressed through
//! copyable [`VertexId`] handles. Each vertex owns its outgoing edges in
//! insertion order and keeps a non-owning reverse index of the vertices
//! holding an edge that ends here. Handles of removed vertices become stale
//! and resolve to `None`; mutation through a stale handle is a no-op so that
//! bulk graph rewriting stays total.

use std::fmt;

use crate::geometry::{Bounds, Point};
use crate::style::{EdgeStyle, VertexStyle};

const LIVE: &str = "vertex id in order list must be live";

/// Opaque handle addressing a vertex inside a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A directed edge stored in its source vertex's outgoing list.
#[derive(Debug, Clone)]
pub struct Edge {
    label: String,
    weight: f32,
    to: VertexId,
    style: EdgeStyle,
    hidden: bool,
    curved: bool,
    control: Point,
}

impl Edge {
    /// Returns the edge label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the edge weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Returns the handle of the end vertex.
    pub fn to(&self) -> VertexId {
        self.to
    }

    /// Returns the drawing style of this edge.
    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }

    /// Returns true for transient edges introduced by a layout pass.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Returns true when this edge is drawn as a quadratic curve.
    pub fn is_curved(&self) -> bool {
        self.curved
    }

    /// Returns the quadratic control point; meaningful only when
    /// [`Edge::is_curved`] is true.
    pub fn control(&self) -> Point {
        self.control
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn set_curved(&mut self, control: Point) {
        self.curved = true;
        self.control = control;
    }
}

/// A vertex of the graph, carrying its position, style and adjacency.
#[derive(Debug, Clone)]
pub struct Vertex {
    label: String,
    position: Point,
    disp: Point,
    style: VertexStyle,
    hidden: bool,
    fixed: bool,
    level: i32,
    parent_count: usize,
    edges: Vec<Edge>,
    reverse: Vec<VertexId>,
}

impl Vertex {
    /// Creates a vertex with the default style.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_style(label, VertexStyle::default())
    }

    /// Creates a vertex with an explicit style.
    pub fn with_style(label: impl Into<String>, style: VertexStyle) -> Self {
        Self {
            label: label.into(),
            position: Point::new(-1.0, -1.0),
            disp: Point::default(),
            style,
            hidden: false,
            fixed: false,
            level: -1,
            parent_count: 0,
            edges: Vec::new(),
            reverse: Vec::new(),
        }
    }

    /// Creates a transient control/anchor vertex. Hidden vertices exist only
    /// inside a single layout-strategy invocation.
    pub(crate) fn new_hidden(label: impl Into<String>) -> Self {
        let mut vertex = Self::new(label);
        vertex.hidden = true;
        vertex
    }

    /// Returns the vertex label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the top-left position of the vertex.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Moves the vertex to a new position.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Returns the center point, offset by half the styled extents.
    pub fn center(&self) -> Point {
        self.position
            .add_point(Point::new(self.style.width / 2.0, self.style.height / 2.0))
    }

    /// Returns the drawing style of this vertex.
    pub fn style(&self) -> &VertexStyle {
        &self.style
    }

    /// Returns true for transient control/anchor vertices.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Returns true when the vertex is excluded from force application.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Marks the vertex as excluded from force application.
    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    /// Returns this vertex's outgoing edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the handles of vertices holding an edge that ends here, one
    /// entry per such edge.
    pub fn reverse_neighbors(&self) -> &[VertexId] {
        &self.reverse
    }

    pub(crate) fn displacement(&self) -> Point {
        self.disp
    }

    pub(crate) fn set_displacement(&mut self, disp: Point) {
        self.disp = disp;
    }

    pub(crate) fn add_displacement(&mut self, delta: Point) {
        self.disp = self.disp.add_point(delta);
    }

    pub(crate) fn level(&self) -> i32 {
        self.level
    }

    pub(crate) fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    pub(crate) fn parent_count(&self) -> usize {
        self.parent_count
    }

    pub(crate) fn set_parent_count(&mut self, count: usize) {
        self.parent_count = count;
    }
}

/// An ordered, mutable collection of vertices and their edges.
///
/// Insertion order of vertices is the traversal order exposed by
/// [`Graph::vertices`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    label: String,
    directed: bool,
    slots: Vec<Option<Vertex>>,
    free: Vec<usize>,
    order: Vec<VertexId>,
    vertex_count: usize,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new(label: impl Into<String>, directed: bool) -> Self {
        Self {
            label: label.into(),
            directed,
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            vertex_count: 0,
        }
    }

    /// Returns the graph label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true when edges are directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns the number of vertices currently in the graph.
    pub fn vertex_count(&self) -> usize {
        debug_assert_eq!(self.vertex_count, self.order.len());
        self.vertex_count
    }

    /// Appends a vertex and returns its handle.
    pub fn insert_vertex(&mut self, vertex: Vertex) -> VertexId {
        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(vertex);
                VertexId(slot)
            }
            None => {
                self.slots.push(Some(vertex));
                VertexId(self.slots.len() - 1)
            }
        };
        self.order.push(id);
        self.vertex_count += 1;
        id
    }

    /// Resolves a handle, returning `None` for stale handles.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable variant of [`Graph::vertex`].
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Returns a snapshot of all vertex handles in insertion order.
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.order.clone()
    }

    /// Iterates over all vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.order
            .iter()
            .map(move |&id| (id, self.vertex(id).expect(LIVE)))
    }

    /// Iterates over non-hidden vertices in insertion order.
    pub fn visible_vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices().filter(|(_, vertex)| !vertex.is_hidden())
    }

    /// Creates an edge `from --> to` and returns a reference to it.
    ///
    /// The edge lands at the end of `from`'s outgoing list and a matching
    /// entry is added to `to`'s reverse index. Returns `None` (inserting
    /// nothing) when either endpoint handle is stale.
    pub fn insert_edge(
        &mut self,
        label: impl Into<String>,
        weight: f32,
        from: VertexId,
        to: VertexId,
        style: EdgeStyle,
    ) -> Option<&mut Edge> {
        if self.vertex(from).is_none() || self.vertex(to).is_none() {
            return None;
        }
        self.vertex_mut(to).expect(LIVE).reverse.push(from);
        let source = self.vertex_mut(from).expect(LIVE);
        source.edges.push(Edge {
            label: label.into(),
            weight,
            to,
            style,
            hidden: false,
            curved: false,
            control: Point::new(-1.0, -1.0),
        });
        source.edges.last_mut()
    }

    /// Removes the first outgoing edge `from --> to` and its reverse entry.
    ///
    /// With parallel edges only one is removed. Removing an absent edge is a
    /// no-op.
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) {
        let _ = self.detach_edge(from, to);
    }

    /// Like [`Graph::remove_edge`] but returns the removed edge by value, so
    /// a layout transform can re-attach it later.
    pub fn detach_edge(&mut self, from: VertexId, to: VertexId) -> Option<Edge> {
        let source = self.vertex_mut(from)?;
        let index = source.edges.iter().position(|edge| edge.to == to)?;
        let edge = source.edges.remove(index);
        if let Some(target) = self.vertex_mut(to) {
            if let Some(entry) = target.reverse.iter().position(|&back| back == from) {
                target.reverse.remove(entry);
            }
        }
        Some(edge)
    }

    /// Re-inserts an edge previously removed with [`Graph::detach_edge`],
    /// restoring the reverse index. Dropped silently when either endpoint
    /// handle is stale.
    pub fn attach_edge(&mut self, from: VertexId, edge: Edge) {
        if self.vertex(from).is_none() || self.vertex(edge.to).is_none() {
            return;
        }
        self.vertex_mut(edge.to).expect(LIVE).reverse.push(from);
        self.vertex_mut(from).expect(LIVE).edges.push(edge);
    }

    /// Removes a vertex together with all of its incident edges.
    ///
    /// Removing a vertex through a stale handle is a no-op.
    pub fn remove_vertex(&mut self, id: VertexId) {
        let Some(vertex) = self.vertex(id) else {
            return;
        };
        let outgoing: Vec<VertexId> = vertex.edges.iter().map(|edge| edge.to).collect();
        let incoming: Vec<VertexId> = vertex.reverse.clone();

        for to in outgoing {
            self.remove_edge(id, to);
        }
        for from in incoming {
            self.remove_edge(from, id);
        }

        self.order.retain(|&other| other != id);
        self.slots[id.0] = None;
        self.free.push(id.0);
        self.vertex_count -= 1;
    }

    /// Iterates over the outgoing edges of a vertex, in insertion order.
    /// Empty for stale handles.
    pub fn edges_from(&self, id: VertexId) -> impl Iterator<Item = &Edge> {
        self.vertex(id).into_iter().flat_map(|vertex| vertex.edges.iter())
    }

    /// Returns the first outgoing edge `from --> to`, if any.
    pub fn edge_between(&self, from: VertexId, to: VertexId) -> Option<&Edge> {
        self.edges_from(from).find(|edge| edge.to == to)
    }

    /// Maps the bounding box of all visible vertices onto
    /// `[0, width] x [0, height]`.
    ///
    /// A degenerate axis (single vertex, zero extent) is centered instead of
    /// scaled so that coordinates stay finite.
    pub fn normalize(&mut self, width: f32, height: f32) {
        let mut bounds = Bounds::empty();
        for (_, vertex) in self.visible_vertices() {
            bounds.extend(vertex.position());
        }
        if bounds.is_empty() {
            return;
        }

        let min = bounds.min();
        let scale_x = (bounds.width() > f32::EPSILON).then(|| width / bounds.width());
        let scale_y = (bounds.height() > f32::EPSILON).then(|| height / bounds.height());

        for slot in &mut self.slots {
            if let Some(vertex) = slot {
                let x = match scale_x {
                    Some(scale) => (vertex.position.x() - min.x()) * scale,
                    None => width / 2.0,
                };
                let y = match scale_y {
                    Some(scale) => (vertex.position.y() - min.y()) * scale,
                    None => height / 2.0,
                };
                vertex.position = Point::new(x, y).round();
            }
        }
    }
}

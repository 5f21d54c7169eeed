//! End-to-end layout runs over the public API: parse a JSON document, build
//! an engine, lay the graph out, and check the observable contract.

use quiver::{
    CancelToken, EngineBuilder, EngineKind, LayoutEngine, LayoutError, QuiverError,
    graph::{Graph, Vertex, VertexId},
    render::{EdgeFrame, Surface, VertexFrame},
    style::EdgeStyle,
};

const TWO_COMPONENTS: &str = r#"{
    "label": "two components",
    "directed": false,
    "vertices": [
        {"label": "a"}, {"label": "b"}, {"label": "c"},
        {"label": "d"}, {"label": "e"}, {"label": "f"}, {"label": "g"}
    ],
    "edges": [
        {"from": 0, "to": 1},
        {"from": 1, "to": 2},
        {"from": 3, "to": 4},
        {"from": 4, "to": 5},
        {"from": 5, "to": 6}
    ]
}"#;

fn visible_edge_count(graph: &Graph) -> usize {
    graph
        .vertices()
        .map(|(_, v)| v.edges().iter().filter(|e| !e.is_hidden()).count())
        .sum()
}

#[test]
fn force_layout_leaves_no_transient_state() {
    let mut graph = quiver::parse(TWO_COMPONENTS).unwrap();

    let engine = EngineBuilder::new()
        .with_dimensions(800.0, 600.0)
        .with_iterations(100)
        .with_seed(7)
        .build(EngineKind::Force);
    engine.run(&mut graph).unwrap();

    assert_eq!(graph.vertex_count(), 7);
    assert_eq!(visible_edge_count(&graph), 5);
    assert!(graph.vertices().all(|(_, v)| !v.is_hidden()));

    for (_, vertex) in graph.vertices() {
        let position = vertex.position();
        assert!((0.0..=800.0).contains(&position.x()), "{position:?}");
        assert!((0.0..=600.0).contains(&position.y()), "{position:?}");
    }
}

#[test]
fn force_layout_is_reproducible_with_a_seed() {
    let run = || {
        let mut graph = quiver::parse(TWO_COMPONENTS).unwrap();
        EngineBuilder::new()
            .with_seed(99)
            .with_iterations(50)
            .build(EngineKind::Force)
            .run(&mut graph)
            .unwrap();
        graph
            .vertices()
            .map(|(_, v)| (v.position().x(), v.position().y()))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn cancelled_force_layout_reports_and_cleans_up() {
    let mut graph = quiver::parse(TWO_COMPONENTS).unwrap();
    let token = CancelToken::new();
    token.cancel();

    let err = EngineBuilder::new()
        .with_cancel(token)
        .build(EngineKind::Force)
        .run(&mut graph)
        .unwrap_err();

    assert!(matches!(err, QuiverError::Layout(LayoutError::Cancelled)));
    assert_eq!(graph.vertex_count(), 7);
    assert!(graph.vertices().all(|(_, v)| !v.is_hidden()));
}

#[test]
fn curvilinear_layout_bends_every_edge_in_place() {
    let mut graph = quiver::parse(TWO_COMPONENTS).unwrap();

    // Position the vertices first, then route the edges.
    EngineBuilder::new()
        .with_seed(3)
        .build(EngineKind::Force)
        .run(&mut graph)
        .unwrap();
    let before: Vec<_> = graph
        .vertices()
        .map(|(id, v)| (id, v.position()))
        .collect();

    EngineBuilder::new()
        .with_iterations(30)
        .build(EngineKind::Curvilinear)
        .run(&mut graph)
        .unwrap();

    let after: Vec<_> = graph
        .vertices()
        .map(|(id, v)| (id, v.position()))
        .collect();
    assert_eq!(before, after, "vertex positions must survive edge routing");
    assert_eq!(graph.vertex_count(), 7);
    assert_eq!(visible_edge_count(&graph), 5);

    for (_, vertex) in graph.vertices() {
        for edge in vertex.edges() {
            assert!(edge.is_curved());
        }
    }
}

#[test]
fn tree_layout_levels_a_diamond() {
    let input = r#"{
        "label": "diamond",
        "directed": true,
        "vertices": [
            {"label": "1"}, {"label": "2"}, {"label": "3"}, {"label": "4"}
        ],
        "edges": [
            {"from": 0, "to": 1},
            {"from": 0, "to": 2},
            {"from": 1, "to": 3},
            {"from": 2, "to": 3}
        ]
    }"#;
    let mut graph = quiver::parse(input).unwrap();
    EngineBuilder::new().build(EngineKind::Tree).run(&mut graph).unwrap();

    let ids = graph.vertex_ids();
    let y = |i: usize| graph.vertex(ids[i]).unwrap().position().y();
    assert!(y(0) < y(1));
    assert_eq!(y(1), y(2));
    assert!(y(2) < y(3));
}

#[test]
fn tree_layout_rejects_a_rootless_graph() {
    let input = r#"{
        "label": "cycle",
        "directed": true,
        "vertices": [{"label": "1"}, {"label": "2"}],
        "edges": [{"from": 0, "to": 1}, {"from": 1, "to": 0}]
    }"#;
    let mut graph = quiver::parse(input).unwrap();
    let err = EngineBuilder::new()
        .build(EngineKind::Tree)
        .run(&mut graph)
        .unwrap_err();
    assert!(matches!(err, QuiverError::Layout(LayoutError::NoRoots)));
}

#[test]
fn circular_layout_spreads_vertices_evenly() {
    let mut graph = quiver::parse(TWO_COMPONENTS).unwrap();
    EngineBuilder::new()
        .with_dimensions(600.0, 600.0)
        .build(EngineKind::Circular)
        .run(&mut graph)
        .unwrap();

    // Every vertex sits on the circle of radius 300 around (300, 300),
    // give or take pixel rounding.
    for (_, vertex) in graph.vertices() {
        let dx = vertex.position().x() - 300.0;
        let dy = vertex.position().y() - 300.0;
        let radius = (dx * dx + dy * dy).sqrt();
        assert!((radius - 300.0).abs() < 1.0, "radius {radius}");
    }
}

#[test]
fn plot_hands_final_geometry_to_the_surface() {
    struct Counter {
        edges: usize,
        vertices: usize,
        arrows: usize,
    }

    impl Surface for Counter {
        fn draw_edge(&mut self, edge: &EdgeFrame<'_>) {
            self.edges += 1;
            if edge.show_arrow() {
                self.arrows += 1;
            }
        }

        fn draw_vertex(&mut self, _vertex: &VertexFrame<'_>) {
            self.vertices += 1;
        }
    }

    let mut graph = Graph::new("drawn", true);
    let a = graph.insert_vertex(Vertex::new("a"));
    let b = graph.insert_vertex(Vertex::new("b"));
    graph.insert_edge("ab", 1.0, a, b, EdgeStyle::default());

    EngineBuilder::new()
        .with_seed(1)
        .build(EngineKind::Random)
        .run(&mut graph)
        .unwrap();

    let mut counter = Counter { edges: 0, vertices: 0, arrows: 0 };
    quiver::render::plot(&graph, &mut counter);
    assert_eq!(counter.edges, 1);
    assert_eq!(counter.vertices, 2);
    assert_eq!(counter.arrows, 1);
}

#[test]
fn stale_vertex_handles_are_harmless() {
    let mut graph = Graph::new("mutation", true);
    let a = graph.insert_vertex(Vertex::new("a"));
    let b = graph.insert_vertex(Vertex::new("b"));
    let c = graph.insert_vertex(Vertex::new("c"));
    graph.insert_edge("", 1.0, a, b, EdgeStyle::default());
    graph.insert_edge("", 1.0, c, b, EdgeStyle::default());

    graph.remove_vertex(b);
    assert_eq!(graph.vertex_count(), 2);
    assert!(graph.vertex(b).is_none());
    assert!(graph.insert_edge("", 1.0, a, b, EdgeStyle::default()).is_none());
    graph.remove_vertex(b); // second removal is a no-op
    assert_eq!(graph.vertex_count(), 2);

    // Layout still works on the mutated graph.
    EngineBuilder::new()
        .with_seed(5)
        .with_iterations(20)
        .build(EngineKind::Force)
        .run(&mut graph)
        .unwrap();
    let _: Vec<VertexId> = graph.vertex_ids();
}

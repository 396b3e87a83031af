//! Full render passes from controller JSON to drawings

mod common;

use common::{assert_float_eq, edges, init_tracing, stages};
use pipeline_dag::scene::Drawing;
use pipeline_dag::{
    render_pipelines, render_pipelines_with_config, svg, DagError, MissingPipelinePolicy,
    Orientation, Pipeline, RenderConfig, SceneStore, StageStatusMap, Status,
};

fn diamond() -> Pipeline {
    Pipeline {
        id: "diamond".to_string(),
        owner_id: "alice".to_string(),
        dependencies: edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]),
    }
}

fn diamond_stages() -> StageStatusMap {
    let mut map = StageStatusMap::new();
    map.insert(
        "diamond",
        stages(&[
            ("A", Status::Successful),
            ("B", Status::Failed),
            ("C", Status::Successful),
            ("D", Status::Successful),
        ]),
    );
    map
}

#[test]
fn test_diamond_scene() {
    init_tracing();

    let batch = render_pipelines(&[diamond()], &diamond_stages());
    let row = batch.row("diamond").unwrap();
    assert_eq!(row.owner_id, "alice");
    assert_eq!(row.status, Status::Failed);

    let scene = row.scene.as_ref().unwrap();
    assert_eq!(scene.orientation, Orientation::Horizontal);
    assert_eq!(scene.nodes.len(), 4);
    assert_eq!(scene.edges.len(), 4);
    assert!(scene.edges.iter().all(|e| e.gradient.stops.len() == 2));
    assert_eq!(scene.node("B").unwrap().fill.as_str(), "red");
    assert_eq!(scene.node("A").unwrap().fill.as_str(), "green");

    let into_b = scene.edge("A", "B").unwrap();
    assert_eq!(into_b.gradient.stops[0].color.as_str(), "green");
    assert_eq!(into_b.gradient.stops[1].color.as_str(), "red");
}

#[test]
fn test_diamond_geometry() {
    let batch = render_pipelines(&[diamond()], &diamond_stages());
    let scene = batch.rows[0].scene.as_ref().unwrap();

    // Rank order left to right, ties by first appearance
    let order: Vec<&str> = scene.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C", "D"]);
    let xs: Vec<f64> = scene.nodes.iter().map(|n| n.center.x).collect();
    assert!(xs.windows(2).all(|w| w[1] - w[0] == 100.0));

    // All stages share one line, skipping edges leave it on opposite sides
    let line_y = scene.nodes[0].center.y;
    assert!(scene.nodes.iter().all(|n| n.center.y == line_y));
    let a_c = scene.edge("A", "C").unwrap();
    let b_d = scene.edge("B", "D").unwrap();
    assert_float_eq(a_c.points[1].y - line_y, 55.0, 1e-9);
    assert_float_eq(b_d.points[1].y - line_y, -55.0, 1e-9);

    for edge in &scene.edges {
        for p in &edge.points {
            assert!(p.x >= 0.0 && p.x <= scene.width);
            assert!(p.y >= 0.0 && p.y <= scene.height);
        }
    }
}

#[test]
fn test_invalid_pipelines_render_error_state() {
    init_tracing();

    let pipelines = vec![
        Pipeline::new("loop", "bob")
            .with_dependency("build", "test")
            .with_dependency("test", "build"),
        diamond(),
    ];
    let batch = render_pipelines(&pipelines, &diamond_stages());

    let failures: Vec<_> = batch.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "loop");
    assert!(matches!(failures[0].1, DagError::CycleDetected { .. }));
    assert!(batch.row("diamond").unwrap().is_renderable());

    let mut store = SceneStore::new();
    store.commit_batch(batch.into_drawings());
    let entry = store.get("loop").unwrap();
    let svg = svg::render_drawing("loop", &entry.drawing);
    assert!(svg.contains("dag-error"));
}

#[test]
fn test_redraw_replaces_previous_scene() {
    let mut store = SceneStore::new();
    let first = render_pipelines(&[diamond()], &diamond_stages());
    store.commit_batch(first.into_drawings());

    let shrunk = Pipeline::new("diamond", "alice").with_dependency("A", "B");
    let second = render_pipelines(&[shrunk], &diamond_stages());
    let generation = store.commit_batch(second.into_drawings());

    let entry = store.get("diamond").unwrap();
    assert_eq!(entry.generation, generation);
    match &entry.drawing {
        Drawing::Scene(scene) => {
            assert_eq!(scene.nodes.len(), 2);
            assert_eq!(scene.edges.len(), 1);
        }
        Drawing::Error(err) => panic!("unexpected error: {}", err),
    }
}

#[test]
fn test_controller_json_payloads() {
    let pipelines = Pipeline::list_from_json(
        r#"[
            {"Id": "p1", "UserId": "u1", "Dependencies": [["build", "test"]]},
            {"Id": "p2", "UserId": "u2", "Dependencies": [["lint", "build"], ["build", "ship"]]}
        ]"#,
    )
    .unwrap();
    let stage_map = StageStatusMap::from_json(
        r#"{
            "pipeline-id": [{"name": "build", "status": "RUNNING"}],
            "p1": [{"name": "build", "status": "FAILED"}, {"name": "test", "status": "RUNNING"}]
        }"#,
    )
    .unwrap();

    let batch = render_pipelines(&pipelines, &stage_map);
    // Later running stage masks the earlier failure
    assert_eq!(batch.row("p1").unwrap().status, Status::Running);
    // p2 has no entry and borrows the placeholder pipeline's stages
    assert_eq!(batch.row("p2").unwrap().status, Status::Running);

    let config = RenderConfig {
        missing_pipeline: MissingPipelinePolicy::Empty,
        ..RenderConfig::default()
    };
    let batch = render_pipelines_with_config(&pipelines, &stage_map, &config);
    assert_eq!(batch.row("p2").unwrap().status, Status::Successful);
}

#[test]
fn test_custom_geometry_and_palette() {
    let config = RenderConfig::from_json_str(
        r#"{"layout": {"node_radius": 30.0, "edge_radius": 5.0}, "palette": {"failed": "crimson"}}"#,
    )
    .unwrap();
    let batch = render_pipelines_with_config(&[diamond()], &diamond_stages(), &config);
    let scene = batch.rows[0].scene.as_ref().unwrap();

    assert_eq!(scene.node("B").unwrap().fill.as_str(), "crimson");
    assert!(scene.nodes.iter().all(|n| n.radius == 30.0));
    assert_float_eq(scene.nodes[1].center.x - scene.nodes[0].center.x, 60.0, 1e-9);
}

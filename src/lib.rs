//! # Pipeline DAG Renderer
//!
//! Layout and status rendering for the stage graphs of a CI pipeline table.
//!
//! Given the controller's pipeline list and stage status map, the renderer
//! produces for every pipeline:
//! - an aggregated status for the status column
//! - a drawable scene: stage circles colored by status and dependency edges
//!   stroked with a gradient from source color to target color
//!
//! ## Quick Start
//!
//! ```rust
//! use pipeline_dag::{render_pipelines, svg, Pipeline, StageStatusMap};
//!
//! let pipelines = Pipeline::list_from_json(
//!     r#"[{"Id": "p1", "UserId": "alice", "Dependencies": [["build", "test"]]}]"#,
//! )?;
//! let stages = StageStatusMap::from_json(
//!     r#"{"p1": [{"name": "build", "status": "SUCCESS"}, {"name": "test", "status": "FAILED"}]}"#,
//! )?;
//!
//! for row in render_pipelines(&pipelines, &stages).rows {
//!     match &row.scene {
//!         Ok(scene) => println!("{} [{}]\n{}", row.pipeline_id, row.status, svg::render_svg(scene)),
//!         Err(e) => eprintln!("{}: {}", row.pipeline_id, e),
//!     }
//! }
//! # Ok::<(), pipeline_dag::DagError>(())
//! ```
//!
//! ## Architecture
//!
//! Each pipeline goes through a four-phase render pass:
//!
//! 1. **Graph Construction** - Validate dependency edges into a ranked DAG
//! 2. **Layout** - Place stages on one line and route skipping edges through side lanes
//! 3. **Orientation** - Turn the top-to-bottom layout into a left-to-right one
//! 4. **Scene Assembly** - Color stages by status and attach edge gradients
//!
//! Status aggregation runs independently of the graph, so a pipeline with an
//! invalid graph still reports its status.

pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod scene;
pub mod status;
pub mod svg;

// Re-export the main rendering API
pub use renderer::{
    render_pipeline,
    render_pipelines,
    render_pipelines_with_config,
    render_row,
    PipelineRow,
    RenderBatch,
};

pub use config::{LayoutConfig, MissingPipelinePolicy, RenderConfig};
pub use error::{DagError, Result};
pub use graph::{build_dag, Dag, GraphBuilder};
pub use layout::{layout_dag, Layout, Orientation, Point, ZherebkoLayout};
pub use model::{Pipeline, StageStatus, StageStatusMap, Status};
pub use scene::{Color, ColorMapper, ColorPalette, Scene, SceneBuilder, SceneStore};
pub use status::{aggregate_status, StatusAggregator};

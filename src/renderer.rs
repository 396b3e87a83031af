//! # Pipeline Renderer
//!
//! Main entry points for turning pipelines and their stage statuses into
//! table rows: an aggregated status plus a drawable scene, or an explicit
//! error when the pipeline's dependency graph is invalid.

use crate::config::RenderConfig;
use crate::error::{DagError, Result};
use crate::graph::build_dag;
use crate::layout::ZherebkoLayout;
use crate::model::{Pipeline, StageStatusMap, Status};
use crate::scene::{Color, ColorMapper, Drawing, Scene, SceneBuilder};
use crate::status::StatusAggregator;

/// One row of the pipeline table
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRow {
    pub pipeline_id: String,
    pub owner_id: String,
    pub status: Status,
    /// Palette color for `status`, used to paint the status cell
    pub status_color: Color,
    /// The stage graph, or why it could not be drawn
    pub scene: Result<Scene>,
}

impl PipelineRow {
    pub fn is_renderable(&self) -> bool {
        self.scene.is_ok()
    }
}

/// Rows for every pipeline of one refresh, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderBatch {
    pub rows: Vec<PipelineRow>,
}

impl RenderBatch {
    pub fn row(&self, pipeline_id: &str) -> Option<&PipelineRow> {
        self.rows.iter().find(|r| r.pipeline_id == pipeline_id)
    }

    /// Rows whose graph failed to build
    pub fn failures(&self) -> impl Iterator<Item = (&str, &DagError)> {
        self.rows.iter().filter_map(|row| match &row.scene {
            Ok(_) => None,
            Err(err) => Some((row.pipeline_id.as_str(), err)),
        })
    }

    /// Drawings keyed by pipeline id, ready for [`SceneStore::commit_batch`]
    ///
    /// [`SceneStore::commit_batch`]: crate::scene::SceneStore::commit_batch
    pub fn into_drawings(self) -> impl Iterator<Item = (String, Drawing)> {
        self.rows
            .into_iter()
            .map(|row| (row.pipeline_id, Drawing::from(row.scene)))
    }
}

/// Render a batch of pipelines with the default configuration
///
/// # Examples
///
/// ```rust
/// use pipeline_dag::{render_pipelines, Pipeline, StageStatus, StageStatusMap, Status};
///
/// let pipeline = Pipeline::new("p1", "alice").with_dependency("build", "test");
/// let mut stages = StageStatusMap::new();
/// stages.insert("p1", vec![
///     StageStatus::new("build", Status::Successful),
///     StageStatus::new("test", Status::Running),
/// ]);
///
/// let batch = render_pipelines(&[pipeline], &stages);
/// assert_eq!(batch.rows[0].status, Status::Running);
/// assert!(batch.rows[0].is_renderable());
/// ```
pub fn render_pipelines(pipelines: &[Pipeline], stages: &StageStatusMap) -> RenderBatch {
    render_pipelines_with_config(pipelines, stages, &RenderConfig::default())
}

/// Render a batch of pipelines
///
/// A pipeline whose graph fails to build yields a row carrying the error;
/// the remaining pipelines are rendered regardless.
pub fn render_pipelines_with_config(
    pipelines: &[Pipeline],
    stages: &StageStatusMap,
    config: &RenderConfig,
) -> RenderBatch {
    tracing::info!(
        "[DAG] Rendering {} pipelines ({} with stage statuses)",
        pipelines.len(),
        stages.len()
    );

    let rows: Vec<PipelineRow> = pipelines
        .iter()
        .map(|pipeline| render_row(pipeline, stages, config))
        .collect();

    let failed = rows.iter().filter(|r| !r.is_renderable()).count();
    tracing::info!(
        "[DAG] Render pass complete ({} drawn, {} failed)",
        rows.len() - failed,
        failed
    );

    RenderBatch { rows }
}

/// Render a single table row
pub fn render_row(pipeline: &Pipeline, stages: &StageStatusMap, config: &RenderConfig) -> PipelineRow {
    let aggregator = StatusAggregator::new(config.missing_pipeline.clone());
    let status = aggregator.pipeline_status(&pipeline.id, stages);
    let status_color = ColorMapper::new(config.palette.clone()).color(status).clone();

    let scene = render_pipeline(pipeline, stages, config);
    if let Err(err) = &scene {
        tracing::warn!("[DAG] Skipping graph for pipeline {}: {}", pipeline.id, err);
    }

    PipelineRow {
        pipeline_id: pipeline.id.clone(),
        owner_id: pipeline.owner_id.clone(),
        status,
        status_color,
        scene,
    }
}

/// Build, lay out, orient and color one pipeline's stage graph
pub fn render_pipeline(
    pipeline: &Pipeline,
    stages: &StageStatusMap,
    config: &RenderConfig,
) -> Result<Scene> {
    tracing::debug!(
        "[DAG] Pipeline {} ({} dependencies)",
        pipeline.id,
        pipeline.dependencies.len()
    );

    // Phase 1: Build graph
    let dag = build_dag(&pipeline.dependencies)?;
    tracing::debug!(
        "[DAG]   - {} stages, {} edges",
        dag.node_count(),
        dag.edge_count()
    );

    // Phase 2: Layout
    let layout = ZherebkoLayout::new(config.layout.clone()).layout(&dag)?;

    // Phase 3: Re-orient left-to-right
    let layout = layout.into_horizontal();
    tracing::debug!(
        "[DAG]   - canvas {:.0}x{:.0}",
        layout.width,
        layout.height
    );

    // Phase 4: Color and assemble. Node colors use the pipeline's own stages
    // only, never the placeholder used for the status column.
    let own_stages = stages.get(&pipeline.id).unwrap_or(&[]);
    let builder = SceneBuilder::new(
        ColorMapper::new(config.palette.clone()),
        config.layout.node_radius,
    );

    Ok(builder.build(&pipeline.id, &layout, own_stages))
}

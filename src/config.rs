//! # Render Configuration
//!
//! Geometry, palette and missing-pipeline policy for a render pass. Every
//! field has a default, so a partial JSON document is enough to override one
//! setting.
//!
//! ```rust
//! use pipeline_dag::RenderConfig;
//!
//! let config = RenderConfig::from_json_str(r#"{"layout": {"node_radius": 30.0}}"#)?;
//! assert_eq!(config.layout.node_radius, 30.0);
//! assert_eq!(config.layout.edge_radius, 5.0);
//! # Ok::<(), pipeline_dag::DagError>(())
//! ```

use crate::error::{DagError, Result};
use crate::scene::ColorPalette;
use serde::{Deserialize, Serialize};

/// Default circle radius for a stage node
pub const DEFAULT_NODE_RADIUS: f64 = 50.0;

/// Default half-width reserved for an edge lane
pub const DEFAULT_EDGE_RADIUS: f64 = 5.0;

/// Pipeline whose stages stand in for a pipeline missing from the status map
pub const PLACEHOLDER_PIPELINE_ID: &str = "pipeline-id";

/// Layout geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_radius: f64,
    pub edge_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_radius: DEFAULT_NODE_RADIUS,
            edge_radius: DEFAULT_EDGE_RADIUS,
        }
    }
}

impl LayoutConfig {
    pub fn new(node_radius: f64, edge_radius: f64) -> Self {
        Self {
            node_radius,
            edge_radius,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("node_radius", self.node_radius), ("edge_radius", self.edge_radius)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DagError::Config(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Distance between consecutive nodes on the primary axis
    pub fn node_spacing(&self) -> f64 {
        self.node_radius * 2.0
    }

    /// Secondary-axis offset of the innermost routing lane
    pub fn lane_offset(&self) -> f64 {
        self.node_radius + self.edge_radius
    }

    /// Extra offset between neighbouring lanes on the same side
    pub fn lane_gap(&self) -> f64 {
        self.edge_radius * 2.0
    }
}

/// What to aggregate when a pipeline has no entry in the status map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPipelinePolicy {
    /// Borrow the stages of a fixed placeholder pipeline
    Placeholder(String),
    /// Treat the pipeline as having no stages
    Empty,
}

impl Default for MissingPipelinePolicy {
    fn default() -> Self {
        MissingPipelinePolicy::Placeholder(PLACEHOLDER_PIPELINE_ID.to_string())
    }
}

/// Settings for a full render pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub layout: LayoutConfig,
    pub palette: ColorPalette,
    pub missing_pipeline: MissingPipelinePolicy,
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()
    }
}

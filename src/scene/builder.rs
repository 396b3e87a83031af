//! # Scene Assembly
//!
//! Combines a final layout with stage colors into the shapes a drawing
//! surface needs: one filled, labelled circle per stage and one
//! gradient-stroked polyline per dependency.

use super::color::{node_statuses, Color, ColorMapper};
use crate::layout::{Layout, Orientation, Point};
use crate::model::{StageStatus, Status};
use serde::{Deserialize, Serialize};

/// A stage drawn as a filled circle with its name centred inside
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub id: String,
    pub center: Point,
    pub radius: f64,
    pub fill: Color,
    /// `None` when the stage has not reported a status
    pub status: Option<Status>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, 0.0 to 1.0
    pub offset: f64,
    pub color: Color,
}

/// Two-stop gradient running from the source centre to the target centre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    /// Percent-encoded pipeline id plus the edge's position in the scene,
    /// unique across every pipeline's document on a page
    pub id: String,
    pub start: Point,
    pub end: Point,
    pub stops: [GradientStop; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeShape {
    pub source: String,
    pub target: String,
    pub points: Vec<Point>,
    pub gradient: LinearGradient,
}

/// Everything needed to draw one pipeline's stage graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub pipeline_id: String,
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
    pub nodes: Vec<CircleShape>,
    pub edges: Vec<EdgeShape>,
}

impl Scene {
    pub fn node(&self, id: &str) -> Option<&CircleShape> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&EdgeShape> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }
}

#[derive(Debug, Clone)]
pub struct SceneBuilder {
    mapper: ColorMapper,
    node_radius: f64,
}

impl SceneBuilder {
    pub fn new(mapper: ColorMapper, node_radius: f64) -> Self {
        Self {
            mapper,
            node_radius,
        }
    }

    /// Build the scene for a pipeline
    ///
    /// `stages` must be the pipeline's own stage records; stages without a
    /// record are filled with the fallback color.
    pub fn build(&self, pipeline_id: &str, layout: &Layout, stages: &[StageStatus]) -> Scene {
        let statuses = node_statuses(stages);
        let fill_of = |id: &str| self.mapper.color_or_fallback(statuses.get(id).copied()).clone();

        let nodes = layout
            .nodes
            .iter()
            .map(|node| CircleShape {
                id: node.id.clone(),
                center: node.position,
                radius: self.node_radius,
                fill: fill_of(&node.id),
                status: statuses.get(node.id.as_str()).copied(),
                label: node.id.clone(),
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .enumerate()
            .map(|(index, edge)| {
                let start = layout.position(&edge.source).unwrap_or_default();
                let end = layout.position(&edge.target).unwrap_or_default();
                EdgeShape {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    points: edge.points.clone(),
                    gradient: LinearGradient {
                        id: gradient_id(pipeline_id, index),
                        start,
                        end,
                        stops: [
                            GradientStop {
                                offset: 0.0,
                                color: fill_of(&edge.source),
                            },
                            GradientStop {
                                offset: 1.0,
                                color: fill_of(&edge.target),
                            },
                        ],
                    },
                }
            })
            .collect();

        Scene {
            pipeline_id: pipeline_id.to_string(),
            width: layout.width,
            height: layout.height,
            orientation: layout.orientation,
            nodes,
            edges,
        }
    }
}

/// Id of the gradient for the `index`-th edge of a pipeline
fn gradient_id(pipeline_id: &str, index: usize) -> String {
    format!("{}-{}", urlencoding::encode(pipeline_id), index)
}

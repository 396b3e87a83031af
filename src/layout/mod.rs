//! # Layout
//!
//! Geometry for a ranked stage graph: node centres, edge control points and
//! the canvas they fit in.
//!
//! Layouts are computed top-to-bottom by [`zherebko`] and turned into the
//! left-to-right reading direction used by the pipeline table with
//! [`Layout::into_horizontal`].

pub mod orientation;
pub mod zherebko;

pub use orientation::Orientation;
pub use zherebko::{layout_dag, ZherebkoLayout};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn swapped(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A positioned stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePlacement {
    pub id: String,
    pub rank: usize,
    pub position: Point,
}

/// A routed dependency edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRoute {
    pub source: String,
    pub target: String,
    /// Control points from source centre to target centre
    pub points: Vec<Point>,
    /// Routing lane for edges that skip over intermediate stages
    pub lane: Option<usize>,
}

/// Node positions, edge routes and canvas size for one graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Nodes in rank order
    pub nodes: Vec<NodePlacement>,
    /// Edges in graph order
    pub edges: Vec<EdgeRoute>,
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
}

impl Layout {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            width: 0.0,
            height: 0.0,
            orientation: Orientation::Vertical,
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodePlacement> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.node(id).map(|n| n.position)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&EdgeRoute> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    /// Every node centre and edge control point
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes
            .iter()
            .map(|n| n.position)
            .chain(self.edges.iter().flat_map(|e| e.points.iter().copied()))
    }
}

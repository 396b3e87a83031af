//! # Single-Line Layout
//!
//! Zherebko-style layout: every stage sits on one vertical line in rank
//! order, and edges that jump over intermediate stages are routed through
//! side lanes so their curves arc around the stages in between.

use super::{EdgeRoute, Layout, NodePlacement, Orientation, Point};
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::graph::Dag;

/// Layout engine placing all stages on a single primary axis
#[derive(Debug, Clone, Default)]
pub struct ZherebkoLayout {
    config: LayoutConfig,
}

impl ZherebkoLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay the graph out top-to-bottom
    ///
    /// The result is normalized so the smallest coordinate on each axis equals
    /// the node radius, leaving room for the circles drawn around each centre.
    pub fn layout(&self, dag: &Dag) -> Result<Layout> {
        self.config.validate()?;

        if dag.is_empty() {
            return Ok(Layout::empty());
        }

        let spacing = self.config.node_spacing();
        let order = dag.rank_order();

        // Slot along the primary axis for each node index
        let mut slot = vec![0usize; dag.node_count()];
        for (i, &node) in order.iter().enumerate() {
            slot[node] = i;
        }

        let mut nodes: Vec<NodePlacement> = order
            .iter()
            .enumerate()
            .map(|(i, &node)| NodePlacement {
                id: dag.node_name(node).to_string(),
                rank: dag.rank_at(node),
                position: Point::new(0.0, i as f64 * spacing),
            })
            .collect();

        let spans: Vec<(usize, usize)> = dag
            .edge_indices()
            .iter()
            .map(|&(s, t)| (slot[s], slot[t]))
            .collect();
        let lanes = assign_lanes(&spans);

        let mut edges: Vec<EdgeRoute> = dag
            .edge_indices()
            .iter()
            .zip(spans.iter().zip(lanes))
            .map(|(&(s, t), (&(from, to), lane))| {
                let start = Point::new(0.0, from as f64 * spacing);
                let end = Point::new(0.0, to as f64 * spacing);
                let points = match lane {
                    Some(lane) => self.routed_points(start, end, to - from, lane),
                    None => vec![start, end],
                };
                tracing::debug!(
                    "[LAYOUT] Edge {} -> {} spans {} slot(s), lane {:?}",
                    dag.node_name(s),
                    dag.node_name(t),
                    to - from,
                    lane
                );
                EdgeRoute {
                    source: dag.node_name(s).to_string(),
                    target: dag.node_name(t).to_string(),
                    points,
                    lane,
                }
            })
            .collect();

        let (width, height) = self.normalize(&mut nodes, &mut edges);

        Ok(Layout {
            nodes,
            edges,
            width,
            height,
            orientation: Orientation::Vertical,
        })
    }

    /// Secondary-axis offset of a lane; lanes alternate sides moving outward
    fn lane_position(&self, lane: usize) -> f64 {
        let distance = self.config.lane_offset() + (lane / 2) as f64 * self.config.lane_gap();
        if lane % 2 == 0 {
            distance
        } else {
            -distance
        }
    }

    fn routed_points(&self, start: Point, end: Point, span: usize, lane: usize) -> Vec<Point> {
        let x = self.lane_position(lane);
        let step = self.config.node_spacing();
        if span == 2 {
            vec![start, Point::new(x, start.y + step), end]
        } else {
            vec![
                start,
                Point::new(x, start.y + step),
                Point::new(x, end.y - step),
                end,
            ]
        }
    }

    /// Shift everything so the margin fits, returning the canvas size
    fn normalize(&self, nodes: &mut [NodePlacement], edges: &mut [EdgeRoute]) -> (f64, f64) {
        let margin = self.config.node_radius;
        let all = nodes
            .iter()
            .map(|n| n.position)
            .chain(edges.iter().flat_map(|e| e.points.iter().copied()));

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in all {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let (dx, dy) = (margin - min_x, margin - min_y);
        for node in nodes.iter_mut() {
            node.position = node.position.translate(dx, dy);
        }
        for edge in edges.iter_mut() {
            for point in edge.points.iter_mut() {
                *point = point.translate(dx, dy);
            }
        }

        (max_x + dx + margin, max_y + dy + margin)
    }
}

/// Lay out a graph with the given geometry
pub fn layout_dag(dag: &Dag, config: &LayoutConfig) -> Result<Layout> {
    ZherebkoLayout::new(config.clone()).layout(dag)
}

/// Greedy interval colouring of edges that skip at least one slot
///
/// Shorter edges are placed first so they take the inner lanes and longer
/// edges arc around them. Two edges may share a lane when their intervals
/// only meet at a shared stage.
fn assign_lanes(spans: &[(usize, usize)]) -> Vec<Option<usize>> {
    let mut skipping: Vec<usize> = (0..spans.len())
        .filter(|&i| spans[i].1 > spans[i].0 + 1)
        .collect();
    skipping.sort_by_key(|&i| {
        let (from, to) = spans[i];
        (to - from, from)
    });

    let mut occupied: Vec<Vec<(usize, usize)>> = Vec::new();
    let mut lanes = vec![None; spans.len()];
    for i in skipping {
        let (from, to) = spans[i];
        let free = occupied
            .iter()
            .position(|taken| taken.iter().all(|&(a, b)| to <= a || b <= from));
        let lane = match free {
            Some(lane) => lane,
            None => {
                occupied.push(Vec::new());
                occupied.len() - 1
            }
        };
        occupied[lane].push((from, to));
        lanes[i] = Some(lane);
    }
    lanes
}

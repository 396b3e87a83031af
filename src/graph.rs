//! # Graph Construction
//!
//! Turns a pipeline's raw dependency edge list into a validated DAG of named
//! stages, ranked by longest path from a source.

use crate::error::{DagError, Result};
use std::collections::{HashMap, HashSet, VecDeque};

/// A validated, ranked stage dependency graph
///
/// Node indices follow first-appearance order, which is also the tie-breaker
/// for nodes of equal rank.
#[derive(Debug, Clone, PartialEq)]
pub struct Dag {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
    ranks: Vec<usize>,
    order: Vec<usize>,
}

impl Dag {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Node ids in first-appearance order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Edges in input order, duplicates removed
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .map(|&(s, t)| (self.nodes[s].as_str(), self.nodes[t].as_str()))
    }

    /// Topological depth of a node
    pub fn rank(&self, id: &str) -> Option<usize> {
        self.index.get(id).map(|&i| self.ranks[i])
    }

    /// Node ids sorted by rank, ties broken by first appearance
    pub fn ranked_nodes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|&i| self.nodes[i].as_str())
    }

    pub(crate) fn node_name(&self, idx: usize) -> &str {
        &self.nodes[idx]
    }

    pub(crate) fn rank_at(&self, idx: usize) -> usize {
        self.ranks[idx]
    }

    pub(crate) fn rank_order(&self) -> &[usize] {
        &self.order
    }

    pub(crate) fn edge_indices(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

/// Builds a [`Dag`] from `(source, target)` pairs
///
/// By default the node set is every id mentioned by an edge. An explicit
/// declaration list can be supplied with [`GraphBuilder::with_nodes`]; edges
/// must then stay within it, and declared stages without edges become
/// isolated nodes.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    declared: Option<Vec<String>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared = Some(nodes.into_iter().map(Into::into).collect());
        self
    }

    pub fn build<S: AsRef<str>>(&self, edges: &[(S, S)]) -> Result<Dag> {
        let mut nodes: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        fn intern(id: &str, nodes: &mut Vec<String>, index: &mut HashMap<String, usize>) {
            if !index.contains_key(id) {
                index.insert(id.to_string(), nodes.len());
                nodes.push(id.to_string());
            }
        }

        if let Some(declared) = &self.declared {
            for id in declared {
                intern(id, &mut nodes, &mut index);
            }
        } else {
            for (source, target) in edges {
                for id in [source.as_ref(), target.as_ref()] {
                    if !id.is_empty() {
                        intern(id, &mut nodes, &mut index);
                    }
                }
            }
        }

        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut edge_indices = Vec::with_capacity(edges.len());
        for (source, target) in edges {
            let (source, target) = (source.as_ref(), target.as_ref());
            let lookup = |id: &str| {
                index.get(id).copied().ok_or_else(|| DagError::DanglingReference {
                    from: source.to_string(),
                    to: target.to_string(),
                    missing: id.to_string(),
                })
            };
            let pair = (lookup(source)?, lookup(target)?);
            if seen.insert(pair) {
                edge_indices.push(pair);
            } else {
                tracing::warn!("[DAG] Collapsing duplicate edge {} -> {}", source, target);
            }
        }

        let ranks = assign_ranks(&nodes, &edge_indices)?;

        let mut order: Vec<usize> = (0..nodes.len()).collect();
        order.sort_by_key(|&i| (ranks[i], i));

        tracing::debug!(
            "[DAG] Built graph ({} nodes, {} edges, {} ranks)",
            nodes.len(),
            edge_indices.len(),
            ranks.iter().max().map_or(0, |r| r + 1)
        );

        Ok(Dag {
            nodes,
            index,
            edges: edge_indices,
            ranks,
            order,
        })
    }
}

/// Build a DAG whose node set is implied by the edges
pub fn build_dag<S: AsRef<str>>(edges: &[(S, S)]) -> Result<Dag> {
    GraphBuilder::new().build(edges)
}

/// Longest-path layering via Kahn's algorithm
///
/// Nodes that never reach in-degree zero sit on or behind a cycle.
fn assign_ranks(nodes: &[String], edges: &[(usize, usize)]) -> Result<Vec<usize>> {
    let mut in_degree = vec![0usize; nodes.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for &(s, t) in edges {
        in_degree[t] += 1;
        successors[s].push(t);
    }

    let mut ranks = vec![0usize; nodes.len()];
    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut ranked = 0;

    while let Some(node) = queue.pop_front() {
        ranked += 1;
        for &next in &successors[node] {
            ranks[next] = ranks[next].max(ranks[node] + 1);
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if ranked < nodes.len() {
        let stuck = (0..nodes.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| nodes[i].clone())
            .collect();
        return Err(DagError::CycleDetected { nodes: stuck });
    }

    Ok(ranks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(s, t)| (s.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn node_set_comes_from_edges() {
        let dag = build_dag(&edges(&[("build", "test"), ("test", "deploy")])).unwrap();
        assert_eq!(dag.nodes().collect::<Vec<_>>(), vec!["build", "test", "deploy"]);
        assert_eq!(dag.edge_count(), 2);
    }

    #[test]
    fn ranks_use_longest_path() {
        let dag = build_dag(&edges(&[("a", "b"), ("b", "c"), ("a", "c")])).unwrap();
        assert_eq!(dag.rank("a"), Some(0));
        assert_eq!(dag.rank("b"), Some(1));
        assert_eq!(dag.rank("c"), Some(2));
    }

    #[test]
    fn ties_break_by_first_appearance() {
        let dag = build_dag(&edges(&[("x", "z"), ("w", "z"), ("x", "y")])).unwrap();
        assert_eq!(dag.ranked_nodes().collect::<Vec<_>>(), vec!["x", "w", "z", "y"]);
    }

    #[test]
    fn detects_cycles() {
        let err = build_dag(&edges(&[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")])).unwrap_err();
        assert_eq!(
            err,
            DagError::CycleDetected {
                nodes: vec!["a".into(), "b".into(), "c".into(), "d".into()]
            }
        );
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let err = build_dag(&edges(&[("a", "a")])).unwrap_err();
        assert!(matches!(err, DagError::CycleDetected { .. }));
    }

    #[test]
    fn empty_id_is_dangling() {
        let err = build_dag(&edges(&[("a", "")])).unwrap_err();
        assert_eq!(
            err,
            DagError::DanglingReference {
                from: "a".into(),
                to: "".into(),
                missing: "".into()
            }
        );
    }

    #[test]
    fn declared_nodes_reject_unknown_endpoints() {
        let err = GraphBuilder::new()
            .with_nodes(["build", "test"])
            .build(&edges(&[("build", "deploy")]))
            .unwrap_err();
        assert!(matches!(err, DagError::DanglingReference { ref missing, .. } if missing == "deploy"));
    }

    #[test]
    fn declared_nodes_may_be_isolated() {
        let dag = GraphBuilder::new()
            .with_nodes(["lint", "build", "test"])
            .build(&edges(&[("build", "test")]))
            .unwrap();
        assert_eq!(dag.node_count(), 3);
        assert_eq!(dag.rank("lint"), Some(0));
        assert_eq!(dag.ranked_nodes().collect::<Vec<_>>(), vec!["lint", "build", "test"]);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let dag = build_dag(&edges(&[("a", "b"), ("a", "b")])).unwrap();
        assert_eq!(dag.edge_count(), 1);
    }

    #[test]
    fn empty_edge_list_gives_empty_graph() {
        let dag = build_dag::<String>(&[]).unwrap();
        assert!(dag.is_empty());
    }
}

//! # Errors
//!
//! Failures that abort rendering of a single pipeline.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DagError>;

/// Error raised while turning a pipeline's dependencies into a scene
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DagError {
    /// An edge names a stage that is not part of the node set
    #[error("Edge {from} -> {to} references unknown stage '{missing}'")]
    DanglingReference {
        from: String,
        to: String,
        missing: String,
    },

    /// The dependency edges contain a directed cycle
    #[error("Dependency cycle detected among stages: {}", .nodes.join(", "))]
    CycleDetected { nodes: Vec<String> },

    /// Invalid render configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed JSON input
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DagError {
    fn from(err: serde_json::Error) -> Self {
        DagError::Serialization(err.to_string())
    }
}

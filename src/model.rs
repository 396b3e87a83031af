//! # Input Model
//!
//! The two structures supplied by the data-fetch layer: the pipeline list and
//! the per-pipeline stage status map. Both are rebuilt wholesale on every
//! refresh and are never mutated by the renderer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Result;

/// Execution status of a stage or a whole pipeline
///
/// Accepts the spelled-out names as well as the upper-case values emitted by
/// the pipeline controller. Anything else decodes to [`Status::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(alias = "RUNNING")]
    Running,
    #[serde(alias = "FAILED")]
    Failed,
    #[serde(alias = "SUCCESS", alias = "SUCCESSFUL")]
    Successful,
    #[serde(other)]
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Running => "Running",
            Status::Failed => "Failed",
            Status::Successful => "Successful",
            Status::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = std::convert::Infallible;

    /// Never fails: unrecognized values become [`Status::Unknown`]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "Running" | "RUNNING" => Status::Running,
            "Failed" | "FAILED" => Status::Failed,
            "Successful" | "SUCCESSFUL" | "SUCCESS" => Status::Successful,
            _ => Status::Unknown,
        })
    }
}

/// One stage's reported status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStatus {
    pub name: String,
    pub status: Status,
}

impl StageStatus {
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

impl<S: Into<String>> From<(S, Status)> for StageStatus {
    fn from((name, status): (S, Status)) -> Self {
        Self::new(name, status)
    }
}

/// A pipeline row as listed by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "UserId", default)]
    pub owner_id: String,
    /// `[source, target]` stage pairs
    #[serde(alias = "Dependencies", default)]
    pub dependencies: Vec<(String, String)>,
}

impl Pipeline {
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.dependencies.push((source.into(), target.into()));
        self
    }

    /// Parse the controller's pipeline list
    pub fn list_from_json(json: &str) -> Result<Vec<Pipeline>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Pipeline id → ordered stage statuses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageStatusMap {
    stages: HashMap<String, Vec<StageStatus>>,
}

impl StageStatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, pipeline_id: impl Into<String>, stages: Vec<StageStatus>) {
        self.stages.insert(pipeline_id.into(), stages);
    }

    pub fn get(&self, pipeline_id: &str) -> Option<&[StageStatus]> {
        self.stages.get(pipeline_id).map(Vec::as_slice)
    }

    pub fn contains(&self, pipeline_id: &str) -> bool {
        self.stages.contains_key(pipeline_id)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl FromIterator<(String, Vec<StageStatus>)> for StageStatusMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<StageStatus>)>>(iter: T) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}

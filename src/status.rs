//! # Pipeline Status Aggregation
//!
//! Reduces a pipeline's stage statuses to the single value shown in the
//! status column of the pipeline table.
//!
//! The reduction is order-sensitive: it walks the stages in reported order
//! and the last `Failed` or `Running` stage decides the outcome. A `Running`
//! stage reported after a `Failed` one therefore masks the failure.

use crate::config::MissingPipelinePolicy;
use crate::model::{StageStatus, StageStatusMap, Status};

/// Aggregate stage statuses in reported order
///
/// Starts from `Successful`; `Failed` and `Running` entries overwrite the
/// running result, anything else leaves it untouched.
pub fn aggregate_status<'a, I>(stages: I) -> Status
where
    I: IntoIterator<Item = &'a StageStatus>,
{
    stages
        .into_iter()
        .fold(Status::Successful, |current, stage| match stage.status {
            Status::Failed => Status::Failed,
            Status::Running => Status::Running,
            _ => current,
        })
}

/// Resolves a pipeline's stage list and aggregates it
#[derive(Debug, Clone, Default)]
pub struct StatusAggregator {
    policy: MissingPipelinePolicy,
}

impl StatusAggregator {
    pub fn new(policy: MissingPipelinePolicy) -> Self {
        Self { policy }
    }

    /// Stages to aggregate for a pipeline
    ///
    /// Pipelines missing from the map fall back according to the configured
    /// policy; a missing placeholder yields no stages.
    pub fn stages_for<'m>(&self, pipeline_id: &str, stages: &'m StageStatusMap) -> &'m [StageStatus] {
        if let Some(own) = stages.get(pipeline_id) {
            return own;
        }
        match &self.policy {
            MissingPipelinePolicy::Placeholder(placeholder) => {
                tracing::debug!(
                    "[STATUS] No stages for pipeline {}, using placeholder {}",
                    pipeline_id,
                    placeholder
                );
                stages.get(placeholder).unwrap_or(&[])
            }
            MissingPipelinePolicy::Empty => &[],
        }
    }

    pub fn pipeline_status(&self, pipeline_id: &str, stages: &StageStatusMap) -> Status {
        aggregate_status(self.stages_for(pipeline_id, stages))
    }
}

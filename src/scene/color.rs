//! # Status Colors
//!
//! Maps stage statuses to CSS colors. Unknown or unreported statuses resolve
//! to the palette's fallback color instead of failing.

use crate::model::{StageStatus, Status};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A CSS color value such as `red` or `#1f77b4`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(css: &str) -> Self {
        Self::new(css)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    pub running: Color,
    pub failed: Color,
    pub successful: Color,
    /// Used for unknown and unreported statuses
    pub fallback: Color,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            running: Color::new("blue"),
            failed: Color::new("red"),
            successful: Color::new("green"),
            fallback: Color::new("grey"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColorMapper {
    palette: ColorPalette,
}

impl ColorMapper {
    pub fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn color(&self, status: Status) -> &Color {
        match status {
            Status::Running => &self.palette.running,
            Status::Failed => &self.palette.failed,
            Status::Successful => &self.palette.successful,
            Status::Unknown => &self.palette.fallback,
        }
    }

    /// Color for a stage that may not have reported a status
    pub fn color_or_fallback(&self, status: Option<Status>) -> &Color {
        status.map_or(&self.palette.fallback, |s| self.color(s))
    }
}

/// Join stage records by name; a stage reported twice keeps its last status
pub fn node_statuses(stages: &[StageStatus]) -> HashMap<&str, Status> {
    stages
        .iter()
        .map(|stage| (stage.name.as_str(), stage.status))
        .collect()
}

//! # Scene Store
//!
//! The drawing surface's view of the pipeline table: one drawing per
//! pipeline, replaced wholesale on every render pass. Nothing is patched in
//! place, so a redraw can never leave stale nodes or edges behind.

use super::Scene;
use crate::error::DagError;
use std::collections::HashMap;

/// What the surface shows for one pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Drawing {
    Scene(Scene),
    /// The graph could not be built; the cell shows the error
    Error(DagError),
}

impl From<Result<Scene, DagError>> for Drawing {
    fn from(result: Result<Scene, DagError>) -> Self {
        match result {
            Ok(scene) => Drawing::Scene(scene),
            Err(err) => Drawing::Error(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasEntry {
    /// Render pass that produced this drawing
    pub generation: u64,
    pub drawing: Drawing,
}

/// Per-pipeline drawings keyed by pipeline id
#[derive(Debug, Default)]
pub struct SceneStore {
    generation: u64,
    entries: HashMap<String, CanvasEntry>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recent commit
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, pipeline_id: &str) -> Option<&CanvasEntry> {
        self.entries.get(pipeline_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the drawing of a single pipeline
    pub fn commit(&mut self, pipeline_id: impl Into<String>, drawing: impl Into<Drawing>) -> u64 {
        self.generation += 1;
        let entry = CanvasEntry {
            generation: self.generation,
            drawing: drawing.into(),
        };
        self.entries.insert(pipeline_id.into(), entry);
        self.generation
    }

    /// Replace the whole table in one step
    ///
    /// Pipelines absent from `drawings` are dropped.
    pub fn commit_batch<I, D>(&mut self, drawings: I) -> u64
    where
        I: IntoIterator<Item = (String, D)>,
        D: Into<Drawing>,
    {
        let generation = self.generation + 1;
        let entries: HashMap<String, CanvasEntry> = drawings
            .into_iter()
            .map(|(id, drawing)| {
                let entry = CanvasEntry {
                    generation,
                    drawing: drawing.into(),
                };
                (id, entry)
            })
            .collect();

        let dropped = self
            .entries
            .keys()
            .filter(|id| !entries.contains_key(*id))
            .count();
        if dropped > 0 {
            tracing::debug!("[STORE] Dropping {} stale pipeline drawing(s)", dropped);
        }

        self.entries = entries;
        self.generation = generation;
        generation
    }

    /// Drop every drawing
    ///
    /// Counts as a commit of an empty table, so the generation advances.
    pub fn clear(&mut self) -> u64 {
        self.entries.clear();
        self.generation += 1;
        self.generation
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CanvasEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}

//! # Drawable Scenes
//!
//! Status coloring and scene assembly for laid-out stage graphs.

mod builder;
mod color;
pub mod store;

pub use builder::*;
pub use color::*;
pub use store::{CanvasEntry, Drawing, SceneStore};

//! # SVG Output
//!
//! Standalone SVG rendering of pipeline scenes.

pub mod curve;
mod svg_writer;

pub use svg_writer::*;

//! # SVG Writer
//!
//! Serializes a [`Scene`] into a standalone SVG document: gradient
//! definitions first, then edge paths, then stage circles with their labels
//! so nodes are painted over the edges that meet them.

use super::curve::{monotone_x, monotone_y, path_data};
use crate::error::DagError;
use crate::layout::Orientation;
use crate::scene::{Drawing, EdgeShape, Scene};

const EDGE_STROKE_WIDTH: f64 = 3.0;
const ERROR_WIDTH: f64 = 240.0;
const ERROR_HEIGHT: f64 = 60.0;

/// Render a scene as an SVG document
pub fn render_svg(scene: &Scene) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"svg-{}\" width=\"{:.2}\" height=\"{:.2}\" viewBox=\"0 0 {:.2} {:.2}\">",
        escape_xml(&scene.pipeline_id),
        scene.width,
        scene.height,
        scene.width,
        scene.height
    ));

    svg.push_str("<defs>");
    for edge in &scene.edges {
        let gradient = &edge.gradient;
        svg.push_str(&format!(
            "<linearGradient id=\"{}\" gradientUnits=\"userSpaceOnUse\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\">",
            escape_xml(&gradient.id),
            gradient.start.x,
            gradient.start.y,
            gradient.end.x,
            gradient.end.y
        ));
        for stop in &gradient.stops {
            svg.push_str(&format!(
                "<stop offset=\"{}%\" stop-color=\"{}\"/>",
                stop.offset * 100.0,
                escape_xml(stop.color.as_str())
            ));
        }
        svg.push_str("</linearGradient>");
    }
    svg.push_str("</defs>");

    svg.push_str("<g>");
    for edge in &scene.edges {
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke-width=\"{}\" stroke=\"url(#{})\"/>",
            edge_path(edge, scene.orientation),
            EDGE_STROKE_WIDTH,
            escape_xml(&edge.gradient.id)
        ));
    }
    svg.push_str("</g>");

    svg.push_str("<g>");
    for node in &scene.nodes {
        svg.push_str(&format!(
            "<g transform=\"translate({:.2}, {:.2})\">",
            node.center.x, node.center.y
        ));
        svg.push_str(&format!(
            "<circle r=\"{:.2}\" fill=\"{}\"/>",
            node.radius,
            escape_xml(node.fill.as_str())
        ));
        svg.push_str(&format!(
            "<text font-weight=\"bold\" font-family=\"sans-serif\" text-anchor=\"middle\" alignment-baseline=\"middle\" fill=\"white\">{}</text>",
            escape_xml(&node.label)
        ));
        svg.push_str("</g>");
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

/// Render the placeholder shown when a pipeline's graph cannot be drawn
pub fn render_error_svg(pipeline_id: &str, error: &DagError) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"svg-{}\" class=\"dag-error\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        escape_xml(pipeline_id),
        w = ERROR_WIDTH,
        h = ERROR_HEIGHT
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" rx=\"6\" ry=\"6\" fill=\"none\" stroke=\"red\" stroke-width=\"2\"/><title>{}</title>",
        escape_xml(&error.to_string())
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"sans-serif\" text-anchor=\"middle\" alignment-baseline=\"middle\" fill=\"red\">{}</text>",
        ERROR_WIDTH / 2.0,
        ERROR_HEIGHT / 2.0,
        error_headline(error)
    ));
    svg.push_str("</svg>");
    svg
}

/// Render whatever the store holds for a pipeline
pub fn render_drawing(pipeline_id: &str, drawing: &Drawing) -> String {
    match drawing {
        Drawing::Scene(scene) => render_svg(scene),
        Drawing::Error(err) => render_error_svg(pipeline_id, err),
    }
}

fn edge_path(edge: &EdgeShape, orientation: Orientation) -> String {
    let commands = match orientation {
        Orientation::Horizontal => monotone_x(&edge.points),
        Orientation::Vertical => monotone_y(&edge.points),
    };
    path_data(&commands)
}

fn error_headline(error: &DagError) -> &'static str {
    match error {
        DagError::DanglingReference { .. } => "Unknown stage in dependencies",
        DagError::CycleDetected { .. } => "Dependency cycle",
        DagError::Config(_) => "Invalid render settings",
        DagError::Serialization(_) => "Malformed pipeline data",
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

//! # Reading Direction
//!
//! Swaps the primary and secondary axes of a finished layout. Only geometry
//! changes; node and edge identity, order and lanes are untouched.

use super::Layout;
use serde::{Deserialize, Serialize};

/// Direction in which the rank order reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Ranks increase downward
    #[default]
    Vertical,
    /// Ranks increase to the right
    Horizontal,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

impl Layout {
    /// Swap x and y of every node and control point, and swap the canvas size
    ///
    /// Applying this twice yields the original layout.
    pub fn transpose(mut self) -> Self {
        for node in &mut self.nodes {
            node.position = node.position.swapped();
        }
        for edge in &mut self.edges {
            for point in &mut edge.points {
                *point = point.swapped();
            }
        }
        std::mem::swap(&mut self.width, &mut self.height);
        self.orientation = self.orientation.flipped();
        self
    }

    /// Re-orient a freshly computed layout to read left-to-right
    ///
    /// A layout that is already horizontal is returned unchanged.
    pub fn into_horizontal(self) -> Self {
        match self.orientation {
            Orientation::Vertical => self.transpose(),
            Orientation::Horizontal => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::graph::build_dag;
    use crate::layout::{layout_dag, Point};

    fn sample() -> Layout {
        let dag = build_dag(&[("a", "b"), ("b", "c"), ("a", "c")]).unwrap();
        layout_dag(&dag, &LayoutConfig::new(10.0, 2.0)).unwrap()
    }

    #[test]
    fn transpose_swaps_every_coordinate() {
        let vertical = sample();
        let horizontal = vertical.clone().transpose();
        assert_eq!(horizontal.orientation, Orientation::Horizontal);
        assert_eq!((horizontal.width, horizontal.height), (vertical.height, vertical.width));
        for (v, h) in vertical.nodes.iter().zip(&horizontal.nodes) {
            assert_eq!(v.id, h.id);
            assert_eq!(h.position, Point::new(v.position.y, v.position.x));
        }
        let skip = horizontal.edge("a", "c").unwrap();
        assert!(skip.points[1].y > horizontal.position("a").unwrap().y);
    }

    #[test]
    fn transpose_twice_is_identity() {
        let original = sample();
        assert_eq!(original.clone().transpose().transpose(), original);
    }

    #[test]
    fn into_horizontal_applies_once() {
        let once = sample().into_horizontal();
        let twice = once.clone().into_horizontal();
        assert_eq!(once, twice);
        assert_eq!(once.orientation, Orientation::Horizontal);
    }
}

//! # Monotone Curves
//!
//! Path data for a monotone cubic interpolation (Steffen's method) through
//! edge control points. Along the monotone axis the curve never overshoots
//! its control points, so edges routed through a lane stay inside it.

use crate::layout::Point;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
}

impl PathCommand {
    fn swapped(self) -> Self {
        match self {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(p.swapped()),
            PathCommand::LineTo(p) => PathCommand::LineTo(p.swapped()),
            PathCommand::CubicTo(c1, c2, p) => {
                PathCommand::CubicTo(c1.swapped(), c2.swapped(), p.swapped())
            }
        }
    }
}

/// Curve monotone in x, for left-to-right layouts
pub fn monotone_x(points: &[Point]) -> Vec<PathCommand> {
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }

    let n = pts.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![PathCommand::MoveTo(pts[0])],
        2 => return vec![PathCommand::MoveTo(pts[0]), PathCommand::LineTo(pts[1])],
        _ => {}
    }

    let mut commands = vec![PathCommand::MoveTo(pts[0])];
    let mut t0 = 0.0;
    for i in 2..n {
        let t1 = slope3(pts[i - 2], pts[i - 1], pts[i]);
        let lead = if i == 2 { slope2(pts[0], pts[1], t1) } else { t0 };
        commands.push(hermite(pts[i - 2], pts[i - 1], lead, t1));
        t0 = t1;
    }
    commands.push(hermite(
        pts[n - 2],
        pts[n - 1],
        t0,
        slope2(pts[n - 2], pts[n - 1], t0),
    ));
    commands
}

/// Curve monotone in y, for top-to-bottom layouts
pub fn monotone_y(points: &[Point]) -> Vec<PathCommand> {
    let swapped: Vec<Point> = points.iter().map(|p| p.swapped()).collect();
    monotone_x(&swapped)
        .into_iter()
        .map(PathCommand::swapped)
        .collect()
}

/// Format commands as SVG path data
pub fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        // Writing to a String cannot fail
        let _ = match command {
            PathCommand::MoveTo(p) => write!(d, "M{:.2},{:.2}", p.x, p.y),
            PathCommand::LineTo(p) => write!(d, "L{:.2},{:.2}", p.x, p.y),
            PathCommand::CubicTo(c1, c2, p) => write!(
                d,
                "C{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
                c1.x, c1.y, c2.x, c2.y, p.x, p.y
            ),
        };
    }
    d
}

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Tangent at `p1` from the secants on either side
fn slope3(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = (p1.y - p0.y) / signed_step(h0, h1);
    let s1 = (p2.y - p1.y) / signed_step(h1, h0);
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_nan() {
        0.0
    } else {
        t
    }
}

/// A zero step takes the sign of the neighbouring one so the secant is
/// signed infinity rather than NaN
fn signed_step(h: f64, other: f64) -> f64 {
    if h != 0.0 {
        h
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}

/// One-sided tangent at an end point
fn slope2(p0: Point, p1: Point, t: f64) -> f64 {
    let h = p1.x - p0.x;
    if h != 0.0 {
        (3.0 * (p1.y - p0.y) / h - t) / 2.0
    } else {
        t
    }
}

fn hermite(p0: Point, p1: Point, t0: f64, t1: f64) -> PathCommand {
    let dx = (p1.x - p0.x) / 3.0;
    PathCommand::CubicTo(
        Point::new(p0.x + dx, p0.y + dx * t0),
        Point::new(p1.x - dx, p1.y - dx * t1),
        p1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_points_draw_a_line() {
        let commands = monotone_x(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert_eq!(path_data(&commands), "M0.00,0.00L10.00,0.00");
    }

    #[test]
    fn repeated_points_are_skipped() {
        let p = Point::new(1.0, 1.0);
        assert_eq!(monotone_x(&[p, p]), vec![PathCommand::MoveTo(p)]);
    }

    #[test]
    fn curve_does_not_overshoot_lane() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 12.0),
            Point::new(30.0, 12.0),
            Point::new(40.0, 0.0),
        ];
        let commands = monotone_x(&points);
        assert_eq!(commands.len(), 4);
        for command in &commands {
            if let PathCommand::CubicTo(c1, c2, _) = command {
                assert!(c1.y <= 12.0 + 1e-9 && c2.y <= 12.0 + 1e-9);
            }
        }
        // Flat lane segment has zero tangent at both ends
        if let PathCommand::CubicTo(c1, c2, end) = commands[2] {
            assert_eq!((c1.y, c2.y, end), (12.0, 12.0, Point::new(30.0, 12.0)));
        } else {
            panic!("expected cubic segment");
        }
    }

    #[test]
    fn monotone_y_mirrors_monotone_x() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(12.0, 10.0),
            Point::new(0.0, 20.0),
        ];
        let vertical = monotone_y(&points);
        match vertical.last() {
            Some(PathCommand::CubicTo(_, _, end)) => assert_eq!(*end, Point::new(0.0, 20.0)),
            other => panic!("unexpected command {:?}", other),
        }
    }
}

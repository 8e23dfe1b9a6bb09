//! Fixed-step flattening of outline curves into line segments.
//!
//! Quadratic segments are split into [`QUAD_STEPS`] lines and cubic segments
//! into [`CUBIC_STEPS`] lines. The step count does not adapt to curve length;
//! at glyph sizes the error stays well below one supersample.

use crate::path::{Outline, PathCommand};

pub const QUAD_STEPS: u32 = 4;
pub const CUBIC_STEPS: u32 = 6;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Point on the quadratic Bezier `p0 → p1 → p2` at `t`.
#[inline]
pub fn quad_point(p0: Point, p1: Point, p2: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let a = u * u;
    let b = 2.0 * u * t;
    let c = t * t;
    Point::new(a * p0.x + b * p1.x + c * p2.x, a * p0.y + b * p1.y + c * p2.y)
}

/// Point on the cubic Bezier `p0 → p1 → p2 → p3` at `t`.
#[inline]
pub fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Walks `outline` and emits every resulting line segment as `(from, to)`.
///
/// Contours that are not terminated by `Close` are closed implicitly when the
/// next `MoveTo` starts or the outline ends, so the fill always sees closed
/// loops. Commands before the first `MoveTo` start at the origin.
pub fn flatten(outline: &Outline, mut emit: impl FnMut(Point, Point)) {
    let mut start = Point::default();
    let mut current = Point::default();
    let mut open = false;

    for cmd in outline.commands() {
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                if open {
                    emit(current, start);
                }
                start = Point::new(x, y);
                current = start;
                open = false;
            }
            PathCommand::LineTo { x, y } => {
                let next = Point::new(x, y);
                emit(current, next);
                current = next;
                open = true;
            }
            PathCommand::QuadTo { cx, cy, x, y } => {
                let (c, end) = (Point::new(cx, cy), Point::new(x, y));
                let mut prev = current;
                for i in 1..=QUAD_STEPS {
                    let next = if i == QUAD_STEPS {
                        end
                    } else {
                        quad_point(current, c, end, i as f32 / QUAD_STEPS as f32)
                    };
                    emit(prev, next);
                    prev = next;
                }
                current = end;
                open = true;
            }
            PathCommand::CubicTo { c1x, c1y, c2x, c2y, x, y } => {
                let (c1, c2, end) = (Point::new(c1x, c1y), Point::new(c2x, c2y), Point::new(x, y));
                let mut prev = current;
                for i in 1..=CUBIC_STEPS {
                    let next = if i == CUBIC_STEPS {
                        end
                    } else {
                        cubic_point(current, c1, c2, end, i as f32 / CUBIC_STEPS as f32)
                    };
                    emit(prev, next);
                    prev = next;
                }
                current = end;
                open = true;
            }
            PathCommand::Close => {
                if open {
                    emit(current, start);
                }
                current = start;
                open = false;
            }
        }
    }

    if open {
        emit(current, start);
    }
}

/// One drawing command of a glyph outline.
///
/// Coordinates are in outline space: font design units when produced by a
/// font, pixels once scaled. +Y points up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadTo { cx: f32, cy: f32, x: f32, y: f32 },
    CubicTo { c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32 },
    Close,
}

impl PathCommand {
    /// Returns the command with every coordinate multiplied by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        use PathCommand::*;
        let s = factor;
        match self {
            MoveTo { x, y } => MoveTo { x: x * s, y: y * s },
            LineTo { x, y } => LineTo { x: x * s, y: y * s },
            QuadTo { cx, cy, x, y } => QuadTo { cx: cx * s, cy: cy * s, x: x * s, y: y * s },
            CubicTo { c1x, c1y, c2x, c2y, x, y } => CubicTo {
                c1x: c1x * s,
                c1y: c1y * s,
                c2x: c2x * s,
                c2y: c2y * s,
                x: x * s,
                y: y * s,
            },
            Close => Close,
        }
    }

    /// Calls `f` for every point the command carries, control points included.
    fn for_each_point(&self, mut f: impl FnMut(f32, f32)) {
        match *self {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => f(x, y),
            PathCommand::QuadTo { cx, cy, x, y } => {
                f(cx, cy);
                f(x, y);
            }
            PathCommand::CubicTo { c1x, c1y, c2x, c2y, x, y } => {
                f(c1x, c1y);
                f(c2x, c2y);
                f(x, y);
            }
            PathCommand::Close => {}
        }
    }
}

/// Axis-aligned bounding box in outline space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Bounds {
    #[inline]
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// True when the box encloses no area (a space, a lone point, a flat line).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

/// An ordered list of [`PathCommand`]s describing one glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    commands: Vec<PathCommand>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn push(&mut self, cmd: PathCommand) {
        self.commands.push(cmd);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.push(PathCommand::LineTo { x, y });
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.push(PathCommand::QuadTo { cx, cy, x, y });
    }

    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.push(PathCommand::CubicTo { c1x, c1y, c2x, c2y, x, y });
    }

    pub fn close(&mut self) {
        self.push(PathCommand::Close);
    }

    /// Uniformly scales the outline, e.g. by `pixel_size / units_per_em`.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Outline {
        Outline { commands: self.commands.iter().map(|c| c.scaled(factor)).collect() }
    }

    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        let mut finite = true;
        for cmd in &self.commands {
            cmd.for_each_point(|x, y| finite &= x.is_finite() && y.is_finite());
        }
        finite
    }

    /// Bounding box over on-curve and control points.
    ///
    /// Returns `None` for an outline without points. Control points make the
    /// box conservative: it may be larger than the curve itself, never smaller.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut acc: Option<Bounds> = None;
        for cmd in &self.commands {
            cmd.for_each_point(|x, y| {
                let b = acc.get_or_insert(Bounds { x_min: x, y_min: y, x_max: x, y_max: y });
                b.x_min = b.x_min.min(x);
                b.y_min = b.y_min.min(y);
                b.x_max = b.x_max.max(x);
                b.y_max = b.y_max.max(y);
            });
        }
        acc
    }
}

impl From<Vec<PathCommand>> for Outline {
    fn from(commands: Vec<PathCommand>) -> Self {
        Self::from_commands(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn bounds_of_empty_outline_is_none() {
        assert!(Outline::new().bounds().is_none());
    }

    #[test]
    fn bounds_include_control_points() {
        let mut o = Outline::new();
        o.move_to(0.0, 0.0);
        o.quad_to(5.0, 20.0, 10.0, 0.0);
        let b = o.bounds().unwrap();
        assert_eq!(b, Bounds { x_min: 0.0, y_min: 0.0, x_max: 10.0, y_max: 20.0 });
    }

    #[test]
    fn close_only_outline_has_no_bounds() {
        let o = Outline::from(vec![PathCommand::Close]);
        assert!(o.bounds().is_none());
    }

    #[test]
    fn flat_line_bounds_are_empty() {
        let mut o = Outline::new();
        o.move_to(0.0, 3.0);
        o.line_to(10.0, 3.0);
        assert!(o.bounds().unwrap().is_empty());
    }

    // ── scaled ────────────────────────────────────────────────────────────

    #[test]
    fn scaled_multiplies_every_coordinate() {
        let mut o = Outline::new();
        o.move_to(1.0, 2.0);
        o.cubic_to(3.0, 4.0, 5.0, 6.0, 7.0, 8.0);
        o.close();
        let s = o.scaled(0.5);
        assert_eq!(
            s.commands(),
            &[
                PathCommand::MoveTo { x: 0.5, y: 1.0 },
                PathCommand::CubicTo { c1x: 1.5, c1y: 2.0, c2x: 2.5, c2y: 3.0, x: 3.5, y: 4.0 },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn is_finite_detects_nan() {
        let mut o = Outline::new();
        o.move_to(0.0, 0.0);
        o.line_to(f32::NAN, 1.0);
        assert!(!o.is_finite());
    }
}

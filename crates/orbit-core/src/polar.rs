//! Polar layout for ring menus.
//!
//! Angles are in degrees. 0° points up and angles grow clockwise on a y-down
//! surface. Every point is relative to the hub centre.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const FULL_TURN: f64 = 360.0;
pub const HALF_TURN: f64 = 180.0;

// an arc cannot join a point to itself
const MAX_SWEEP: f64 = 359.99;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn relative_to(self, origin: Point) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn offset(self, by: Point) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }

    /// Distance from the hub centre.
    pub fn radius(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f64 {
        self.relative_to(other).radius()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorSpan {
    pub start: f64,
    pub end: f64,
}

impl SectorSpan {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn is_large_arc(&self) -> bool {
        self.width() > HALF_TURN
    }

    /// Whether `angle` falls inside the painted part of the sector, gaps
    /// excluded.
    pub fn contains(&self, angle: f64) -> bool {
        let angle = angle.rem_euclid(FULL_TURN);
        (self.start..=self.end).contains(&angle)
    }
}

/// Raw angular width of one of `total` equal slices.
pub fn slice_width(total: usize) -> f64 {
    debug_assert!(total > 0, "a ring needs at least one sector");
    FULL_TURN / total as f64
}

/// Angular span of sector `index` out of `total`, with `gap` degrees shaved
/// off symmetrically so neighbouring sectors never touch.
pub fn sector_span(index: usize, total: usize, gap: f64) -> SectorSpan {
    let slice = slice_width(total);
    SectorSpan {
        start: index as f64 * slice + gap / 2.0,
        end: (index + 1) as f64 * slice - gap / 2.0,
    }
}

/// The one angle-to-point conversion. Layout, paths, hit-testing and the
/// orbital scene all go through here so they agree on where "up" is.
pub fn polar_to_cartesian(radius: f64, angle: f64) -> Point {
    let rad = angle.to_radians();
    Point::new(radius * rad.sin(), -radius * rad.cos())
}

/// Inverse of [`polar_to_cartesian`], normalised to `[0, 360)`.
pub fn angle_of(point: Point) -> f64 {
    point.x.atan2(-point.y).to_degrees().rem_euclid(FULL_TURN)
}

/// Index of the raw (gapless) slice that contains `angle`.
pub fn sector_at(angle: f64, total: usize) -> usize {
    let slice = slice_width(total);
    (angle.rem_euclid(FULL_TURN) / slice).floor() as usize % total
}

pub fn centroid(radius_inner: f64, radius_outer: f64, start: f64, end: f64) -> Point {
    polar_to_cartesian((radius_inner + radius_outer) / 2.0, (start + end) / 2.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Clockwise,
    CounterClockwise,
}

impl Sweep {
    fn svg_flag(self) -> u8 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Arc {
        radius: f64,
        large_arc: bool,
        sweep: Sweep,
        to: Point,
    },
    Close,
}

/// Closed outline of an annular sector.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorPath {
    commands: Vec<PathCommand>,
}

impl SectorPath {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_large_arc(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, PathCommand::Arc { large_arc: true, .. }))
    }
}

/// Outer arc from `end` back to `start`, a line inwards, the inner arc from
/// `start` to `end`, then close.
pub fn sector_path(radius_outer: f64, radius_inner: f64, start: f64, end: f64) -> SectorPath {
    let end = end.min(start + MAX_SWEEP);
    let large_arc = end - start > HALF_TURN;

    SectorPath {
        commands: vec![
            PathCommand::MoveTo(polar_to_cartesian(radius_outer, end)),
            PathCommand::Arc {
                radius: radius_outer,
                large_arc,
                sweep: Sweep::CounterClockwise,
                to: polar_to_cartesian(radius_outer, start),
            },
            PathCommand::LineTo(polar_to_cartesian(radius_inner, start)),
            PathCommand::Arc {
                radius: radius_inner,
                large_arc,
                sweep: Sweep::Clockwise,
                to: polar_to_cartesian(radius_inner, end),
            },
            PathCommand::Close,
        ],
    }
}

fn coord(v: f64) -> f64 {
    let v = (v * 100.0).round() / 100.0;
    if v == 0.0 { 0.0 } else { v }
}

/// SVG path data (`d` attribute).
impl fmt::Display for SectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for command in &self.commands {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match *command {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", coord(p.x), coord(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", coord(p.x), coord(p.y))?,
                PathCommand::Arc {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    f,
                    "A {r} {r} 0 {} {} {} {}",
                    u8::from(large_arc),
                    sweep.svg_flag(),
                    coord(to.x),
                    coord(to.y),
                    r = coord(radius),
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Radii and spacing of one ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingLayout {
    pub inner: f64,
    pub outer: f64,
    #[serde(default)]
    pub gap: f64,
}

impl RingLayout {
    pub const fn new(inner: f64, outer: f64, gap: f64) -> Self {
        Self { inner, outer, gap }
    }

    /// Scales the radii; the gap is angular and stays put.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.inner * factor, self.outer * factor, self.gap)
    }

    pub fn span(&self, index: usize, total: usize) -> SectorSpan {
        sector_span(index, total, self.gap)
    }

    pub fn centroid(&self, span: SectorSpan) -> Point {
        centroid(self.inner, self.outer, span.start, span.end)
    }

    pub fn path(&self, span: SectorSpan) -> SectorPath {
        sector_path(self.outer, self.inner, span.start, span.end)
    }

    pub fn contains(&self, radius: f64) -> bool {
        (self.inner..=self.outer).contains(&radius)
    }
}

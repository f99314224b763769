mod arc;
mod circle;
mod line;

pub use arc::ArcSegment;
pub use circle::CircleSegment;
pub use line::LineSegment;

use crate::math::angle::normalize_angle;
use crate::math::Point2;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Smallest box containing a single point.
    #[must_use]
    pub fn of_point(p: &Point2) -> Self {
        Self {
            min_x: p.x,
            max_x: p.x,
            min_y: p.y,
            max_y: p.y,
        }
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: &Point2) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grows the box to contain `other`.
    pub fn merge(&mut self, other: &Bounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }
}

/// Direction angle of the vector `from → to`, wrapped to `[0, 2π)`.
#[must_use]
pub fn bearing(from: &Point2, to: &Point2) -> f64 {
    normalize_angle((to.y - from.y).atan2(to.x - from.x))
}

/// Queries every boundary element must answer for region analysis.
///
/// All angular results are bearings as seen from an externally supplied
/// center point, wrapped to `[0, 2π)`.
pub trait Segment {
    /// First endpoint in walk order.
    fn start(&self) -> Point2;

    /// Second endpoint in walk order.
    fn end(&self) -> Point2;

    /// Arc length of the element.
    fn length(&self) -> f64;

    /// Slope `dy/dx` for straight elements; `None` for vertical lines and
    /// curved elements.
    fn slope(&self) -> Option<f64>;

    /// Minimum and maximum distance of the element from `center`.
    fn distance_range(&self, center: &Point2) -> (f64, f64);

    /// Angular envelope `(min, max)` of the element as seen from `center`.
    ///
    /// The pair is ordered counter-clockwise; `min` may be numerically
    /// larger than `max` when the envelope crosses the 0/2π seam.
    fn angular_range(&self, center: &Point2) -> (f64, f64);

    /// Angular envelope of only the sub-portions of the element lying at
    /// distance `radius` from `center`, or `None` if the element never
    /// reaches that radius.
    fn angular_range_at_radius(&self, center: &Point2, radius: f64) -> Option<(f64, f64)>;

    /// Intersection points with the segment `p0 → p1`, endpoints included.
    fn intersect_segment(&self, p0: &Point2, p1: &Point2) -> Vec<Point2>;

    /// Axis-aligned bounding box of the element.
    fn bounds(&self) -> Bounds;
}

/// A boundary element of a cross-section region.
#[derive(Debug, Clone)]
pub enum Element {
    /// A straight segment.
    Line(LineSegment),
    /// A circular arc.
    Arc(ArcSegment),
    /// A full circle.
    Circle(CircleSegment),
}

impl Segment for Element {
    fn start(&self) -> Point2 {
        match self {
            Element::Line(e) => e.start(),
            Element::Arc(e) => e.start(),
            Element::Circle(e) => e.start(),
        }
    }

    fn end(&self) -> Point2 {
        match self {
            Element::Line(e) => e.end(),
            Element::Arc(e) => e.end(),
            Element::Circle(e) => e.end(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Element::Line(e) => e.length(),
            Element::Arc(e) => e.length(),
            Element::Circle(e) => e.length(),
        }
    }

    fn slope(&self) -> Option<f64> {
        match self {
            Element::Line(e) => e.slope(),
            Element::Arc(e) => e.slope(),
            Element::Circle(e) => e.slope(),
        }
    }

    fn distance_range(&self, center: &Point2) -> (f64, f64) {
        match self {
            Element::Line(e) => e.distance_range(center),
            Element::Arc(e) => e.distance_range(center),
            Element::Circle(e) => e.distance_range(center),
        }
    }

    fn angular_range(&self, center: &Point2) -> (f64, f64) {
        match self {
            Element::Line(e) => e.angular_range(center),
            Element::Arc(e) => e.angular_range(center),
            Element::Circle(e) => e.angular_range(center),
        }
    }

    fn angular_range_at_radius(&self, center: &Point2, radius: f64) -> Option<(f64, f64)> {
        match self {
            Element::Line(e) => e.angular_range_at_radius(center, radius),
            Element::Arc(e) => e.angular_range_at_radius(center, radius),
            Element::Circle(e) => e.angular_range_at_radius(center, radius),
        }
    }

    fn intersect_segment(&self, p0: &Point2, p1: &Point2) -> Vec<Point2> {
        match self {
            Element::Line(e) => e.intersect_segment(p0, p1),
            Element::Arc(e) => e.intersect_segment(p0, p1),
            Element::Circle(e) => e.intersect_segment(p0, p1),
        }
    }

    fn bounds(&self) -> Bounds {
        match self {
            Element::Line(e) => e.bounds(),
            Element::Arc(e) => e.bounds(),
            Element::Circle(e) => e.bounds(),
        }
    }
}

use crate::error::{GeometryError, Result};
use crate::math::angle::{fold_max_angle, fold_min_angle};
use crate::math::intersect_2d::{segment_circle_intersect, segment_segment_intersect};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{bearing, Bounds, Segment};

/// A straight boundary segment between two points.
#[derive(Debug, Clone)]
pub struct LineSegment {
    p1: Point2,
    p2: Point2,
}

impl LineSegment {
    /// Creates a new segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide.
    pub fn new(p1: Point2, p2: Point2) -> Result<Self> {
        if (p2 - p1).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("zero-length segment".into()).into());
        }
        Ok(Self { p1, p2 })
    }
}

impl Segment for LineSegment {
    fn start(&self) -> Point2 {
        self.p1
    }

    fn end(&self) -> Point2 {
        self.p2
    }

    fn length(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }

    fn slope(&self) -> Option<f64> {
        let d: Vector2 = self.p2 - self.p1;
        if d.x.abs() < TOLERANCE {
            None
        } else {
            Some(d.y / d.x)
        }
    }

    fn distance_range(&self, center: &Point2) -> (f64, f64) {
        let d1 = (self.p1 - center).norm();
        let d2 = (self.p2 - center).norm();
        let mut min = d1.min(d2);
        let max = d1.max(d2);

        // The perpendicular foot undercuts both endpoints when it falls
        // within the segment.
        let dir: Vector2 = self.p2 - self.p1;
        let t = (center - self.p1).dot(&dir) / dir.norm_squared();
        if t > 0.0 && t < 1.0 {
            let foot = self.p1 + dir * t;
            min = min.min((foot - center).norm());
        }

        (min, max)
    }

    fn angular_range(&self, center: &Point2) -> (f64, f64) {
        // The bearing varies monotonically along a straight segment, so the
        // envelope is spanned by the endpoints.
        let b1 = bearing(center, &self.p1);
        let b2 = bearing(center, &self.p2);
        (fold_min_angle(b1, b2), fold_max_angle(b1, b2))
    }

    fn angular_range_at_radius(&self, center: &Point2, radius: f64) -> Option<(f64, f64)> {
        let crossings = segment_circle_intersect(&self.p1, &self.p2, center, radius);
        let mut angles = crossings.iter().map(|p| bearing(center, p));
        let first = angles.next()?;
        let (mut min, mut max) = (first, first);
        for a in angles {
            min = fold_min_angle(min, a);
            max = fold_max_angle(max, a);
        }
        Some((min, max))
    }

    fn intersect_segment(&self, p0: &Point2, p1: &Point2) -> Vec<Point2> {
        segment_segment_intersect(&self.p1, &self.p2, p0, p1)
            .into_iter()
            .collect()
    }

    fn bounds(&self) -> Bounds {
        let mut b = Bounds::of_point(&self.p1);
        b.include(&self.p2);
        b
    }
}

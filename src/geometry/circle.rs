use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::angle::{fold_max_angle, fold_min_angle, normalize_angle};
use crate::math::compare::is_close_default;
use crate::math::intersect_2d::{circle_circle_intersect, segment_circle_intersect};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{bearing, Bounds, Segment};

/// A full circle acting as a closed boundary element.
///
/// Its nominal walk endpoints coincide at angle zero.
#[derive(Debug, Clone)]
pub struct CircleSegment {
    center: Point2,
    radius: f64,
}

impl CircleSegment {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("circle radius must be positive".into()).into());
        }
        Ok(Self { center, radius })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Segment for CircleSegment {
    fn start(&self) -> Point2 {
        Point2::new(self.center.x + self.radius, self.center.y)
    }

    fn end(&self) -> Point2 {
        self.start()
    }

    fn length(&self) -> f64 {
        TAU * self.radius
    }

    fn slope(&self) -> Option<f64> {
        None
    }

    fn distance_range(&self, center: &Point2) -> (f64, f64) {
        let d = (self.center - center).norm();
        ((d - self.radius).abs(), d + self.radius)
    }

    fn angular_range(&self, center: &Point2) -> (f64, f64) {
        let offset: Vector2 = self.center - center;
        let d = offset.norm();
        if d < self.radius {
            // Seen from inside, the circle covers every direction.
            return (0.0, TAU);
        }
        let toward = bearing(center, &self.center);
        let half_width = (self.radius / d).asin();
        (
            normalize_angle(toward - half_width),
            normalize_angle(toward + half_width),
        )
    }

    fn angular_range_at_radius(&self, center: &Point2, radius: f64) -> Option<(f64, f64)> {
        let offset: Vector2 = self.center - center;
        if offset.norm() < TOLERANCE {
            if is_close_default(self.radius, radius) {
                return Some((0.0, TAU));
            }
            return None;
        }

        let crossings = circle_circle_intersect(&self.center, self.radius, center, radius);
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
        segment_circle_intersect(p0, p1, &self.center, self.radius)
    }

    fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.center.x - self.radius,
            max_x: self.center.x + self.radius,
            min_y: self.center.y - self.radius,
            max_y: self.center.y + self.radius,
        }
    }
}

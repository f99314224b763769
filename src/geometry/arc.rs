use std::f64::consts::{PI, TAU};

use crate::error::{GeometryError, Result};
use crate::math::angle::{angle_span, fold_max_angle, fold_min_angle, normalize_angle};
use crate::math::compare::{is_close_default, less, less_equal};
use crate::math::intersect_2d::{circle_circle_intersect, segment_circle_intersect};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{bearing, Bounds, Segment};

/// A circular arc swept counter-clockwise from `start_angle` to `end_angle`.
///
/// After construction `start_angle` lies in `[0, 2π)` and `end_angle` in
/// `(start_angle, start_angle + 2π]`; coincident input angles describe a
/// full turn.
#[derive(Debug, Clone)]
pub struct ArcSegment {
    center: Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}

impl ArcSegment {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive.
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        let start_angle = normalize_angle(start_angle);
        let end_angle = start_angle + angle_span(start_angle, end_angle);
        Ok(Self {
            center,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Returns the center of the arc circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the arc circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the start angle in `[0, 2π)`.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the end angle in `(start_angle, start_angle + 2π]`.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Whether the circle angle `angle` lies on the arc, within tolerance.
    #[must_use]
    pub fn contains_angle(&self, angle: f64) -> bool {
        let mut a = normalize_angle(angle);
        if less(a, self.start_angle) {
            a += TAU;
        }
        less_equal(a, self.end_angle)
    }

    fn point_at(&self, angle: f64) -> Point2 {
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

impl Segment for ArcSegment {
    fn start(&self) -> Point2 {
        self.point_at(self.start_angle)
    }

    fn end(&self) -> Point2 {
        self.point_at(self.end_angle)
    }

    fn length(&self) -> f64 {
        self.radius * (self.end_angle - self.start_angle)
    }

    fn slope(&self) -> Option<f64> {
        None
    }

    fn distance_range(&self, center: &Point2) -> (f64, f64) {
        let offset: Vector2 = self.center - center;
        let d = offset.norm();
        if d < TOLERANCE {
            // Concentric view: every arc point sits at the radius.
            return (self.radius, self.radius);
        }

        let d1 = (self.start() - center).norm();
        let d2 = (self.end() - center).norm();
        let mut min = d1.min(d2);
        let mut max = d1.max(d2);

        // Circle angles of the points nearest to and farthest from `center`.
        let toward = bearing(&self.center, center);
        if self.contains_angle(toward) {
            min = min.min((d - self.radius).abs());
        }
        if self.contains_angle(toward + PI) {
            max = max.max(d + self.radius);
        }

        (min, max)
    }

    fn angular_range(&self, center: &Point2) -> (f64, f64) {
        let offset: Vector2 = self.center - center;
        let d = offset.norm();
        if d < TOLERANCE {
            return (self.start_angle, normalize_angle(self.end_angle));
        }

        let start = self.start();
        let end = self.end();
        if d <= self.radius {
            // Seen from inside the circle the bearing advances monotonically
            // with the circle angle.
            return (bearing(center, &start), bearing(center, &end));
        }

        // Seen from outside, the extremes are at the endpoints or at the
        // tangent touch points, whichever lie on the arc.
        let mut candidates = vec![bearing(center, &start), bearing(center, &end)];
        let toward = bearing(&self.center, center);
        let beta = (self.radius / d).acos();
        for touch in [toward + beta, toward - beta] {
            if self.contains_angle(touch) {
                candidates.push(bearing(center, &self.point_at(touch)));
            }
        }

        let (mut min, mut max) = (candidates[0], candidates[0]);
        for a in &candidates[1..] {
            min = fold_min_angle(min, *a);
            max = fold_max_angle(max, *a);
        }
        (min, max)
    }

    fn angular_range_at_radius(&self, center: &Point2, radius: f64) -> Option<(f64, f64)> {
        let offset: Vector2 = self.center - center;
        if offset.norm() < TOLERANCE {
            // Concentric: the whole arc lies on the queried radius or none
            // of it does.
            if is_close_default(self.radius, radius) {
                return Some((self.start_angle, normalize_angle(self.end_angle)));
            }
            return None;
        }

        let crossings = circle_circle_intersect(&self.center, self.radius, center, radius);
        let mut angles = crossings
            .iter()
            .filter(|p| self.contains_angle(bearing(&self.center, p)))
            .map(|p| bearing(center, p));
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
            .into_iter()
            .filter(|p| self.contains_angle(bearing(&self.center, p)))
            .collect()
    }

    fn bounds(&self) -> Bounds {
        let mut b = Bounds::of_point(&self.start());
        b.include(&self.end());
        for quadrant in [0.0, 0.5 * PI, PI, 1.5 * PI] {
            if self.contains_angle(quadrant) {
                b.include(&self.point_at(quadrant));
            }
        }
        b
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn arc(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> ArcSegment {
        ArcSegment::new(Point2::new(cx, cy), r, start, end).unwrap()
    }

    #[test]
    fn rejects_non_positive_radius() {
        assert!(ArcSegment::new(Point2::origin(), 0.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn angles_are_normalized() {
        let a = arc(0.0, 0.0, 1.0, -FRAC_PI_2, FRAC_PI_2);
        assert_relative_eq!(a.start_angle(), 1.5 * PI);
        assert_relative_eq!(a.end_angle(), 2.5 * PI);
        assert!(a.contains_angle(0.0));
        assert!(a.contains_angle(-0.2));
        assert!(!a.contains_angle(PI));
    }

    #[test]
    fn concentric_view() {
        let a = arc(0.0, 0.0, 5.0, 0.25, 0.4);
        let (dmin, dmax) = a.distance_range(&Point2::origin());
        assert_relative_eq!(dmin, 5.0);
        assert_relative_eq!(dmax, 5.0);
        let (amin, amax) = a.angular_range(&Point2::origin());
        assert_relative_eq!(amin, 0.25);
        assert_relative_eq!(amax, 0.4);
    }

    #[test]
    fn distance_range_from_external_point() {
        // Near half of a circle around (10, 0), facing the origin.
        let a = arc(10.0, 0.0, 2.0, FRAC_PI_2, 1.5 * PI);
        let (dmin, dmax) = a.distance_range(&Point2::origin());
        assert_relative_eq!(dmin, 8.0, epsilon = 1e-12);
        // Farthest points are the endpoints (10, ±2).
        assert_relative_eq!(dmax, 104.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn angular_range_from_external_point_hits_tangents() {
        let a = arc(10.0, 0.0, 2.0, FRAC_PI_2, 1.5 * PI);
        let (amin, amax) = a.angular_range(&Point2::origin());
        let half_width = (2.0_f64 / 10.0).asin();
        assert_relative_eq!(amax, half_width, epsilon = 1e-9);
        assert_relative_eq!(amin, TAU - half_width, epsilon = 1e-9);
    }

    #[test]
    fn radius_restriction_concentric() {
        let a = arc(0.0, 0.0, 5.0, 0.25, 0.4);
        let (amin, amax) = a
            .angular_range_at_radius(&Point2::origin(), 5.0)
            .unwrap();
        assert_relative_eq!(amin, 0.25);
        assert_relative_eq!(amax, 0.4);
        assert!(a.angular_range_at_radius(&Point2::origin(), 6.0).is_none());
    }

    #[test]
    fn segment_intersection_respects_arc_range() {
        // Upper semicircle of the unit circle.
        let a = arc(0.0, 0.0, 1.0, 0.0, PI);
        let hits = a.intersect_segment(&Point2::new(-2.0, 0.5), &Point2::new(2.0, 0.5));
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        let hits = a.intersect_segment(&Point2::new(-2.0, -0.5), &Point2::new(2.0, -0.5));
        assert!(hits.is_empty(), "hits={hits:?}");
    }

    #[test]
    fn bounds_include_quadrant_extremes() {
        // Quarter arc through the top of the circle.
        let a = arc(0.0, 0.0, 1.0, 0.25 * PI, 0.75 * PI);
        let b = a.bounds();
        assert_relative_eq!(b.max_y, 1.0, epsilon = 1e-12);
        assert!(b.min_x < -0.7 && b.max_x > 0.7, "bounds={b:?}");
    }
}

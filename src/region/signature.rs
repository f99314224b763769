//! Envelope signature of a region: its angular and radial extent as seen
//! from the rotation center.

use crate::geometry::{Bounds, Element, Segment};
use crate::math::angle::{angle_span, fold_max_angle, fold_min_angle};
use crate::math::compare::is_close_default;
use crate::math::{round_to, Point2, Vector2};

use super::Region;

/// Decimal digits the angular span is rounded to.
const ALPHA_DECIMALS: i32 = 3;

impl Region {
    /// Folds every element's angular and radial envelope into the region
    /// signature. Called once from construction.
    pub(super) fn compute_signature(&mut self) {
        let Some(first) = self.elements.first() else {
            return;
        };

        let (mut min_angle, mut max_angle) = first.angular_range(&self.center);
        for element in &self.elements {
            let (dist_min, dist_max) = element.distance_range(&self.center);
            self.min_dist = self.min_dist.min(dist_min);
            self.max_dist = self.max_dist.max(dist_max);

            let (angle_min, angle_max) = element.angular_range(&self.center);
            min_angle = fold_min_angle(min_angle, angle_min);
            max_angle = fold_max_angle(max_angle, angle_max);
        }

        self.min_angle = min_angle;
        self.max_angle = max_angle;
        self.alpha = round_to(angle_span(min_angle, max_angle), ALPHA_DECIMALS);
    }

    /// Angular envelope of only the boundary portions lying at distance
    /// `radius` from `center`.
    ///
    /// Measures how much of the region actually touches a given radius
    /// (e.g. the air-gap boundary) instead of its full angular extent.
    /// Returns `None` when no element reaches that radius.
    #[must_use]
    pub fn angular_envelope_at_radius(&self, center: &Point2, radius: f64) -> Option<(f64, f64)> {
        let mut envelope: Option<(f64, f64)> = None;
        for element in &self.elements {
            if let Some((min, max)) = element.angular_range_at_radius(center, radius) {
                envelope = Some(match envelope {
                    None => (min, max),
                    Some((acc_min, acc_max)) => (
                        fold_min_angle(acc_min, min),
                        fold_max_angle(acc_max, max),
                    ),
                });
            }
        }
        envelope
    }

    /// Axis-aligned bounding box of the boundary, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let mut elements = self.elements.iter();
        let mut bounds = elements.next()?.bounds();
        for element in elements {
            bounds.merge(&element.bounds());
        }
        Some(bounds)
    }

    /// Whether the straight boundary elements collapse into exactly four
    /// slope groups.
    ///
    /// Consecutive elements with equal slope belong to one group; the same
    /// slope reappearing after other elements opens a new group. Arcs and
    /// circles are ignored. Used as a cheap proxy for rectangular magnet
    /// pockets.
    #[must_use]
    pub fn is_rectangular(&self) -> bool {
        let mut groups = 0usize;
        let mut prev: Option<(usize, Option<f64>)> = None;

        for (index, element) in self.elements.iter().enumerate() {
            let Element::Line(line) = element else {
                continue;
            };
            let slope = line.slope();
            match prev {
                None => groups = 1,
                Some((prev_index, prev_slope)) => {
                    if slopes_match(prev_slope, slope) {
                        // Same slope but not an immediate continuation.
                        if prev_index + 1 != index {
                            groups += 1;
                        }
                    } else {
                        groups += 1;
                    }
                }
            }
            prev = Some((index, slope));
        }

        groups == 4
    }

    /// Boundary node closest to the axis through `center` at `angle`.
    ///
    /// Returns `(distance, foot_on_axis, node)` for the winning node, or
    /// `None` for an empty region.
    #[must_use]
    pub fn nearest_node_to_axis(&self, center: &Point2, angle: f64) -> Option<(f64, Point2, Point2)> {
        let dir = Vector2::new(angle.cos(), angle.sin());
        let mut best: Option<(f64, Point2, Point2)> = None;
        for node in self.nodes() {
            let t = (node - center).dot(&dir);
            let foot = center + dir * t;
            let dist = (node - foot).norm();
            if best.is_none_or(|(d, _, _)| dist < d) {
                best = Some((dist, foot, node));
            }
        }
        best
    }
}

/// Slope equality where two vertical lines count as parallel.
fn slopes_match(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => is_close_default(a, b),
        _ => false,
    }
}

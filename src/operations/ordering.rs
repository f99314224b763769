//! Deterministic ordering of regions across independent analysis runs.

use std::cmp::Ordering;

use crate::math::compare::{is_close, is_close_default};
use crate::math::round_to;
use crate::region::Region;

/// Total order over regions, usable to sort and match region sets from
/// different sweeps of the same design.
///
/// Priority, descending: symmetry order, symmetry kind, occurrence count;
/// then ascending radial envelope and angular span under tolerant rounded
/// comparison (the rounding mode follows `a`'s sweep tolerance), with the
/// envelope start as the final tie-break.
#[must_use]
pub fn canonical_cmp(a: &Region, b: &Region) -> Ordering {
    if a.symmetry_order != b.symmetry_order {
        return b.symmetry_order.cmp(&a.symmetry_order);
    }
    if a.symmetry_kind != b.symmetry_kind {
        return b.symmetry_kind.cmp(&a.symmetry_kind);
    }
    if a.occurrence_count != b.occurrence_count {
        return b.occurrence_count.cmp(&a.occurrence_count);
    }

    if a.tolerance > 0.0 {
        if !is_close(
            round_to(a.min_dist, 4),
            round_to(b.min_dist, 4),
            1e-3,
            a.tolerance,
        ) {
            return a.min_dist.total_cmp(&b.min_dist);
        }
        if !is_close(
            round_to(a.max_dist, 4),
            round_to(b.max_dist, 4),
            1e-3,
            a.tolerance,
        ) {
            return a.max_dist.total_cmp(&b.max_dist);
        }
        if !is_close(round_to(a.alpha, 2), round_to(b.alpha, 2), 1e-1, 1e-1) {
            return a.alpha.total_cmp(&b.alpha);
        }
    } else {
        if !is_close_default(round_to(a.min_dist, 2), round_to(b.min_dist, 2)) {
            return a.min_dist.total_cmp(&b.min_dist);
        }
        if !is_close_default(round_to(a.max_dist, 2), round_to(b.max_dist, 2)) {
            return a.max_dist.total_cmp(&b.max_dist);
        }
        if !is_close(round_to(a.alpha, 2), round_to(b.alpha, 2), 1e-1, 1e-2) {
            return a.alpha.total_cmp(&b.alpha);
        }
    }

    a.min_angle.total_cmp(&b.min_angle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Element, LineSegment};
    use crate::math::Point2;
    use crate::region::SymmetryKind;

    fn polar(r: f64, a: f64) -> Point2 {
        Point2::new(r * a.cos(), r * a.sin())
    }

    fn region(r_min: f64, angle: f64) -> Region {
        let e = LineSegment::new(polar(r_min, angle), polar(r_min + 2.0, angle + 0.1)).unwrap();
        Region::new(vec![Element::Line(e)], Point2::origin(), 0.0)
    }

    #[test]
    fn higher_symmetry_order_sorts_first() {
        let mut a = region(10.0, 0.1);
        a.symmetry_order = 8;
        let mut b = region(10.0, 0.1);
        b.symmetry_order = 4;
        assert_eq!(canonical_cmp(&a, &b), Ordering::Less);
        assert_eq!(canonical_cmp(&b, &a), Ordering::Greater);
    }

    #[test]
    fn kind_then_count_break_order_ties() {
        let mut a = region(10.0, 0.1);
        a.symmetry_kind = SymmetryKind::Simple;
        let mut b = region(10.0, 0.1);
        b.symmetry_kind = SymmetryKind::Alternating;
        assert_eq!(canonical_cmp(&a, &b), Ordering::Less);

        let mut c = region(10.0, 0.1);
        c.symmetry_kind = SymmetryKind::Simple;
        c.occurrence_count = 5;
        assert_eq!(canonical_cmp(&c, &a), Ordering::Less);
    }

    #[test]
    fn radial_envelope_sorts_ascending() {
        let near = region(10.0, 0.1);
        let far = region(20.0, 0.1);
        assert_eq!(canonical_cmp(&near, &far), Ordering::Less);
        assert_eq!(canonical_cmp(&far, &near), Ordering::Greater);
    }

    #[test]
    fn comparison_is_irreflexive_and_antisymmetric() {
        let a = region(10.0, 0.1);
        assert_eq!(canonical_cmp(&a, &a), Ordering::Equal);

        let b = region(12.0, 0.4);
        assert_eq!(canonical_cmp(&a, &b), canonical_cmp(&b, &a).reverse());
    }

    #[test]
    fn min_angle_is_the_final_tie_break() {
        let a = region(10.0, 0.1);
        let b = region(10.0, 0.5);
        assert_eq!(canonical_cmp(&a, &b), Ordering::Less);
    }

    #[test]
    fn sorting_is_deterministic_across_shuffles() {
        let mut forward = vec![region(20.0, 0.3), region(10.0, 0.1), region(15.0, 0.2)];
        let mut backward = vec![region(15.0, 0.2), region(10.0, 0.1), region(20.0, 0.3)];
        forward.sort_by(canonical_cmp);
        backward.sort_by(canonical_cmp);
        for (a, b) in forward.iter().zip(&backward) {
            assert!(canonical_cmp(a, b) == Ordering::Equal);
        }
    }
}

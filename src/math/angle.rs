//! Angle arithmetic on the unit circle.
//!
//! Angles are radians measured counter-clockwise from the positive x axis.
//! Naive scalar min/max is wrong across the 0/2π seam, so envelope folds
//! use [`fold_min_angle`]/[`fold_max_angle`], which pick the representative
//! that keeps the covered span below a half turn.

use std::f64::consts::{PI, TAU};

use super::compare::{is_close_default, less_equal};

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(mut angle: f64) -> f64 {
    while angle < 0.0 {
        angle += TAU;
    }
    while angle >= TAU {
        angle -= TAU;
    }
    angle
}

/// Angular distance from `start` to `end` going counter-clockwise.
///
/// The result is in `(0, 2π]`; coincident angles yield a full turn.
#[must_use]
pub fn angle_span(start: f64, end: f64) -> f64 {
    let mut end = end;
    if less_equal(end, start) {
        end += TAU;
    }
    let span = end - start;
    if less_equal(span, TAU) {
        span
    } else {
        span - TAU
    }
}

/// Of two angles, returns the one the counter-clockwise sweep reaches first.
#[must_use]
pub fn fold_min_angle(a: f64, b: f64) -> f64 {
    if angle_span(a, b) < PI {
        a
    } else {
        b
    }
}

/// Of two angles, returns the one the counter-clockwise sweep reaches last.
#[must_use]
pub fn fold_max_angle(a: f64, b: f64) -> f64 {
    if angle_span(a, b) < PI {
        b
    } else {
        a
    }
}

/// Midpoint of the counter-clockwise sweep from `a` to `b`, wrapped to `[0, 2π)`.
#[must_use]
pub fn middle_angle(a: f64, b: f64) -> f64 {
    let a = normalize_angle(a);
    let b = normalize_angle(b);
    if is_close_default(a, b) {
        return a;
    }
    normalize_angle(a + angle_span(a, b) / 2.0)
}

/// Number of whole periods of length `period` in a full turn.
///
/// The quotient is rounded to one decimal digit; a non-integral result
/// means the period does not tile the circle and yields 0.
#[must_use]
pub fn periods_per_turn(period: f64) -> u32 {
    let period = normalize_angle(period);
    if is_close_default(period, 0.0) {
        return 1;
    }
    let tenths = (TAU / period * 10.0).round();
    if tenths % 10.0 == 0.0 {
        (tenths / 10.0) as u32
    } else {
        0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn normalize_wraps_both_directions() {
        assert_relative_eq!(normalize_angle(-FRAC_PI_2), 1.5 * PI);
        assert_relative_eq!(normalize_angle(TAU + 0.25), 0.25);
        assert_relative_eq!(normalize_angle(TAU), 0.0);
    }

    #[test]
    fn span_is_counter_clockwise() {
        assert_relative_eq!(angle_span(0.0, FRAC_PI_2), FRAC_PI_2);
        assert_relative_eq!(angle_span(1.5 * PI, FRAC_PI_2), PI);
        // Coincident angles mean a full turn, not zero.
        assert_relative_eq!(angle_span(0.3, 0.3), TAU);
    }

    #[test]
    fn folds_cross_the_seam() {
        // 6.1 rad is "before" 0.2 rad when sweeping counter-clockwise.
        assert_relative_eq!(fold_min_angle(6.1, 0.2), 6.1);
        assert_relative_eq!(fold_max_angle(6.1, 0.2), 0.2);
        assert_relative_eq!(fold_min_angle(0.2, 6.1), 6.1);
        assert_relative_eq!(fold_max_angle(0.2, 6.1), 0.2);
    }

    #[test]
    fn middle_angle_wraps() {
        assert_relative_eq!(middle_angle(0.2, 0.4), 0.3, epsilon = 1e-12);
        let mid = middle_angle(6.1, 0.2);
        // Halfway across the seam: 6.1 + 0.383.../2, wrapped.
        assert_relative_eq!(mid, normalize_angle(6.1 + angle_span(6.1, 0.2) / 2.0));
        assert!(mid < 0.2);
    }

    #[test]
    fn periods_that_tile_the_circle() {
        assert_eq!(periods_per_turn(PI / 4.0), 8);
        assert_eq!(periods_per_turn(TAU / 7.0), 7);
        assert_eq!(periods_per_turn(PI / 6.0), 12);
    }

    #[test]
    fn periods_that_do_not_tile() {
        assert_eq!(periods_per_turn(1.0), 0);
        assert_eq!(periods_per_turn(0.8), 0);
    }
}

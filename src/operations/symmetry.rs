//! Periodic-symmetry inference from a cluster of equivalent regions.
//!
//! After a rotational sweep has registered every occurrence of a shape,
//! the gaps between consecutive occurrences reveal the angular period at
//! which the shape repeats. An undetermined period is a normal terminal
//! state, signalled by `period == 0` and `symmetry_order == 0`.

use std::f64::consts::TAU;

use crate::error::Result;
use crate::math::angle::{angle_span, middle_angle, periods_per_turn};
use crate::math::compare::{greater, is_close_default, less, less_equal};
use crate::math::round_to;
use crate::region::{Region, RegionId, RegionStore, SymmetryKind};

/// Decimal digits occurrence gaps are rounded to before binning.
const GAP_DECIMALS: i32 = 2;

/// Share of a single gap value above which the other gap counts as noise.
const MAJORITY_SHARE_MIN: f64 = 0.75;

/// Derives the angular period, phase, and symmetry order of a canonical
/// region from its registered occurrences.
///
/// Call exactly once after clustering is final; a repeated call recomputes
/// from scratch and overwrites the previous result.
pub struct InferSymmetry {
    region: RegionId,
}

impl InferSymmetry {
    /// Creates the inference pass for one canonical region.
    #[must_use]
    pub fn new(region: RegionId) -> Self {
        Self { region }
    }

    /// Executes the pass, mutating the canonical region in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the region or one of its occurrences is not in
    /// the store.
    pub fn execute(&self, store: &mut RegionStore) -> Result<()> {
        let occurrences: Vec<(f64, f64)> = {
            let canonical = store.region(self.region)?;
            canonical
                .equivalent
                .iter()
                .map(|id| store.region(*id).map(|r| (r.min_angle, r.max_angle)))
                .collect::<std::result::Result<_, _>>()?
        };

        let canonical = store.region_mut(self.region)?;
        canonical.period = 0.0;
        canonical.symmetry_order = 0;
        canonical.symmetry_kind = SymmetryKind::None;

        if occurrences.len() < 2 {
            // A single pair cannot establish periodicity; a later bisection
            // step may still split the sector in two.
            return Ok(());
        }

        // Histogram of rounded gaps between consecutive occurrences,
        // starting from the canonical region itself.
        let mut histogram: Vec<(i64, usize)> = Vec::new();
        let mut prev = canonical.min_angle;
        for (min_angle, _) in &occurrences {
            let gap = round_to(angle_span(prev, *min_angle), GAP_DECIMALS);
            let key = (gap * 100.0).round() as i64;
            match histogram.iter_mut().find(|(k, _)| *k == key) {
                Some((_, count)) => *count += 1,
                None => histogram.push((key, 1)),
            }
            prev = *min_angle;
        }

        if histogram.len() == 1 {
            // Uniform gaps all around.
            canonical.period = angle_span(canonical.min_angle, occurrences[0].0);
            canonical.phase_start = middle_angle(canonical.max_angle, occurrences[0].0);
            canonical.symmetry_kind = SymmetryKind::Simple;
            canonical.symmetry_order = periods_per_turn(canonical.period);
            return Ok(());
        }

        if histogram.len() > 2 {
            // Patterns with three or more distinct gaps are not modeled.
            return Ok(());
        }

        if occurrences.len() < 4 {
            // Two distinct gaps need more samples to disambiguate.
            return Ok(());
        }

        let majority = histogram.iter().map(|(_, count)| *count).max().unwrap_or(0);
        let share = majority as f64 / (occurrences.len() + 1) as f64;
        if share > MAJORITY_SHARE_MIN {
            // The minority gap is measurement noise.
            canonical.period = angle_span(canonical.min_angle, occurrences[0].0);
            canonical.phase_start = middle_angle(canonical.max_angle, occurrences[0].0);
            canonical.symmetry_kind = SymmetryKind::Majority;
            canonical.symmetry_order = periods_per_turn(canonical.period);
            return Ok(());
        }

        // Assume an alternating two-gap pattern: the period spans one short
        // and one long gap.
        canonical.period = angle_span(canonical.min_angle, occurrences[1].0);
        canonical.symmetry_kind = SymmetryKind::Alternating;
        canonical.symmetry_order = periods_per_turn(canonical.period);

        let first_gap = angle_span(canonical.min_angle, occurrences[0].0);
        let second_gap = angle_span(occurrences[0].0, occurrences[1].0);
        if is_close_default(first_gap, second_gap) {
            // Equal sub-gaps contradict the alternation hypothesis.
            canonical.period = 0.0;
            return Ok(());
        }

        canonical.phase_start = if first_gap < second_gap {
            middle_angle(occurrences[0].1, occurrences[1].0)
        } else {
            middle_angle(canonical.max_angle, occurrences[0].0)
        };
        Ok(())
    }
}

/// Lazy sequence of symmetry-cut angles, stepping by one period.
///
/// Restartable: a fresh iterator is produced by every
/// [`Region::symmetry_lines`] call.
#[derive(Debug, Clone)]
pub struct SymmetryLines {
    next: f64,
    period: f64,
    end: f64,
}

impl SymmetryLines {
    fn empty() -> Self {
        Self {
            next: 0.0,
            period: 0.0,
            end: 0.0,
        }
    }
}

impl Iterator for SymmetryLines {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.period <= 0.0 || self.next >= self.end {
            return None;
        }
        let angle = self.next;
        self.next += self.period;
        Some(angle)
    }
}

impl Region {
    /// Angles at which symmetry cuts should be drawn between `start_angle`
    /// and `end_angle`.
    ///
    /// The phase is first shifted by whole periods into
    /// `[start_angle, start_angle + period)`; that window is recorded as
    /// `sym_start_angle`/`sym_end_angle` for the caller's cutting step.
    /// An `end_angle` at or before `start_angle` is read as wrapping once
    /// around the circle. Empty when no period is known.
    pub fn symmetry_lines(&mut self, start_angle: f64, end_angle: f64) -> SymmetryLines {
        if self.period <= 0.0 {
            return SymmetryLines::empty();
        }

        let mut end = end_angle;
        if less_equal(end, start_angle) {
            end += TAU;
        }

        let mut angle = self.phase_start;
        while less(angle, start_angle) {
            angle += self.period;
        }
        while greater(angle, start_angle + self.period) {
            angle -= self.period;
        }

        self.sym_start_angle = angle;
        self.sym_end_angle = angle + self.period;

        SymmetryLines {
            next: angle,
            period: self.period,
            end,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Element, LineSegment};
    use crate::math::Point2;
    use crate::operations::equivalence::RegisterOccurrence;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_4, FRAC_PI_2, PI};

    fn polar(r: f64, a: f64) -> Point2 {
        Point2::new(r * a.cos(), r * a.sin())
    }

    fn wedge(rotation: f64) -> Region {
        let a = LineSegment::new(polar(10.0, 0.10 + rotation), polar(10.5, 0.15 + rotation));
        let b = LineSegment::new(polar(10.5, 0.15 + rotation), polar(10.0, 0.20 + rotation));
        Region::new(
            vec![Element::Line(a.unwrap()), Element::Line(b.unwrap())],
            Point2::origin(),
            0.0,
        )
    }

    /// Builds a canonical wedge plus occurrences at the given rotations.
    fn cluster(store: &mut RegionStore, rotations: &[f64]) -> RegionId {
        let canonical = store.insert(wedge(0.0));
        for rotation in rotations {
            let id = store.insert(wedge(*rotation));
            assert!(RegisterOccurrence::new(canonical, id).execute(store).unwrap());
        }
        canonical
    }

    #[test]
    fn uniform_gaps_yield_simple_symmetry() {
        let mut store = RegionStore::new();
        let rotations: Vec<f64> = (1..8).map(|k| f64::from(k) * FRAC_PI_4).collect();
        let id = cluster(&mut store, &rotations);

        InferSymmetry::new(id).execute(&mut store).unwrap();

        let r = store.region(id).unwrap();
        assert_eq!(r.symmetry_kind, SymmetryKind::Simple);
        assert!((r.period - FRAC_PI_4).abs() < 1e-3, "period={}", r.period);
        assert_eq!(r.symmetry_order, 8);
        // Midpoint between the canonical envelope end and the first
        // occurrence's envelope start.
        assert_relative_eq!(r.phase_start, (0.2 + 0.1 + FRAC_PI_4) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn single_occurrence_is_inconclusive() {
        let mut store = RegionStore::new();
        let id = cluster(&mut store, &[0.9]);
        InferSymmetry::new(id).execute(&mut store).unwrap();

        let r = store.region(id).unwrap();
        assert!(r.period == 0.0);
        assert_eq!(r.symmetry_order, 0);
        assert_eq!(r.symmetry_kind, SymmetryKind::None);
    }

    #[test]
    fn three_distinct_gaps_are_inconclusive() {
        let mut store = RegionStore::new();
        let id = cluster(&mut store, &[0.3, 0.8, 1.5, 1.8]);
        InferSymmetry::new(id).execute(&mut store).unwrap();
        assert!(store.region(id).unwrap().period == 0.0);
    }

    #[test]
    fn two_gaps_with_too_few_samples_are_inconclusive() {
        let mut store = RegionStore::new();
        let id = cluster(&mut store, &[0.3, 0.8, 1.1]);
        InferSymmetry::new(id).execute(&mut store).unwrap();
        assert!(store.region(id).unwrap().period == 0.0);
    }

    #[test]
    fn dominant_gap_wins_as_majority() {
        let mut store = RegionStore::new();
        let g = PI / 6.0;
        // Seven gaps of g and one outlier of 0.7.
        let rotations: Vec<f64> = (1..7)
            .map(|k| f64::from(k) * g)
            .chain([6.0 * g + 0.7, 7.0 * g + 0.7])
            .collect();
        let id = cluster(&mut store, &rotations);

        InferSymmetry::new(id).execute(&mut store).unwrap();

        let r = store.region(id).unwrap();
        assert_eq!(r.symmetry_kind, SymmetryKind::Majority);
        assert!((r.period - g).abs() < 1e-3, "period={}", r.period);
        assert_eq!(r.symmetry_order, 12);
    }

    #[test]
    fn alternating_gaps_span_one_long_period() {
        let mut store = RegionStore::new();
        let id = cluster(&mut store, &[0.3, 0.8, 1.1, 1.6]);
        InferSymmetry::new(id).execute(&mut store).unwrap();

        let r = store.region(id).unwrap();
        assert_eq!(r.symmetry_kind, SymmetryKind::Alternating);
        assert!((r.period - 0.8).abs() < 1e-9, "period={}", r.period);
        // Short sub-gap first: phase anchors between occurrences 0 and 1.
        assert_relative_eq!(r.phase_start, 0.7, epsilon = 1e-9);
    }

    #[test]
    fn equal_sub_gaps_reject_the_alternation() {
        let mut store = RegionStore::new();
        // Sub-gaps differ by 3e-8 but round into distinct 2-decimal bins.
        let g1 = 0.304_999_99;
        let g2 = 0.305_000_02;
        let id = cluster(
            &mut store,
            &[g1, g1 + g2, 2.0 * g1 + g2, 2.0 * (g1 + g2)],
        );
        InferSymmetry::new(id).execute(&mut store).unwrap();

        let r = store.region(id).unwrap();
        assert_eq!(r.symmetry_kind, SymmetryKind::Alternating);
        assert!(r.period == 0.0, "period={}", r.period);
    }

    #[test]
    fn repeated_inference_recomputes_the_same_result() {
        let mut store = RegionStore::new();
        let rotations: Vec<f64> = (1..8).map(|k| f64::from(k) * FRAC_PI_4).collect();
        let id = cluster(&mut store, &rotations);

        InferSymmetry::new(id).execute(&mut store).unwrap();
        let first = store.region(id).unwrap().period;
        InferSymmetry::new(id).execute(&mut store).unwrap();
        let second = store.region(id).unwrap().period;
        assert_relative_eq!(first, second);
    }

    // ── symmetry lines ──

    fn symmetric_region(period: f64, phase_start: f64) -> Region {
        let mut r = wedge(0.0);
        r.period = period;
        r.phase_start = phase_start;
        r
    }

    #[test]
    fn lines_step_by_one_period_below_the_end() {
        let mut r = symmetric_region(FRAC_PI_4, 0.5427);
        let lines: Vec<f64> = r.symmetry_lines(0.0, FRAC_PI_2).collect();
        assert_eq!(lines.len(), 2, "lines={lines:?}");
        assert_relative_eq!(lines[0], 0.5427);
        assert_relative_eq!(lines[1], 0.5427 + FRAC_PI_4);
        for angle in &lines {
            assert!(*angle < FRAC_PI_2);
        }
        assert_relative_eq!(r.sym_start_angle, 0.5427);
        assert_relative_eq!(r.sym_end_angle, 0.5427 + FRAC_PI_4);
    }

    #[test]
    fn phase_is_shifted_into_the_first_window() {
        let mut r = symmetric_region(FRAC_PI_4, 0.5427);
        let start = 1.5 * PI;
        let lines: Vec<f64> = r.symmetry_lines(start, FRAC_PI_2).collect();
        assert!(!lines.is_empty());
        assert!(lines[0] >= start && lines[0] < start + FRAC_PI_4, "first={}", lines[0]);
        // Wrapped end: every line stays below end + 2π.
        for angle in &lines {
            assert!(*angle < FRAC_PI_2 + TAU);
        }
        for pair in lines.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], FRAC_PI_4, epsilon = 1e-9);
        }
    }

    #[test]
    fn no_period_means_no_lines() {
        let mut r = symmetric_region(0.0, 0.3);
        assert_eq!(r.symmetry_lines(0.0, TAU).count(), 0);
    }

    #[test]
    fn lines_are_restartable() {
        let mut r = symmetric_region(FRAC_PI_4, 0.5427);
        let first: Vec<f64> = r.symmetry_lines(0.0, PI).collect();
        let second: Vec<f64> = r.symmetry_lines(0.0, PI).collect();
        assert_eq!(first, second);
    }
}

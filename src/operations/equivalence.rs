//! Tolerance-based region equivalence and occurrence clustering.
//!
//! Both comparisons look only at envelope fields, never at the raw element
//! shapes: two regions found at different rotation angles are "the same
//! shape, rotated" when their radial envelope and angular span agree.

use crate::error::Result;
use crate::math::compare::{is_close, is_close_default};
use crate::math::round_to;
use crate::region::{Region, RegionId, RegionStore};

/// Exact closeness on all five envelope fields.
///
/// Used to avoid registering the same physical boundary twice; a rotated
/// copy fails this check because its angular position differs.
#[must_use]
pub fn regions_identical(a: &Region, b: &Region) -> bool {
    is_close_default(a.min_dist, b.min_dist)
        && is_close_default(a.max_dist, b.max_dist)
        && is_close_default(a.alpha, b.alpha)
        && is_close_default(a.min_angle, b.min_angle)
        && is_close_default(a.max_angle, b.max_angle)
}

/// Coarser closeness on the rotation-invariant envelope fields only.
///
/// With `tolerance > 0` the distances are compared after 4-decimal
/// rounding against the caller's tolerance; with `tolerance == 0` the
/// rounding tightens to 2 decimals and the default closeness bounds apply.
/// This dual mode is deliberate, not a continuous function of the
/// tolerance.
#[must_use]
pub fn regions_equal(a: &Region, b: &Region, tolerance: f64) -> bool {
    let alpha_close = is_close(round_to(a.alpha, 3), round_to(b.alpha, 3), 1e-2, 1e-3);
    if tolerance > 0.0 {
        is_close(round_to(a.min_dist, 4), round_to(b.min_dist, 4), 1e-3, tolerance)
            && is_close(round_to(a.max_dist, 4), round_to(b.max_dist, 4), 1e-3, tolerance)
            && alpha_close
    } else {
        is_close_default(round_to(a.min_dist, 2), round_to(b.min_dist, 2))
            && is_close_default(round_to(a.max_dist, 2), round_to(b.max_dist, 2))
            && alpha_close
    }
}

/// Registers a rotated occurrence of a canonical region.
///
/// A candidate identical to the canonical region or to any already
/// registered occurrence is skipped, so walking the same physical boundary
/// twice never inflates the count.
pub struct RegisterOccurrence {
    canonical: RegionId,
    candidate: RegionId,
}

impl RegisterOccurrence {
    /// Creates the clustering step for one candidate.
    #[must_use]
    pub fn new(canonical: RegionId, candidate: RegionId) -> Self {
        Self {
            canonical,
            candidate,
        }
    }

    /// Executes the step, returning whether the candidate was registered.
    ///
    /// # Errors
    ///
    /// Returns an error if either region is not in the store.
    pub fn execute(&self, store: &mut RegionStore) -> Result<bool> {
        if self.canonical == self.candidate {
            return Ok(false);
        }

        let duplicate = {
            let canonical = store.region(self.canonical)?;
            let candidate = store.region(self.candidate)?;
            if regions_identical(canonical, candidate) {
                true
            } else {
                let mut seen = false;
                for id in &canonical.equivalent {
                    if regions_identical(store.region(*id)?, candidate) {
                        seen = true;
                        break;
                    }
                }
                seen
            }
        };
        if duplicate {
            return Ok(false);
        }

        let candidate = self.candidate;
        let canonical = store.region_mut(self.canonical)?;
        canonical.occurrence_count += 1;
        canonical.equivalent.push(candidate);
        Ok(true)
    }
}

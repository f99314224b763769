//! Interior-point sampling by horizontal ray casting.

use tracing::debug;

use crate::error::Result;
use crate::geometry::Segment;
use crate::math::Point2;
use crate::region::{RegionId, RegionStore};

/// Margin added on both sides of the bounding box so the cast ray fully
/// clears the boundary.
const RAY_MARGIN: f64 = 5.0;

/// Finds one point guaranteed to lie inside a region, for seeding
/// flood-fill or meshing.
///
/// A horizontal ray through the vertical midpoint of the region's bounding
/// box is intersected with the region's own boundary; the leftmost hit
/// starts the probe, the nearest hit to its right against the surrounding
/// geometry ends it, and the midpoint between the two is returned.
pub struct SampleInteriorPoint {
    region: RegionId,
}

impl SampleInteriorPoint {
    /// Creates the sampling step for one region.
    #[must_use]
    pub fn new(region: RegionId) -> Self {
        Self { region }
    }

    /// Executes the step against the region and the full surrounding
    /// geometry.
    ///
    /// Returns `None` when the ray collects fewer than two hits on the
    /// region's own boundary, or no surrounding hit to the right of the
    /// probe start; callers fall back to other interior strategies.
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced region is not in the store.
    pub fn execute(
        &self,
        store: &RegionStore,
        surrounding: &[RegionId],
    ) -> Result<Option<Point2>> {
        let region = store.region(self.region)?;
        let Some(bounds) = region.bounds() else {
            return Ok(None);
        };

        let y = (bounds.min_y + bounds.max_y) / 2.0;
        let ray_start = Point2::new(bounds.min_x - RAY_MARGIN, y);
        let ray_end = Point2::new(bounds.max_x + RAY_MARGIN, y);

        let mut own_hits: Vec<f64> = region
            .elements
            .iter()
            .flat_map(|e| e.intersect_segment(&ray_start, &ray_end))
            .map(|p| p.x)
            .collect();
        if own_hits.len() < 2 {
            debug!(
                hits = own_hits.len(),
                "interior sampling found too few boundary crossings"
            );
            return Ok(None);
        }
        own_hits.sort_by(f64::total_cmp);
        let start_x = own_hits[0];

        let mut end_x: Option<f64> = None;
        for id in surrounding {
            let other = store.region(*id)?;
            for element in &other.elements {
                for hit in element.intersect_segment(&ray_start, &ray_end) {
                    if hit.x > start_x && end_x.is_none_or(|x| hit.x < x) {
                        end_x = Some(hit.x);
                    }
                }
            }
        }

        match end_x {
            Some(end_x) => Ok(Some(Point2::new((start_x + end_x) / 2.0, y))),
            None => {
                debug!("interior sampling found no crossing right of the probe start");
                Ok(None)
            }
        }
    }
}

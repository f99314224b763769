//! Material-role classification of stator and rotor sub-regions.
//!
//! The rules are radial/angular proximity heuristics tuned on real machine
//! drawings. The thresholds are empirical; changing them silently
//! reclassifies existing designs, so they live here as named constants.

use crate::error::Result;
use crate::math::angle::angle_span;
use crate::math::compare::is_close_default;
use crate::math::{round_to, Point2};
use crate::region::{MaterialType, Region, RegionId, RegionStore};

/// Air-gap touch fraction below which a region is air, not iron.
pub const AIRGAP_AIR_MAX: f64 = 0.2;

/// Air-gap touch fraction above which a rotor region is a magnet.
pub const AIRGAP_MAGNET_MIN: f64 = 0.6;

/// Fraction of the pole angle a rectangular rotor pocket must span to be
/// a buried magnet.
pub const MAGNET_SPAN_MIN: f64 = 0.5;

/// Span fraction below which an edge-touching rotor region is air.
pub const NARROW_SPAN_MAX: f64 = 0.4;

/// Slack, in radians, when testing whether an envelope sits on one of the
/// sector's angular bounds.
const ANGLE_EDGE_EPS: f64 = 0.001;

/// Global geometry of the sector being classified.
#[derive(Debug, Clone, Copy)]
pub struct SectorBounds {
    /// Whether this sub-geometry is the inner one (its air gap faces
    /// outward).
    pub is_inner: bool,
    /// Whether the sector was mirrored to complete a half pole.
    pub mirrored: bool,
    /// Angular span of one pole sector.
    pub pole_angle: f64,
    /// Rotation center of the cross-section.
    pub center: Point2,
    /// Inner bounding radius of the sub-geometry.
    pub inner_radius: f64,
    /// Outer bounding radius of the sub-geometry.
    pub outer_radius: f64,
}

impl SectorBounds {
    /// Radial proximity flags and the air-gap radius for a region.
    ///
    /// Returns `(touches_air_gap, touches_yoke_back, airgap_radius)`.
    fn radial_contacts(&self, region: &Region) -> (bool, bool, f64) {
        if self.is_inner {
            (
                is_close_default(self.outer_radius, region.max_dist),
                is_close_default(self.inner_radius, region.min_dist),
                self.outer_radius,
            )
        } else {
            (
                is_close_default(self.inner_radius, region.min_dist),
                is_close_default(self.outer_radius, region.max_dist),
                self.inner_radius,
            )
        }
    }

    /// Fraction of the pole angle over which `region` actually touches the
    /// air-gap radius.
    fn airgap_touch_fraction(&self, region: &Region, airgap_radius: f64, pole: f64) -> f64 {
        region
            .angular_envelope_at_radius(&self.center, airgap_radius)
            .map_or(0.0, |(min, max)| round_to(angle_span(min, max), 3) / pole)
    }
}

/// Assigns the material role of one stator sub-region.
pub struct ClassifyStator {
    region: RegionId,
    sector: SectorBounds,
}

impl ClassifyStator {
    /// Creates the classification step for one region.
    #[must_use]
    pub fn new(region: RegionId, sector: SectorBounds) -> Self {
        Self { region, sector }
    }

    /// Executes the step, writing the material and the boundary-proximity
    /// flags, and returns the material.
    ///
    /// # Errors
    ///
    /// Returns an error if the region is not in the store.
    pub fn execute(&self, store: &mut RegionStore) -> Result<MaterialType> {
        let sector = &self.sector;
        let pole = round_to(sector.pole_angle, 6);

        let region = store.region(self.region)?;
        let (touches_airgap, touches_yoke, airgap_radius) = sector.radial_contacts(region);
        let close_to_start = is_close_default(region.min_angle, 0.0);
        let close_to_end = is_close_default(region.max_angle, pole);

        let material = if close_to_start && close_to_end {
            // Spans the whole pole: the lamination body.
            MaterialType::Iron
        } else if touches_yoke {
            MaterialType::Iron
        } else if touches_airgap {
            if sector.airgap_touch_fraction(region, airgap_radius, pole) < AIRGAP_AIR_MAX {
                MaterialType::Air
            } else {
                MaterialType::Iron
            }
        } else if region.min_angle > ANGLE_EDGE_EPS {
            if region.max_angle < pole - ANGLE_EDGE_EPS {
                MaterialType::Windings
            } else if sector.mirrored {
                // The mirror image completes a slot cut off by the sector
                // boundary.
                MaterialType::Windings
            } else {
                MaterialType::Air
            }
        } else {
            // Pressed against the start boundary without iron contact.
            MaterialType::Air
        };

        let region = store.region_mut(self.region)?;
        region.close_to_start_boundary = close_to_start;
        region.close_to_end_boundary = close_to_end;
        region.material = material;
        Ok(material)
    }
}

/// Assigns the material role of one rotor sub-region.
pub struct ClassifyRotor {
    region: RegionId,
    sector: SectorBounds,
}

impl ClassifyRotor {
    /// Creates the classification step for one region.
    #[must_use]
    pub fn new(region: RegionId, sector: SectorBounds) -> Self {
        Self { region, sector }
    }

    /// Executes the step, writing the material and the boundary-proximity
    /// flags, and returns the material.
    ///
    /// # Errors
    ///
    /// Returns an error if the region is not in the store.
    pub fn execute(&self, store: &mut RegionStore) -> Result<MaterialType> {
        let sector = &self.sector;
        let pole = round_to(sector.pole_angle, 6);

        let region = store.region(self.region)?;
        // Plain angular difference: a seam-crossing envelope deliberately
        // fails the span checks below.
        let span = round_to(region.max_angle - region.min_angle, 6);
        let (touches_airgap, touches_yoke, airgap_radius) = sector.radial_contacts(region);
        let close_to_start = is_close_default(region.min_angle, 0.0);
        let close_to_end = is_close_default(region.max_angle, pole);

        let material = if touches_yoke {
            MaterialType::Iron
        } else if touches_airgap {
            let fraction = sector.airgap_touch_fraction(region, airgap_radius, pole);
            if fraction < AIRGAP_AIR_MAX {
                MaterialType::Air
            } else if fraction > AIRGAP_MAGNET_MIN {
                MaterialType::Magnet
            } else {
                MaterialType::Iron
            }
        } else if span / pole > MAGNET_SPAN_MIN && region.is_rectangular() {
            // Wide rectangular pocket buried in the lamination.
            MaterialType::Magnet
        } else if region.min_angle > ANGLE_EDGE_EPS && span / pole < NARROW_SPAN_MAX {
            if region.max_angle < pole - ANGLE_EDGE_EPS {
                MaterialType::Air
            } else if sector.mirrored {
                MaterialType::Air
            } else {
                MaterialType::Iron
            }
        } else {
            MaterialType::Iron
        };

        let region = store.region_mut(self.region)?;
        region.close_to_start_boundary = close_to_start;
        region.close_to_end_boundary = close_to_end;
        region.material = material;
        Ok(material)
    }
}

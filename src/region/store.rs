use slotmap::SlotMap;

use crate::error::RegionError;

use super::Region;

slotmap::new_key_type! {
    /// Unique identifier for a region in the region store.
    pub struct RegionId;
}

/// Central arena that owns every region of one analysis pass.
///
/// Regions reference their rotationally equivalent occurrences through
/// [`RegionId`]s into the same arena, avoiding self-referential ownership.
#[derive(Debug, Default)]
pub struct RegionStore {
    regions: SlotMap<RegionId, Region>,
}

impl RegionStore {
    /// Creates a new, empty region store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a region and returns its ID.
    pub fn insert(&mut self, region: Region) -> RegionId {
        self.regions.insert(region)
    }

    /// Returns a reference to the region, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the region is not in the store.
    pub fn region(&self, id: RegionId) -> Result<&Region, RegionError> {
        self.regions.get(id).ok_or(RegionError::NotFound)
    }

    /// Returns a mutable reference to the region, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the region is not in the store.
    pub fn region_mut(&mut self, id: RegionId) -> Result<&mut Region, RegionError> {
        self.regions.get_mut(id).ok_or(RegionError::NotFound)
    }

    /// Iterates over all stored regions.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions.iter()
    }

    /// Number of stored regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the store holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

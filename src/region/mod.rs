mod signature;
mod store;

pub use store::{RegionId, RegionStore};

use std::fmt;

use tracing::warn;

use crate::error::{RegionError, Result};
use crate::geometry::{Element, Segment};
use crate::graph::{NodeKey, PlanarGraph};
use crate::math::compare::{greater, less};
use crate::math::Point2;

/// Material role of a region, assigned once by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialType {
    #[default]
    Unknown,
    Iron,
    Windings,
    Magnet,
    Air,
}

impl MaterialType {
    /// Lowercase label used in reports and solver scripts.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MaterialType::Unknown => "unknown",
            MaterialType::Iron => "iron",
            MaterialType::Windings => "windings",
            MaterialType::Magnet => "magnet",
            MaterialType::Air => "air",
        }
    }
}

/// Kind of rotational periodicity detected for a region cluster.
///
/// The variant order is the rank used by the canonical region ordering:
/// a uniform gap pattern outranks a majority pattern, which outranks an
/// alternating one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SymmetryKind {
    #[default]
    None,
    Alternating,
    Majority,
    Simple,
}

/// A closed-or-open boundary loop of one material zone, together with its
/// angular/radial envelope and the symmetry bookkeeping accumulated during
/// a rotational sweep.
///
/// The envelope is computed once at construction against an immutable
/// center and never recomputed. Occurrence bookkeeping is mutated only by
/// the clustering step, symmetry fields only by symmetry inference, and
/// the material only by the classifier.
#[derive(Debug, Clone)]
pub struct Region {
    /// Boundary elements in walk order around the loop.
    pub elements: Vec<Element>,
    /// Reference center the envelope was computed against.
    pub center: Point2,
    /// Material role, `Unknown` until classified.
    pub material: MaterialType,
    /// Angular envelope start, in `[0, 2π)`.
    pub min_angle: f64,
    /// Angular envelope end; numerically smaller than `min_angle` when the
    /// envelope crosses the 0/2π seam.
    pub max_angle: f64,
    /// Smallest distance of the boundary from the center.
    pub min_dist: f64,
    /// Largest distance of the boundary from the center.
    pub max_dist: f64,
    /// Angular span from `min_angle` to `max_angle`, rounded to 3 decimals.
    pub alpha: f64,
    /// Whether the envelope touches the sector start boundary (angle 0).
    pub close_to_start_boundary: bool,
    /// Whether the envelope touches the sector end boundary (pole angle).
    pub close_to_end_boundary: bool,
    /// Number of discovered occurrences of this shape, including this one.
    pub occurrence_count: usize,
    /// Rotationally equivalent occurrences, in discovery order.
    pub equivalent: Vec<RegionId>,
    /// Angular period at which the shape repeats; 0 when undetermined.
    pub period: f64,
    /// Phase angle of the first period window.
    pub phase_start: f64,
    /// Start of the period window recorded by the last symmetry-line walk.
    pub sym_start_angle: f64,
    /// End of the period window recorded by the last symmetry-line walk.
    pub sym_end_angle: f64,
    /// Kind of gap pattern the period was derived from.
    pub symmetry_kind: SymmetryKind,
    /// Number of repeating sectors in a full turn; 0 when undetermined.
    pub symmetry_order: u32,
    /// Comparison tolerance this region was swept with.
    pub tolerance: f64,
}

impl Region {
    /// Creates a region from its boundary elements and computes the
    /// envelope signature.
    ///
    /// An empty element list yields the sentinel envelope (infinite
    /// `min_dist`); callers must check [`Region::is_empty`] before relying
    /// on envelope fields.
    #[must_use]
    pub fn new(elements: Vec<Element>, center: Point2, tolerance: f64) -> Self {
        let mut region = Self {
            elements,
            center,
            material: MaterialType::Unknown,
            min_angle: 0.0,
            max_angle: 0.0,
            min_dist: f64::INFINITY,
            max_dist: 0.0,
            alpha: 0.0,
            close_to_start_boundary: false,
            close_to_end_boundary: false,
            occurrence_count: 1,
            equivalent: Vec::new(),
            period: 0.0,
            phase_start: 0.0,
            sym_start_angle: 0.0,
            sym_end_angle: 0.0,
            symmetry_kind: SymmetryKind::None,
            symmetry_order: 0,
            tolerance,
        };
        region.compute_signature();
        region
    }

    /// Whether the region has no boundary elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of boundary elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Iterates over the boundary nodes in walk order.
    pub fn nodes(&self) -> impl Iterator<Item = Point2> + '_ {
        self.elements.iter().flat_map(|e| [e.start(), e.end()])
    }

    /// Whether `other`'s envelope lies strictly inside this region's
    /// envelope, within tolerance.
    #[must_use]
    pub fn encloses(&self, other: &Region) -> bool {
        greater(other.min_dist, self.min_dist)
            && less(other.max_dist, self.max_dist)
            && greater(other.min_angle, self.min_angle)
            && less(other.max_angle, self.max_angle)
    }

    /// Whether a path of graph edges connects this region's boundary with
    /// `other`'s.
    ///
    /// Every lookup failure degrades to `false`; the sweep must keep
    /// going when the shared graph has already been pruned.
    ///
    /// # Errors
    ///
    /// Returns an error if either region has an empty boundary.
    pub fn has_connection<G: PlanarGraph>(
        &self,
        graph: &G,
        other: &Region,
        decimals: i32,
    ) -> Result<bool> {
        let first = self.elements.first().ok_or(RegionError::EmptyBoundary)?;
        let other_first = other.elements.first().ok_or(RegionError::EmptyBoundary)?;

        let Some(n1) = resolve_node(graph, &first.start(), decimals) else {
            return Ok(false);
        };
        let Some(n2) = resolve_node(graph, &other_first.end(), decimals) else {
            return Ok(false);
        };

        match graph.has_path(n1, n2) {
            Some(connected) => Ok(connected),
            None => {
                warn!("path query failed between {n1:?} and {n2:?}");
                Ok(false)
            }
        }
    }

    /// Removes this region's boundary edges from the shared planar graph,
    /// returning how many were removed.
    ///
    /// Edges already missing from the graph are skipped silently.
    pub fn remove_boundary_edges<G: PlanarGraph>(&self, graph: &mut G, decimals: i32) -> usize {
        self.elements
            .iter()
            .filter(|e| {
                graph.remove_edge(
                    NodeKey::from_point(&e.start(), decimals),
                    NodeKey::from_point(&e.end(), decimals),
                )
            })
            .count()
    }
}

/// Looks up the graph node for `p`, falling back to a tolerance search.
fn resolve_node<G: PlanarGraph>(graph: &G, p: &Point2, decimals: i32) -> Option<NodeKey> {
    let key = NodeKey::from_point(p, decimals);
    if graph.has_node(key) {
        return Some(key);
    }
    let found = graph.find_node_near(p, decimals);
    if found.is_none() {
        warn!("boundary node near ({:.4}, {:.4}) not in graph", p.x, p.y);
    }
    found
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region: distance from {:.4} to {:.4}, alpha {}, angle from {:.6} to {:.6}",
            self.min_dist, self.max_dist, self.alpha, self.min_angle, self.max_angle
        )
    }
}

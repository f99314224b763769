pub mod classify;
pub mod equivalence;
pub mod ordering;
pub mod sampling;
pub mod symmetry;

pub use classify::{ClassifyRotor, ClassifyStator, SectorBounds};
pub use equivalence::{regions_equal, regions_identical, RegisterOccurrence};
pub use ordering::canonical_cmp;
pub use sampling::SampleInteriorPoint;
pub use symmetry::{InferSymmetry, SymmetryLines};

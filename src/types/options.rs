//! Resolver options
use crate::{geometry::BoundingBox, types::RealScalar};

/// How candidate prism pairs are selected before the exact collision test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PairingStrategy {
    /// Test every pair of prisms
    #[default]
    Exhaustive,
    /// Skip pairs whose bounding boxes are disjoint
    BoundingBox,
}

impl PairingStrategy {
    /// Check whether two prisms with the given bounding boxes need the exact test
    pub fn admits<T: RealScalar>(&self, a: &BoundingBox<T>, b: &BoundingBox<T>) -> bool {
        match self {
            Self::Exhaustive => true,
            Self::BoundingBox => a.overlaps(b),
        }
    }
}

/// Options of a contact resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContactOptions {
    /// Candidate selection for the local sweep and for the retest of received prisms
    pub pairing: PairingStrategy,
}

impl ContactOptions {
    /// Create options with the given pairing strategy
    pub fn with_pairing(pairing: PairingStrategy) -> Self {
        Self { pairing }
    }
}

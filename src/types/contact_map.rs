//! Facet contact maps
use std::collections::BTreeMap;

/// A facet on some process that a local facet is in contact with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactEntry {
    /// Rank of the process that owns the facet
    pub rank: usize,
    /// Local index of the facet on that process
    pub facet: usize,
}

/// Map from a local facet to the facets it is in contact with
///
/// Entries for one facet are kept in the order in which they were discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacetContactMap {
    entries: BTreeMap<usize, Vec<ContactEntry>>,
}

impl FacetContactMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `facet` is in contact with facet `other` owned by `rank`
    pub fn insert(&mut self, facet: usize, rank: usize, other: usize) {
        self.entries.entry(facet).or_default().push(ContactEntry {
            rank,
            facet: other,
        });
    }

    /// The contacts of a facet
    pub fn get(&self, facet: usize) -> &[ContactEntry] {
        self.entries.get(&facet).map_or(&[], |e| e.as_slice())
    }

    /// Check whether `facet` is recorded as being in contact with `other` on `rank`
    pub fn contains(&self, facet: usize, rank: usize, other: usize) -> bool {
        self.get(facet).contains(&ContactEntry {
            rank,
            facet: other,
        })
    }

    /// Iterate over facets and their contacts in increasing facet order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[ContactEntry])> {
        self.entries.iter().map(|(f, e)| (*f, e.as_slice()))
    }

    /// The facets that have at least one contact
    pub fn facets(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    /// Number of facets with at least one contact
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of recorded contacts
    pub fn contact_count(&self) -> usize {
        self.entries.values().map(|e| e.len()).sum()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

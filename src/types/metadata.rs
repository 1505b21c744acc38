//! Metadata of cells in contact
use std::collections::BTreeMap;

/// Element data of a cell that is in contact with a local facet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellMetadata<T> {
    /// Rank of the process that owns the cell
    pub rank: usize,
    /// Index of the contacting facet on the owning process
    pub facet: usize,
    /// Local index of the facet within its cell
    pub local_facet_index: usize,
    /// Coordinates of the vertices of the cell, `[v0x, v0y, (v0z,) v1x, ...]`
    pub coordinates: Vec<T>,
    /// Global DOF indices of the cell
    pub dofs: Vec<usize>,
    /// Coefficients of the displacement field on the cell
    pub coefficients: Vec<T>,
}

/// Store of contact cell metadata, keyed by local facet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactMetadata<T> {
    cells: BTreeMap<usize, Vec<CellMetadata<T>>>,
}

impl<T> Default for ContactMetadata<T> {
    fn default() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }
}

impl<T: Copy> ContactMetadata<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the metadata of a cell in contact with `facet`
    pub fn insert(&mut self, facet: usize, cell: CellMetadata<T>) {
        self.cells.entry(facet).or_default().push(cell);
    }

    /// The cells in contact with `facet`
    pub fn get(&self, facet: usize) -> &[CellMetadata<T>] {
        self.cells.get(&facet).map_or(&[], |c| c.as_slice())
    }

    /// Iterate over facets and the cells they are in contact with
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[CellMetadata<T>])> {
        self.cells.iter().map(|(f, c)| (*f, c.as_slice()))
    }

    /// Number of facets with metadata
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Remove all metadata
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// The global DOFs of all cells in contact with `facet`, concatenated
    pub fn contact_dofs(&self, facet: usize) -> Vec<usize> {
        self.get(facet)
            .iter()
            .flat_map(|c| c.dofs.iter().copied())
            .collect()
    }

    /// The coordinates of all cells in contact with `facet`, concatenated
    pub fn contact_coordinates(&self, facet: usize) -> Vec<T> {
        self.get(facet)
            .iter()
            .flat_map(|c| c.coordinates.iter().copied())
            .collect()
    }

    /// The field coefficients of all cells in contact with `facet`, concatenated
    pub fn contact_coefficients(&self, facet: usize) -> Vec<T> {
        self.get(facet)
            .iter()
            .flat_map(|c| c.coefficients.iter().copied())
            .collect()
    }

    /// Map from every facet with metadata to the concatenated DOFs of its contact cells
    pub fn dof_map(&self) -> BTreeMap<usize, Vec<usize>> {
        self.cells
            .keys()
            .map(|f| (*f, self.contact_dofs(*f)))
            .collect()
    }
}

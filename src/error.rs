//! Errors

/// Errors raised while resolving contact
///
/// Every error is fatal for the current resolution pass: the resolver clears its
/// state and the caller has to run the whole pass again.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ContactError {
    /// Contact is only implemented for meshes of dimension 2 and 3.
    #[error("contact is only implemented in 2D and 3D, got dimension {0}")]
    UnsupportedDimension(usize),

    /// The topological and geometric dimension of the mesh differ.
    #[error(
        "manifold meshes are not supported (topological dimension {tdim}, geometric dimension {gdim})"
    )]
    ManifoldMesh {
        /// Topological dimension of the mesh.
        tdim: usize,
        /// Geometric dimension of the mesh.
        gdim: usize,
    },

    /// A swept volume was requested for an empty facet set.
    #[error("cannot build a swept volume from an empty facet set")]
    EmptyFacetSet,

    /// A facet index does not exist in the mesh.
    #[error("facet {facet} is out of range, the mesh has {facet_count} facets")]
    FacetOutOfRange {
        /// The offending facet index.
        facet: usize,
        /// Number of facets in the mesh.
        facet_count: usize,
    },

    /// A facet appears twice in one facet set.
    #[error("facet {0} appears more than once in a facet set")]
    DuplicateFacet(usize),

    /// A facet appears in both the master and the slave set.
    #[error("facet {0} is in both the master and the slave facet set")]
    FacetInBothSets(usize),

    /// The displacement field does not match the geometric dimension.
    #[error("displacement field has {value_size} components, expected {gdim}")]
    FieldValueSize {
        /// Number of components of the field.
        value_size: usize,
        /// Geometric dimension of the mesh.
        gdim: usize,
    },

    /// A facet does not have as many vertices as the mesh dimension.
    #[error("facet {facet} has {vertices} vertices, expected {expected}")]
    NonSimplexFacet {
        /// The offending facet index.
        facet: usize,
        /// Number of vertices of the facet.
        vertices: usize,
        /// Number of vertices of a simplex facet.
        expected: usize,
    },

    /// A spatial index reported a rank or cell that does not exist.
    #[error(
        "spatial index reported cell {cell} on rank {rank} ({cell_count} cells, {size} processes)"
    )]
    InvalidCandidate {
        /// Reported rank.
        rank: usize,
        /// Reported cell of the sender mesh.
        cell: usize,
        /// Number of processes.
        size: usize,
        /// Number of cells of the sender mesh.
        cell_count: usize,
    },

    /// Raw prism coordinates do not match the prism layout.
    #[error("prism buffer has {len} values, expected {expected}")]
    PrismLayout {
        /// Length of the buffer.
        len: usize,
        /// Expected length.
        expected: usize,
    },

    /// A buffer received from another rank is inconsistent with the protocol.
    #[error("{what} received from rank {rank} has length {len}, expected {expected}")]
    PayloadMismatch {
        /// Rank that sent the buffer.
        rank: usize,
        /// Description of the buffer.
        what: &'static str,
        /// Length of the received buffer.
        len: usize,
        /// Length implied by the rest of the message.
        expected: usize,
    },

    /// A collective operation could not be completed.
    #[error("collective exchange failed: {0}")]
    Exchange(String),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// (De)serialising a report or options failed.
    #[cfg(feature = "serde")]
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Result type of this crate
pub type Result<T> = std::result::Result<T, ContactError>;

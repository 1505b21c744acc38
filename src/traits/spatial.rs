//! Spatial index service
use crate::{contact::SweptMesh, error::Result, traits::Exchange, types::RealScalar};

pub trait SpatialIndex {
    //! Distributed overlap queries between swept meshes

    /// Find the processes whose `receiver` mesh may collide with cells of the local `sender` mesh
    ///
    /// Each process passes its own part of the receiver mesh. Returns pairs
    /// `(rank, cell)` where `cell` is a cell of the local `sender` mesh that may collide with
    /// the receiver mesh held by `rank`. This is a collective operation.
    fn process_collisions<T: RealScalar, E: Exchange>(
        &self,
        receiver: &SweptMesh<T>,
        sender: &SweptMesh<T>,
        exchange: &E,
    ) -> Result<Vec<(usize, usize)>>;
}

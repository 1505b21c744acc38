//! Spatial index
use crate::{
    contact::{cells_per_facet, SweptMesh},
    error::{ContactError, Result},
    geometry::BoundingBox,
    traits::{Exchange, SpatialIndex},
    types::RealScalar,
};
use tracing::debug;

/// Spatial index that compares cells with the bounding box of each process
///
/// The bounding boxes of the receiver meshes of all processes are gathered, and every
/// sender cell is reported for each process whose box it overlaps. A prism that overlaps a
/// box with none of its cells is reported through its first cell, as it may enclose the box.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessBoundingBoxIndex;

impl SpatialIndex for ProcessBoundingBoxIndex {
    fn process_collisions<T: RealScalar, E: Exchange>(
        &self,
        receiver: &SweptMesh<T>,
        sender: &SweptMesh<T>,
        exchange: &E,
    ) -> Result<Vec<(usize, usize)>> {
        let boxes = exchange
            .all_gather(&receiver.bounding_box().to_flat())?
            .iter()
            .enumerate()
            .map(|(rank, data)| {
                let flat: &[T; 6] =
                    data.as_slice()
                        .try_into()
                        .map_err(|_| ContactError::PayloadMismatch {
                            rank,
                            what: "bounding box",
                            len: data.len(),
                            expected: BoundingBox::<T>::FLAT_SIZE,
                        })?;
                Ok(BoundingBox::from_flat(flat))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut collisions = vec![];
        let cpf = cells_per_facet(sender.dim());
        for prism in 0..sender.prism_count() {
            let prism_box = sender.prism_bounding_box(prism);
            let ranks = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| prism_box.overlaps(b))
                .map(|(rank, _)| rank)
                .collect::<Vec<_>>();
            if ranks.is_empty() {
                continue;
            }
            let cell_boxes = (prism * cpf..(prism + 1) * cpf)
                .map(|cell| (cell, sender.cell_bounding_box(cell)))
                .collect::<Vec<_>>();
            for rank in ranks {
                let before = collisions.len();
                for (cell, cell_box) in &cell_boxes {
                    if cell_box.overlaps(&boxes[rank]) {
                        collisions.push((rank, *cell));
                    }
                }
                // The prism may enclose the receiver box without any of its cells touching it
                if collisions.len() == before {
                    collisions.push((rank, prism * cpf));
                }
            }
        }
        debug!(
            rank = exchange.rank(),
            candidates = collisions.len(),
            "queried process bounding boxes"
        );
        Ok(collisions)
    }
}

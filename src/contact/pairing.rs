//! Collision of prisms held by different processes
use super::{cells_per_facet, prism_stride, Prism, SweptMesh};
use crate::{
    error::{ContactError, Result},
    traits::{Exchange, SpatialIndex},
    types::{FacetContactMap, PairingStrategy, RealScalar},
};
use itertools::izip;
use tracing::debug;

/// Send the prisms of `sender` to every process whose `receiver` prisms they may collide with
///
/// Every received prism is tested against all local `receiver` prisms and each hit is
/// recorded in `map` as `(receiver facet) -> (sending rank, sender facet)`. This is a
/// collective operation.
pub(crate) fn tabulate_off_process_pairs<T: RealScalar, E: Exchange, S: SpatialIndex>(
    receiver: &SweptMesh<T>,
    sender: &SweptMesh<T>,
    exchange: &E,
    index: &S,
    strategy: PairingStrategy,
    map: &mut FacetContactMap,
) -> Result<()> {
    let rank = exchange.rank();
    let size = exchange.size();
    let dim = receiver.dim();
    let cpf = cells_per_facet(dim);
    let stride = prism_stride(dim);

    let mut destinations = vec![vec![]; size];
    for (r, cell) in index.process_collisions(receiver, sender, exchange)? {
        if r >= size || cell >= sender.cell_count() {
            return Err(ContactError::InvalidCandidate {
                rank: r,
                cell,
                size,
                cell_count: sender.cell_count(),
            });
        }
        if r != rank {
            destinations[r].push(cell / cpf);
        }
    }
    for prisms in destinations.iter_mut() {
        prisms.sort_unstable();
        prisms.dedup();
    }

    let send_facets = destinations
        .iter()
        .map(|prisms| prisms.iter().map(|p| sender.facet(*p)).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let send_coordinates = destinations
        .iter()
        .map(|prisms| {
            let mut c = Vec::with_capacity(prisms.len() * stride);
            for p in prisms {
                c.extend_from_slice(sender.prism_coordinates(*p));
            }
            c
        })
        .collect::<Vec<_>>();
    debug!(
        rank,
        sent = send_facets.iter().map(|f| f.len()).sum::<usize>(),
        "sending candidate prisms"
    );

    let recv_facets = exchange.all_to_all(&send_facets)?;
    let recv_coordinates = exchange.all_to_all(&send_coordinates)?;

    let mut hits = 0;
    for (r, facets, coordinates) in izip!(0..size, &recv_facets, &recv_coordinates) {
        if coordinates.len() != facets.len() * stride {
            return Err(ContactError::PayloadMismatch {
                rank: r,
                what: "prism coordinates",
                len: coordinates.len(),
                expected: facets.len() * stride,
            });
        }
        for (facet, c) in izip!(facets, coordinates.chunks_exact(stride)) {
            let remote = Prism::new(dim, c)?;
            let remote_box = remote.bounding_box();
            for (i, local) in receiver.prisms().enumerate() {
                if strategy.admits(receiver.prism_bounding_box(i), &remote_box)
                    && local.collides(&remote)
                {
                    map.insert(receiver.facet(i), r, *facet);
                    hits += 1;
                }
            }
        }
    }
    debug!(
        rank,
        received = recv_facets.iter().map(|f| f.len()).sum::<usize>(),
        hits,
        "tested received prisms"
    );
    Ok(())
}

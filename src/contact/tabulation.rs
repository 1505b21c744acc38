//! Distribution of the element data of contacting cells
use crate::{
    error::{ContactError, Result},
    traits::{ContactMesh, DisplacementField, DofMap, Exchange},
    types::{CellMetadata, ContactMetadata, FacetContactMap, RealScalar},
};
use tracing::debug;

/// Number of integers in the header of a record
const HEADER_SIZE: usize = 6;

/// Deliver the data of every cell in `maps` to the processes that own the facets it touches
///
/// For each entry `facet -> (rank, other)` of a map, the cell of `facet` is stored in
/// `metadata` on `rank`, keyed by `other`. Remote cells are sent as an integer record
/// `[other, facet, local facet index, #dofs, #coordinates, #coefficients, dofs...]`
/// and a float record `[coordinates..., coefficients...]`. This is a collective operation.
pub(crate) fn tabulate_contact_cells<
    T: RealScalar,
    M: ContactMesh<T = T>,
    F: DisplacementField<T = T>,
    D: DofMap,
    E: Exchange,
>(
    mesh: &M,
    field: &F,
    dofmap: &D,
    exchange: &E,
    maps: [&FacetContactMap; 2],
    metadata: &mut ContactMetadata<T>,
) -> Result<()> {
    let rank = exchange.rank();
    let size = exchange.size();

    let mut send_int = vec![vec![]; size];
    let mut send_float = vec![vec![]; size];
    let mut coordinates = vec![];
    let mut coefficients = vec![];
    let mut local = 0;

    for map in maps {
        for (facet, entries) in map.iter() {
            let cell = mesh.facet_cell(facet);
            let local_facet_index = mesh.facet_local_index(facet);
            let dofs = dofmap
                .cell_dofs(cell)
                .iter()
                .map(|d| dofmap.local_to_global(*d))
                .collect::<Vec<_>>();
            mesh.cell_coordinates(cell, &mut coordinates);
            field.restrict(cell, &mut coefficients);

            for entry in entries {
                if entry.rank == rank {
                    metadata.insert(
                        entry.facet,
                        CellMetadata {
                            rank,
                            facet,
                            local_facet_index,
                            coordinates: coordinates.clone(),
                            dofs: dofs.clone(),
                            coefficients: coefficients.clone(),
                        },
                    );
                    local += 1;
                } else {
                    let ints = &mut send_int[entry.rank];
                    ints.extend_from_slice(&[
                        entry.facet,
                        facet,
                        local_facet_index,
                        dofs.len(),
                        coordinates.len(),
                        coefficients.len(),
                    ]);
                    ints.extend_from_slice(&dofs);
                    let floats = &mut send_float[entry.rank];
                    floats.extend_from_slice(&coordinates);
                    floats.extend_from_slice(&coefficients);
                }
            }
        }
    }

    let recv_int = exchange.all_to_all(&send_int)?;
    let recv_float = exchange.all_to_all(&send_float)?;

    let mut remote = 0;
    for (r, (ints, floats)) in recv_int.iter().zip(&recv_float).enumerate() {
        remote += unpack_records(r, ints, floats, metadata)?;
    }
    debug!(rank, local, remote, "tabulated contact cells");
    Ok(())
}

/// Insert the records received from rank `r` and return their number
fn unpack_records<T: RealScalar>(
    r: usize,
    ints: &[usize],
    floats: &[T],
    metadata: &mut ContactMetadata<T>,
) -> Result<usize> {
    let mismatch = |what, len, expected| ContactError::PayloadMismatch {
        rank: r,
        what,
        len,
        expected,
    };

    let mut i = 0;
    let mut f = 0;
    let mut count = 0;
    while i < ints.len() {
        let Some(header) = ints.get(i..i + HEADER_SIZE) else {
            return Err(mismatch("record header", ints.len() - i, HEADER_SIZE));
        };
        let [target, facet, local_facet_index, ndofs, ncoords, ncoeffs] = [
            header[0], header[1], header[2], header[3], header[4], header[5],
        ];
        i += HEADER_SIZE;

        let Some(dofs) = ints.get(i..i + ndofs) else {
            return Err(mismatch("record DOFs", ints.len() - i, ndofs));
        };
        i += ndofs;

        let Some(values) = floats.get(f..f + ncoords + ncoeffs) else {
            return Err(mismatch(
                "record coordinates and coefficients",
                floats.len() - f.min(floats.len()),
                ncoords + ncoeffs,
            ));
        };
        f += ncoords + ncoeffs;

        metadata.insert(
            target,
            CellMetadata {
                rank: r,
                facet,
                local_facet_index,
                coordinates: values[..ncoords].to_vec(),
                dofs: dofs.to_vec(),
                coefficients: values[ncoords..].to_vec(),
            },
        );
        count += 1;
    }
    if f != floats.len() {
        return Err(mismatch("float records", floats.len(), f));
    }
    Ok(count)
}

//! Contact resolver
use super::{tabulate_local_pairs, tabulate_off_process_pairs, SweptMesh};
use crate::{
    contact::tabulation::tabulate_contact_cells,
    error::{ContactError, Result},
    traits::{ContactMesh, DisplacementField, DofMap, Exchange, SpatialIndex},
    types::{ContactMetadata, ContactOptions, FacetContactMap, RealScalar},
};
use tracing::{debug, info};

/// Resolves which master facets touch which slave facets across all processes
///
/// A resolution pass is run with [ContactResolver::resolve_contact_surfaces]. It fills the
/// master-to-slave and slave-to-master facet maps, which can then be used to gather the
/// element data of the opposing cells with [ContactResolver::tabulate_contact_metadata].
/// Both are collective operations: every process of the exchange has to call them, even
/// if it holds no contact facets.
#[derive(Debug, Clone)]
pub struct ContactResolver<T: RealScalar> {
    options: ContactOptions,
    master_to_slave: FacetContactMap,
    slave_to_master: FacetContactMap,
    metadata: ContactMetadata<T>,
}

impl<T: RealScalar> Default for ContactResolver<T> {
    fn default() -> Self {
        Self::new(ContactOptions::default())
    }
}

impl<T: RealScalar> ContactResolver<T> {
    /// Create a resolver
    pub fn new(options: ContactOptions) -> Self {
        Self {
            options,
            master_to_slave: FacetContactMap::new(),
            slave_to_master: FacetContactMap::new(),
            metadata: ContactMetadata::new(),
        }
    }

    /// Options
    pub fn options(&self) -> &ContactOptions {
        &self.options
    }

    /// For each local master facet, the slave facets it is in contact with
    pub fn master_to_slave(&self) -> &FacetContactMap {
        &self.master_to_slave
    }

    /// For each local slave facet, the master facets it is in contact with
    pub fn slave_to_master(&self) -> &FacetContactMap {
        &self.slave_to_master
    }

    /// Element data of the cells in contact with each local facet
    pub fn metadata(&self) -> &ContactMetadata<T> {
        &self.metadata
    }

    /// Discard the results of the last pass
    pub fn clear(&mut self) {
        self.master_to_slave.clear();
        self.slave_to_master.clear();
        self.metadata.clear();
    }

    /// Find all pairs of colliding master and slave facets
    ///
    /// `master` and `slave` are local facet indices of `mesh`. Each facet is swept along
    /// `field` and the swept volumes are tested for collision, first locally and then
    /// against the swept volumes of other processes found by `index`. The results of the
    /// previous pass are discarded. On error, the resolver is left empty.
    pub fn resolve_contact_surfaces<
        M: ContactMesh<T = T>,
        F: DisplacementField<T = T>,
        E: Exchange,
        S: SpatialIndex,
    >(
        &mut self,
        mesh: &M,
        field: &F,
        master: &[usize],
        slave: &[usize],
        exchange: &E,
        index: &S,
    ) -> Result<()> {
        self.clear();
        let result = self.resolve(mesh, field, master, slave, exchange, index);
        if result.is_err() {
            self.clear();
        }
        result
    }

    fn resolve<
        M: ContactMesh<T = T>,
        F: DisplacementField<T = T>,
        E: Exchange,
        S: SpatialIndex,
    >(
        &mut self,
        mesh: &M,
        field: &F,
        master: &[usize],
        slave: &[usize],
        exchange: &E,
        index: &S,
    ) -> Result<()> {
        let rank = exchange.rank();
        let dim = mesh.topology_dim();
        if dim != 2 && dim != 3 {
            return Err(ContactError::UnsupportedDimension(dim));
        }
        if mesh.geometry_dim() != dim {
            return Err(ContactError::ManifoldMesh {
                tdim: dim,
                gdim: mesh.geometry_dim(),
            });
        }
        if field.value_size() != dim {
            return Err(ContactError::FieldValueSize {
                value_size: field.value_size(),
                gdim: dim,
            });
        }
        validate_facet_sets(mesh.facet_count(), master, slave)?;

        let sweep = |facets: &[usize]| {
            if facets.is_empty() {
                Ok(SweptMesh::empty(dim))
            } else {
                SweptMesh::new(mesh, field, facets)
            }
        };
        let master_mesh = sweep(master)?;
        let slave_mesh = sweep(slave)?;

        for (i, j) in tabulate_local_pairs(&master_mesh, &slave_mesh, self.options.pairing) {
            let (mf, sf) = (master_mesh.facet(i), slave_mesh.facet(j));
            self.master_to_slave.insert(mf, rank, sf);
            self.slave_to_master.insert(sf, rank, mf);
        }
        debug!(
            rank,
            pairs = self.master_to_slave.contact_count(),
            "resolved local contact"
        );

        if exchange.size() > 1 {
            tabulate_off_process_pairs(
                &master_mesh,
                &slave_mesh,
                exchange,
                index,
                self.options.pairing,
                &mut self.master_to_slave,
            )?;
            tabulate_off_process_pairs(
                &slave_mesh,
                &master_mesh,
                exchange,
                index,
                self.options.pairing,
                &mut self.slave_to_master,
            )?;
        }

        info!(
            rank,
            master_facets = master.len(),
            slave_facets = slave.len(),
            master_contacts = self.master_to_slave.contact_count(),
            slave_contacts = self.slave_to_master.contact_count(),
            "resolved contact surfaces"
        );
        Ok(())
    }

    /// Gather the element data of the cells in contact with each local facet
    ///
    /// Uses the facet maps of the last call to [ContactResolver::resolve_contact_surfaces].
    /// DOFs are stored as global indices. On error, the metadata is left empty.
    pub fn tabulate_contact_metadata<
        M: ContactMesh<T = T>,
        F: DisplacementField<T = T>,
        D: DofMap,
        E: Exchange,
    >(
        &mut self,
        mesh: &M,
        field: &F,
        dofmap: &D,
        exchange: &E,
    ) -> Result<()> {
        self.metadata.clear();
        let result = tabulate_contact_cells(
            mesh,
            field,
            dofmap,
            exchange,
            [&self.master_to_slave, &self.slave_to_master],
            &mut self.metadata,
        );
        match result {
            Ok(()) => {
                info!(
                    rank = exchange.rank(),
                    facets = self.metadata.len(),
                    "tabulated contact metadata"
                );
                Ok(())
            }
            Err(e) => {
                self.metadata.clear();
                Err(e)
            }
        }
    }
}

/// Check that the facet sets are in range, free of duplicates and disjoint
fn validate_facet_sets(facet_count: usize, master: &[usize], slave: &[usize]) -> Result<()> {
    const MASTER: u8 = 1;
    const SLAVE: u8 = 2;
    let mut marks = vec![0u8; facet_count];
    for (facets, mark) in [(master, MASTER), (slave, SLAVE)] {
        for f in facets {
            let Some(m) = marks.get_mut(*f) else {
                return Err(ContactError::FacetOutOfRange {
                    facet: *f,
                    facet_count,
                });
            };
            if *m == mark {
                return Err(ContactError::DuplicateFacet(*f));
            }
            if *m != 0 {
                return Err(ContactError::FacetInBothSets(*f));
            }
            *m = mark;
        }
    }
    Ok(())
}

//! Simplex mesh with facet topology
use crate::{traits::ContactMesh, types::RealScalar};
use itertools::Itertools;
use std::collections::HashMap;

/// A mesh of simplices of a single dimension
///
/// Facets are numbered in the order in which they are first met when looping over the
/// cells, and local facet `i` of a cell is the facet opposite its local vertex `i`. The
/// vertices of each facet are sorted.
#[derive(Debug, Clone)]
pub struct SimplexMesh<T: RealScalar> {
    gdim: usize,
    tdim: usize,
    points: Vec<T>,
    cells: Vec<usize>,
    facets: Vec<usize>,
    cell_facets: Vec<usize>,
    facet_cells: Vec<(usize, usize)>,
    facet_cell_counts: Vec<usize>,
    point_ids: Vec<usize>,
    cell_ids: Vec<usize>,
}

impl<T: RealScalar> SimplexMesh<T> {
    /// Create a mesh
    ///
    /// `points` holds `gdim` coordinates per point and `cells` holds `tdim + 1` point
    /// indices per cell.
    pub fn new(
        gdim: usize,
        tdim: usize,
        points: Vec<T>,
        cells: Vec<usize>,
        point_ids: Vec<usize>,
        cell_ids: Vec<usize>,
    ) -> Self {
        let vpc = tdim + 1;
        assert_eq!(points.len(), gdim * point_ids.len());
        assert_eq!(cells.len(), vpc * cell_ids.len());

        let mut facet_indices = HashMap::new();
        let mut facets = vec![];
        let mut cell_facets = Vec::with_capacity(cells.len());
        let mut facet_cells = vec![];
        let mut facet_cell_counts = vec![];
        for (cell, vertices) in cells.chunks_exact(vpc).enumerate() {
            for local in 0..vpc {
                let facet_vertices = vertices
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != local)
                    .map(|(_, v)| *v)
                    .sorted()
                    .collect_vec();
                let index = *facet_indices
                    .entry(facet_vertices.clone())
                    .or_insert_with(|| {
                        facets.extend_from_slice(&facet_vertices);
                        facet_cells.push((cell, local));
                        facet_cell_counts.push(0);
                        facet_cells.len() - 1
                    });
                facet_cell_counts[index] += 1;
                cell_facets.push(index);
            }
        }

        Self {
            gdim,
            tdim,
            points,
            cells,
            facets,
            cell_facets,
            facet_cells,
            facet_cell_counts,
            point_ids,
            cell_ids,
        }
    }

    /// The facets of a cell
    pub fn cell_facets(&self, cell: usize) -> &[usize] {
        &self.cell_facets[(self.tdim + 1) * cell..(self.tdim + 1) * (cell + 1)]
    }

    /// Number of cells that contain a facet
    pub fn facet_cell_count(&self, facet: usize) -> usize {
        self.facet_cell_counts[facet]
    }

    /// The facets that belong to exactly one cell
    pub fn boundary_facets(&self) -> Vec<usize> {
        (0..self.facet_count())
            .filter(|f| self.facet_cell_counts[*f] == 1)
            .collect()
    }

    /// The boundary facets whose midpoint satisfies `predicate`
    pub fn boundary_facets_matching(&self, predicate: impl Fn(&[T]) -> bool) -> Vec<usize> {
        let mut midpoint = vec![T::zero(); self.gdim];
        self.boundary_facets()
            .into_iter()
            .filter(|f| {
                self.facet_midpoint(*f, &mut midpoint);
                predicate(&midpoint)
            })
            .collect()
    }

    /// Write the midpoint of a facet into `midpoint`
    pub fn facet_midpoint(&self, facet: usize, midpoint: &mut [T]) {
        midpoint.fill(T::zero());
        let vertices = self.facet_vertices(facet);
        for v in vertices {
            for (m, x) in midpoint.iter_mut().zip(self.vertex(*v)) {
                *m = *m + *x;
            }
        }
        let n = T::from(vertices.len()).unwrap_or_else(T::one);
        for m in midpoint.iter_mut() {
            *m = *m / n;
        }
    }

    /// The id of a point
    pub fn point_id(&self, index: usize) -> usize {
        self.point_ids[index]
    }

    /// The id of a cell
    pub fn cell_id(&self, index: usize) -> usize {
        self.cell_ids[index]
    }

    /// The ids of all points
    pub fn point_ids(&self) -> &[usize] {
        &self.point_ids
    }
}

impl<T: RealScalar> ContactMesh for SimplexMesh<T> {
    type T = T;

    fn topology_dim(&self) -> usize {
        self.tdim
    }

    fn geometry_dim(&self) -> usize {
        self.gdim
    }

    fn vertex_count(&self) -> usize {
        self.point_ids.len()
    }

    fn cell_count(&self) -> usize {
        self.cell_ids.len()
    }

    fn facet_count(&self) -> usize {
        self.facet_cells.len()
    }

    fn vertex(&self, vertex: usize) -> &[T] {
        &self.points[self.gdim * vertex..self.gdim * (vertex + 1)]
    }

    fn cell_vertices(&self, cell: usize) -> &[usize] {
        &self.cells[(self.tdim + 1) * cell..(self.tdim + 1) * (cell + 1)]
    }

    fn facet_vertices(&self, facet: usize) -> &[usize] {
        &self.facets[self.tdim * facet..self.tdim * (facet + 1)]
    }

    fn facet_cell(&self, facet: usize) -> usize {
        self.facet_cells[facet].0
    }

    fn facet_local_index(&self, facet: usize) -> usize {
        self.facet_cells[facet].1
    }
}

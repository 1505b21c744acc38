//! Mesh builder

use super::SimplexMesh;
use crate::{traits::Builder, types::RealScalar};
use std::collections::{HashMap, HashSet};

/// Builder for a simplex mesh
#[derive(Debug)]
pub struct SimplexMeshBuilder<T: RealScalar> {
    gdim: usize,
    tdim: usize,
    points: Vec<T>,
    cells: Vec<usize>,
    point_indices_to_ids: Vec<usize>,
    point_ids_to_indices: HashMap<usize, usize>,
    cell_indices_to_ids: Vec<usize>,
    cell_indices: HashSet<usize>,
}

impl<T: RealScalar> SimplexMeshBuilder<T> {
    /// Create a new mesh builder
    ///
    /// Cells are simplices of dimension `tdim` embedded in `gdim` dimensions.
    pub fn new(gdim: usize, tdim: usize) -> Self {
        Self::new_with_capacity(gdim, tdim, 0, 0)
    }

    /// Create a new mesh builder with capacity for a given number of points and cells
    pub fn new_with_capacity(gdim: usize, tdim: usize, npoints: usize, ncells: usize) -> Self {
        assert!(
            (1..=3).contains(&tdim) && gdim >= tdim,
            "Unsupported dimensions: tdim {tdim}, gdim {gdim}"
        );
        Self {
            gdim,
            tdim,
            points: Vec::with_capacity(npoints * gdim),
            cells: Vec::with_capacity(ncells * (tdim + 1)),
            point_indices_to_ids: Vec::with_capacity(npoints),
            point_ids_to_indices: HashMap::new(),
            cell_indices_to_ids: Vec::with_capacity(ncells),
            cell_indices: HashSet::new(),
        }
    }

    /// Geometric dimension
    pub fn gdim(&self) -> usize {
        self.gdim
    }

    /// Topological dimension
    pub fn tdim(&self) -> usize {
        self.tdim
    }
}

impl<T: RealScalar> Builder for SimplexMeshBuilder<T> {
    type Mesh = SimplexMesh<T>;
    type T = T;
    type CellData<'a> = &'a [usize];

    fn add_point(&mut self, id: usize, data: &[T]) {
        if data.len() != self.gdim {
            panic!("Point has wrong number of coordinates");
        }
        if self.point_ids_to_indices.contains_key(&id) {
            panic!("Cannot add point with duplicate id.");
        }
        self.point_ids_to_indices
            .insert(id, self.point_indices_to_ids.len());
        self.point_indices_to_ids.push(id);
        self.points.extend_from_slice(data);
    }

    fn add_cell(&mut self, id: usize, cell_data: &[usize]) {
        if self.cell_indices.contains(&id) {
            panic!("Cannot add cell with duplicate id.");
        }
        assert_eq!(cell_data.len(), self.tdim + 1);
        self.cell_indices.insert(id);
        self.cell_indices_to_ids.push(id);
        for id in cell_data {
            match self.point_ids_to_indices.get(id) {
                Some(index) => self.cells.push(*index),
                None => panic!("Cell uses unknown point id {id}."),
            }
        }
    }

    fn point_count(&self) -> usize {
        self.point_indices_to_ids.len()
    }

    fn cell_count(&self) -> usize {
        self.cell_indices_to_ids.len()
    }

    fn point_indices_to_ids(&self) -> &[usize] {
        &self.point_indices_to_ids
    }

    fn cell_indices_to_ids(&self) -> &[usize] {
        &self.cell_indices_to_ids
    }

    fn create_mesh(&self) -> SimplexMesh<T> {
        SimplexMesh::new(
            self.gdim,
            self.tdim,
            self.points.clone(),
            self.cells.clone(),
            self.point_indices_to_ids.clone(),
            self.cell_indices_to_ids.clone(),
        )
    }
}

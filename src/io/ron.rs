//! RON I/O
use crate::{
    contact::ContactResolver,
    error::{ContactError, Result},
    traits::Exchange,
    types::{ContactMetadata, ContactOptions, FacetContactMap, RealScalar},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;

/// The result of a contact resolution pass on one process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactReport<T> {
    /// Rank of the process
    pub rank: usize,
    /// Number of processes
    pub size: usize,
    /// Options used by the resolver
    pub options: ContactOptions,
    /// Master facet to slave facet map
    pub master_to_slave: FacetContactMap,
    /// Slave facet to master facet map
    pub slave_to_master: FacetContactMap,
    /// Element data of contacting cells
    pub metadata: ContactMetadata<T>,
}

impl<T: RealScalar + Serialize + DeserializeOwned> ContactReport<T> {
    /// Snapshot the current state of a resolver
    pub fn new(resolver: &ContactResolver<T>, exchange: &impl Exchange) -> Self {
        Self {
            rank: exchange.rank(),
            size: exchange.size(),
            options: *resolver.options(),
            master_to_slave: resolver.master_to_slave().clone(),
            slave_to_master: resolver.slave_to_master().clone(),
            metadata: resolver.metadata().clone(),
        }
    }

    /// Generate the RON string for a report
    pub fn to_ron_string(&self) -> Result<String> {
        ron::to_string(self).map_err(|e| ContactError::Serialization(e.to_string()))
    }

    /// Parse a report from a RON string
    pub fn from_ron_str(s: &str) -> Result<Self> {
        ron::from_str(s).map_err(|e| ContactError::Serialization(e.to_string()))
    }

    /// Export as RON
    ///
    /// If the report comes from more than one process, the rank is inserted before the
    /// extension of `filename`, so every process writes its own file.
    pub fn export_as_ron(&self, filename: &str) -> Result<()> {
        fs::write(rank_filename(filename, self.rank, self.size), self.to_ron_string()?)?;
        Ok(())
    }

    /// Import the report of process `rank` out of `size` processes
    pub fn import_from_ron(filename: &str, rank: usize, size: usize) -> Result<Self> {
        let content = fs::read_to_string(rank_filename(filename, rank, size))?;
        Self::from_ron_str(&content)
    }
}

impl ContactOptions {
    /// Generate the RON string for the options
    pub fn to_ron_string(&self) -> Result<String> {
        ron::to_string(self).map_err(|e| ContactError::Serialization(e.to_string()))
    }

    /// Parse options from a RON string
    ///
    /// Missing fields take their default values.
    pub fn from_ron_str(s: &str) -> Result<Self> {
        ron::from_str(s).map_err(|e| ContactError::Serialization(e.to_string()))
    }
}

/// The name of the file of process `rank`
fn rank_filename(filename: &str, rank: usize, size: usize) -> String {
    if size == 1 {
        return filename.to_string();
    }
    let parts = filename.split('.').collect::<Vec<_>>();
    if parts.len() > 1 {
        format!(
            "{}.{rank}.{}",
            parts[0..parts.len() - 1].join("."),
            parts[parts.len() - 1]
        )
    } else {
        format!("{filename}.{rank}")
    }
}

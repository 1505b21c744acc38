//! Distributed surface-contact resolution
//!
//! Facets of a "master" surface and a "slave" surface are swept along a displacement
//! field, the swept volumes are intersected locally and across processes, and the
//! element data of every contacting cell is delivered to the process that needs it.
#![cfg_attr(feature = "strict", deny(warnings), deny(unused_crate_dependencies))]
#![warn(missing_docs)]

pub mod contact;
pub mod error;
pub mod exchange;
pub mod field;
pub mod geometry;
#[cfg(feature = "serde")]
mod io;
pub mod mesh;
pub mod shapes;
pub mod spatial;
pub mod traits;
pub mod types;

pub use contact::{ContactResolver, SweptMesh};
pub use error::{ContactError, Result};
#[cfg(feature = "mpi")]
pub use exchange::MpiExchange;
pub use exchange::{SerialExchange, ThreadExchange, ThreadGroup};
pub use field::{NodalDisplacement, NodalDofMap};
#[cfg(feature = "serde")]
pub use io::ContactReport;
pub use mesh::{SimplexMesh, SimplexMeshBuilder};
pub use spatial::ProcessBoundingBoxIndex;

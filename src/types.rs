//! Types

mod contact_map;
mod metadata;
mod options;

pub use contact_map::{ContactEntry, FacetContactMap};
pub use metadata::{CellMetadata, ContactMetadata};
pub use options::{ContactOptions, PairingStrategy};

use crate::traits::Payload;
use num::Float;
use std::fmt::Debug;

/// A real scalar that can be sent between processes
pub trait RealScalar: Float + Payload + Debug + Default + Sync {}

impl RealScalar for f32 {}
impl RealScalar for f64 {}

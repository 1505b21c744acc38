//! Collective exchange backends
#[cfg(feature = "mpi")]
mod mpi;
mod serial;
mod thread;

#[cfg(feature = "mpi")]
pub use mpi::MpiExchange;
pub use serial::SerialExchange;
pub use thread::{ThreadExchange, ThreadGroup};

use crate::error::{ContactError, Result};

/// Check that there is one send buffer per process
fn check_send_count<X>(send: &[Vec<X>], size: usize) -> Result<()> {
    if send.len() == size {
        Ok(())
    } else {
        Err(ContactError::Exchange(format!(
            "{} send buffers for {size} processes",
            send.len()
        )))
    }
}

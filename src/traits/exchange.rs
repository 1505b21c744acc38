//! Collective exchange
use crate::error::Result;

/// Data that can be sent between processes
#[cfg(feature = "mpi")]
pub trait Payload: Copy + Send + 'static + mpi::traits::Equivalence {}
#[cfg(feature = "mpi")]
impl<X: Copy + Send + 'static + mpi::traits::Equivalence> Payload for X {}

/// Data that can be sent between processes
#[cfg(not(feature = "mpi"))]
pub trait Payload: Copy + Send + 'static {}
#[cfg(not(feature = "mpi"))]
impl<X: Copy + Send + 'static> Payload for X {}

pub trait Exchange {
    //! Synchronous collective communication within a group of processes
    //!
    //! Every process of the group has to call each collective operation in the same order.

    /// Rank of the current process
    fn rank(&self) -> usize;

    /// Number of processes in the group
    fn size(&self) -> usize;

    /// All-to-all exchange
    ///
    /// `send` must have one (possibly empty) entry per process: `send[p]` is delivered to
    /// rank `p`. Entry `p` of the result is the data that rank `p` sent to this process.
    fn all_to_all<X: Payload>(&self, send: &[Vec<X>]) -> Result<Vec<Vec<X>>>;

    /// Gather `data` from all processes
    ///
    /// Entry `p` of the result is the data contributed by rank `p`.
    fn all_gather<X: Payload>(&self, data: &[X]) -> Result<Vec<Vec<X>>> {
        let send = vec![data.to_vec(); self.size()];
        self.all_to_all(&send)
    }
}

//! Exchange over an MPI communicator
use super::check_send_count;
use crate::{
    error::{ContactError, Result},
    traits::{Exchange, Payload},
};
use itertools::Itertools;
use mpi::traits::{Communicator, CommunicatorCollectives, Equivalence};

/// Exchange between the processes of an MPI communicator
pub struct MpiExchange<'a, C: Communicator> {
    comm: &'a C,
}

impl<'a, C: Communicator> MpiExchange<'a, C> {
    /// Create an exchange
    pub fn new(comm: &'a C) -> Self {
        Self { comm }
    }

    /// The communicator
    pub fn comm(&self) -> &C {
        self.comm
    }
}

impl<C: Communicator> Exchange for MpiExchange<'_, C> {
    fn rank(&self) -> usize {
        self.comm.rank() as usize
    }

    fn size(&self) -> usize {
        self.comm.size() as usize
    }

    fn all_to_all<X: Payload>(&self, send: &[Vec<X>]) -> Result<Vec<Vec<X>>> {
        check_send_count(send, self.size())?;
        let counts = send.iter().map(|s| s.len()).collect_vec();
        let (recv_counts, recv_data) = all_to_all_varcount(self.comm, &counts, &send.concat())?;

        let mut recv = Vec::with_capacity(recv_counts.len());
        let mut offset = 0;
        for c in recv_counts {
            recv.push(recv_data[offset..offset + c].to_vec());
            offset += c;
        }
        Ok(recv)
    }
}

/// Send `counts[p]` consecutive values of `data` to each process `p`
///
/// Returns the number of values received from each process and the received values.
fn all_to_all_varcount<T: Equivalence>(
    comm: &impl Communicator,
    counts: &[usize],
    data: &[T],
) -> Result<(Vec<usize>, Vec<T>)> {
    // MPI counts are i32
    let counts = counts
        .iter()
        .map(|&x| {
            i32::try_from(x)
                .map_err(|_| ContactError::Exchange(format!("{x} values exceed the MPI count")))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut recv_counts = vec![0; comm.size() as usize];
    comm.all_to_all_into(&counts, &mut recv_counts);

    let total = recv_counts.iter().map(|c| *c as usize).sum::<usize>();
    let mut receive_data = Vec::<T>::with_capacity(total);
    let receive_buf: &mut [T] = unsafe { std::mem::transmute(receive_data.spare_capacity_mut()) };

    let send_displacements = counts
        .iter()
        .scan(0, |acc, &x| {
            let old = *acc;
            *acc += x;
            Some(old)
        })
        .collect_vec();
    let receive_displacements = recv_counts
        .iter()
        .scan(0, |acc, &x| {
            let old = *acc;
            *acc += x;
            Some(old)
        })
        .collect_vec();

    let send_partition = mpi::datatype::Partition::new(data, counts, send_displacements);
    let mut receive_partition =
        mpi::datatype::PartitionMut::new(receive_buf, &recv_counts[..], receive_displacements);
    comm.all_to_all_varcount_into(&send_partition, &mut receive_partition);

    unsafe { receive_data.set_len(total) };

    Ok((
        recv_counts.iter().map(|c| *c as usize).collect_vec(),
        receive_data,
    ))
}

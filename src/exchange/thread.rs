//! In-process exchange between threads
//!
//! Each thread plays the role of one process. This runs distributed algorithms inside a
//! single executable without an MPI installation.
use super::check_send_count;
use crate::{
    error::{ContactError, Result},
    traits::{Exchange, Payload},
};
use std::{
    any::Any,
    fmt,
    sync::{Arc, Barrier, Mutex, PoisonError},
    thread,
};

struct Shared {
    size: usize,
    slots: Mutex<Vec<Option<Box<dyn Any + Send>>>>,
    barrier: Barrier,
}

/// A group of threads that exchange data like a group of processes
#[derive(Debug)]
pub struct ThreadGroup;

impl ThreadGroup {
    /// Run `f` on `size` threads and collect the results in rank order
    ///
    /// Each thread gets its own [ThreadExchange]. As with MPI, every thread has to call the
    /// same collective operations in the same order. A collective that fails on one thread
    /// fails on all of them.
    pub fn run<R, F>(size: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(ThreadExchange) -> R + Sync,
    {
        assert!(size > 0, "a thread group needs at least one thread");
        let shared = Arc::new(Shared {
            size,
            slots: Mutex::new((0..size).map(|_| None).collect()),
            barrier: Barrier::new(size),
        });
        thread::scope(|s| {
            let f = &f;
            let handles = (0..size)
                .map(|rank| {
                    let exchange = ThreadExchange {
                        rank,
                        shared: Arc::clone(&shared),
                    };
                    s.spawn(move || f(exchange))
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    }
}

/// The exchange of one thread of a [ThreadGroup]
#[derive(Clone)]
pub struct ThreadExchange {
    rank: usize,
    shared: Arc<Shared>,
}

impl fmt::Debug for ThreadExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadExchange")
            .field("rank", &self.rank)
            .field("size", &self.shared.size)
            .finish()
    }
}

impl Exchange for ThreadExchange {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.shared.size
    }

    fn all_to_all<X: Payload>(&self, send: &[Vec<X>]) -> Result<Vec<Vec<X>>> {
        // A rank with invalid input still takes part in both barriers, so its peers fail
        // instead of waiting forever
        let checked = check_send_count(send, self.shared.size);
        let data: Option<Box<dyn Any + Send>> = match checked {
            Ok(()) => Some(Box::new(send.to_vec())),
            Err(_) => None,
        };
        self.shared
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)[self.rank] = data;
        self.shared.barrier.wait();

        let recv = {
            let slots = self
                .shared
                .slots
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            slots
                .iter()
                .enumerate()
                .map(|(p, slot)| {
                    slot.as_ref()
                        .and_then(|data| data.downcast_ref::<Vec<Vec<X>>>())
                        .map(|data| data[self.rank].clone())
                        .ok_or_else(|| {
                            ContactError::Exchange(format!(
                                "rank {p} took part in a different collective operation"
                            ))
                        })
                })
                .collect::<Result<Vec<_>>>()
        };

        // Nobody may overwrite a slot before every thread has read it
        self.shared.barrier.wait();
        self.shared
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)[self.rank] = None;
        checked?;
        recv
    }
}

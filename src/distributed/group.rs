//! Process groups and their collective operations.
//!
//! A [`Communicator`] is one participant's handle on a group: it knows its
//! rank and the group size and can take part in a barrier or an all-gather.
//! Collectives must be entered by every rank in the same order; a rank that
//! skips one leaves the others waiting.
//!
//! [`LocalGroup`] runs the ranks as OS threads that share nothing but the
//! channels between them, one channel per ordered (sender, receiver) pair.
//! Messages on a pair arrive in send order, so back-to-back collectives
//! can't mix their payloads.

use std::panic;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Barrier};
use std::thread;

use log::debug;

use crate::error::{MxvError, Result};

/// One rank's view of a process group.
pub trait Communicator {
    /// This participant's index, in `0..size()`.
    fn rank(&self) -> usize;

    /// Number of participants.
    fn size(&self) -> usize;

    /// Block until every rank has reached the barrier.
    fn barrier(&self);

    /// Contribute `block` and receive every rank's block, concatenated in
    /// rank order. Blocks may differ in length between ranks.
    fn all_gather(&self, block: &[f64]) -> Result<Vec<f64>>;
}

/// A group of one. Collectives return immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleProcess;

impl Communicator for SingleProcess {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn barrier(&self) {}

    fn all_gather(&self, block: &[f64]) -> Result<Vec<f64>> {
        Ok(block.to_vec())
    }
}

/// Communicator for one rank of a [`LocalGroup`].
pub struct LocalComm {
    rank: usize,
    size: usize,
    barrier: Arc<Barrier>,
    // Indexed by peer rank; `None` at our own rank.
    to_peer: Vec<Option<Sender<Vec<f64>>>>,
    from_peer: Vec<Option<Receiver<Vec<f64>>>>,
}

impl Communicator for LocalComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) {
        self.barrier.wait();
    }

    fn all_gather(&self, block: &[f64]) -> Result<Vec<f64>> {
        let lost = |peer| MxvError::PeerDisconnected {
            rank: self.rank,
            peer,
        };

        // Sends never block, so every rank can post before anyone receives.
        for (peer, tx) in self.to_peer.iter().enumerate() {
            if let Some(tx) = tx {
                tx.send(block.to_vec()).map_err(|_| lost(peer))?;
            }
        }

        let mut gathered = Vec::with_capacity(block.len() * self.size);
        for (peer, rx) in self.from_peer.iter().enumerate() {
            match rx {
                Some(rx) => gathered.extend(rx.recv().map_err(|_| lost(peer))?),
                None => gathered.extend_from_slice(block),
            }
        }
        Ok(gathered)
    }
}

/// Launches a group of ranks inside this process.
pub struct LocalGroup;

impl LocalGroup {
    /// Build `size` communicators wired to each other.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn connect(size: usize) -> Vec<LocalComm> {
        assert!(size > 0, "a group needs at least one rank");

        let barrier = Arc::new(Barrier::new(size));
        let mut to_peer: Vec<Vec<Option<Sender<Vec<f64>>>>> =
            (0..size).map(|_| (0..size).map(|_| None).collect()).collect();
        let mut from_peer: Vec<Vec<Option<Receiver<Vec<f64>>>>> =
            (0..size).map(|_| (0..size).map(|_| None).collect()).collect();

        for src in 0..size {
            for dst in 0..size {
                if src != dst {
                    let (tx, rx) = mpsc::channel();
                    to_peer[src][dst] = Some(tx);
                    from_peer[dst][src] = Some(rx);
                }
            }
        }

        to_peer
            .into_iter()
            .zip(from_peer)
            .enumerate()
            .map(|(rank, (to_peer, from_peer))| LocalComm {
                rank,
                size,
                barrier: Arc::clone(&barrier),
                to_peer,
                from_peer,
            })
            .collect()
    }

    /// Run `f` once on every rank of a fresh `size`-rank group and return
    /// the per-rank results in rank order.
    ///
    /// Every rank executes the same closure, so the collectives it issues
    /// line up by construction. A panic on any rank is re-raised here once
    /// all ranks have finished.
    pub fn run<T, F>(size: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(LocalComm) -> T + Sync,
    {
        debug!("launching local group of {} ranks", size);
        let f = &f;
        thread::scope(|s| {
            let handles: Vec<_> = Self::connect(size)
                .into_iter()
                .map(|comm| s.spawn(move || f(comm)))
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_process() {
        let comm = SingleProcess;
        comm.barrier();
        assert_eq!(comm.all_gather(&[1.0, 2.0]).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_all_gather_rank_order() {
        let out = LocalGroup::run(4, |comm| {
            let r = comm.rank() as f64;
            comm.all_gather(&[r, r]).unwrap()
        });
        for gathered in out {
            assert_eq!(gathered, vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
        }
    }

    #[test]
    fn test_unequal_blocks() {
        let out = LocalGroup::run(3, |comm| {
            let block = vec![comm.rank() as f64; comm.rank() + 1];
            comm.all_gather(&block).unwrap()
        });
        for gathered in out {
            assert_eq!(gathered, vec![0.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
        }
    }

    #[test]
    fn test_back_to_back_collectives_stay_ordered() {
        let out = LocalGroup::run(3, |comm| {
            let mut rounds = Vec::new();
            for round in 0..20 {
                let v = (round * 10 + comm.rank()) as f64;
                rounds.push(comm.all_gather(&[v]).unwrap());
            }
            rounds
        });
        for rounds in out {
            for (round, gathered) in rounds.iter().enumerate() {
                let base = (round * 10) as f64;
                assert_eq!(gathered, &vec![base, base + 1.0, base + 2.0]);
            }
        }
    }

    #[test]
    fn test_departed_peer_is_reported() {
        let mut comms = LocalGroup::connect(2);
        let survivor = comms.remove(0);
        drop(comms);
        assert!(matches!(
            survivor.all_gather(&[1.0]),
            Err(MxvError::PeerDisconnected { rank: 0, peer: 1 })
        ));
    }
}

//! Lockstep replica checking.
//!
//! Peers in a lockstep match each run the full simulation and must stay in
//! agreement.  [`verify_replicas`] runs the same scenario several times and
//! compares [`TrajectoryDigest`]s.  With the `parallel` feature the replicas
//! run on Rayon's thread pool, which also shakes out any hidden dependence
//! on thread or scheduling order.

use tracing::{info, warn};

use dr_grid::PathFinder;

use crate::{Sim, SimResult, TrajectoryDigest};

/// Outcome of [`verify_replicas`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplicaReport {
    /// One digest per replica, in replica order.
    pub digests:   Vec<u64>,
    pub snapshots: u64,
}

impl ReplicaReport {
    pub fn all_agree(&self) -> bool {
        self.digests.windows(2).all(|w| w[0] == w[1])
    }

    /// Index of the first replica that disagrees with replica 0.
    pub fn first_divergent(&self) -> Option<usize> {
        let first = *self.digests.first()?;
        self.digests.iter().position(|&d| d != first)
    }
}

fn run_one<P: PathFinder>(mut sim: Sim<P>) -> SimResult<(u64, u64)> {
    let mut digest = TrajectoryDigest::new();
    sim.run(&mut digest)?;
    Ok((digest.finish(), digest.snapshots()))
}

/// Build `replicas` simulations with `make`, run each to completion, and
/// collect their digests.
///
/// `num_threads` sizes the worker pool; `None` uses all cores.  It is ignored
/// without the `parallel` feature.
pub fn verify_replicas<P, F>(replicas: usize, num_threads: Option<usize>, make: F) -> SimResult<ReplicaReport>
where
    P: PathFinder,
    F: Fn() -> SimResult<Sim<P>> + Sync,
{
    #[cfg(not(feature = "parallel"))]
    let runs: Vec<(u64, u64)> = {
        let _ = num_threads;
        (0..replicas)
            .map(|_| run_one(make()?))
            .collect::<SimResult<_>>()?
    };

    #[cfg(feature = "parallel")]
    let runs: Vec<(u64, u64)> = {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads.unwrap_or(0))
            .build()
            .map_err(|e| crate::SimError::Config(format!("thread pool: {e}")))?;
        pool.install(|| {
            (0..replicas)
                .into_par_iter()
                .map(|_| run_one(make()?))
                .collect::<SimResult<_>>()
        })?
    };

    let report = ReplicaReport {
        snapshots: runs.first().map_or(0, |r| r.1),
        digests:   runs.into_iter().map(|r| r.0).collect(),
    };
    match report.first_divergent() {
        None    => info!(replicas, "replicas agree"),
        Some(i) => warn!(replicas, divergent = i, "replica diverged"),
    }
    Ok(report)
}

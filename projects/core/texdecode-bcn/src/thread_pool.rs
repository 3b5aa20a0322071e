//! Picks where data-parallel work runs, from `Config::threads`.
//!
//! A [`Workers`] is built once per decode and shared by every level, so a dedicated pool is
//! spun up at most once no matter how many mip levels the image has.

#[cfg(feature = "multithreaded")]
use tracing::warn;

/// Where the tile rows and levels of one decode run.
#[derive(Debug)]
pub enum Workers {
    /// On the calling thread.
    Sequential,
    /// On the global `rayon` pool.
    #[cfg(feature = "multithreaded")]
    Global,
    /// On a pool owned by this decode.
    #[cfg(feature = "multithreaded")]
    Dedicated(rayon::ThreadPool),
}

impl Workers {
    /// Selects workers for `threads`.
    ///
    /// `1` is sequential, `0` the global pool and any other value a dedicated pool of that many
    /// threads. If the pool cannot be built, the global pool is used instead.
    #[cfg(feature = "multithreaded")]
    pub fn new(threads: usize) -> Self {
        match threads {
            0 => Workers::Global,
            1 => Workers::Sequential,
            n => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => Workers::Dedicated(pool),
                Err(error) => {
                    warn!(%error, threads = n, "could not build thread pool, using the global pool");
                    Workers::Global
                }
            },
        }
    }

    /// Selects workers for `threads`. Always sequential without the `multithreaded` feature.
    #[cfg(not(feature = "multithreaded"))]
    pub fn new(threads: usize) -> Self {
        let _ = threads;
        Workers::Sequential
    }

    /// Returns `true` if work stays on the calling thread.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        matches!(self, Workers::Sequential)
    }

    /// Runs `op` on these workers; `rayon` iterators inside it use the selected pool.
    #[cfg(feature = "multithreaded")]
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match self {
            Workers::Dedicated(pool) => pool.install(op),
            _ => op(),
        }
    }
}

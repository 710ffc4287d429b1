//! ChaCha8-backed random number generator
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. Monte Carlo runs each get
//! their own ChaCha stream derived from a shared base seed, so a single run
//! can be replayed in isolation and runs never share generator state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::config::TransitionParams;
use crate::core::time::STEP_SECONDS;

/// Deterministic random number generator for one simulation run
///
/// # Example
/// ```
/// use production_line_sim_core::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let u = rng.next_f64();
/// assert!((0.0..1.0).contains(&u));
/// ```
#[derive(Debug, Clone)]
pub struct RngManager {
    inner: ChaCha8Rng,
    seed: u64,
    stream: u64,
}

impl RngManager {
    /// Create a new RNG with given seed on stream 0
    pub fn new(seed: u64) -> Self {
        Self::for_run(seed, 0)
    }

    /// Create the generator for one Monte Carlo run
    ///
    /// Every `run_index` selects a distinct ChaCha stream of `base_seed`.
    ///
    /// # Example
    /// ```
    /// use production_line_sim_core::RngManager;
    ///
    /// let mut a = RngManager::for_run(7, 3);
    /// let mut b = RngManager::for_run(7, 3);
    /// assert_eq!(a.next_f64(), b.next_f64());
    /// ```
    pub fn for_run(base_seed: u64, run_index: u64) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(base_seed);
        inner.set_stream(run_index);
        Self {
            inner,
            seed: base_seed,
            stream: run_index,
        }
    }

    /// Seed this generator was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stream (run index) this generator draws from
    pub fn stream(&self) -> u64 {
        self.stream
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Sample from a normal distribution
    ///
    /// A negative or NaN `std_dev` is not rejected here; callers validate
    /// configuration before it reaches the engine.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = StandardNormal.sample(&mut self.inner);
        mean + std_dev * z
    }

    /// Sample the delay before a transition may fire again
    ///
    /// Normal(mean, sd), floored at one step.
    pub fn delay(&mut self, params: &TransitionParams) -> f64 {
        self.normal(params.mean_time, params.time_sd).max(STEP_SECONDS)
    }
}

/// Draw a fresh base seed from OS entropy
///
/// Used when the caller did not pin a seed; the drawn value is reported back
/// so the Monte Carlo call can be replayed.
pub fn entropy_seed() -> u64 {
    rand::random::<u64>()
}

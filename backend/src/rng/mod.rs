//! Deterministic random number generation
//!
//! Uses ChaCha8 for fast, portable, seedable random number generation.
//! CRITICAL: All randomness in the simulator MUST go through this module.

mod chacha;

pub use chacha::{entropy_seed, RngManager};

//! Injectable randomness capability
//!
//! Timeline planning draws Bernoulli trials and uniform integers through this
//! trait so tests can script the draws instead of depending on thread RNG
//! state.

use rand::Rng;

/// Source of the random draws used when planning an iteration
pub trait Randomness: Send {
    /// Uniform integer in the inclusive range `[min, max]`
    ///
    /// A degenerate range (`min == max`) is legal and returns `min`. Callers
    /// must not pass `min > max`; definition validation rejects such ranges
    /// before a loop starts.
    fn uniform_int(&mut self, min: i64, max: i64) -> i64;

    /// Bernoulli trial with success probability `p` in `[0, 1]`
    fn bernoulli(&mut self, p: f64) -> bool;
}

/// Thread-RNG backed randomness used outside of tests
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomness;

impl Randomness for ThreadRandomness {
    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        rand::rng().random_range(min..=max)
    }

    fn bernoulli(&mut self, p: f64) -> bool {
        rand::rng().random_bool(p)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedRandomness;
    use super::*;

    #[test]
    fn test_thread_randomness_respects_inclusive_range() {
        let mut rng = ThreadRandomness;
        for _ in 0..100 {
            let value = rng.uniform_int(2, 4);
            assert!((2..=4).contains(&value));
        }
    }

    #[test]
    fn test_thread_randomness_degenerate_range_is_deterministic() {
        let mut rng = ThreadRandomness;
        assert_eq!(rng.uniform_int(10, 10), 10);
    }

    #[test]
    fn test_thread_randomness_bernoulli_extremes() {
        let mut rng = ThreadRandomness;
        assert!(rng.bernoulli(1.0));
        assert!(!rng.bernoulli(0.0));
    }

    #[test]
    fn test_scripted_randomness_records_ranges() {
        let mut rng = ScriptedRandomness::with_uniforms(&[7]);
        assert_eq!(rng.uniform_int(5, 9), 7);
        assert_eq!(rng.uniform_int(2, 4), 2);
        let calls = rng.uniform_calls.lock().unwrap();
        assert_eq!(*calls, vec![(5, 9), (2, 4)]);
    }
}

//! Fitness-proportional (roulette wheel) selection.
//!
//! Onlooker bees choose which employed bee to reinforce with probability
//! `p_i = f_i / sum(f)`. The distribution is computed once per generation
//! and sampled once per onlooker.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)

use rand::Rng;

/// Normalizes fitness values into a probability distribution.
///
/// Falls back to a uniform distribution when the total is zero, negative
/// or not finite, so the result always sums to 1 for a non-empty input.
pub fn selection_probabilities(fitness: &[f64]) -> Vec<f64> {
    let n = fitness.len();
    if n == 0 {
        return Vec::new();
    }

    let total: f64 = fitness.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return vec![1.0 / n as f64; n];
    }

    fitness.iter().map(|&f| f / total).collect()
}

/// Roulette wheel draw over `probabilities`.
///
/// Draws `r` uniformly in `[0, 1)` and returns the first index whose
/// cumulative probability exceeds `r`. Rounding can leave the final
/// cumulative sum just below `r`; the last index is returned then.
///
/// # Panics
/// Panics if `probabilities` is empty.
pub fn roulette_select<R: Rng>(probabilities: &[f64], rng: &mut R) -> usize {
    assert!(
        !probabilities.is_empty(),
        "cannot select from empty distribution"
    );

    let r: f64 = rng.random_range(0.0..1.0);
    let mut cumulative = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative > r {
            return i;
        }
    }

    probabilities.len() - 1 // floating-point fallback
}

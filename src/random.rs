//! Seedable randomness helpers.
//!
//! Every random draw in the colony goes through an explicit `Rng` handed in
//! by the caller. Generators and shuffles come from `u_numflow::random`;
//! this module only resolves an optional seed.

use rand::Rng;
use u_numflow::random::create_rng;

/// Creates a generator from an optional seed, drawing one when absent.
pub fn rng_from_seed(seed: Option<u64>) -> impl Rng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

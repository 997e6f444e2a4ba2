//! Permutation moves for tours.
//!
//! - [`random_tour`]: uniformly random permutation of `0..n` (Fisher–Yates)
//! - [`three_cycle`]: rotate the occupants of three distinct positions
//! - [`is_permutation`]: validity check used by tests and debug assertions

use rand::Rng;
use u_numflow::random::shuffle;

/// Uniformly random permutation of `0..n`.
pub fn random_tour<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut tour: Vec<usize> = (0..n).collect();
    shuffle(&mut tour, rng);
    tour
}

/// 3-cycle neighbor: picks three distinct positions `i`, `j`, `k` and
/// rotates their occupants so that `i` takes `j`'s value, `j` takes `k`'s
/// and `k` takes `i`'s.
///
/// Tours with fewer than three stops fall back to the largest move that
/// exists: two stops are swapped, a single stop is returned unchanged.
///
/// # Complexity
/// O(n) for the copy, O(1) for the move
pub fn three_cycle<R: Rng>(tour: &[usize], rng: &mut R) -> Vec<usize> {
    let mut next = tour.to_vec();
    let n = next.len();
    match n {
        0 | 1 => {}
        2 => next.swap(0, 1),
        _ => {
            let (i, j, k) = three_distinct(n, rng);
            next[i] = tour[j];
            next[j] = tour[k];
            next[k] = tour[i];
        }
    }
    next
}

/// Draws three distinct positions in `0..n` uniformly. Requires `n >= 3`.
fn three_distinct<R: Rng>(n: usize, rng: &mut R) -> (usize, usize, usize) {
    let i = rng.random_range(0..n);

    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }

    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    let mut k = rng.random_range(0..n - 2);
    if k >= lo {
        k += 1;
    }
    if k >= hi {
        k += 1;
    }

    (i, j, k)
}

/// Whether `tour` is a permutation of `0..n`.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in tour {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

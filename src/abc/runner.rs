//! Bee colony driver.
//!
//! [`AbcRunner`] repeatedly calls [`step`] and applies the stopping policy:
//! a fixed generation budget, an optional stagnation window, and an
//! optional cancellation flag.

use super::colony::{initialize, step};
use super::config::AbcConfig;
use super::types::{BestSolution, ColonyState};
use crate::error::{AbcError, Result};
use crate::geo::{Coordinate, Location};
use crate::random::rng_from_seed;
use crate::tour::TourEvaluator;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Result of a bee colony run.
#[derive(Debug, Clone)]
pub struct AbcResult {
    /// The best tour found during the run.
    pub best: BestSolution,

    /// Number of generations executed.
    pub iterations: usize,

    /// Iteration at which `best` was found.
    pub last_improvement_iteration: usize,

    /// Whether the run stopped because the stagnation window elapsed.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best distance after initialization and after each generation.
    pub distance_history: Vec<f64>,

    /// Colony state after the last generation.
    pub state: ColonyState,
}

/// Executes the bee colony loop.
pub struct AbcRunner;

impl AbcRunner {
    /// Runs the colony over `locations` starting and ending at `origin`.
    ///
    /// # Errors
    /// Fails if the configuration is invalid or `locations` is empty.
    pub fn run(
        locations: &[Location],
        origin: Coordinate,
        config: &AbcConfig,
    ) -> Result<AbcResult> {
        Self::run_with_cancel(locations, origin, config, None)
    }

    /// Runs the colony with an optional cancellation token.
    ///
    /// The flag is checked before every generation; once set, the run
    /// returns the best tour found so far.
    pub fn run_with_cancel(
        locations: &[Location],
        origin: Coordinate,
        config: &AbcConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AbcResult> {
        let evaluator = TourEvaluator::new(locations, origin);
        let mut rng = rng_from_seed(config.seed);

        let mut state = initialize(&evaluator, config, &mut rng)?;

        let mut distance_history = Vec::with_capacity(config.max_iterations + 1);
        distance_history.push(state.best().distance);

        let mut iterations = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        for iteration in 0..config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            state = step(&state, &evaluator, config, iteration, &mut rng);
            iterations += 1;
            distance_history.push(state.best().distance);

            if config.stagnation_window > 0
                && state.stagnation(iteration) > config.stagnation_window
            {
                stagnated = true;
                break;
            }
        }

        info!(
            iterations,
            stagnated,
            cancelled,
            best_distance = state.best().distance,
            "bee colony run finished"
        );

        Ok(AbcResult {
            best: state.best().clone(),
            iterations,
            last_improvement_iteration: state.last_improvement_iteration(),
            stagnated,
            cancelled,
            distance_history,
            state,
        })
    }

    /// Runs `runs` independent colonies and keeps the shortest tour.
    ///
    /// Run `r` is seeded with `seed + r`, where `seed` is the configured
    /// seed or a random one. With the `parallel` feature the runs execute
    /// on the rayon thread pool; they share no state either way.
    ///
    /// # Errors
    /// Fails if `runs` is 0 or any run fails.
    pub fn run_multi_start(
        locations: &[Location],
        origin: Coordinate,
        config: &AbcConfig,
        runs: usize,
    ) -> Result<AbcResult> {
        if runs == 0 {
            return Err(AbcError::invalid_config("runs must be positive"));
        }
        let base_seed = config.seed.unwrap_or_else(rand::random);

        let run_one = |r: usize| {
            let config = config.clone().with_seed(base_seed.wrapping_add(r as u64));
            Self::run(locations, origin, &config)
        };

        #[cfg(feature = "parallel")]
        let results: Vec<Result<AbcResult>> = (0..runs).into_par_iter().map(run_one).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<Result<AbcResult>> = (0..runs).map(run_one).collect();

        let mut best: Option<AbcResult> = None;
        for result in results {
            let result = result?;
            if best
                .as_ref()
                .is_none_or(|b| result.best.fitness > b.best.fitness)
            {
                best = Some(result);
            }
        }
        best.ok_or_else(|| AbcError::invalid_config("runs must be positive"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_km;
    use crate::tour::operators::is_permutation;

    fn triangle() -> (Vec<Location>, Coordinate) {
        let locations = vec![
            Location::new("north", (4.700, -74.080)),
            Location::new("south-west", (4.630, -74.120)),
            Location::new("south-east", (4.630, -74.040)),
        ];
        (locations, Coordinate::new(4.600, -74.080))
    }

    fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    #[test]
    fn test_triangle_finds_brute_force_optimum() {
        let (locations, origin) = triangle();
        let eval = TourEvaluator::new(&locations, origin);
        let optimum = permutations(&[0, 1, 2])
            .iter()
            .map(|t| eval.distance(t))
            .fold(f64::INFINITY, f64::min);

        let config = AbcConfig::default()
            .with_population_size(10)
            .with_max_iterations(50)
            .with_stagnation_window(0)
            .with_seed(42);
        let result = AbcRunner::run(&locations, origin, &config).unwrap();

        assert_eq!(result.iterations, 50);
        assert!(is_permutation(&result.best.path, 3));
        assert!(
            (result.best.distance - optimum).abs() < 1e-9,
            "expected {optimum}, got {}",
            result.best.distance
        );
    }

    #[test]
    fn test_single_location_round_trip() {
        let locations = vec![Location::new("only", (4.700, -74.050))];
        let origin = Coordinate::new(4.6486, -74.0856);
        let expected = 2.0 * haversine_km(origin, locations[0].coordinates);

        let config = AbcConfig::default().with_seed(1);
        let result = AbcRunner::run(&locations, origin, &config).unwrap();

        assert_eq!(result.best.path, vec![0]);
        assert!((result.best.distance - expected).abs() < 1e-9);
        for bee in result.state.employed() {
            assert_eq!(bee.tour, vec![0]);
        }
    }

    #[test]
    fn test_population_of_two_is_rejected() {
        let (locations, origin) = triangle();
        let config = AbcConfig::default().with_population_size(2);
        let err = AbcRunner::run(&locations, origin, &config).unwrap_err();
        assert!(matches!(err, AbcError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_locations_rejected() {
        let config = AbcConfig::default();
        let err = AbcRunner::run(&[], Coordinate::new(0.0, 0.0), &config).unwrap_err();
        assert_eq!(err, AbcError::EmptyLocations);
    }

    #[test]
    fn test_distance_history_non_increasing() {
        let locations: Vec<Location> = (0..20)
            .map(|i| {
                let t = i as f64 / 20.0 * std::f64::consts::TAU;
                let lat = 4.65 + 0.03 * t.sin();
                let lng = -74.08 + 0.03 * t.cos();
                Location::new(format!("p{i}"), (lat, lng))
            })
            .collect();
        let config = AbcConfig::default()
            .with_max_iterations(150)
            .with_stagnation_window(0)
            .with_seed(8);
        let result = AbcRunner::run(&locations, Coordinate::new(4.65, -74.08), &config).unwrap();

        assert_eq!(result.distance_history.len(), 151);
        for window in result.distance_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best distance should never increase: {} > {}",
                window[1],
                window[0]
            );
        }
        assert!(result.distance_history.last().unwrap() < result.distance_history.first().unwrap());
    }

    #[test]
    fn test_stagnation_stops_early() {
        // A single stop can never improve, so the run stops once the window
        // has elapsed.
        let locations = vec![Location::new("only", (4.7, -74.05))];
        let config = AbcConfig::default()
            .with_max_iterations(1000)
            .with_stagnation_window(20)
            .with_seed(3);
        let result = AbcRunner::run(&locations, Coordinate::new(4.6, -74.1), &config).unwrap();

        assert!(result.stagnated);
        assert!(!result.cancelled);
        assert_eq!(result.last_improvement_iteration, 0);
        assert_eq!(result.iterations, 22);
    }

    #[test]
    fn test_cancellation() {
        let (locations, origin) = triangle();
        let config = AbcConfig::default().with_seed(42);

        let cancel = Arc::new(AtomicBool::new(true));
        let result = AbcRunner::run_with_cancel(&locations, origin, &config, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.distance_history.len(), 1);
    }

    #[test]
    fn test_same_seed_same_result() {
        let (locations, origin) = triangle();
        let config = AbcConfig::default().with_seed(77);
        let a = AbcRunner::run(&locations, origin, &config).unwrap();
        let b = AbcRunner::run(&locations, origin, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.distance_history, b.distance_history);
        assert_eq!(a.state, b.state);
    }

    #[test]
    fn test_multi_start_keeps_best_run() {
        let locations: Vec<Location> = (0..12)
            .map(|i| {
                let lat = 4.6 + 0.01 * (i % 4) as f64;
                let lng = -74.1 + 0.013 * (i / 4) as f64;
                Location::new(format!("p{i}"), (lat, lng))
            })
            .collect();
        let origin = Coordinate::new(4.62, -74.09);
        let config = AbcConfig::default().with_max_iterations(40).with_seed(100);

        let best = AbcRunner::run_multi_start(&locations, origin, &config, 4).unwrap();
        for r in 0..4u64 {
            let single = AbcRunner::run(&locations, origin, &config.clone().with_seed(100 + r)).unwrap();
            assert!(best.best.distance <= single.best.distance);
        }
        assert!(is_permutation(&best.best.path, 12));
    }

    #[test]
    fn test_multi_start_rejects_zero_runs() {
        let (locations, origin) = triangle();
        let err = AbcRunner::run_multi_start(&locations, origin, &AbcConfig::default(), 0).unwrap_err();
        assert!(matches!(err, AbcError::InvalidConfig(_)));
    }
}

//! Colony construction and the per-generation phase sequence.
//!
//! [`step`] runs, in order:
//!
//! 1. Employed phase: one 3-cycle move per employed bee, greedy acceptance
//! 2. Selection probabilities from the post-move employed fitness
//! 3. Onlooker phase: fitness-proportional extra moves, buffered and folded
//! 4. Scout phase: abandon tours whose trial counter reached `limit`
//! 5. Best-solution update

use super::config::AbcConfig;
use super::selection::{roulette_select, selection_probabilities};
use super::types::{BestSolution, ColonyState, EmployedBee, PopulationSplit};
use crate::error::{AbcError, Result};
use crate::geo::BoundingBox;
use crate::tour::operators::{random_tour, three_cycle};
use crate::tour::TourEvaluator;
use rand::Rng;
use tracing::{debug, trace};

/// Builds the initial colony.
///
/// Every employed bee starts from an independent uniformly random tour.
/// The fittest of them seeds the best-solution record, with iteration 0
/// as its last improvement.
///
/// # Errors
///
/// - [`AbcError::InvalidConfig`] if `config` does not validate
///   (e.g. fewer than 3 bees)
/// - [`AbcError::EmptyLocations`] if the evaluator has no locations
pub fn initialize<R: Rng>(
    evaluator: &TourEvaluator<'_>,
    config: &AbcConfig,
    rng: &mut R,
) -> Result<ColonyState> {
    config.validate()?;
    if evaluator.is_empty() {
        return Err(AbcError::EmptyLocations);
    }

    let split = PopulationSplit::new(config.population_size)?;
    let bounds = BoundingBox::from_locations(evaluator.locations());
    let n = evaluator.len();

    let employed: Vec<EmployedBee> = (0..split.employed)
        .map(|_| fresh_bee(n, evaluator, rng))
        .collect();

    let best = fittest(&employed)
        .map(BestSolution::from)
        .ok_or_else(|| AbcError::invalid_config("colony has no employed bees"))?;

    debug!(
        locations = n,
        employed = split.employed,
        onlookers = split.onlooker,
        scouts = split.scout,
        best_distance = best.distance,
        "bee colony initialized"
    );

    Ok(ColonyState {
        employed,
        split,
        bounds,
        best,
        last_improvement_iteration: 0,
    })
}

/// Advances the colony by one generation.
///
/// `state` is left untouched; the next generation is returned as a new
/// value. `iteration` is recorded as the last-improvement iteration when
/// the best solution improves, and is otherwise only informational, so any
/// monotonic numbering chosen by the caller works.
///
/// # Panics
/// Panics if the tours in `state` index past `evaluator`'s locations, i.e.
/// the state was built over a different location set. Debug builds check
/// this up front.
pub fn step<R: Rng>(
    state: &ColonyState,
    evaluator: &TourEvaluator<'_>,
    config: &AbcConfig,
    iteration: usize,
    rng: &mut R,
) -> ColonyState {
    debug_assert!(
        state.employed.iter().all(|b| b.tour.len() == evaluator.len()),
        "colony tours do not match the evaluator's {} locations",
        evaluator.len()
    );

    let mut employed = state.employed.clone();

    let employed_improved = employed_phase(&mut employed, evaluator, rng);
    let onlooker_improved =
        onlooker_phase(&mut employed, state.split.onlooker, evaluator, rng);
    let abandoned = scout_phase(&mut employed, config.limit, evaluator, rng);

    trace!(
        iteration,
        employed_improved,
        onlooker_improved,
        abandoned,
        "bee colony phases complete"
    );

    let (best, last_improvement_iteration) = match fittest(&employed) {
        Some(bee) if bee.fitness > state.best.fitness => {
            debug!(
                iteration,
                previous = state.best.distance,
                distance = bee.distance,
                "best tour improved"
            );
            (BestSolution::from(bee), iteration)
        }
        _ => (state.best.clone(), state.last_improvement_iteration),
    };

    ColonyState {
        employed,
        split: state.split,
        bounds: state.bounds,
        best,
        last_improvement_iteration,
    }
}

/// One 3-cycle move per employed bee with greedy acceptance.
///
/// Returns the number of bees whose tour improved.
fn employed_phase<R: Rng>(
    employed: &mut [EmployedBee],
    evaluator: &TourEvaluator<'_>,
    rng: &mut R,
) -> usize {
    let mut improved = 0;
    for bee in employed.iter_mut() {
        let candidate = three_cycle(&bee.tour, rng);
        let (distance, fitness) = evaluator.evaluate(&candidate);
        if fitness > bee.fitness {
            bee.replace(candidate, distance, fitness);
            improved += 1;
        } else {
            bee.trials += 1;
        }
    }
    improved
}

/// An improving tour proposed by an onlooker for one employed bee.
struct Proposal {
    tour: Vec<usize>,
    distance: f64,
    fitness: f64,
}

/// Fitness-proportional reinforcement of the employed tours.
///
/// Every onlooker selects against the same snapshot of the employed
/// population and its proposal is written to a side buffer keyed by the
/// selected bee. Once all onlookers have searched, each bee takes its best
/// improving proposal and resets its trials; a bee without one adds the
/// number of failed onlooker attempts it received to its trial counter.
/// The result does not depend on the order in which onlookers are
/// processed.
///
/// Returns the number of bees whose tour improved.
fn onlooker_phase<R: Rng>(
    employed: &mut [EmployedBee],
    onlookers: usize,
    evaluator: &TourEvaluator<'_>,
    rng: &mut R,
) -> usize {
    if employed.is_empty() || onlookers == 0 {
        return 0;
    }

    let fitness: Vec<f64> = employed.iter().map(|b| b.fitness).collect();
    let probabilities = selection_probabilities(&fitness);

    let mut proposals: Vec<Option<Proposal>> = employed.iter().map(|_| None).collect();
    let mut failures = vec![0usize; employed.len()];

    for _ in 0..onlookers {
        let idx = roulette_select(&probabilities, rng).min(employed.len() - 1);
        let source = &employed[idx];

        let candidate = three_cycle(&source.tour, rng);
        let (distance, candidate_fitness) = evaluator.evaluate(&candidate);

        if candidate_fitness > source.fitness {
            let slot = &mut proposals[idx];
            if slot.as_ref().is_none_or(|p| candidate_fitness > p.fitness) {
                *slot = Some(Proposal {
                    tour: candidate,
                    distance,
                    fitness: candidate_fitness,
                });
            }
        } else {
            failures[idx] += 1;
        }
    }

    let mut improved = 0;
    for ((bee, proposal), failed) in employed.iter_mut().zip(proposals).zip(failures) {
        match proposal {
            Some(p) => {
                bee.replace(p.tour, p.distance, p.fitness);
                improved += 1;
            }
            None => bee.trials += failed,
        }
    }
    improved
}

/// Abandons every employed tour whose trial counter reached `limit`.
///
/// Returns the number of abandoned tours.
fn scout_phase<R: Rng>(
    employed: &mut [EmployedBee],
    limit: usize,
    evaluator: &TourEvaluator<'_>,
    rng: &mut R,
) -> usize {
    let mut abandoned = 0;
    for bee in employed.iter_mut().filter(|b| b.trials >= limit) {
        *bee = fresh_bee(evaluator.len(), evaluator, rng);
        abandoned += 1;
    }
    abandoned
}

fn fresh_bee<R: Rng>(n: usize, evaluator: &TourEvaluator<'_>, rng: &mut R) -> EmployedBee {
    let tour = random_tour(n, rng);
    let (distance, fitness) = evaluator.evaluate(&tour);
    EmployedBee::new(tour, distance, fitness)
}

/// The fittest bee; the first one wins ties.
fn fittest(employed: &[EmployedBee]) -> Option<&EmployedBee> {
    let mut best: Option<&EmployedBee> = None;
    for bee in employed {
        if best.is_none_or(|b| bee.fitness > b.fitness) {
            best = Some(bee);
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================

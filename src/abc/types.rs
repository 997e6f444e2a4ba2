//! Colony data: bees, role split and the best-solution record.

use crate::error::{AbcError, Result};
use crate::geo::BoundingBox;

/// The three bee roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BeeRole {
    /// Owns a tour and improves it locally.
    Employed,
    /// Reinforces the search on employed tours, chosen by fitness.
    Onlooker,
    /// Diversifies the colony. Only the abandonment of stagnant employed
    /// tours carries optimization weight; scout bees themselves own nothing.
    Scout,
}

/// How a population is divided among the roles.
///
/// `employed = size / 2`, `onlooker = 3 * size / 10` (both rounded down),
/// scouts take the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationSplit {
    pub employed: usize,
    pub onlooker: usize,
    pub scout: usize,
}

impl PopulationSplit {
    /// Splits `size` bees. Fails below 3, where the roles cannot all be
    /// represented.
    pub fn new(size: usize) -> Result<Self> {
        if size < 3 {
            return Err(AbcError::invalid_config(format!(
                "population_size must be at least 3, got {size}"
            )));
        }
        let employed = size / 2;
        let onlooker = size * 3 / 10;
        Ok(Self {
            employed,
            onlooker,
            scout: size - employed - onlooker,
        })
    }

    pub fn total(&self) -> usize {
        self.employed + self.onlooker + self.scout
    }

    pub fn count(&self, role: BeeRole) -> usize {
        match role {
            BeeRole::Employed => self.employed,
            BeeRole::Onlooker => self.onlooker,
            BeeRole::Scout => self.scout,
        }
    }
}

/// An employed bee and the tour it is working on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmployedBee {
    /// Visiting order, a permutation of location indices.
    pub tour: Vec<usize>,
    /// Round-trip distance of `tour` in kilometers.
    pub distance: f64,
    /// `1 / distance`, clamped.
    pub fitness: f64,
    /// Consecutive attempts that failed to improve `tour`.
    pub trials: usize,
}

impl EmployedBee {
    pub(crate) fn new(tour: Vec<usize>, distance: f64, fitness: f64) -> Self {
        Self {
            tour,
            distance,
            fitness,
            trials: 0,
        }
    }

    /// Replaces the tour and clears the trial counter.
    pub(crate) fn replace(&mut self, tour: Vec<usize>, distance: f64, fitness: f64) {
        self.tour = tour;
        self.distance = distance;
        self.fitness = fitness;
        self.trials = 0;
    }
}

/// Best tour seen so far in a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestSolution {
    pub path: Vec<usize>,
    pub distance: f64,
    pub fitness: f64,
}

impl From<&EmployedBee> for BestSolution {
    fn from(bee: &EmployedBee) -> Self {
        Self {
            path: bee.tour.clone(),
            distance: bee.distance,
            fitness: bee.fitness,
        }
    }
}

/// Complete colony state between two generations.
///
/// Produced by [`initialize`](super::initialize) and replaced wholesale by
/// every [`step`](super::step); a state is never modified after it has been
/// handed out.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColonyState {
    pub(crate) employed: Vec<EmployedBee>,
    pub(crate) split: PopulationSplit,
    pub(crate) bounds: Option<BoundingBox>,
    pub(crate) best: BestSolution,
    pub(crate) last_improvement_iteration: usize,
}

impl ColonyState {
    pub fn employed(&self) -> &[EmployedBee] {
        &self.employed
    }

    pub fn split(&self) -> PopulationSplit {
        self.split
    }

    /// Extent of the location set the colony was built over.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn best(&self) -> &BestSolution {
        &self.best
    }

    /// Iteration index at which the best solution last improved.
    pub fn last_improvement_iteration(&self) -> usize {
        self.last_improvement_iteration
    }

    /// Generations elapsed since the last improvement, as seen at
    /// `iteration`.
    pub fn stagnation(&self, iteration: usize) -> usize {
        iteration.saturating_sub(self.last_improvement_iteration)
    }
}

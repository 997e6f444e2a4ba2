//! ABC configuration.

use super::types::PopulationSplit;
use crate::error::{AbcError, Result};

/// Configuration for the bee colony and its driver.
///
/// The colony parameters (`population_size`, `limit`) shape every call to
/// [`step`](super::step). The stopping parameters (`max_iterations`,
/// `stagnation_window`) are only read by [`AbcRunner`](super::AbcRunner).
///
/// # Examples
///
/// ```
/// use u_beeroute::abc::AbcConfig;
///
/// let config = AbcConfig::default()
///     .with_population_size(30)
///     .with_limit(25)
///     .with_max_iterations(200)
///     .with_stagnation_window(40)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AbcConfig {
    /// Total number of bees across all three roles. Must be at least 3.
    pub population_size: usize,

    /// Consecutive non-improving attempts after which an employed bee's
    /// tour is abandoned. Must be at least 1.
    pub limit: usize,

    /// Number of generations the runner executes.
    pub max_iterations: usize,

    /// The runner stops once more than this many generations pass
    /// without a best-solution improvement. 0 = never stop early.
    pub stagnation_window: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AbcConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            limit: 50,
            max_iterations: 100,
            stagnation_window: 20,
            seed: None,
        }
    }
}

impl AbcConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_limit(mut self, n: usize) -> Self {
        self.limit = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_stagnation_window(mut self, n: usize) -> Self {
        self.stagnation_window = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// The population bound is the one [`PopulationSplit::new`] enforces.
    pub fn validate(&self) -> Result<()> {
        PopulationSplit::new(self.population_size)?;
        if self.limit == 0 {
            return Err(AbcError::invalid_config("limit must be positive"));
        }
        Ok(())
    }
}

//! Browser bindings.
//!
//! A front-end creates one [`WasmColony`] per run and calls
//! [`WasmColony::step`] on its own timer. Locations are passed as an array
//! of `{ name, coordinates: { lat, lng } }` objects.

use crate::abc::{initialize, step, AbcConfig, ColonyState};
use crate::geo::{Coordinate, Location};
use crate::random::rng_from_seed;
use crate::tour::TourEvaluator;
use rand::RngCore;
use std::num::TryFromIntError;
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Narrows location indices to the `u32` JS typed arrays carry.
fn path_to_u32(path: &[usize]) -> Result<Vec<u32>, TryFromIntError> {
    path.iter().map(|&i| u32::try_from(i)).collect()
}

/// A colony that owns its locations, origin and random generator.
#[wasm_bindgen]
pub struct WasmColony {
    locations: Vec<Location>,
    origin: Coordinate,
    config: AbcConfig,
    state: ColonyState,
    rng: Box<dyn RngCore>,
    iteration: usize,
}

#[wasm_bindgen]
impl WasmColony {
    #[wasm_bindgen(constructor)]
    pub fn new(
        locations: JsValue,
        lat: f64,
        lng: f64,
        population_size: usize,
        seed: Option<u64>,
    ) -> Result<WasmColony, JsValue> {
        let locations: Vec<Location> = serde_wasm_bindgen::from_value(locations)?;
        let origin = Coordinate::new(lat, lng);
        let mut config = AbcConfig::default().with_population_size(population_size);
        config.seed = seed;

        let mut rng: Box<dyn RngCore> = Box::new(rng_from_seed(config.seed));
        let evaluator = TourEvaluator::new(&locations, origin);
        let state = initialize(&evaluator, &config, &mut rng).map_err(to_js_error)?;

        Ok(Self {
            locations,
            origin,
            config,
            state,
            rng,
            iteration: 0,
        })
    }

    /// Runs one generation and returns the best distance so far.
    pub fn step(&mut self) -> f64 {
        let evaluator = TourEvaluator::new(&self.locations, self.origin);
        self.state = step(
            &self.state,
            &evaluator,
            &self.config,
            self.iteration,
            &mut self.rng,
        );
        self.iteration += 1;
        self.state.best().distance
    }

    /// Number of generations executed.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn best_distance(&self) -> f64 {
        self.state.best().distance
    }

    /// Best tour as location indices.
    ///
    /// Fails if an index does not fit in a `u32`.
    pub fn best_path(&self) -> Result<Vec<u32>, JsValue> {
        path_to_u32(&self.state.best().path).map_err(to_js_error)
    }

    pub fn last_improvement_iteration(&self) -> usize {
        self.state.last_improvement_iteration()
    }

    /// Whether more than `window` generations passed without improvement.
    pub fn is_stagnant(&self, window: usize) -> bool {
        self.state.stagnation(self.iteration.saturating_sub(1)) > window
    }

    /// The full colony state as a plain JS object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state).map_err(JsValue::from)
    }
}

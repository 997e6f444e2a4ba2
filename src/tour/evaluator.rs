//! Round-trip distance and fitness of a tour.

use crate::geo::{haversine_km, Coordinate, Location};

/// Distance assigned to tours that cannot be measured: empty tours and
/// totals that overflow to infinity or NaN. Equal to `2^53 - 1`, the
/// largest integer exactly representable in an `f64`.
pub const SENTINEL_DISTANCE: f64 = 9_007_199_254_740_991.0;

/// Floor applied to a distance before inverting it into a fitness, so a
/// zero-length tour yields a large finite fitness instead of infinity.
pub const MIN_DISTANCE: f64 = 1e-9;

/// Converts a tour distance into a fitness (higher is better).
///
/// Always returns a strictly positive finite value: non-finite distances
/// map to the sentinel fitness and distances below [`MIN_DISTANCE`] are
/// floored.
pub fn fitness_from_distance(distance: f64) -> f64 {
    if !distance.is_finite() {
        return 1.0 / SENTINEL_DISTANCE;
    }
    1.0 / distance.max(MIN_DISTANCE)
}

/// Evaluates closed tours over a fixed location set and origin.
///
/// # Examples
///
/// ```
/// use u_beeroute::geo::{Coordinate, Location};
/// use u_beeroute::tour::TourEvaluator;
///
/// let locations = vec![
///     Location::new("north", (1.0, 0.0)),
///     Location::new("east", (0.0, 1.0)),
/// ];
/// let eval = TourEvaluator::new(&locations, Coordinate::new(0.0, 0.0));
/// let (distance, fitness) = eval.evaluate(&[0, 1]);
/// assert!(distance > 0.0);
/// assert!((fitness * distance - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TourEvaluator<'a> {
    locations: &'a [Location],
    origin: Coordinate,
}

impl<'a> TourEvaluator<'a> {
    pub fn new(locations: &'a [Location], origin: Coordinate) -> Self {
        Self { locations, origin }
    }

    pub fn locations(&self) -> &'a [Location] {
        self.locations
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Number of destinations, i.e. the length of every tour.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Total round-trip distance in kilometers.
    ///
    /// Returns [`SENTINEL_DISTANCE`] for an empty tour or a non-finite total.
    ///
    /// # Panics
    /// Panics if the tour holds an index outside the location set.
    pub fn distance(&self, tour: &[usize]) -> f64 {
        let (first, last) = match (tour.first(), tour.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return SENTINEL_DISTANCE,
        };

        let coord = |i: usize| self.locations[i].coordinates;

        let legs: f64 = tour
            .windows(2)
            .map(|w| haversine_km(coord(w[0]), coord(w[1])))
            .sum();
        let total = haversine_km(self.origin, coord(first))
            + legs
            + haversine_km(coord(last), self.origin);

        if total.is_finite() {
            total
        } else {
            SENTINEL_DISTANCE
        }
    }

    /// Fitness of a tour: `1 / distance`, clamped.
    pub fn fitness(&self, tour: &[usize]) -> f64 {
        fitness_from_distance(self.distance(tour))
    }

    /// Distance and fitness from a single pass over the tour.
    pub fn evaluate(&self, tour: &[usize]) -> (f64, f64) {
        let distance = self.distance(tour);
        (distance, fitness_from_distance(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::operators::random_tour;
    use proptest::prelude::*;

    fn grid_locations(n: usize) -> Vec<Location> {
        (0..n)
            .map(|i| {
                let lat = 4.6 + (i % 5) as f64 * 0.01;
                let lng = -74.1 + (i / 5) as f64 * 0.01;
                Location::new(format!("w{i}"), (lat, lng))
            })
            .collect()
    }

    #[test]
    fn test_empty_tour_is_sentinel() {
        let locations = grid_locations(3);
        let eval = TourEvaluator::new(&locations, Coordinate::new(4.6, -74.1));
        assert_eq!(eval.distance(&[]), SENTINEL_DISTANCE);
        let f = eval.fitness(&[]);
        assert!(f > 0.0 && f.is_finite());
    }

    #[test]
    fn test_single_location_round_trip() {
        let locations = vec![Location::new("only", (4.70, -74.05))];
        let origin = Coordinate::new(4.60, -74.10);
        let eval = TourEvaluator::new(&locations, origin);
        let expected = 2.0 * haversine_km(origin, locations[0].coordinates);
        assert!((eval.distance(&[0]) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sums_every_leg() {
        let locations = vec![
            Location::new("a", (0.0, 1.0)),
            Location::new("b", (1.0, 1.0)),
            Location::new("c", (1.0, 0.0)),
        ];
        let origin = Coordinate::new(0.0, 0.0);
        let eval = TourEvaluator::new(&locations, origin);
        let c = |i: usize| locations[i].coordinates;
        let expected = haversine_km(origin, c(0))
            + haversine_km(c(0), c(1))
            + haversine_km(c(1), c(2))
            + haversine_km(c(2), origin);
        assert!((eval.distance(&[0, 1, 2]) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_total_is_sentinel() {
        let locations = vec![Location::new("bad", (f64::NAN, 0.0))];
        let eval = TourEvaluator::new(&locations, Coordinate::new(0.0, 0.0));
        assert_eq!(eval.distance(&[0]), SENTINEL_DISTANCE);
    }

    #[test]
    fn test_zero_distance_fitness_is_finite() {
        let locations = vec![Location::new("here", (1.0, 1.0))];
        let eval = TourEvaluator::new(&locations, Coordinate::new(1.0, 1.0));
        assert_eq!(eval.distance(&[0]), 0.0);
        let f = eval.fitness(&[0]);
        assert!(f.is_finite());
        assert_eq!(f, 1.0 / MIN_DISTANCE);
    }

    #[test]
    fn test_fitness_from_distance_clamps() {
        assert_eq!(fitness_from_distance(f64::INFINITY), 1.0 / SENTINEL_DISTANCE);
        assert_eq!(fitness_from_distance(f64::NAN), 1.0 / SENTINEL_DISTANCE);
        assert_eq!(fitness_from_distance(4.0), 0.25);
    }

    proptest! {
        #[test]
        fn prop_fitness_distance_duality(n in 1usize..30, seed in any::<u64>()) {
            let locations = grid_locations(n);
            let eval = TourEvaluator::new(&locations, Coordinate::new(4.55, -74.15));
            let mut rng = u_numflow::random::create_rng(seed);
            let tour = random_tour(n, &mut rng);
            let (distance, fitness) = eval.evaluate(&tour);
            prop_assert!(distance >= 0.0);
            prop_assert!((fitness * distance - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_reversed_tour_same_distance(n in 1usize..30, seed in any::<u64>()) {
            let locations = grid_locations(n);
            let eval = TourEvaluator::new(&locations, Coordinate::new(4.55, -74.15));
            let mut rng = u_numflow::random::create_rng(seed);
            let tour = random_tour(n, &mut rng);
            let mut reversed = tour.clone();
            reversed.reverse();
            prop_assert!((eval.distance(&tour) - eval.distance(&reversed)).abs() < 1e-9);
        }
    }
}

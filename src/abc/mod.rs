//! Artificial Bee Colony (ABC) for closed tours.
//!
//! The colony splits its population into three roles. Employed bees each
//! own a tour and hill-climb it with 3-cycle moves. Onlooker bees pick
//! employed bees in proportion to fitness and spend extra moves on their
//! tours. Employed bees that stop improving for `limit` attempts are
//! abandoned and restarted from a random tour, which is the scout role.
//!
//! # Key Types
//!
//! - [`AbcConfig`]: Population size, abandonment limit, stopping policy
//! - [`ColonyState`]: The full colony between two generations
//! - [`initialize`] / [`step`]: Build a colony, advance it one generation
//! - [`AbcRunner`]: Drives `step` until the budget or stagnation window ends
//!
//! # Examples
//!
//! ```
//! use u_beeroute::abc::{AbcConfig, AbcRunner};
//! use u_beeroute::geo::{Coordinate, Location};
//!
//! let locations = vec![
//!     Location::new("a", (4.65, -74.06)),
//!     Location::new("b", (4.67, -74.09)),
//!     Location::new("c", (4.62, -74.07)),
//!     Location::new("d", (4.70, -74.04)),
//! ];
//! let origin = Coordinate::new(4.6486, -74.0856);
//! let config = AbcConfig::default().with_seed(42);
//!
//! let result = AbcRunner::run(&locations, origin, &config).unwrap();
//! assert_eq!(result.best.path.len(), 4);
//! ```
//!
//! # References
//!
//! - Karaboga (2005), "An Idea Based on Honey Bee Swarm for Numerical Optimization"
//! - Karaboga & Basturk (2007), "A powerful and efficient algorithm for numerical
//!   function optimization: artificial bee colony (ABC) algorithm"

mod colony;
mod config;
mod runner;
pub mod selection;
mod types;

pub use colony::{initialize, step};
pub use config::AbcConfig;
pub use runner::{AbcResult, AbcRunner};
pub use types::{BeeRole, BestSolution, ColonyState, EmployedBee, PopulationSplit};

//! Animal behavior model.
//!
//! This module contains:
//! - The shared animal life-cycle (aging, energy, sleep, death, reproduction)
//! - The closed species set and per-species constants
//! - Herbivore foraging and predator hunting/combat behaviors
//! - Pack/herd membership and denning structures

pub mod animal;
pub mod bear;
pub mod group;
pub mod herbivore;
pub mod predator;
pub mod species;
pub mod wolf;

pub use animal::Animal;
pub use group::{Burrow, Group, GroupId};
pub use species::Species;

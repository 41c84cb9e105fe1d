//! # Wildgrove
//!
//! A tick-based predator/prey ecosystem on a bounded grid.
//!
//! ## Features
//!
//! - **Three species**: rabbits forage and burrow, wolves hunt in packs,
//!   bears patrol solitary territories
//! - **Living terrain**: grass and berry bushes spread; carcasses rot and
//!   seed fungal colonies
//! - **Day/night cycle**: animals forage by day, seek shelter at dusk and
//!   sleep (or suffer exposure) at night
//! - **Configurable**: YAML configuration files
//! - **Reproducible**: seeded random number generation
//!
//! ## Quick Start
//!
//! ```rust
//! use wildgrove::{Config, World};
//! use wildgrove::scenario::Scenario;
//!
//! let scenario = Scenario::parse("rabbit 10\nwolf 3\ngrass 40\n").unwrap();
//! let mut world = scenario.build(Config::default(), 42).unwrap();
//!
//! world.run(500);
//! println!("Population: {}", world.population());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use wildgrove::Config;
//!
//! let mut config = Config::default();
//! config.world.day_length = 40;
//! config.species.wolf.hunt_radius = 3;
//! ```

pub mod config;
pub mod decay;
pub mod entity;
pub mod fauna;
pub mod flora;
pub mod geometry;
pub mod scenario;
pub mod stats;
pub mod world;

// Re-export main types
pub use config::Config;
pub use world::World;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

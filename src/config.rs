//! Configuration system for the wildgrove simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub animals: AnimalConfig,
    pub species: SpeciesTable,
    pub flora: FloraConfig,
    pub decay: DecayConfig,
    pub logging: LoggingConfig,
}

/// World/grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Grid width in cells
    pub width: i32,
    /// Grid height in cells
    pub height: i32,
    /// Daylight ticks per cycle
    pub day_length: u64,
    /// Night ticks per cycle
    pub night_length: u64,
}

/// Shared animal behavior parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalConfig {
    /// Energy below which an animal counts as hungry
    pub hunger_threshold: i32,
    /// Minimum energy to reproduce
    pub reproduce_threshold: i32,
    /// Energy cost of reproduction
    pub reproduce_cost: i32,
    /// Reproduction stops once `kids` exceeds this count
    pub kid_cap: u8,
    /// Energy cost of an idle move
    pub idle_move_cost: i32,
    /// Energy cost of a hunting move
    pub hunt_move_cost: i32,
    /// Energy lost per night spent without shelter
    pub night_exposure: i32,
    /// Maximum search ring radius when foraging
    pub forage_radius_cap: i32,
    /// Meat a predator consumes from a carcass per bite
    pub carcass_bite: i32,
    /// Starting energy of scenario-spawned adults
    pub initial_energy: i32,
    /// Starting energy of newborn children
    pub child_energy: i32,
}

/// Per-species constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesParams {
    /// Ticks before death of old age
    pub max_age: u32,
    /// Age below which the animal is a child
    pub child_age: u32,
    /// Meat value of the carcass left on death
    pub meat_value: i32,
    /// Energy restored by sleeping
    pub sleep_energy: i32,
    /// Base attack damage (predators only; 0 for prey)
    pub attack_damage: i32,
    /// Hunting area radius (predators only)
    pub hunt_radius: i32,
}

/// Constant profiles for the closed species set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesTable {
    pub rabbit: SpeciesParams,
    pub wolf: SpeciesParams,
    pub bear: SpeciesParams,
}

/// Ground cover configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloraConfig {
    /// Per-tick grass spread probability
    pub grass_spread_chance: f64,
    /// Per-tick bush spread probability
    pub bush_spread_chance: f64,
    /// Energy yielded by eating a grass tile
    pub grass_energy: i32,
    /// Energy per berry when a bush is eaten
    pub berry_energy: i32,
    /// Ticks between berry growth events
    pub berry_interval: u32,
    /// Maximum berries a bush can hold
    pub berry_max: u32,
}

/// Carcass/fungi decomposition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Initial rot countdown for a fresh carcass
    pub rot_timer: i32,
    /// Per-tick spontaneous infection probability
    pub infection_chance: f64,
    /// Manhattan radius of fungi infection
    pub fungi_radius: i32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Ticks between stats snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            animals: AnimalConfig::default(),
            species: SpeciesTable::default(),
            flora: FloraConfig::default(),
            decay: DecayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            day_length: 30,
            night_length: 20,
        }
    }
}

impl Default for AnimalConfig {
    fn default() -> Self {
        Self {
            hunger_threshold: 50,
            reproduce_threshold: 30,
            reproduce_cost: 15,
            kid_cap: 2,
            idle_move_cost: 5,
            hunt_move_cost: 8,
            night_exposure: 5,
            forage_radius_cap: 8,
            carcass_bite: 20,
            initial_energy: 80,
            child_energy: 50,
        }
    }
}

impl Default for SpeciesTable {
    fn default() -> Self {
        Self {
            rabbit: SpeciesParams {
                max_age: 150,
                child_age: 10,
                meat_value: 10,
                sleep_energy: 50,
                attack_damage: 0,
                hunt_radius: 0,
            },
            wolf: SpeciesParams {
                max_age: 400,
                child_age: 40,
                meat_value: 40,
                sleep_energy: 50,
                attack_damage: 10,
                hunt_radius: 2,
            },
            bear: SpeciesParams {
                max_age: 600,
                child_age: 50,
                meat_value: 80,
                sleep_energy: 50,
                attack_damage: 25,
                hunt_radius: 3,
            },
        }
    }
}

impl Default for FloraConfig {
    fn default() -> Self {
        Self {
            grass_spread_chance: 0.05,
            bush_spread_chance: 0.02,
            grass_energy: 20,
            berry_energy: 2,
            berry_interval: 10,
            berry_max: 5,
        }
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            rot_timer: 25,
            infection_chance: 0.05,
            fungi_radius: 2,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 50,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.world.width <= 0 || self.world.height <= 0 {
            return Err("grid dimensions must be positive".to_string());
        }
        if self.world.width > 512 || self.world.height > 512 {
            return Err("grid dimensions must be at most 512".to_string());
        }
        if self.world.day_length == 0 {
            return Err("day_length must be > 0".to_string());
        }
        for chance in [
            self.flora.grass_spread_chance,
            self.flora.bush_spread_chance,
            self.decay.infection_chance,
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err("probabilities must be within 0.0..=1.0".to_string());
            }
        }
        if self.flora.berry_interval == 0 {
            return Err("berry_interval must be > 0".to_string());
        }
        if self.decay.rot_timer <= 0 {
            return Err("rot_timer must be > 0".to_string());
        }
        if self.logging.stats_interval == 0 {
            return Err("stats_interval must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.world.width, loaded.world.width);
        assert_eq!(
            config.species.wolf.attack_damage,
            loaded.species.wolf.attack_damage
        );
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let mut config = Config::default();
        config.decay.infection_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_grid_rejected() {
        let mut config = Config::default();
        config.world.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_stats_interval_rejected() {
        let mut config = Config::default();
        config.logging.stats_interval = 0;
        assert!(config.validate().is_err());
    }
}

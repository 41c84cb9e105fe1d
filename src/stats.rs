//! Statistics collection for the simulation.
//!
//! The world tallies a [`Census`] of the registry after every tick and
//! folds it into the running [`Stats`]. Snapshots land in a
//! [`StatsHistory`] on a configured interval and can be saved as JSON for
//! offline analysis.

use crate::entity::Entity;
use crate::fauna::species::Species;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One full count of the entity registry.
#[derive(Clone, Copy, Debug, Default)]
pub struct Census {
    pub rabbits: usize,
    pub wolves: usize,
    pub bears: usize,
    pub grass: usize,
    pub bushes: usize,
    pub carcasses: usize,
    pub fungi: usize,
    pub burrows: usize,
    pub total_energy: i64,
}

impl Census {
    /// Count every entity once.
    pub fn tally<'a, I>(entities: I) -> Self
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        let mut census = Census::default();
        for entity in entities {
            match entity {
                Entity::Animal(a) => {
                    match a.species {
                        Species::Rabbit => census.rabbits += 1,
                        Species::Wolf => census.wolves += 1,
                        Species::Bear => census.bears += 1,
                    }
                    census.total_energy += a.energy as i64;
                }
                Entity::Carcass(_) => census.carcasses += 1,
                Entity::Fungi(_) => census.fungi += 1,
                Entity::Grass(_) => census.grass += 1,
                Entity::Bush(_) => census.bushes += 1,
                Entity::Burrow(_) => census.burrows += 1,
            }
        }
        census
    }

    pub fn animals(&self) -> usize {
        self.rabbits + self.wolves + self.bears
    }
}

/// Running simulation statistics, updated once per tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    pub tick: u64,
    pub rabbits: usize,
    pub wolves: usize,
    pub bears: usize,
    pub grass: usize,
    pub bushes: usize,
    pub carcasses: usize,
    pub fungi: usize,
    /// Mean energy across living animals, 0.0 when none remain.
    pub energy_mean: f64,
    /// Cumulative over the whole run, not per tick.
    pub total_births: usize,
    pub total_deaths: usize,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick's census and birth/death counts into the totals.
    pub fn apply(&mut self, tick: u64, census: &Census, births: usize, deaths: usize) {
        self.tick = tick;
        self.rabbits = census.rabbits;
        self.wolves = census.wolves;
        self.bears = census.bears;
        self.grass = census.grass;
        self.bushes = census.bushes;
        self.carcasses = census.carcasses;
        self.fungi = census.fungi;
        self.energy_mean = if census.animals() > 0 {
            census.total_energy as f64 / census.animals() as f64
        } else {
            0.0
        };
        self.total_births += births;
        self.total_deaths += deaths;
    }

    pub fn population(&self) -> usize {
        self.rabbits + self.wolves + self.bears
    }

    /// One-line progress report for console output.
    pub fn summary(&self) -> String {
        format!(
            "tick {:>6} | rabbits {:>4} wolves {:>3} bears {:>3} | grass {:>4} bushes {:>3} | carcasses {:>3} fungi {:>3} | mean energy {:>6.1} | +{} -{}",
            self.tick,
            self.rabbits,
            self.wolves,
            self.bears,
            self.grass,
            self.bushes,
            self.carcasses,
            self.fungi,
            self.energy_mean,
            self.total_births,
            self.total_deaths,
        )
    }
}

/// Periodic snapshots of [`Stats`] over a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsHistory {
    pub snapshots: Vec<Stats>,
    interval: u64,
}

impl StatsHistory {
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval: interval.max(1),
        }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Animal population at each snapshot, oldest first.
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.tick, s.population()))
            .collect()
    }

    /// Save the snapshot series as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.snapshots)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::decay::Carcass;
    use crate::fauna::animal::Animal;
    use crate::flora::Grass;

    #[test]
    fn test_census_counts_by_kind() {
        let config = Config::default();
        let entities = vec![
            Entity::Animal(Animal::adult(Species::Rabbit, &config)),
            Entity::Animal(Animal::adult(Species::Rabbit, &config)),
            Entity::Animal(Animal::adult(Species::Wolf, &config)),
            Entity::Grass(Grass::new()),
            Entity::Carcass(Carcass::new(10, 25)),
        ];

        let census = Census::tally(entities.iter());
        assert_eq!(census.rabbits, 2);
        assert_eq!(census.wolves, 1);
        assert_eq!(census.bears, 0);
        assert_eq!(census.grass, 1);
        assert_eq!(census.carcasses, 1);
        assert_eq!(census.animals(), 3);
        assert_eq!(census.total_energy, 240); // 3 adults at 80 each
    }

    #[test]
    fn test_stats_accumulate_births_and_deaths() {
        let mut stats = Stats::new();
        let census = Census::default();

        stats.apply(1, &census, 2, 1);
        stats.apply(2, &census, 0, 3);

        assert_eq!(stats.total_births, 2);
        assert_eq!(stats.total_deaths, 4);
        assert_eq!(stats.tick, 2);
        assert_eq!(stats.energy_mean, 0.0);
    }

    #[test]
    fn test_history_population_series() {
        let mut history = StatsHistory::new(50);
        let mut stats = Stats::new();
        stats.tick = 50;
        stats.rabbits = 12;
        history.record(stats.clone());
        stats.tick = 100;
        stats.rabbits = 9;
        stats.wolves = 2;
        history.record(stats);

        assert_eq!(history.population_series(), vec![(50, 12), (100, 11)]);
    }

    #[test]
    fn test_summary_mentions_counts() {
        let mut stats = Stats::new();
        stats.tick = 7;
        stats.rabbits = 3;
        let line = stats.summary();
        assert!(line.contains("tick"));
        assert!(line.contains('3'));
    }
}

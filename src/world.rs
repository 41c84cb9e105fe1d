//! World container and tick scheduler.
//!
//! The grid holds at most one blocking occupant (animal, carcass) and one
//! non-blocking occupant (grass, bush, burrow, fungi) per cell. The
//! scheduler advances every entity exactly once per tick, one at a time;
//! entities removed mid-pass are skipped and entities spawned mid-pass are
//! not visited until the next tick.

use crate::config::Config;
use crate::entity::{self, Entity, EntityId, Kind};
use crate::fauna::animal::Animal;
use crate::fauna::group::{Group, GroupId};
use crate::geometry::{self, Location};
use crate::stats::{Census, Stats, StatsHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, HashMap};

/// Ticks before nightfall at which animals start seeking shelter.
pub const DUSK_TICKS: u64 = 3;

#[derive(Clone, Copy, Debug, Default)]
struct Cell {
    blocking: Option<EntityId>,
    non_blocking: Option<EntityId>,
}

/// The simulation world
pub struct World {
    // Configuration
    pub config: Config,

    // Entity registry (BTreeMap: the pass order is ascending id)
    entities: BTreeMap<EntityId, Entity>,
    positions: HashMap<EntityId, Location>,
    cells: Vec<Cell>,

    // Pack/herd registry
    groups: BTreeMap<GroupId, Group>,

    // State
    tick: u64,
    next_entity_id: EntityId,
    next_group_id: GroupId,

    // Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,
    births_this_tick: usize,
    deaths_this_tick: usize,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl World {
    /// Create a new empty world with the given configuration
    pub fn new(config: Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new empty world with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        let cell_count = (config.world.width * config.world.height) as usize;
        Self {
            entities: BTreeMap::new(),
            positions: HashMap::new(),
            cells: vec![Cell::default(); cell_count],
            groups: BTreeMap::new(),
            tick: 0,
            next_entity_id: 0,
            next_group_id: 0,
            stats: Stats::new(),
            stats_history: StatsHistory::new(config.logging.stats_interval),
            births_this_tick: 0,
            deaths_this_tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            config,
        }
    }

    // ━━━ geometry & occupancy ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    #[inline]
    pub fn in_bounds(&self, loc: Location) -> bool {
        loc.x >= 0 && loc.y >= 0 && loc.x < self.config.world.width && loc.y < self.config.world.height
    }

    #[inline]
    fn index(&self, loc: Location) -> usize {
        (loc.y * self.config.world.width + loc.x) as usize
    }

    /// Current position of an entity, or none while it is off the grid
    /// (removed, or sleeping inside a burrow/den).
    pub fn locate(&self, id: EntityId) -> Option<Location> {
        self.positions.get(&id).copied()
    }

    /// Blocking occupant of a cell
    pub fn blocking_at(&self, loc: Location) -> Option<EntityId> {
        if !self.in_bounds(loc) {
            return None;
        }
        self.cells[self.index(loc)].blocking
    }

    /// Non-blocking occupant (ground cover) of a cell
    pub fn non_blocking_at(&self, loc: Location) -> Option<EntityId> {
        if !self.in_bounds(loc) {
            return None;
        }
        self.cells[self.index(loc)].non_blocking
    }

    /// A cell is empty when it is in bounds and has no blocking occupant;
    /// ground cover does not make a cell occupied.
    pub fn is_empty(&self, loc: Location) -> bool {
        self.in_bounds(loc) && self.blocking_at(loc).is_none()
    }

    pub fn has_non_blocking(&self, loc: Location) -> bool {
        self.non_blocking_at(loc).is_some()
    }

    /// In-bounds tiles within Chebyshev radius `r`, canonical order.
    pub fn tiles_within_radius(&self, center: Location, r: i32) -> Vec<Location> {
        geometry::tiles_within_radius(center, r)
            .into_iter()
            .filter(|t| self.in_bounds(*t))
            .collect()
    }

    /// In-bounds tiles within radius `r` with a free blocking slot.
    pub fn empty_tiles_within_radius(&self, center: Location, r: i32) -> Vec<Location> {
        self.tiles_within_radius(center, r)
            .into_iter()
            .filter(|t| self.blocking_at(*t).is_none())
            .collect()
    }

    // ━━━ entity access ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn animal(&self, id: EntityId) -> Option<&Animal> {
        self.entities.get(&id).and_then(Entity::as_animal)
    }

    pub fn animal_mut(&mut self, id: EntityId) -> Option<&mut Animal> {
        self.entities.get_mut(&id).and_then(Entity::as_animal_mut)
    }

    /// Ids of all entities currently registered, ascending.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    // ━━━ placement & movement ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Place a new entity at a location. Fails (returns `None`) when the
    /// location is out of bounds or the relevant occupancy slot is taken.
    pub fn place(&mut self, loc: Location, entity: Entity) -> Option<EntityId> {
        if !self.in_bounds(loc) {
            return None;
        }
        let blocking = entity.is_blocking();
        let idx = self.index(loc);
        if blocking && self.cells[idx].blocking.is_some() {
            return None;
        }
        if !blocking && self.cells[idx].non_blocking.is_some() {
            return None;
        }

        let id = self.next_entity_id;
        self.next_entity_id += 1;
        self.entities.insert(id, entity);
        self.positions.insert(id, loc);
        if blocking {
            self.cells[idx].blocking = Some(id);
        } else {
            self.cells[idx].non_blocking = Some(id);
        }
        Some(id)
    }

    /// Remove an entity from the world entirely (grid slot and registry).
    pub fn remove(&mut self, id: EntityId) -> bool {
        let existed = self.entities.remove(&id).is_some();
        self.clear_grid_slot(id);
        existed
    }

    /// Take an entity off the grid but keep it registered (an animal
    /// occupying a den is modeled as not occupying a tile).
    pub fn vacate(&mut self, id: EntityId) {
        self.clear_grid_slot(id);
    }

    /// Put a registered but off-grid blocking entity back on the grid.
    pub fn reenter(&mut self, id: EntityId, loc: Location) -> bool {
        if self.positions.contains_key(&id) || !self.is_empty(loc) {
            return false;
        }
        let blocking = match self.entities.get(&id) {
            Some(e) => e.is_blocking(),
            None => return false,
        };
        if !blocking {
            return false;
        }
        let idx = self.index(loc);
        self.cells[idx].blocking = Some(id);
        self.positions.insert(id, loc);
        true
    }

    fn clear_grid_slot(&mut self, id: EntityId) {
        if let Some(loc) = self.positions.remove(&id) {
            let idx = self.index(loc);
            if self.cells[idx].blocking == Some(id) {
                self.cells[idx].blocking = None;
            }
            if self.cells[idx].non_blocking == Some(id) {
                self.cells[idx].non_blocking = None;
            }
        }
    }

    /// Move a blocking entity to an empty destination cell.
    pub fn move_entity(&mut self, id: EntityId, dest: Location) -> bool {
        if !self.is_empty(dest) {
            return false;
        }
        let src = match self.positions.get(&id) {
            Some(loc) => *loc,
            None => return false,
        };
        let src_idx = self.index(src);
        if self.cells[src_idx].blocking != Some(id) {
            return false;
        }
        self.cells[src_idx].blocking = None;
        let dest_idx = self.index(dest);
        self.cells[dest_idx].blocking = Some(id);
        self.positions.insert(id, dest);
        true
    }

    /// Delete the ground cover at a location, if any.
    pub fn delete_non_blocking_at(&mut self, loc: Location) -> bool {
        match self.non_blocking_at(loc) {
            Some(id) => self.remove(id),
            None => false,
        }
    }

    // ━━━ groups ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn create_group(&mut self) -> GroupId {
        let gid = self.next_group_id;
        self.next_group_id += 1;
        self.groups.insert(gid, Group::new());
        gid
    }

    pub fn group(&self, gid: GroupId) -> Option<&Group> {
        self.groups.get(&gid)
    }

    pub fn group_mut(&mut self, gid: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&gid)
    }

    /// Register an animal as a member of a group, setting its back-reference.
    pub fn add_to_group(&mut self, gid: GroupId, id: EntityId) {
        let is_animal = self.animal(id).is_some();
        if !is_animal {
            return;
        }
        if let Some(group) = self.groups.get_mut(&gid) {
            group.add_member(id);
        }
        if let Some(animal) = self.animal_mut(id) {
            animal.group = Some(gid);
        }
    }

    /// Drop an animal from whatever group it belongs to.
    pub fn remove_from_group(&mut self, id: EntityId) {
        let gid = match self.animal(id).and_then(|a| a.group) {
            Some(gid) => gid,
            None => return,
        };
        if let Some(group) = self.groups.get_mut(&gid) {
            group.remove_member(id);
        }
        if let Some(animal) = self.animal_mut(id) {
            animal.group = None;
        }
    }

    // ━━━ time of day ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn day_length(&self) -> u64 {
        self.config.world.day_length
    }

    fn time_of_day(&self) -> u64 {
        self.tick % (self.config.world.day_length + self.config.world.night_length)
    }

    pub fn is_day(&self) -> bool {
        self.time_of_day() < self.config.world.day_length
    }

    pub fn is_night(&self) -> bool {
        !self.is_day()
    }

    /// Daylight ticks remaining, 0 at night.
    pub fn ticks_until_nightfall(&self) -> u64 {
        if self.is_day() {
            self.config.world.day_length - self.time_of_day()
        } else {
            0
        }
    }

    /// Last few daylight ticks, when animals head for shelter.
    pub fn is_dusk(&self) -> bool {
        self.is_day() && self.ticks_until_nightfall() <= DUSK_TICKS
    }

    // ━━━ randomness ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// One independent draw with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        p > 0.0 && self.rng.gen::<f64>() < p
    }

    /// Uniformly pick one of the given locations.
    pub fn pick_location(&mut self, tiles: &[Location]) -> Option<Location> {
        tiles.choose(&mut self.rng).copied()
    }

    /// A uniformly random empty cell, if the grid has one.
    pub fn random_empty_tile(&mut self) -> Option<Location> {
        // Rejection sampling with a bounded number of attempts, then a
        // linear scan as fallback for crowded grids.
        for _ in 0..64 {
            let x = self.rng.gen_range(0..self.config.world.width);
            let y = self.rng.gen_range(0..self.config.world.height);
            let loc = Location::new(x, y);
            if self.is_empty(loc) {
                return Some(loc);
            }
        }
        for y in 0..self.config.world.height {
            for x in 0..self.config.world.width {
                let loc = Location::new(x, y);
                if self.is_empty(loc) {
                    return Some(loc);
                }
            }
        }
        None
    }

    // ━━━ scheduler ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Advance the world by one tick.
    pub fn step(&mut self) {
        self.births_this_tick = 0;
        self.deaths_this_tick = 0;

        // Snapshot the pass: entities spawned during the tick get fresh
        // (higher) ids and are not visited until the next tick.
        let ids = self.entity_ids();
        for id in ids {
            entity::act(self, id);
        }

        self.tick += 1;
        self.update_stats();
    }

    /// Run the simulation for the given number of ticks.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub fn note_birth(&mut self) {
        self.births_this_tick += 1;
    }

    pub fn note_death(&mut self) {
        self.deaths_this_tick += 1;
    }

    fn update_stats(&mut self) {
        let census = Census::tally(self.entities.values());
        self.stats
            .apply(self.tick, &census, self.births_this_tick, self.deaths_this_tick);
        if self.tick % self.stats_history.interval() == 0 {
            self.stats_history.record(self.stats.clone());
        }
    }

    // ━━━ queries ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Number of living animals.
    pub fn population(&self) -> usize {
        self.entities
            .values()
            .filter(|e| e.kind() == Kind::Animal)
            .count()
    }

    pub fn count_kind(&self, kind: Kind) -> usize {
        self.entities.values().filter(|e| e.kind() == kind).count()
    }

    pub fn is_extinct(&self) -> bool {
        self.population() == 0
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

//! Ground cover: grass patches and berry bushes.
//!
//! Flora occupies the non-blocking slot of a cell, so animals can stand
//! on it and graze in place. Both kinds spread to neighboring open
//! ground at a configured per-tick chance.

use crate::entity::{Entity, EntityId};
use crate::world::World;

/// A patch of grass. Eaten whole for a flat energy yield.
#[derive(Clone, Copy, Debug, Default)]
pub struct Grass;

impl Grass {
    pub fn new() -> Self {
        Grass
    }
}

/// A berry bush. Regrows berries over time and survives being grazed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bush {
    pub berries: u32,
    ticks: u32,
}

impl Bush {
    pub fn new() -> Self {
        Bush { berries: 0, ticks: 0 }
    }

    /// Advance the regrowth clock; a new berry ripens every interval,
    /// up to the cap.
    pub fn grow(&mut self, interval: u32, max: u32) {
        self.ticks += 1;
        if interval > 0 && self.ticks % interval == 0 {
            self.berries = (self.berries + 1).min(max);
        }
    }
}

pub fn grass_act(world: &mut World, id: EntityId) {
    let chance = world.config.flora.grass_spread_chance;
    if world.chance(chance) {
        spread(world, id, Entity::Grass(Grass::new()));
    }
}

pub fn bush_act(world: &mut World, id: EntityId) {
    let interval = world.config.flora.berry_interval;
    let max = world.config.flora.berry_max;
    if let Some(bush) = world.entity_mut(id).and_then(Entity::as_bush_mut) {
        bush.grow(interval, max);
    }

    let chance = world.config.flora.bush_spread_chance;
    if world.chance(chance) {
        spread(world, id, Entity::Bush(Bush::new()));
    }
}

/// Drop a seedling on a random neighboring tile whose cover slot is free.
fn spread(world: &mut World, id: EntityId, seedling: Entity) {
    let loc = match world.locate(id) {
        Some(l) => l,
        None => return,
    };
    let open: Vec<_> = world
        .tiles_within_radius(loc, 1)
        .into_iter()
        .filter(|t| !world.has_non_blocking(*t))
        .collect();
    if let Some(target) = world.pick_location(&open) {
        world.place(target, seedling);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entity::Kind;
    use crate::geometry::Location;

    #[test]
    fn test_berry_ripens_on_interval() {
        let mut bush = Bush::new();
        for _ in 0..9 {
            bush.grow(10, 5);
        }
        assert_eq!(bush.berries, 0);
        bush.grow(10, 5);
        assert_eq!(bush.berries, 1);
    }

    #[test]
    fn test_berries_cap_at_max() {
        let mut bush = Bush::new();
        for _ in 0..200 {
            bush.grow(10, 5);
        }
        assert_eq!(bush.berries, 5);
    }

    #[test]
    fn test_grass_spread_lands_on_open_neighbor() {
        let mut config = Config::default();
        config.flora.grass_spread_chance = 1.0;
        let mut world = World::new_with_seed(config, 21);
        let loc = Location::new(5, 5);
        let id = world.place(loc, Entity::Grass(Grass::new())).unwrap();

        grass_act(&mut world, id);

        assert_eq!(world.count_kind(Kind::Grass), 2);
        let spawned = world
            .entity_ids()
            .into_iter()
            .find(|e| *e != id)
            .and_then(|e| world.locate(e))
            .unwrap();
        assert_eq!(loc.chebyshev(spawned), 1);
    }

    #[test]
    fn test_no_spread_when_hemmed_in() {
        let mut config = Config::default();
        config.flora.grass_spread_chance = 1.0;
        let mut world = World::new_with_seed(config, 21);
        let loc = Location::new(5, 5);
        let id = world.place(loc, Entity::Grass(Grass::new())).unwrap();
        for tile in world.tiles_within_radius(loc, 1) {
            world.place(tile, Entity::Grass(Grass::new()));
        }
        let before = world.count_kind(Kind::Grass);

        grass_act(&mut world, id);

        assert_eq!(world.count_kind(Kind::Grass), before);
    }

    #[test]
    fn test_bush_spreads_a_bare_seedling() {
        let mut config = Config::default();
        config.flora.bush_spread_chance = 1.0;
        let mut world = World::new_with_seed(config, 21);
        let loc = Location::new(5, 5);
        let mut bush = Bush::new();
        bush.berries = 5;
        let id = world.place(loc, Entity::Bush(bush)).unwrap();

        bush_act(&mut world, id);

        assert_eq!(world.count_kind(Kind::Bush), 2);
        let seedling = world
            .entity_ids()
            .into_iter()
            .find(|e| *e != id)
            .unwrap();
        match world.entity(seedling) {
            Some(Entity::Bush(b)) => assert_eq!(b.berries, 0),
            _ => panic!("expected a bush seedling"),
        }
    }
}

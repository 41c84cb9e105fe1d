//! Decomposition: carcasses rot away and fungi spread the rot.
//!
//! A dead animal leaves a carcass holding its meat value. Scavengers bite
//! chunks off it; meanwhile a rot timer counts down, twice as fast once
//! fungi take hold. A fully rotted, infected carcass seeds a fungus on
//! its tile, which in turn infects nearby carcasses until its own
//! lifespan runs out.

use crate::entity::{Entity, EntityId};
use crate::world::World;

/// Remains of a dead animal. Blocking, like the animal was.
#[derive(Clone, Copy, Debug)]
pub struct Carcass {
    pub meat_left: i32,
    pub max_meat: i32,
    pub rot_timer: i32,
    pub has_fungi: bool,
}

impl Carcass {
    pub fn new(meat: i32, rot: i32) -> Self {
        Carcass {
            meat_left: meat,
            max_meat: meat,
            rot_timer: rot,
            has_fungi: false,
        }
    }

    /// A scavenger tears off `amount` of meat; never goes negative.
    pub fn eaten(&mut self, amount: i32) {
        self.meat_left = (self.meat_left - amount).max(0);
    }

    pub fn infect(&mut self) {
        self.has_fungi = true;
    }
}

/// A fungal colony on the cover slot of a tile.
#[derive(Clone, Copy, Debug)]
pub struct Fungi {
    pub lifespan: i32,
}

impl Fungi {
    pub fn new(lifespan: i32) -> Self {
        Fungi { lifespan }
    }
}

pub fn carcass_act(world: &mut World, id: EntityId) {
    let infected = {
        let carcass = match world.entity_mut(id).and_then(Entity::as_carcass_mut) {
            Some(c) => c,
            None => return,
        };
        if carcass.has_fungi {
            carcass.rot_timer -= 1;
        }
        carcass.rot_timer -= 1;
        carcass.has_fungi
    };

    if !infected {
        let chance = world.config.decay.infection_chance;
        if world.chance(chance) {
            if let Some(c) = world.entity_mut(id).and_then(Entity::as_carcass_mut) {
                c.infect();
            }
        }
    }

    let (rot, meat, fungal, max_meat) = match world.entity(id).and_then(Entity::as_carcass) {
        Some(c) => (c.rot_timer, c.meat_left, c.has_fungi, c.max_meat),
        None => return,
    };
    if rot > 0 && meat > 0 {
        return;
    }

    let loc = world.locate(id);
    world.remove(id);

    // An infected carcass seeds a fungus where it lay, displacing grass
    // but never a bush or a burrow.
    if fungal {
        if let Some(loc) = loc {
            let cover_is_grass = world
                .non_blocking_at(loc)
                .and_then(|cid| world.entity(cid))
                .map(Entity::is_grass);
            match cover_is_grass {
                Some(true) => {
                    world.delete_non_blocking_at(loc);
                }
                Some(false) => return,
                None => {}
            }
            world.place(loc, Entity::Fungi(Fungi::new(2 * max_meat)));
            log::debug!("fungi sprouted at ({}, {})", loc.x, loc.y);
        }
    }
}

pub fn fungi_act(world: &mut World, id: EntityId) {
    let expired = {
        let fungi = match world.entity_mut(id).and_then(Entity::as_fungi_mut) {
            Some(f) => f,
            None => return,
        };
        fungi.lifespan -= 1;
        fungi.lifespan <= 0
    };
    if expired {
        world.remove(id);
        return;
    }

    let loc = match world.locate(id) {
        Some(l) => l,
        None => return,
    };
    let radius = world.config.decay.fungi_radius;

    // Spores carry a fixed walking distance, not line of sight.
    let mut victims = Vec::new();
    let mut tiles = vec![loc];
    tiles.extend(world.tiles_within_radius(loc, radius));
    for tile in tiles {
        if loc.manhattan(tile) > radius {
            continue;
        }
        if let Some(bid) = world.blocking_at(tile) {
            if world.entity(bid).and_then(Entity::as_carcass).is_some() {
                victims.push(bid);
            }
        }
    }
    for victim in victims {
        if let Some(c) = world.entity_mut(victim).and_then(Entity::as_carcass_mut) {
            c.infect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entity::Kind;
    use crate::flora::{Bush, Grass};
    use crate::geometry::Location;

    fn quiet_world(seed: u64) -> World {
        let mut config = Config::default();
        config.decay.infection_chance = 0.0;
        World::new_with_seed(config, seed)
    }

    #[test]
    fn test_clean_carcass_rots_at_unit_rate() {
        let mut world = quiet_world(7);
        let id = world
            .place(Location::new(5, 5), Entity::Carcass(Carcass::new(10, 25)))
            .unwrap();

        carcass_act(&mut world, id);

        assert_eq!(world.entity(id).unwrap().as_carcass().unwrap().rot_timer, 24);
    }

    #[test]
    fn test_infected_carcass_rots_twice_as_fast() {
        let mut world = quiet_world(7);
        let mut carcass = Carcass::new(10, 25);
        carcass.infect();
        let id = world
            .place(Location::new(5, 5), Entity::Carcass(carcass))
            .unwrap();

        carcass_act(&mut world, id);

        assert_eq!(world.entity(id).unwrap().as_carcass().unwrap().rot_timer, 23);
    }

    #[test]
    fn test_rotted_clean_carcass_leaves_nothing() {
        let mut world = quiet_world(7);
        let loc = Location::new(5, 5);
        let id = world
            .place(loc, Entity::Carcass(Carcass::new(10, 1)))
            .unwrap();

        carcass_act(&mut world, id);

        assert!(!world.contains(id));
        assert_eq!(world.count_kind(Kind::Fungi), 0);
    }

    #[test]
    fn test_rotted_infected_carcass_seeds_fungi() {
        let mut world = quiet_world(7);
        let loc = Location::new(5, 5);
        let mut carcass = Carcass::new(10, 2);
        carcass.infect();
        let id = world.place(loc, Entity::Carcass(carcass)).unwrap();

        carcass_act(&mut world, id);

        assert!(!world.contains(id));
        let fid = world.non_blocking_at(loc).expect("fungi on the tile");
        match world.entity(fid) {
            Some(Entity::Fungi(f)) => assert_eq!(f.lifespan, 20), // 2x meat
            _ => panic!("expected fungi"),
        }
    }

    #[test]
    fn test_fungi_displaces_grass_but_not_bush() {
        let mut world = quiet_world(7);
        let grassy = Location::new(5, 5);
        let bushy = Location::new(15, 15);
        world.place(grassy, Entity::Grass(Grass::new())).unwrap();
        world.place(bushy, Entity::Bush(Bush::new())).unwrap();
        let mut carcass = Carcass::new(10, 1);
        carcass.infect();
        let a = world.place(grassy, Entity::Carcass(carcass)).unwrap();
        let b = world.place(bushy, Entity::Carcass(carcass)).unwrap();

        carcass_act(&mut world, a);
        carcass_act(&mut world, b);

        assert_eq!(world.count_kind(Kind::Grass), 0);
        assert_eq!(world.count_kind(Kind::Fungi), 1);
        assert_eq!(world.count_kind(Kind::Bush), 1);
        assert!(world
            .non_blocking_at(grassy)
            .and_then(|id| world.entity(id))
            .map(|e| e.kind() == Kind::Fungi)
            .unwrap_or(false));
    }

    #[test]
    fn test_eaten_out_carcass_disappears() {
        let mut world = quiet_world(7);
        let id = world
            .place(Location::new(5, 5), Entity::Carcass(Carcass::new(10, 25)))
            .unwrap();
        world
            .entity_mut(id)
            .and_then(Entity::as_carcass_mut)
            .unwrap()
            .eaten(20);

        carcass_act(&mut world, id);

        assert!(!world.contains(id));
    }

    #[test]
    fn test_fungi_expires_after_lifespan() {
        let mut world = quiet_world(7);
        let id = world
            .place(Location::new(5, 5), Entity::Fungi(Fungi::new(1)))
            .unwrap();

        fungi_act(&mut world, id);

        assert!(!world.contains(id));
    }

    #[test]
    fn test_fungi_infects_by_walking_distance() {
        let mut world = quiet_world(7);
        let center = Location::new(10, 10);
        let id = world.place(center, Entity::Fungi(Fungi::new(50))).unwrap();
        // Manhattan 2: in reach. Diagonal at Chebyshev 2 (Manhattan 4): out.
        let near = world
            .place(Location::new(12, 10), Entity::Carcass(Carcass::new(10, 25)))
            .unwrap();
        let far = world
            .place(Location::new(12, 12), Entity::Carcass(Carcass::new(10, 25)))
            .unwrap();

        fungi_act(&mut world, id);

        assert!(world.entity(near).unwrap().as_carcass().unwrap().has_fungi);
        assert!(!world.entity(far).unwrap().as_carcass().unwrap().has_fungi);
    }

    #[test]
    fn test_fungi_infects_carcass_on_own_tile() {
        let mut world = quiet_world(7);
        let loc = Location::new(10, 10);
        let id = world.place(loc, Entity::Fungi(Fungi::new(50))).unwrap();
        let corpse = world
            .place(loc, Entity::Carcass(Carcass::new(10, 25)))
            .unwrap();

        fungi_act(&mut world, id);

        assert!(world.entity(corpse).unwrap().as_carcass().unwrap().has_fungi);
    }
}

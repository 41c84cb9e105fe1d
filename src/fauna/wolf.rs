//! Wolf behavior: pack cohesion, den building, night reproduction.

use crate::entity::{Entity, EntityId};
use crate::fauna::animal;
use crate::fauna::group::{Burrow, GroupId};
use crate::fauna::predator;
use crate::geometry::Location;
use crate::world::World;

/// Chebyshev distance beyond which a pack wolf closes in on its leader.
const PACK_SPREAD: i32 = 2;

/// Den occupants required before the leader breeds.
const MATING_THRESHOLD: usize = 2;

pub fn day(world: &mut World, id: EntityId) {
    let loc = match world.locate(id) {
        Some(l) => l,
        None => return,
    };
    let gid = world.animal(id).and_then(|a| a.group);
    let leader = gid.and_then(|g| world.group(g).and_then(|group| group.leader()));
    let is_leader = leader == Some(id);

    // A leader without a den claims one where it stands.
    if is_leader {
        try_build_den(world, loc, gid);
    }

    let hungry = world
        .animal(id)
        .map(|a| a.is_hungry(&world.config))
        .unwrap_or(false);
    if hungry {
        let radius = world.config.species.wolf.hunt_radius;
        let mut area = vec![loc];
        area.extend(world.tiles_within_radius(loc, radius));
        if predator::hunt(world, id, &area, false) {
            return;
        }
    }

    // Close ranks with the leader before idling
    if !is_leader {
        if let Some(leader_loc) = leader.and_then(|lid| world.locate(lid)) {
            if loc.chebyshev(leader_loc) > PACK_SPREAD {
                let cost = world.config.animals.idle_move_cost;
                animal::move_one_step_towards(world, id, leader_loc, cost);
                return;
            }
        }
    }

    animal::move_randomly(world, id);
}

pub fn night(world: &mut World, id: EntityId) {
    let gid = world.animal(id).and_then(|a| a.group);
    let den = gid.and_then(|g| world.group(g).and_then(|group| group.den));

    let den_id = match den {
        Some(d) => d,
        None => {
            // No den: a cold night in the open
            let penalty = world.config.animals.night_exposure;
            if let Some(a) = world.animal_mut(id) {
                a.energy -= penalty;
            }
            return;
        }
    };

    let my_loc = match world.locate(id) {
        Some(l) => l,
        None => return, // already inside
    };
    let den_loc = match world.locate(den_id) {
        Some(l) => l,
        None => return,
    };

    if my_loc.chebyshev(den_loc) <= 1 {
        animal::sleep(world, id, Some(den_id));

        // The leader breeds once the den is crowded enough
        let is_leader =
            gid.and_then(|g| world.group(g).and_then(|group| group.leader())) == Some(id);
        if is_leader {
            let occupants = world
                .entity(den_id)
                .and_then(Entity::as_burrow)
                .map(|b| b.count())
                .unwrap_or(0);
            if occupants >= MATING_THRESHOLD {
                animal::reproduce(world, id);
            }
        }
    } else {
        let cost = world.config.animals.idle_move_cost;
        animal::move_one_step_towards(world, id, den_loc, cost);
    }
}

/// Dusk: head for the den, or for the leader when the pack has none.
pub fn seek_shelter(world: &mut World, id: EntityId) {
    let gid = world.animal(id).and_then(|a| a.group);
    let cost = world.config.animals.idle_move_cost;

    let den_loc = gid
        .and_then(|g| world.group(g).and_then(|group| group.den))
        .and_then(|den| world.locate(den));
    if let Some(loc) = den_loc {
        animal::move_one_step_towards(world, id, loc, cost);
        return;
    }

    let leader_loc = gid
        .and_then(|g| world.group(g).and_then(|group| group.leader()))
        .filter(|lid| *lid != id)
        .and_then(|lid| world.locate(lid));
    if let Some(loc) = leader_loc {
        animal::move_one_step_towards(world, id, loc, cost);
    }
}

/// Wolf pups are born next to the den when there is one.
pub fn reproduction_location(world: &World, id: EntityId) -> Option<Location> {
    let gid = world.animal(id).and_then(|a| a.group);
    let den_loc = gid
        .and_then(|g| world.group(g).and_then(|group| group.den))
        .and_then(|den| world.locate(den));
    let anchor = match den_loc.or_else(|| world.locate(id)) {
        Some(loc) => loc,
        None => return None,
    };
    if world.is_empty(anchor) && world.locate(id) != Some(anchor) {
        return Some(anchor);
    }
    world.empty_tiles_within_radius(anchor, 1).first().copied()
}

fn try_build_den(world: &mut World, loc: Location, gid: Option<GroupId>) {
    let gid = match gid {
        Some(g) => g,
        None => return,
    };
    let has_den = world.group(gid).and_then(|g| g.den).is_some();
    if has_den || world.has_non_blocking(loc) {
        return;
    }

    if let Some(den_id) = world.place(loc, Entity::Burrow(Burrow::new())) {
        let members: Vec<EntityId> = world
            .group(gid)
            .map(|g| g.members().to_vec())
            .unwrap_or_default();
        if let Some(group) = world.group_mut(gid) {
            group.den = Some(den_id);
            group.set_home(loc);
        }
        // Every packmate knows the den as its shelter
        for member in members {
            if let Some(a) = world.animal_mut(member) {
                a.shelter = Some(den_id);
            }
        }
        log::debug!("pack {} built a den at ({}, {})", gid, loc.x, loc.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entity::Kind;
    use crate::fauna::animal::Animal;
    use crate::fauna::species::Species;

    fn pack_of(world: &mut World, locs: &[Location]) -> (GroupId, Vec<EntityId>) {
        let gid = world.create_group();
        let mut ids = Vec::new();
        for &loc in locs {
            let id = world
                .place(loc, Entity::Animal(Animal::adult(Species::Wolf, &world.config)))
                .unwrap();
            world.add_to_group(gid, id);
            ids.push(id);
        }
        (gid, ids)
    }

    #[test]
    fn test_leader_builds_den() {
        let mut world = World::new_with_seed(Config::default(), 9);
        let home = Location::new(10, 10);
        let (gid, ids) = pack_of(&mut world, &[home, Location::new(11, 10)]);

        day(&mut world, ids[0]);

        let den = world.group(gid).unwrap().den.expect("leader should build a den");
        assert_eq!(world.locate(den), Some(home));
        assert_eq!(world.group(gid).unwrap().home(), Some(home));
        // All members adopt the den as shelter
        for id in &ids {
            assert_eq!(world.animal(*id).unwrap().shelter, Some(den));
        }
    }

    #[test]
    fn test_follower_does_not_build_den() {
        let mut world = World::new_with_seed(Config::default(), 9);
        let (gid, ids) = pack_of(&mut world, &[Location::new(10, 10), Location::new(20, 20)]);

        day(&mut world, ids[1]);

        assert!(world.group(gid).unwrap().den.is_none());
    }

    #[test]
    fn test_straggler_closes_on_leader() {
        let mut world = World::new_with_seed(Config::default(), 9);
        let leader_loc = Location::new(10, 10);
        let far = Location::new(20, 20);
        let (gid, ids) = pack_of(&mut world, &[leader_loc, far]);
        // Well fed so it will not hunt
        world.animal_mut(ids[1]).unwrap().energy = 100;

        day(&mut world, ids[1]);

        let here = world.locate(ids[1]).unwrap();
        assert!(here.manhattan(leader_loc) < far.manhattan(leader_loc));
        let _ = gid;
    }

    #[test]
    fn test_night_without_den_is_exposure() {
        let mut world = World::new_with_seed(Config::default(), 9);
        let (_, ids) = pack_of(&mut world, &[Location::new(10, 10)]);
        let before = world.animal(ids[0]).unwrap().energy;

        night(&mut world, ids[0]);

        assert_eq!(world.animal(ids[0]).unwrap().energy, before - 5);
    }

    #[test]
    fn test_night_sleep_in_den_and_leader_breeds() {
        let mut world = World::new_with_seed(Config::default(), 9);
        let home = Location::new(10, 10);
        let (gid, ids) = pack_of(&mut world, &[home, Location::new(11, 10)]);

        // Build the den, then make everyone an eligible adult
        day(&mut world, ids[0]);
        let den = world.group(gid).unwrap().den.unwrap();
        for id in &ids {
            world.animal_mut(*id).unwrap().energy = 100;
        }

        // Follower turns in first, then the leader
        night(&mut world, ids[1]);
        assert_eq!(world.locate(ids[1]), None);
        assert_eq!(world.entity(den).unwrap().as_burrow().unwrap().count(), 1);

        night(&mut world, ids[0]);
        assert_eq!(world.entity(den).unwrap().as_burrow().unwrap().count(), 2);

        // Threshold met: a pup appeared near the den
        assert_eq!(world.population(), 3);
        assert_eq!(world.count_kind(Kind::Animal), 3);
        let pup = world
            .group(gid)
            .unwrap()
            .members()
            .iter()
            .copied()
            .find(|m| !ids.contains(m))
            .expect("pup joins the pack");
        let pup_loc = world.locate(pup).unwrap();
        assert!(pup_loc.chebyshev(home) <= 1);
    }
}

//! Herbivore behavior: daytime foraging on ground cover, nights in the
//! burrow. Rabbits are the resident herbivore species.

use crate::entity::{Entity, EntityId};
use crate::fauna::animal;
use crate::geometry::{self, Location};
use crate::world::World;

/// Daytime: eat underfoot when hungry, otherwise search outward in
/// expanding rings for the nearest edible cover; failing that, wander.
pub fn day(world: &mut World, id: EntityId) {
    let loc = match world.locate(id) {
        Some(l) => l,
        None => return,
    };
    let hungry = world
        .animal(id)
        .map(|a| a.is_hungry(&world.config))
        .unwrap_or(false);

    if hungry {
        if edible_cover_at(world, loc) {
            eat_cover(world, id, loc);
            return;
        }
        if let Some(target) = find_nearest_cover(world, loc) {
            if loc.is_adjacent(target) && world.is_empty(target) {
                let cost = world.config.animals.idle_move_cost;
                if world.move_entity(id, target) {
                    if let Some(a) = world.animal_mut(id) {
                        a.energy -= cost;
                    }
                    eat_cover(world, id, target);
                }
                return;
            }
            let cost = world.config.animals.idle_move_cost;
            animal::move_one_step_towards(world, id, target, cost);
            return;
        }
        animal::move_randomly(world, id);
        return;
    }

    // Well fed: try for a litter, otherwise wander.
    if animal::reproduce(world, id) {
        return;
    }
    animal::move_randomly(world, id);
}

/// Night: sleep if the burrow is within one tile, otherwise pay the
/// exposure penalty.
pub fn night(world: &mut World, id: EntityId) {
    let shelter = world.animal(id).and_then(|a| a.shelter);
    if let Some(bid) = shelter {
        if let (Some(my), Some(den)) = (world.locate(id), world.locate(bid)) {
            if my.chebyshev(den) <= 1 {
                animal::sleep(world, id, Some(bid));
                return;
            }
        }
    }
    let penalty = world.config.animals.night_exposure;
    if let Some(a) = world.animal_mut(id) {
        a.energy -= penalty;
    }
}

/// Is there something a herbivore can eat on this tile's cover slot?
pub fn edible_cover_at(world: &World, loc: Location) -> bool {
    match world.non_blocking_at(loc).and_then(|cid| world.entity(cid)) {
        Some(Entity::Grass(_)) => true,
        Some(Entity::Bush(bush)) => bush.berries > 0,
        _ => false,
    }
}

/// Consume the cover at `loc`: grass yields flat energy and disappears,
/// a bush yields energy per berry and is stripped bare.
pub fn eat_cover(world: &mut World, id: EntityId, loc: Location) {
    let cover = match world.non_blocking_at(loc) {
        Some(cid) => cid,
        None => return,
    };
    let grass_energy = world.config.flora.grass_energy;
    let berry_energy = world.config.flora.berry_energy;

    let gained = if world.entity(cover).map(Entity::is_grass).unwrap_or(false) {
        world.remove(cover);
        grass_energy
    } else if let Some(bush) = world.entity_mut(cover).and_then(Entity::as_bush_mut) {
        let yield_ = berry_energy * bush.berries as i32;
        bush.berries = 0;
        yield_
    } else {
        return;
    };

    if let Some(a) = world.animal_mut(id) {
        a.energy += gained;
    }
}

/// Expanding-ring search for the nearest edible cover, radius 1 up to the
/// configured cap. Within the first ring that has any, the Manhattan-closest
/// tile wins (canonical tie-break).
fn find_nearest_cover(world: &World, origin: Location) -> Option<Location> {
    let cap = world.config.animals.forage_radius_cap;
    for r in 1..=cap {
        let mut best: Option<(i32, Location)> = None;
        for tile in geometry::ring_at_radius(origin, r) {
            if !world.in_bounds(tile) || !edible_cover_at(world, tile) {
                continue;
            }
            let d = origin.manhattan(tile);
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, tile));
            }
        }
        if let Some((_, tile)) = best {
            return Some(tile);
        }
    }
    None
}

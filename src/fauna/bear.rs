//! Bear behavior: a solitary predator bound to a fixed territory.

use crate::entity::EntityId;
use crate::fauna::animal;
use crate::fauna::predator;
use crate::geometry::{self, Location};
use crate::world::World;

/// Cubs are placed this many tiles from the parent.
const CUB_RING_MIN: i32 = 3;
const CUB_RING_MAX: i32 = 5;

fn territory_of(world: &World, id: EntityId) -> Option<Location> {
    world.animal(id).and_then(|a| a.territory)
}

pub fn day(world: &mut World, id: EntityId) {
    let loc = match world.locate(id) {
        Some(l) => l,
        None => return,
    };

    // A bear spawned without an anchor adopts where it stands.
    let center = match territory_of(world, id) {
        Some(c) => c,
        None => {
            if let Some(a) = world.animal_mut(id) {
                a.territory = Some(loc);
            }
            loc
        }
    };
    let radius = world.config.species.bear.hunt_radius;

    // Strayed outside: walk home instead of hunting
    if loc.chebyshev(center) > radius {
        let cost = world.config.animals.idle_move_cost;
        animal::move_one_step_towards(world, id, center, cost);
        return;
    }

    let hungry = world
        .animal(id)
        .map(|a| a.is_hungry(&world.config))
        .unwrap_or(false);
    if hungry {
        let mut area = vec![center];
        area.extend(world.tiles_within_radius(center, radius));
        if predator::hunt(world, id, &area, true) {
            return;
        }
    }

    if !hungry && animal::reproduce(world, id) {
        return;
    }
    animal::move_randomly(world, id);
}

/// Night: bed down at the territory center, walking the last stretch if
/// the dusk return did not quite get there.
pub fn night(world: &mut World, id: EntityId) {
    let loc = match world.locate(id) {
        Some(l) => l,
        None => return,
    };
    let center = match territory_of(world, id) {
        Some(c) => c,
        None => loc,
    };

    if loc.chebyshev(center) <= 1 {
        animal::sleep(world, id, None);
    } else {
        let cost = world.config.animals.idle_move_cost;
        animal::move_one_step_towards(world, id, center, cost);
    }
}

/// Cubs are born on an empty tile 3-5 tiles out, falling back to the
/// territory center or its surroundings.
pub fn reproduction_location(world: &World, id: EntityId) -> Option<Location> {
    let loc = world.locate(id)?;

    for r in CUB_RING_MIN..=CUB_RING_MAX {
        for tile in geometry::ring_at_radius(loc, r) {
            if world.is_empty(tile) {
                return Some(tile);
            }
        }
    }

    let center = territory_of(world, id)?;
    if world.is_empty(center) {
        return Some(center);
    }
    world.empty_tiles_within_radius(center, 1).first().copied()
}

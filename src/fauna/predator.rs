//! Predator hunting and combat: priority-ordered target selection over a
//! hunting area, engagement, and simultaneous damage resolution.

use crate::entity::{Entity, EntityId, Kind};
use crate::fauna::animal;
use crate::fauna::species::Species;
use crate::geometry::Location;
use crate::world::World;

/// One hunting attempt over the given area. Targets are tried in priority
/// order: rival predator, carcass, (optionally) berry bush, live prey.
/// Returns true if a target was engaged this tick.
pub fn hunt(world: &mut World, id: EntityId, area: &[Location], eat_berries: bool) -> bool {
    let origin = match world.locate(id) {
        Some(l) => l,
        None => return false,
    };

    // Priority 1: rival predator
    if let Some(target) =
        find_closest_matching(world, id, origin, area, |w, other| is_enemy_predator(w, id, other))
    {
        engage(world, id, target);
        return true;
    }

    // Priority 2: carcass
    if let Some(target) = find_closest_matching(world, id, origin, area, |w, other| {
        w.entity(other).map(|e| e.kind() == Kind::Carcass).unwrap_or(false)
    }) {
        engage(world, id, target);
        return true;
    }

    // Bears also raid bushes, after carrion but before live prey
    if eat_berries {
        if let Some(target) = find_closest_matching(world, id, origin, area, |w, other| {
            matches!(w.entity(other), Some(Entity::Bush(b)) if b.berries > 0)
        }) {
            engage(world, id, target);
            return true;
        }
    }

    // Priority 3: live prey
    if let Some(target) = find_closest_matching(world, id, origin, area, |w, other| {
        w.animal(other).map(|a| !a.species.is_predator()).unwrap_or(false)
    }) {
        engage(world, id, target);
        return true;
    }

    false
}

/// Scan the area for the Manhattan-closest entity satisfying the
/// predicate, skipping empty cells and the hunter itself. Both occupancy
/// slots of each tile are considered. Ties resolve to the first match in
/// canonical tile order.
pub fn find_closest_matching<F>(
    world: &World,
    hunter: EntityId,
    origin: Location,
    area: &[Location],
    matches: F,
) -> Option<EntityId>
where
    F: Fn(&World, EntityId) -> bool,
{
    let mut best: Option<(i32, EntityId)> = None;
    for &tile in area {
        for candidate in [world.blocking_at(tile), world.non_blocking_at(tile)]
            .into_iter()
            .flatten()
        {
            if candidate == hunter || !matches(world, candidate) {
                continue;
            }
            let d = origin.manhattan(tile);
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, candidate));
            }
        }
    }
    best.map(|(_, id)| id)
}

/// Close on the target: interact if it is within the 8-neighborhood,
/// otherwise take one hunting step toward it.
pub fn engage(world: &mut World, id: EntityId, target: EntityId) {
    let my_loc = match world.locate(id) {
        Some(l) => l,
        None => return,
    };
    let target_loc = match world.locate(target) {
        Some(l) => l,
        None => return,
    };

    if my_loc.chebyshev(target_loc) <= 1 {
        interact(world, id, target);
    } else {
        let cost = world.config.animals.hunt_move_cost;
        animal::move_one_step_towards(world, id, target_loc, cost);
    }
}

fn interact(world: &mut World, id: EntityId, target: EntityId) {
    let kind = match world.entity(target) {
        Some(e) => e.kind(),
        None => return,
    };
    match kind {
        Kind::Animal => {
            if is_enemy_predator(world, id, target) {
                fight(world, id, target);
            } else {
                // Prey goes down in one strike and becomes a carcass
                animal::die(world, target);
            }
        }
        Kind::Carcass => eat_carcass(world, id, target),
        Kind::Bush => eat_bush(world, id, target),
        _ => {}
    }
}

/// Tear a bite of meat from a carcass.
fn eat_carcass(world: &mut World, id: EntityId, target: EntityId) {
    let bite = world.config.animals.carcass_bite;
    let taken = match world.entity_mut(target).and_then(Entity::as_carcass_mut) {
        Some(carcass) => {
            let taken = carcass.meat_left.min(bite);
            carcass.eaten(taken);
            taken
        }
        None => return,
    };
    if let Some(a) = world.animal_mut(id) {
        a.energy += taken;
    }
}

fn eat_bush(world: &mut World, id: EntityId, target: EntityId) {
    let berry_energy = world.config.flora.berry_energy;
    let gained = match world.entity_mut(target).and_then(Entity::as_bush_mut) {
        Some(bush) => {
            let gained = berry_energy * bush.berries as i32;
            bush.berries = 0;
            gained
        }
        None => return,
    };
    if let Some(a) = world.animal_mut(id) {
        a.energy += gained;
    }
}

/// Combat between two predators. Both damages are computed from the
/// pre-fight state and land simultaneously; whoever drops to zero energy
/// or below dies on the spot.
pub fn fight(world: &mut World, a: EntityId, b: EntityId) {
    let damage_a = attack_damage(world, a);
    let damage_b = attack_damage(world, b);

    if let Some(x) = world.animal_mut(a) {
        x.energy -= damage_b;
    }
    if let Some(x) = world.animal_mut(b) {
        x.energy -= damage_a;
    }

    let a_dead = world.animal(a).map(|x| x.energy <= 0).unwrap_or(false);
    let b_dead = world.animal(b).map(|x| x.energy <= 0).unwrap_or(false);
    if a_dead {
        animal::die(world, a);
    }
    if b_dead {
        animal::die(world, b);
    }
}

fn attack_damage(world: &World, id: EntityId) -> i32 {
    world
        .animal(id)
        .map(|a| a.species.params(&world.config.species).attack_damage)
        .unwrap_or(0)
}

/// Species enmity: bears and wolves are always rivals; wolves from
/// different packs are rivals; packmates and fellow bears are not. Nothing
/// is its own enemy.
pub fn is_enemy_predator(world: &World, me: EntityId, other: EntityId) -> bool {
    if me == other {
        return false;
    }
    let (a, b) = match (world.animal(me), world.animal(other)) {
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };
    if !a.species.is_predator() || !b.species.is_predator() {
        return false;
    }
    match (a.species, b.species) {
        (Species::Wolf, Species::Wolf) => match (a.group, b.group) {
            (Some(mine), Some(theirs)) => mine != theirs,
            // Packless wolves trust no one
            _ => true,
        },
        (Species::Bear, Species::Bear) => false,
        _ => true,
    }
}

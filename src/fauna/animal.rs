//! Shared animal life-cycle: the per-tick template, death, sleep,
//! reproduction and movement primitives. Species-specific day/night
//! behavior is dispatched from here into the sibling modules.

use crate::config::Config;
use crate::decay::Carcass;
use crate::entity::{Entity, EntityId};
use crate::fauna::group::GroupId;
use crate::fauna::species::Species;
use crate::fauna::{bear, herbivore, wolf};
use crate::geometry::Location;
use crate::world::World;

/// Mutable state shared by every creature.
#[derive(Clone, Debug)]
pub struct Animal {
    pub species: Species,
    /// Ticks alive, monotonically increasing
    pub age: u32,
    /// Consumed by actions, restored by eating and sleeping; death at <= 0
    pub energy: i32,
    pub sleeping: bool,
    /// Offspring produced so far
    pub kids: u8,
    /// Denning structure this animal claims (not owned, id index)
    pub shelter: Option<EntityId>,
    /// Pack/herd membership (not owned, id index)
    pub group: Option<GroupId>,
    /// Fixed territory anchor (bears)
    pub territory: Option<Location>,
}

impl Animal {
    /// A fresh adult, as spawned by the scenario loader.
    pub fn adult(species: Species, config: &Config) -> Self {
        Self {
            species,
            age: species.params(&config.species).child_age,
            energy: config.animals.initial_energy,
            sleeping: false,
            kids: 0,
            shelter: None,
            group: None,
            territory: None,
        }
    }

    /// A newborn, as produced by reproduction.
    pub fn child(species: Species, config: &Config) -> Self {
        Self {
            species,
            age: 0,
            energy: config.animals.child_energy,
            sleeping: false,
            kids: 0,
            shelter: None,
            group: None,
            territory: None,
        }
    }

    pub fn is_child(&self, config: &Config) -> bool {
        self.age < self.species.params(&config.species).child_age
    }

    pub fn is_hungry(&self, config: &Config) -> bool {
        self.energy < config.animals.hunger_threshold
    }
}

/// One tick of the shared life-cycle template.
pub fn act(world: &mut World, id: EntityId) {
    let (species, age, energy) = match world.animal(id) {
        Some(a) => (a.species, a.age, a.energy),
        None => return,
    };

    let max_age = species.params(&world.config.species).max_age;
    if age >= max_age || energy <= 0 {
        die(world, id);
        return;
    }

    if let Some(a) = world.animal_mut(id) {
        a.age += 1;
        a.energy -= 1;
    }

    let sleeping = world.animal(id).map(|a| a.sleeping).unwrap_or(false);
    if world.is_day() && sleeping {
        wake(world, id);
    }
    if world.animal(id).map(|a| a.sleeping).unwrap_or(true) {
        return;
    }

    if world.is_dusk() {
        seek_shelter(world, id, species);
        return;
    }

    if world.is_night() {
        match species {
            Species::Rabbit => herbivore::night(world, id),
            Species::Wolf => wolf::night(world, id),
            Species::Bear => bear::night(world, id),
        }
    } else {
        match species {
            Species::Rabbit => herbivore::day(world, id),
            Species::Wolf => wolf::day(world, id),
            Species::Bear => bear::day(world, id),
        }
    }
}

/// Remove the animal and leave a carcass sized by its species meat value
/// at its last known location. Clears group membership and any den slot.
pub fn die(world: &mut World, id: EntityId) {
    let (species, shelter) = match world.animal(id) {
        Some(a) => (a.species, a.shelter),
        None => return,
    };
    let meat = species.params(&world.config.species).meat_value;
    let rot = world.config.decay.rot_timer;

    world.remove_from_group(id);
    if let Some(bid) = shelter {
        if let Some(burrow) = world.entity_mut(bid).and_then(Entity::as_burrow_mut) {
            burrow.leave(id);
        }
    }

    let loc = world.locate(id);
    world.remove(id);
    world.note_death();

    // An animal that died inside a den leaves no carcass on the grid.
    if let Some(loc) = loc {
        world.place(loc, Entity::Carcass(Carcass::new(meat, rot)));
    }
}

/// Fall asleep, restoring the species sleep energy. When `den` is given,
/// the animal vacates its tile into that structure.
pub fn sleep(world: &mut World, id: EntityId, den: Option<EntityId>) {
    let species = match world.animal(id) {
        Some(a) => a.species,
        None => return,
    };
    let restored = species.params(&world.config.species).sleep_energy;
    if let Some(a) = world.animal_mut(id) {
        a.sleeping = true;
        a.energy += restored;
    }
    if let Some(bid) = den {
        world.vacate(id);
        if let Some(burrow) = world.entity_mut(bid).and_then(Entity::as_burrow_mut) {
            burrow.enter(id);
        }
    }
}

/// Wake up at daybreak. Den sleepers need an open tile by their shelter;
/// if none exists they stay inside and retry next tick.
fn wake(world: &mut World, id: EntityId) {
    if world.locate(id).is_some() {
        if let Some(a) = world.animal_mut(id) {
            a.sleeping = false;
        }
        return;
    }

    let shelter = world.animal(id).and_then(|a| a.shelter);
    let shelter_loc = shelter.and_then(|bid| world.locate(bid));
    let exit = match shelter_loc {
        Some(loc) => [1, 2]
            .iter()
            .find_map(|r| world.empty_tiles_within_radius(loc, *r).first().copied())
            .or(if world.is_empty(loc) { Some(loc) } else { None }),
        None => None,
    };

    if let Some(out) = exit {
        if world.reenter(id, out) {
            if let Some(bid) = shelter {
                if let Some(burrow) = world.entity_mut(bid).and_then(Entity::as_burrow_mut) {
                    burrow.leave(id);
                }
            }
            if let Some(a) = world.animal_mut(id) {
                a.sleeping = false;
            }
        }
    }
}

/// Dusk step: head for the species' sleeping place.
fn seek_shelter(world: &mut World, id: EntityId, species: Species) {
    let cost = world.config.animals.idle_move_cost;
    match species {
        Species::Bear => {
            if let Some(center) = world.animal(id).and_then(|a| a.territory) {
                move_one_step_towards(world, id, center, cost);
            }
        }
        Species::Wolf => wolf::seek_shelter(world, id),
        Species::Rabbit => {
            let target = world
                .animal(id)
                .and_then(|a| a.shelter)
                .and_then(|bid| world.locate(bid));
            if let Some(loc) = target {
                move_one_step_towards(world, id, loc, cost);
            }
        }
    }
}

/// Produce one child at a species-defined empty location. No-op unless the
/// parent is an adult with enough energy and spare kid capacity.
pub fn reproduce(world: &mut World, id: EntityId) -> bool {
    let (species, energy, kids, is_child, group, shelter) = match world.animal(id) {
        Some(a) => (
            a.species,
            a.energy,
            a.kids,
            a.is_child(&world.config),
            a.group,
            a.shelter,
        ),
        None => return false,
    };
    let cfg = &world.config.animals;
    if energy < cfg.reproduce_threshold || is_child || kids > cfg.kid_cap {
        return false;
    }
    let cost = cfg.reproduce_cost;

    let spot = match reproduction_location(world, id, species) {
        Some(loc) => loc,
        None => return false,
    };

    let child = Animal::child(species, &world.config);
    let child_id = match world.place(spot, Entity::Animal(child)) {
        Some(cid) => cid,
        None => return false,
    };

    // Children inherit the parent's social ties.
    if let Some(gid) = group {
        world.add_to_group(gid, child_id);
    }
    if let Some(a) = world.animal_mut(child_id) {
        a.shelter = shelter;
        if species == Species::Bear {
            a.territory = Some(spot);
        }
    }

    if let Some(a) = world.animal_mut(id) {
        a.kids += 1;
        a.energy -= cost;
    }
    world.note_birth();
    true
}

fn reproduction_location(world: &World, id: EntityId, species: Species) -> Option<Location> {
    match species {
        Species::Bear => bear::reproduction_location(world, id),
        Species::Wolf => wolf::reproduction_location(world, id),
        Species::Rabbit => {
            let loc = world.locate(id)?;
            world.empty_tiles_within_radius(loc, 1).first().copied()
        }
    }
}

/// Step onto a uniformly random empty neighboring cell. Costs the idle
/// move energy; returns the new location, or none if boxed in.
pub fn move_randomly(world: &mut World, id: EntityId) -> Option<Location> {
    let loc = world.locate(id)?;
    let empty = world.empty_tiles_within_radius(loc, 1);
    let dest = world.pick_location(&empty)?;
    let cost = world.config.animals.idle_move_cost;
    if world.move_entity(id, dest) {
        if let Some(a) = world.animal_mut(id) {
            a.energy -= cost;
        }
        Some(dest)
    } else {
        None
    }
}

/// Step onto the empty neighbor that minimizes Manhattan distance to
/// `target` (canonical lexicographic tie-break), paying `cost` energy.
/// No-op when boxed in or not on the grid.
pub fn move_one_step_towards(
    world: &mut World,
    id: EntityId,
    target: Location,
    cost: i32,
) -> bool {
    let loc = match world.locate(id) {
        Some(l) => l,
        None => return false,
    };
    let empty = world.empty_tiles_within_radius(loc, 1);
    let dest = match empty.iter().min_by_key(|t| t.manhattan(target)) {
        Some(d) => *d,
        None => return false,
    };
    if world.move_entity(id, dest) {
        if let Some(a) = world.animal_mut(id) {
            a.energy -= cost;
        }
        true
    } else {
        false
    }
}

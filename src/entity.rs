//! Entity registry types and per-tick dispatch.
//!
//! Every occupant of the grid is one variant of the closed [`Entity`] enum.
//! The world addresses entities by [`EntityId`]; behaviors run against the
//! world and an id rather than holding references, so an acting entity can
//! freely mutate cells and other entities it interacts with.

use crate::decay::{Carcass, Fungi};
use crate::fauna::animal::Animal;
use crate::fauna::group::Burrow;
use crate::flora::{Bush, Grass};
use crate::world::World;

/// Unique entity identifier, monotonically increasing within a world.
pub type EntityId = u64;

/// Everything that can occupy a grid cell.
#[derive(Clone, Debug)]
pub enum Entity {
    Animal(Animal),
    Carcass(Carcass),
    Fungi(Fungi),
    Grass(Grass),
    Bush(Bush),
    Burrow(Burrow),
}

/// Discriminant of [`Entity`], usable after the borrow on the entity ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Animal,
    Carcass,
    Fungi,
    Grass,
    Bush,
    Burrow,
}

impl Entity {
    pub fn kind(&self) -> Kind {
        match self {
            Entity::Animal(_) => Kind::Animal,
            Entity::Carcass(_) => Kind::Carcass,
            Entity::Fungi(_) => Kind::Fungi,
            Entity::Grass(_) => Kind::Grass,
            Entity::Bush(_) => Kind::Bush,
            Entity::Burrow(_) => Kind::Burrow,
        }
    }

    /// Blocking occupants exclude each other from a cell; non-blocking
    /// ground cover coexists with them.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Entity::Animal(_) | Entity::Carcass(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Entity::Animal(a) => a.species.name(),
            Entity::Carcass(_) => "carcass",
            Entity::Fungi(_) => "fungi",
            Entity::Grass(_) => "grass",
            Entity::Bush(_) => "bush",
            Entity::Burrow(_) => "burrow",
        }
    }

    pub fn as_animal(&self) -> Option<&Animal> {
        match self {
            Entity::Animal(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_animal_mut(&mut self) -> Option<&mut Animal> {
        match self {
            Entity::Animal(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_carcass(&self) -> Option<&Carcass> {
        match self {
            Entity::Carcass(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_carcass_mut(&mut self) -> Option<&mut Carcass> {
        match self {
            Entity::Carcass(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_bush_mut(&mut self) -> Option<&mut Bush> {
        match self {
            Entity::Bush(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_fungi_mut(&mut self) -> Option<&mut Fungi> {
        match self {
            Entity::Fungi(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_burrow(&self) -> Option<&Burrow> {
        match self {
            Entity::Burrow(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_burrow_mut(&mut self) -> Option<&mut Burrow> {
        match self {
            Entity::Burrow(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_grass(&self) -> bool {
        matches!(self, Entity::Grass(_))
    }
}

/// Advance one entity by one tick. No-op if the entity was removed earlier
/// in the same pass (e.g. prey killed before its turn).
pub fn act(world: &mut World, id: EntityId) {
    let kind = match world.entity(id) {
        Some(e) => e.kind(),
        None => return,
    };

    match kind {
        Kind::Animal => crate::fauna::animal::act(world, id),
        Kind::Carcass => crate::decay::carcass_act(world, id),
        Kind::Fungi => crate::decay::fungi_act(world, id),
        Kind::Grass => crate::flora::grass_act(world, id),
        Kind::Bush => crate::flora::bush_act(world, id),
        // Burrows never act
        Kind::Burrow => {}
    }
}

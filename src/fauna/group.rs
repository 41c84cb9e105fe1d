//! Pack/herd membership registry and denning structures.
//!
//! Groups and burrows never own their members; animals carry id indices
//! back to them, so destroying either side cannot dangle.

use crate::entity::EntityId;
use crate::geometry::Location;

/// Unique group identifier within a world.
pub type GroupId = u64;

/// A pack of predators or a herd of herbivores. Insertion order is
/// seniority: the first member is the leader.
#[derive(Clone, Debug, Default)]
pub struct Group {
    members: Vec<EntityId>,
    home: Option<Location>,
    /// Shared den/burrow structure, if one has been built.
    pub den: Option<EntityId>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member unless already present.
    pub fn add_member(&mut self, id: EntityId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    /// Remove a member by identity. O(n) over a group-sized list; groups
    /// stay small. Removing a non-leader preserves leader identity.
    pub fn remove_member(&mut self, id: EntityId) {
        self.members.retain(|m| *m != id);
    }

    /// First member by insertion order, or none if empty.
    pub fn leader(&self) -> Option<EntityId> {
        self.members.first().copied()
    }

    pub fn members(&self) -> &[EntityId] {
        &self.members
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn home(&self) -> Option<Location> {
        self.home
    }

    /// The home is established once, by the leader's first claim.
    pub fn set_home(&mut self, loc: Location) {
        if self.home.is_none() {
            self.home = Some(loc);
        }
    }
}

/// A passive denning structure. Non-blocking; never acts. Holds the ids of
/// the animals currently inside it, which the pack leader consults for the
/// mating threshold.
#[derive(Clone, Debug, Default)]
pub struct Burrow {
    occupants: Vec<EntityId>,
}

impl Burrow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, id: EntityId) {
        if !self.occupants.contains(&id) {
            self.occupants.push(id);
        }
    }

    pub fn leave(&mut self, id: EntityId) {
        self.occupants.retain(|o| *o != id);
    }

    pub fn count(&self) -> usize {
        self.occupants.len()
    }

    pub fn occupants(&self) -> &[EntityId] {
        &self.occupants
    }
}

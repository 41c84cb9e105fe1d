//! The closed species set and its constant profiles.

use crate::config::{SpeciesParams, SpeciesTable};

/// Every animal belongs to exactly one species. Behavior differences are
/// dispatched over this enum rather than through a type hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Species {
    Rabbit,
    Wolf,
    Bear,
}

impl Species {
    pub fn name(&self) -> &'static str {
        match self {
            Species::Rabbit => "rabbit",
            Species::Wolf => "wolf",
            Species::Bear => "bear",
        }
    }

    /// Predators hunt; everything else is potential prey.
    pub fn is_predator(&self) -> bool {
        matches!(self, Species::Wolf | Species::Bear)
    }

    /// Constant profile for this species.
    pub fn params<'a>(&self, table: &'a SpeciesTable) -> &'a SpeciesParams {
        match self {
            Species::Rabbit => &table.rabbit,
            Species::Wolf => &table.wolf,
            Species::Bear => &table.bear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predator_flags() {
        assert!(!Species::Rabbit.is_predator());
        assert!(Species::Wolf.is_predator());
        assert!(Species::Bear.is_predator());
    }

    #[test]
    fn test_params_lookup() {
        let table = SpeciesTable::default();
        assert_eq!(Species::Rabbit.params(&table).child_age, 10);
        assert_eq!(Species::Wolf.params(&table).child_age, 40);
        assert_eq!(Species::Wolf.params(&table).attack_damage, 10);
        assert_eq!(Species::Bear.params(&table).attack_damage, 25);
    }
}

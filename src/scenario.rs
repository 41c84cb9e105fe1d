//! Scenario files: declarative starting populations.
//!
//! A scenario is a small line-based text format, one directive per line.
//! Blank lines and `#` comments are ignored:
//!
//! ```text
//! # a small valley
//! grid 40 40
//! day 30 20
//! rabbit 12
//! wolf 3-5
//! bear 1 at 30,30
//! grass 60
//! bush 8
//! ```
//!
//! Counts are either fixed (`12`) or a range (`3-5`) resolved with the
//! world's seeded generator. Rabbits spawn as one herd around a shared
//! burrow; each `wolf` line spawns one pack; bears are solitary and claim
//! the tile they spawn on as territory center.

use crate::config::Config;
use crate::decay::Carcass;
use crate::entity::Entity;
use crate::fauna::animal::Animal;
use crate::fauna::group::Burrow;
use crate::fauna::species::Species;
use crate::flora::{Bush, Grass};
use crate::geometry::Location;
use crate::world::World;
use rand::Rng;
use std::path::Path;

/// How far from the group anchor herd/pack members may spawn.
const SPAWN_RADIUS: i32 = 4;

/// A population count directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Count {
    Fixed(u32),
    /// Inclusive range, resolved per scenario build.
    Range(u32, u32),
}

impl Count {
    fn resolve(self, world: &mut World) -> u32 {
        match self {
            Count::Fixed(n) => n,
            Count::Range(lo, hi) => world.rng().gen_range(lo..=hi),
        }
    }
}

/// What a spawn line puts on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnKind {
    Rabbit,
    Wolf,
    Bear,
    Grass,
    Bush,
    Carcass,
}

/// One parsed spawn directive.
#[derive(Clone, Copy, Debug)]
pub struct Spawn {
    pub kind: SpawnKind,
    pub count: Count,
    /// Anchor location from an `at x,y` suffix, if given.
    pub at: Option<Location>,
}

/// A parsed scenario, ready to build a world from.
#[derive(Clone, Debug, Default)]
pub struct Scenario {
    pub grid: Option<(i32, i32)>,
    pub day: Option<(u64, u64)>,
    pub spawns: Vec<Spawn>,
}

impl Scenario {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text)?)
    }

    /// Parse scenario text. Errors carry the 1-based line number.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut scenario = Scenario::default();

        for (idx, raw) in text.lines().enumerate() {
            let lineno = idx + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();

            match tokens[0] {
                "grid" => {
                    let (w, h) = parse_pair(&tokens[1..], lineno, "grid expects `grid W H`")?;
                    scenario.grid = Some((w, h));
                }
                "day" => {
                    let (d, n) = parse_pair(&tokens[1..], lineno, "day expects `day DAY NIGHT`")?;
                    scenario.day = Some((d, n));
                }
                word => {
                    let kind = match word {
                        "rabbit" => SpawnKind::Rabbit,
                        "wolf" => SpawnKind::Wolf,
                        "bear" => SpawnKind::Bear,
                        "grass" => SpawnKind::Grass,
                        "bush" => SpawnKind::Bush,
                        "carcass" => SpawnKind::Carcass,
                        other => {
                            return Err(format!("line {}: unknown directive `{}`", lineno, other))
                        }
                    };
                    let count = match tokens.get(1) {
                        Some(tok) => parse_count(tok, lineno)?,
                        None => return Err(format!("line {}: `{}` needs a count", lineno, word)),
                    };
                    let at = match tokens.get(2) {
                        Some(&"at") => {
                            let coords = tokens.get(3).ok_or_else(|| {
                                format!("line {}: `at` needs coordinates `x,y`", lineno)
                            })?;
                            Some(parse_location(coords, lineno)?)
                        }
                        Some(extra) => {
                            return Err(format!("line {}: unexpected token `{}`", lineno, extra))
                        }
                        None => None,
                    };
                    scenario.spawns.push(Spawn { kind, count, at });
                }
            }
        }

        Ok(scenario)
    }

    /// Build a world from this scenario, overriding the config's grid and
    /// day cycle where the scenario sets them.
    pub fn build(&self, mut config: Config, seed: u64) -> Result<World, String> {
        if let Some((w, h)) = self.grid {
            config.world.width = w;
            config.world.height = h;
        }
        if let Some((d, n)) = self.day {
            config.world.day_length = d;
            config.world.night_length = n;
        }
        config.validate()?;

        let mut world = World::new_with_seed(config, seed);
        for spawn in &self.spawns {
            let count = spawn.count.resolve(&mut world);
            match spawn.kind {
                SpawnKind::Rabbit => spawn_herd(&mut world, count, spawn.at)?,
                SpawnKind::Wolf => spawn_pack(&mut world, count, spawn.at)?,
                SpawnKind::Bear => spawn_bears(&mut world, count, spawn.at)?,
                SpawnKind::Grass => spawn_cover(&mut world, count, spawn.at, || {
                    Entity::Grass(Grass::new())
                })?,
                SpawnKind::Bush => spawn_cover(&mut world, count, spawn.at, || {
                    Entity::Bush(Bush::new())
                })?,
                SpawnKind::Carcass => spawn_carcasses(&mut world, count, spawn.at)?,
            }
        }
        log::info!(
            "scenario built: {} animals on a {}x{} grid (seed {})",
            world.population(),
            world.config.world.width,
            world.config.world.height,
            world.seed()
        );
        Ok(world)
    }
}

fn parse_pair<T: std::str::FromStr>(
    tokens: &[&str],
    lineno: usize,
    usage: &str,
) -> Result<(T, T), String> {
    if tokens.len() != 2 {
        return Err(format!("line {}: {}", lineno, usage));
    }
    let a = tokens[0]
        .parse()
        .map_err(|_| format!("line {}: invalid number `{}`", lineno, tokens[0]))?;
    let b = tokens[1]
        .parse()
        .map_err(|_| format!("line {}: invalid number `{}`", lineno, tokens[1]))?;
    Ok((a, b))
}

fn parse_count(token: &str, lineno: usize) -> Result<Count, String> {
    if let Some((lo, hi)) = token.split_once('-') {
        let lo: u32 = lo
            .parse()
            .map_err(|_| format!("line {}: invalid count `{}`", lineno, token))?;
        let hi: u32 = hi
            .parse()
            .map_err(|_| format!("line {}: invalid count `{}`", lineno, token))?;
        if lo > hi {
            return Err(format!("line {}: empty range `{}`", lineno, token));
        }
        Ok(Count::Range(lo, hi))
    } else {
        token
            .parse()
            .map(Count::Fixed)
            .map_err(|_| format!("line {}: invalid count `{}`", lineno, token))
    }
}

fn parse_location(token: &str, lineno: usize) -> Result<Location, String> {
    let (x, y) = token
        .split_once(',')
        .ok_or_else(|| format!("line {}: coordinates must be `x,y`, got `{}`", lineno, token))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| format!("line {}: invalid coordinate `{}`", lineno, token))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| format!("line {}: invalid coordinate `{}`", lineno, token))?;
    Ok(Location::new(x, y))
}

/// Pick a free blocking tile near the anchor, widening the search ring
/// before falling back to anywhere on the grid.
fn open_tile_near(world: &mut World, anchor: Location) -> Option<Location> {
    if world.is_empty(anchor) {
        return Some(anchor);
    }
    for r in 1..=SPAWN_RADIUS {
        let candidates = world.empty_tiles_within_radius(anchor, r);
        if let Some(loc) = world.pick_location(&candidates) {
            return Some(loc);
        }
    }
    world.random_empty_tile()
}

fn resolve_anchor(world: &mut World, at: Option<Location>) -> Result<Location, String> {
    let anchor = match at {
        Some(loc) if world.in_bounds(loc) => loc,
        Some(loc) => return Err(format!("spawn anchor ({}, {}) is out of bounds", loc.x, loc.y)),
        None => world
            .random_empty_tile()
            .ok_or_else(|| "grid is full".to_string())?,
    };
    Ok(anchor)
}

/// Rabbits spawn as one herd sharing a burrow at the anchor tile.
fn spawn_herd(world: &mut World, count: u32, at: Option<Location>) -> Result<(), String> {
    let anchor = resolve_anchor(world, at)?;
    let burrow = if world.has_non_blocking(anchor) {
        None
    } else {
        world.place(anchor, Entity::Burrow(Burrow::new()))
    };

    let gid = world.create_group();
    if let Some(group) = world.group_mut(gid) {
        group.den = burrow;
        group.set_home(anchor);
    }

    for _ in 0..count {
        let loc = open_tile_near(world, anchor)
            .ok_or_else(|| "no room left for rabbits".to_string())?;
        let id = world
            .place(loc, Entity::Animal(Animal::adult(Species::Rabbit, &world.config)))
            .ok_or_else(|| "failed to place rabbit".to_string())?;
        world.add_to_group(gid, id);
        if let Some(a) = world.animal_mut(id) {
            a.shelter = burrow;
        }
    }
    Ok(())
}

/// Each wolf line spawns one pack; the den comes later, built by the leader.
fn spawn_pack(world: &mut World, count: u32, at: Option<Location>) -> Result<(), String> {
    let anchor = resolve_anchor(world, at)?;
    let gid = world.create_group();
    for _ in 0..count {
        let loc = open_tile_near(world, anchor)
            .ok_or_else(|| "no room left for wolves".to_string())?;
        let id = world
            .place(loc, Entity::Animal(Animal::adult(Species::Wolf, &world.config)))
            .ok_or_else(|| "failed to place wolf".to_string())?;
        world.add_to_group(gid, id);
    }
    Ok(())
}

/// Bears are solitary; each claims its spawn tile as territory center.
fn spawn_bears(world: &mut World, count: u32, at: Option<Location>) -> Result<(), String> {
    for _ in 0..count {
        let anchor = resolve_anchor(world, at)?;
        let loc = open_tile_near(world, anchor)
            .ok_or_else(|| "no room left for bears".to_string())?;
        let mut bear = Animal::adult(Species::Bear, &world.config);
        bear.territory = Some(loc);
        world
            .place(loc, Entity::Animal(bear))
            .ok_or_else(|| "failed to place bear".to_string())?;
    }
    Ok(())
}

fn spawn_cover<F>(world: &mut World, count: u32, at: Option<Location>, make: F) -> Result<(), String>
where
    F: Fn() -> Entity,
{
    let mut placed = 0;
    let mut attempts = 0;
    let limit = count as usize * 32 + 64;
    while placed < count && attempts < limit {
        attempts += 1;
        let loc = match at {
            Some(anchor) => {
                let candidates: Vec<_> = world
                    .tiles_within_radius(anchor, SPAWN_RADIUS)
                    .into_iter()
                    .chain(std::iter::once(anchor))
                    .filter(|t| !world.has_non_blocking(*t))
                    .collect();
                world.pick_location(&candidates)
            }
            None => {
                let (width, height) = (world.config.world.width, world.config.world.height);
                let x = world.rng().gen_range(0..width);
                let y = world.rng().gen_range(0..height);
                Some(Location::new(x, y))
            }
        };
        if let Some(loc) = loc {
            if !world.has_non_blocking(loc) && world.place(loc, make()).is_some() {
                placed += 1;
            }
        } else {
            break;
        }
    }
    Ok(())
}

fn spawn_carcasses(world: &mut World, count: u32, at: Option<Location>) -> Result<(), String> {
    let rot = world.config.decay.rot_timer;
    let meat = world.config.species.rabbit.meat_value;
    for _ in 0..count {
        let anchor = resolve_anchor(world, at)?;
        let loc = open_tile_near(world, anchor)
            .ok_or_else(|| "no room left for carcasses".to_string())?;
        world
            .place(loc, Entity::Carcass(Carcass::new(meat, rot)))
            .ok_or_else(|| "failed to place carcass".to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Kind;

    const VALLEY: &str = "\
# a small valley
grid 32 32
day 30 20

rabbit 8
wolf 3
bear 1 at 25,25
grass 40
bush 4
";

    #[test]
    fn test_parse_full_scenario() {
        let scenario = Scenario::parse(VALLEY).unwrap();
        assert_eq!(scenario.grid, Some((32, 32)));
        assert_eq!(scenario.day, Some((30, 20)));
        assert_eq!(scenario.spawns.len(), 5);
        assert_eq!(scenario.spawns[0].count, Count::Fixed(8));
        assert_eq!(scenario.spawns[2].kind, SpawnKind::Bear);
        assert_eq!(scenario.spawns[2].at, Some(Location::new(25, 25)));
    }

    #[test]
    fn test_parse_range_count() {
        let scenario = Scenario::parse("wolf 3-5\n").unwrap();
        assert_eq!(scenario.spawns[0].count, Count::Range(3, 5));
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = Scenario::parse("rabbit 5\nbadger 2\n").unwrap_err();
        assert!(err.contains("line 2"), "got: {}", err);

        let err = Scenario::parse("wolf five\n").unwrap_err();
        assert!(err.contains("line 1"), "got: {}", err);

        let err = Scenario::parse("wolf 5-3\n").unwrap_err();
        assert!(err.contains("range"), "got: {}", err);
    }

    #[test]
    fn test_build_populates_world() {
        let scenario = Scenario::parse(VALLEY).unwrap();
        let world = scenario.build(Config::default(), 42).unwrap();

        assert_eq!(world.config.world.width, 32);
        assert_eq!(world.population(), 12); // 8 + 3 + 1
        assert_eq!(world.count_kind(Kind::Burrow), 1);
        assert!(world.count_kind(Kind::Grass) > 0);
    }

    #[test]
    fn test_build_range_stays_within_bounds() {
        let scenario = Scenario::parse("wolf 3-5\n").unwrap();
        for seed in 0..8 {
            let world = scenario.build(Config::default(), seed).unwrap();
            let n = world.population();
            assert!((3..=5).contains(&n), "seed {} spawned {}", seed, n);
        }
    }

    #[test]
    fn test_herd_shares_burrow_and_group() {
        let scenario = Scenario::parse("rabbit 4\n").unwrap();
        let world = scenario.build(Config::default(), 11).unwrap();

        let burrow = world
            .entity_ids()
            .into_iter()
            .find(|id| world.entity(*id).and_then(Entity::as_burrow).is_some())
            .expect("herd burrow exists");
        for id in world.entity_ids() {
            if let Some(a) = world.animal(id) {
                assert_eq!(a.shelter, Some(burrow));
                assert!(a.group.is_some());
            }
        }
    }

    #[test]
    fn test_bear_claims_anchor_territory() {
        let scenario = Scenario::parse("grid 40 40\nbear 1 at 30,30\n").unwrap();
        let world = scenario.build(Config::default(), 5).unwrap();

        let bear = world
            .entity_ids()
            .into_iter()
            .find_map(|id| world.animal(id).map(|a| (id, a.territory)))
            .expect("bear exists");
        assert_eq!(bear.1, Some(Location::new(30, 30)));
    }

    #[test]
    fn test_out_of_bounds_anchor_rejected() {
        let scenario = Scenario::parse("grid 10 10\nbear 1 at 30,30\n").unwrap();
        assert!(scenario.build(Config::default(), 5).is_err());

        let scenario = Scenario::parse("grid 10 10\ncarcass 1 at 30,30\n").unwrap();
        assert!(scenario.build(Config::default(), 5).is_err());

        let scenario = Scenario::parse("grid 10 10\nrabbit 1 at 30,30\n").unwrap();
        assert!(scenario.build(Config::default(), 5).is_err());
    }
}

//! The location graph.
//!
//! Built once at startup and never structurally mutated afterwards. Only the
//! ground-item lists of locations change during play.

use std::collections::HashMap;

use crate::bestiary::EnemyKind;
use crate::error::{CoreError, CoreResult};

/// Name of the location a fresh game (and a tolerant load) starts in.
pub const STARTING_LOCATION: &str = "Village";

/// Direction for movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
}

impl Direction {
    /// Parse a direction from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            _ => None,
        }
    }

    /// Get the display name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }

    /// All directions in display order.
    pub fn all() -> &'static [Self] {
        &[Self::North, Self::South, Self::East, Self::West]
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Index of a location inside a [`WorldGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(usize);

impl LocationId {
    /// The raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a location does when the player is there.
///
/// Behavior is resolved by matching on the role, never on the location name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationRole {
    /// Safe ground. Arriving here lets the player rest.
    Village,
    /// Entering triggers a fight with one of the listed enemies.
    Hostile {
        /// Enemies that can ambush the player here.
        enemies: Vec<EnemyKind>,
    },
    /// Fishing spot.
    Lake,
    /// Hostile, and the place where the boss awakens once every quest is done.
    BossLair {
        /// Enemies that can ambush the player here while the boss sleeps.
        enemies: Vec<EnemyKind>,
    },
}

impl LocationRole {
    /// Enemies that can ambush the player here (empty for peaceful roles).
    pub fn enemies(&self) -> &[EnemyKind] {
        match self {
            Self::Hostile { enemies } | Self::BossLair { enemies } => enemies,
            Self::Village | Self::Lake => &[],
        }
    }

    /// Whether arriving here starts a fight.
    pub fn is_hostile(&self) -> bool {
        !self.enemies().is_empty()
    }
}

/// A single exit from a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    /// Direction the player types.
    pub direction: Direction,
    /// Where it leads.
    pub to: LocationId,
}

/// A node in the world graph.
#[derive(Debug, Clone)]
pub struct Location {
    /// Unique display name.
    pub name: String,
    /// Flavor text shown on arrival.
    pub description: String,
    /// Behavior tag.
    pub role: LocationRole,
    /// Whether someone here can be talked to.
    pub has_villager: bool,
    /// Items lying on the ground, in the order they were dropped.
    pub items: Vec<String>,
    exits: Vec<Exit>,
}

impl Location {
    /// Create a location with no exits or items.
    pub fn new(name: impl Into<String>, description: impl Into<String>, role: LocationRole) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            role,
            has_villager: false,
            items: Vec::new(),
            exits: Vec::new(),
        }
    }

    /// Mark this location as having someone to talk to.
    pub fn with_villager(mut self) -> Self {
        self.has_villager = true;
        self
    }

    /// Place an item on the ground.
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Exits in registration order.
    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }

    /// The exit registered for a direction, if any.
    pub fn exit(&self, direction: Direction) -> Option<LocationId> {
        self.exits
            .iter()
            .find(|e| e.direction == direction)
            .map(|e| e.to)
    }
}

/// The directed location graph. Edges need not be reciprocal.
#[derive(Debug, Clone)]
pub struct WorldGraph {
    locations: Vec<Location>,
    by_name_lower: HashMap<String, LocationId>,
}

impl WorldGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            locations: Vec::new(),
            by_name_lower: HashMap::new(),
        }
    }

    /// The four-location valley every new game starts in.
    pub fn standard() -> Self {
        let mut world = Self::new();

        let village = world.add_location(
            Location::new(
                "Village",
                "A quiet little village where people go about their peaceful lives.",
                LocationRole::Village,
            )
            .with_villager()
            .with_item("Apple")
            .with_item("Bread"),
        );
        let forest = world.add_location(
            Location::new(
                "Forest",
                "A dense forest hiding unknown dangers.",
                LocationRole::Hostile {
                    enemies: vec![EnemyKind::Bandit, EnemyKind::Wolf],
                },
            )
            .with_item("Wooden Sword")
            .with_item("Herb"),
        );
        let cave = world.add_location(
            Location::new(
                "Cave",
                "A gloomy cave. Strange sounds echo from within.",
                LocationRole::BossLair {
                    enemies: vec![EnemyKind::VenomSpider, EnemyKind::Bat],
                },
            )
            .with_item("Ore")
            .with_item("Torch"),
        );
        let lake = world.add_location(
            Location::new(
                "Lake",
                "A clear lake surrounded by beautiful scenery.",
                LocationRole::Lake,
            )
            .with_villager(),
        );

        // Several roads lead to the lake; none of this is symmetric.
        world.connect(village, Direction::North, forest);
        world.connect(village, Direction::East, lake);
        world.connect(village, Direction::South, lake);

        world.connect(forest, Direction::South, village);
        world.connect(forest, Direction::East, cave);
        world.connect(forest, Direction::North, lake);

        world.connect(cave, Direction::West, forest);
        world.connect(cave, Direction::East, lake);

        world.connect(lake, Direction::West, village);
        world.connect(lake, Direction::East, forest);
        world.connect(lake, Direction::North, cave);

        world
    }

    /// Add a location. Names are unique case-insensitively; a duplicate
    /// replaces nothing and returns the existing id.
    pub fn add_location(&mut self, location: Location) -> LocationId {
        let key = location.name.to_lowercase();
        if let Some(id) = self.by_name_lower.get(&key) {
            return *id;
        }
        let id = LocationId(self.locations.len());
        self.locations.push(location);
        self.by_name_lower.insert(key, id);
        id
    }

    /// Register a one-way exit. Re-registering a direction overwrites it.
    pub fn connect(&mut self, from: LocationId, direction: Direction, to: LocationId) {
        let exits = &mut self.locations[from.0].exits;
        if let Some(exit) = exits.iter_mut().find(|e| e.direction == direction) {
            exit.to = to;
        } else {
            exits.push(Exit { direction, to });
        }
    }

    /// Follow the exit in `direction` from `from`.
    pub fn travel(&self, from: LocationId, direction: Direction) -> CoreResult<LocationId> {
        self.location(from)
            .exit(direction)
            .ok_or(CoreError::InvalidDirection(direction))
    }

    /// Get a location by id.
    ///
    /// Ids are only minted by this graph, so indexing cannot go out of range.
    pub fn location(&self, id: LocationId) -> &Location {
        &self.locations[id.0]
    }

    /// Get a mutable location by id.
    pub fn location_mut(&mut self, id: LocationId) -> &mut Location {
        &mut self.locations[id.0]
    }

    /// Find a location id by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<LocationId> {
        self.by_name_lower.get(&name.trim().to_lowercase()).copied()
    }

    /// Find a location id by name, or fail with [`CoreError::UnknownLocation`].
    pub fn require(&self, name: &str) -> CoreResult<LocationId> {
        self.find_by_name(name)
            .ok_or_else(|| CoreError::UnknownLocation(name.to_string()))
    }

    /// The first location with the given role tag, compared by variant only.
    pub fn find_by_role(&self, role: &LocationRole) -> Option<LocationId> {
        self.locations
            .iter()
            .position(|l| std::mem::discriminant(&l.role) == std::mem::discriminant(role))
            .map(LocationId)
    }

    /// Where new games start.
    ///
    /// Falls back to the first location if no location carries the starting name.
    pub fn starting_location(&self) -> LocationId {
        self.find_by_name(STARTING_LOCATION).unwrap_or(LocationId(0))
    }

    /// Remove and return every ground item at a location.
    pub fn take_ground_items(&mut self, id: LocationId) -> Vec<String> {
        std::mem::take(&mut self.locations[id.0].items)
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the graph has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Iterate over all locations with their ids.
    pub fn locations(&self) -> impl Iterator<Item = (LocationId, &Location)> {
        self.locations
            .iter()
            .enumerate()
            .map(|(i, l)| (LocationId(i), l))
    }
}

impl Default for WorldGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parse() {
        assert_eq!(Direction::parse("n"), Some(Direction::North));
        assert_eq!(Direction::parse("EAST"), Some(Direction::East));
        assert_eq!(Direction::parse(" w "), Some(Direction::West));
        assert_eq!(Direction::parse("up"), None);
    }

    #[test]
    fn standard_world_layout() {
        let world = WorldGraph::standard();
        assert_eq!(world.len(), 4);

        let village = world.starting_location();
        assert_eq!(world.location(village).name, "Village");
        assert!(world.location(village).has_villager);
        assert_eq!(world.location(village).items, vec!["Apple", "Bread"]);

        let names: Vec<_> = world
            .location(village)
            .exits()
            .iter()
            .map(|e| e.direction.name())
            .collect();
        assert_eq!(names, vec!["north", "east", "south"]);
    }

    #[test]
    fn travel_follows_registered_exits() {
        let world = WorldGraph::standard();
        let village = world.starting_location();
        let forest = world.travel(village, Direction::North).unwrap();
        assert_eq!(world.location(forest).name, "Forest");

        let lake_east = world.travel(village, Direction::East).unwrap();
        let lake_south = world.travel(village, Direction::South).unwrap();
        assert_eq!(lake_east, lake_south);
    }

    #[test]
    fn travel_invalid_direction() {
        let world = WorldGraph::standard();
        let village = world.starting_location();
        assert_eq!(
            world.travel(village, Direction::West),
            Err(CoreError::InvalidDirection(Direction::West))
        );
    }

    #[test]
    fn edges_are_not_reciprocal() {
        let world = WorldGraph::standard();
        let cave = world.require("cave").unwrap();
        let lake = world.require("lake").unwrap();
        // Lake leads north to the cave, but the cave does not lead south.
        assert_eq!(world.travel(lake, Direction::North).unwrap(), cave);
        assert!(world.travel(cave, Direction::South).is_err());
    }

    #[test]
    fn roles_resolve_enemies() {
        let world = WorldGraph::standard();
        let forest = world.require("Forest").unwrap();
        assert!(world.location(forest).role.is_hostile());
        assert_eq!(
            world.location(forest).role.enemies(),
            &[EnemyKind::Bandit, EnemyKind::Wolf]
        );

        let lake = world.find_by_role(&LocationRole::Lake).unwrap();
        assert_eq!(world.location(lake).name, "Lake");
        assert!(!world.location(lake).role.is_hostile());
    }

    #[test]
    fn take_ground_items_empties_list() {
        let mut world = WorldGraph::standard();
        let forest = world.require("Forest").unwrap();
        let items = world.take_ground_items(forest);
        assert_eq!(items, vec!["Wooden Sword", "Herb"]);
        assert!(world.location(forest).items.is_empty());
    }

    #[test]
    fn duplicate_names_return_existing_id() {
        let mut world = WorldGraph::new();
        let a = world.add_location(Location::new("Hut", "", LocationRole::Village));
        let b = world.add_location(Location::new("hut", "other", LocationRole::Lake));
        assert_eq!(a, b);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn connect_overwrites_direction() {
        let mut world = WorldGraph::new();
        let a = world.add_location(Location::new("A", "", LocationRole::Village));
        let b = world.add_location(Location::new("B", "", LocationRole::Village));
        let c = world.add_location(Location::new("C", "", LocationRole::Village));
        world.connect(a, Direction::North, b);
        world.connect(a, Direction::North, c);
        assert_eq!(world.location(a).exits().len(), 1);
        assert_eq!(world.travel(a, Direction::North).unwrap(), c);
    }
}

//! Core types for Duskvale: the location graph, items, enemies, the player,
//! quests, and the save format.
//!
//! Nothing in this crate rolls dice or touches the filesystem. Combat and
//! other random outcomes live in `dv-mechanics`; the game session that owns
//! all of this state lives in `dv-fiction`.

/// Enemy types and their fixed stats.
pub mod bestiary;
/// Buying, selling, equipment and consumables.
pub mod economy;
/// Error types used throughout the crate.
pub mod error;
/// The item catalog.
pub mod item;
/// The player and derived stats.
pub mod player;
/// Quest definitions and per-player quest state.
pub mod quest;
/// The `key:value` save format.
pub mod save;
/// Locations, exits and ground items.
pub mod world;

/// Re-export enemy types.
pub use bestiary::{EnemyKind, EnemyStats};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export item types.
pub use item::{EquipSlot, ItemCatalog};
/// Re-export player types.
pub use player::Player;
/// Re-export quest types.
pub use quest::{QuestBook, QuestId, QuestLedger, QuestStatus};
/// Re-export save types.
pub use save::SaveData;
/// Re-export world types.
pub use world::{Direction, Location, LocationId, LocationRole, WorldGraph};

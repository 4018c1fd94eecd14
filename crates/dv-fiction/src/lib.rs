//! The playable game for Duskvale.
//!
//! Ties the data model and the mechanics together into a [`GameSession`]:
//! movement with rests and ambushes, quest givers and their dialogue, the
//! shop, fights, fishing, and saving. Also parses player input into
//! [`Command`]s and resolves typed item names.

/// Session settings.
pub mod config;
/// Quest givers and conversations.
pub mod dialogue;
/// Error types for the game session.
pub mod error;
/// Command parsing and item name resolution.
pub mod parser;
/// The game session.
pub mod session;

pub use config::GameConfig;
pub use dialogue::{DialogueLine, LineKind};
pub use error::{GameError, GameResult};
pub use parser::{Command, parse_command};
pub use session::{
    AmbientEvent, Arrival, ArrivalEvent, CombatTurn, CommandKind, Conflict, GameSession,
    GameStatus, Pickup,
};

//! Error types for the game session.

use std::path::PathBuf;

use dv_core::CoreError;
use dv_mechanics::MechError;
use thiserror::Error;

/// Result type for session operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors a session command can produce.
///
/// All of them leave the game exactly as it was before the command.
#[derive(Debug, Error)]
pub enum GameError {
    /// A data-model rule rejected the command.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A fight or duel rejected the command.
    #[error(transparent)]
    Mech(#[from] MechError),

    /// Shop names that did not resolve, with close matches.
    #[error("unknown item(s): {}{}", .items.join(", "), did_you_mean(.suggestions))]
    UnknownItem {
        /// Names as typed.
        items: Vec<String>,
        /// Close catalog names.
        suggestions: Vec<String>,
    },

    /// Talking where nobody is around.
    #[error("there is nobody here to talk to")]
    NoVillager,

    /// Picking up where the ground is bare.
    #[error("there is nothing here to pick up")]
    NothingToPickUp,

    /// Fishing away from the lake.
    #[error("this is no place for fishing")]
    NotAtLake,

    /// Fishing without a rod.
    #[error("you need a fishing rod to fish")]
    NoFishingRod,

    /// Accepting a quest nobody offered in the last conversation.
    #[error("nobody offered that quest")]
    NoSuchOffer,

    /// A command that needs peace was given mid-fight.
    #[error("you are in the middle of a fight")]
    InCombat,

    /// A fight command was given with no fight going on.
    #[error("there is nothing to fight")]
    NotInCombat,

    /// A command was given while a fish is on the line.
    #[error("you are busy reeling in a fish")]
    ReelingIn,

    /// A reel was given with no fish on the line.
    #[error("there is no fish on the line")]
    NotFishing,

    /// The run has ended.
    #[error("the game is over")]
    GameOver,

    /// No save file at the given path.
    #[error("no save file at {}", .0.display())]
    MissingSave(PathBuf),

    /// The save file exists but holds nothing usable.
    #[error("corrupt save file {}: {reason}", .path.display())]
    CorruptSave {
        /// File that was read.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },

    /// Reading or writing a save file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

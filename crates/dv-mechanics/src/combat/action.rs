//! Combat choices and round results.

use dv_core::EnemyKind;

/// What the player does in a round of ordinary combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    /// Hit the enemy.
    Attack,
    /// Try to run away.
    Flee,
}

impl CombatAction {
    /// Read a player's choice. Anything unrecognised counts as an attack, so
    /// a typo never stalls a fight.
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "2" | "f" | "flee" | "run" => Self::Flee,
            _ => Self::Attack,
        }
    }
}

impl std::fmt::Display for CombatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::Flee => write!(f, "Flee"),
        }
    }
}

/// Rewards granted for defeating an enemy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spoils {
    /// The enemy defeated.
    pub enemy: EnemyKind,
    /// Gold granted.
    pub gold: u32,
    /// Items added to the inventory.
    pub loot: Vec<String>,
}

/// How a round left the fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Both sides still standing.
    Continue,
    /// The enemy fell. Spoils are already in the player's pockets.
    Victory(Spoils),
    /// The player fell.
    Defeat,
    /// The player got away.
    Escaped,
}

impl RoundOutcome {
    /// Whether the fight is over.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Everything that happened in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// The action taken.
    pub action: CombatAction,
    /// Damage the player dealt.
    pub dealt: Option<i32>,
    /// Damage the player took.
    pub taken: Option<i32>,
    /// Poison damage ticked at the end of the round.
    pub poison: Option<i32>,
    /// Result.
    pub outcome: RoundOutcome,
}

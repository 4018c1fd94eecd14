//! Game mechanics for Duskvale: randomness, ordinary combat, the boss fight,
//! and fishing.
//!
//! Every random decision takes a `&mut dyn Roller`, so the same code runs on
//! seeded dice in play and on scripted values in tests.

pub mod boss;
pub mod combat;
pub mod dice;
pub mod error;
pub mod fishing;

pub use boss::{Boss, BossAction, BossOutcome, BossReport, Phase};
pub use combat::{CombatAction, Encounter, RoundOutcome, RoundReport, Spoils};
pub use dice::{Dice, Roller, ScriptedRoller};
pub use error::{MechError, MechResult};
pub use fishing::{Angler, CastOutcome, Catch, DuelOutcome, FishDuel, ReelReport};

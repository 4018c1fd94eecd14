//! The fishing minigame.
//!
//! A cast either loses the bait or hooks a fish. A hooked fish starts a
//! stamina duel: each correct reel tires the fish, each fumble tires the
//! player, and the first side to run out loses.

use dv_core::Player;

use crate::dice::Roller;
use crate::error::{MechError, MechResult};

/// Item needed to fish.
pub const FISHING_ROD: &str = "Fishing Rod";
/// The player's stamina at the start of every duel.
pub const PLAYER_STAMINA: u32 = 5;
/// Percent chance a hooked piranha bites each round.
pub const BITE_CHANCE: u32 = 50;
/// Every this many casts the rod may break.
pub const ROD_CHECK_INTERVAL: u32 = 3;
/// Percent chance the rod breaks on a check.
pub const ROD_BREAK_CHANCE: u32 = 50;

/// What can end up on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catch {
    /// The prized catch. Bites.
    Piranha,
    /// An ordinary fish.
    Fish,
}

impl Catch {
    /// Item name once landed.
    pub fn name(self) -> &'static str {
        match self {
            Self::Piranha => "Piranha",
            Self::Fish => "Fish",
        }
    }
}

impl std::fmt::Display for Catch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastOutcome {
    /// Nothing bit, or the fish slipped off at once.
    LineBroke,
    /// Something is on the line.
    Hooked(FishDuel),
}

/// How a reel left the duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelOutcome {
    /// Still fighting.
    Continue,
    /// The fish is in the inventory.
    Landed(Catch),
    /// The player tired first.
    Escaped,
    /// A bite finished the player off.
    Defeat,
}

/// Everything that happened on one reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReelReport {
    /// Whether the input was the reel action.
    pub correct: bool,
    /// Damage from a piranha bite.
    pub bite: Option<i32>,
    /// Result.
    pub outcome: DuelOutcome,
    /// Whether the rod broke once the duel ended.
    pub rod_broke: bool,
}

/// Counts casts across the session for rod wear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Angler {
    casts: u32,
}

impl Angler {
    /// A fresh counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Casts made so far.
    pub fn casts(&self) -> u32 {
        self.casts
    }

    /// Cast the line. Bands: 0-59 piranha, 60-89 fish, 90-99 nothing.
    pub fn cast(&mut self, roller: &mut dyn Roller) -> CastOutcome {
        self.casts += 1;
        let catch = match roller.percent() {
            0..=59 => Catch::Piranha,
            60..=89 => Catch::Fish,
            _ => {
                tracing::debug!(cast = self.casts, "line broke");
                return CastOutcome::LineBroke;
            }
        };
        let stamina = u32::try_from(roller.range(3, 6)).unwrap_or(3);
        tracing::debug!(cast = self.casts, %catch, stamina, "hooked");
        CastOutcome::Hooked(FishDuel {
            catch,
            fish_stamina: stamina,
            player_stamina: PLAYER_STAMINA,
            cast: self.casts,
            finished: false,
        })
    }
}

/// A fish on the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FishDuel {
    catch: Catch,
    fish_stamina: u32,
    player_stamina: u32,
    cast: u32,
    finished: bool,
}

impl FishDuel {
    /// What is on the line.
    pub fn catch(&self) -> Catch {
        self.catch
    }

    /// The fish's remaining stamina.
    pub fn fish_stamina(&self) -> u32 {
        self.fish_stamina
    }

    /// The player's remaining stamina.
    pub fn player_stamina(&self) -> u32 {
        self.player_stamina
    }

    /// Whether the duel has ended.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether `input` is the reel action.
    pub fn is_reel(input: &str) -> bool {
        matches!(input.trim().to_lowercase().as_str(), "1" | "reel")
    }

    /// Play one round of the duel.
    pub fn reel(
        &mut self,
        input: &str,
        player: &mut Player,
        roller: &mut dyn Roller,
    ) -> MechResult<ReelReport> {
        if self.finished {
            return Err(MechError::DuelOver);
        }

        let correct = Self::is_reel(input);
        if correct {
            self.fish_stamina = self.fish_stamina.saturating_sub(1);
        } else {
            self.player_stamina = self.player_stamina.saturating_sub(1);
        }

        let mut report = ReelReport {
            correct,
            bite: None,
            outcome: DuelOutcome::Continue,
            rod_broke: false,
        };

        if self.catch == Catch::Piranha && roller.chance(BITE_CHANCE) {
            let damage = roller.range(5, 10);
            player.take_damage(damage);
            report.bite = Some(damage);
            if player.is_defeated() {
                self.finished = true;
                report.outcome = DuelOutcome::Defeat;
                return Ok(report);
            }
        }

        if self.fish_stamina == 0 {
            player.add_item(self.catch.name());
            tracing::info!(catch = %self.catch, "fish landed");
            report.outcome = DuelOutcome::Landed(self.catch);
        } else if self.player_stamina == 0 {
            tracing::debug!(catch = %self.catch, "fish escaped");
            report.outcome = DuelOutcome::Escaped;
        } else {
            return Ok(report);
        }

        self.finished = true;
        if self.cast % ROD_CHECK_INTERVAL == 0 && roller.chance(ROD_BREAK_CHANCE) {
            player.remove_item(FISHING_ROD);
            tracing::info!("fishing rod broke");
            report.rod_broke = true;
        }
        Ok(report)
    }
}

//! The final boss fight.
//!
//! Same round shape as ordinary combat, with three differences: the boss
//! moves through phases as it weakens, it can heal, and its hits have a much
//! higher floor. Phases only move forward, one step per round.

use dv_core::economy::{self, Consumption};
use dv_core::{ItemCatalog, Player};

use crate::combat::player_damage;
use crate::dice::Roller;
use crate::error::{MechError, MechResult};

/// The boss's name.
pub const BOSS_NAME: &str = "Shadow Lord Kaos";
/// Health the boss starts with and can never heal past.
pub const BOSS_MAX_HEALTH: i32 = 10_000;
/// Percent chance that fleeing succeeds.
pub const BOSS_FLEE_CHANCE: u32 = 20;
/// Percent chance the boss heals after being hit.
pub const BOSS_HEAL_CHANCE: u32 = 30;
/// The least damage a boss hit can do.
pub const MIN_BOSS_DAMAGE: i32 = 10;
/// Gold granted for winning.
pub const BOSS_REWARD_GOLD: u32 = 10_000;
/// Items granted for winning.
pub const BOSS_REWARD_ITEMS: [&str; 3] = ["King's Blade", "Royal Armor", "Princess's Ring"];

/// How far the fight has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Full strength.
    One,
    /// Enraged, below a third of max health.
    Two,
    /// Desperate, below a tenth of max health.
    Three,
}

impl Phase {
    /// 1, 2 or 3. Boss attacks are multiplied by this.
    pub fn number(self) -> i32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Percentage of the player's damage that lands in this phase.
    pub fn damage_taken_percent(self) -> i32 {
        match self {
            Self::One => 100,
            Self::Two => 80,
            Self::Three => 50,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/3", self.number())
    }
}

/// What the player does in a boss round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BossAction {
    /// Hit the boss.
    Attack,
    /// Eat or drink carried items.
    UseItem(Vec<String>),
    /// Try to run away.
    Flee,
}

impl BossAction {
    /// Read a player's choice.
    ///
    /// `"2 Apple, Bread"` or `"use Apple, Bread"` uses items, `"3"` or
    /// `"flee"` flees, anything else attacks.
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        let (head, rest) = input.split_once(' ').unwrap_or((input, ""));
        match head.to_lowercase().as_str() {
            "2" | "use" | "item" => Self::UseItem(
                rest.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            "3" | "flee" | "run" => Self::Flee,
            _ => Self::Attack,
        }
    }
}

/// The boss's special attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossAttack {
    /// A plain blow.
    Strike,
    /// Steals life. The boss heals half the raw damage.
    Drain,
    /// A heavy wave of darkness.
    DarkWave,
}

impl BossAttack {
    /// Pick an attack on a percentile roll.
    pub fn roll(roller: &mut dyn Roller) -> Self {
        match roller.percent() {
            0..=60 => Self::Strike,
            61..=85 => Self::Drain,
            _ => Self::DarkWave,
        }
    }

    /// Half-open raw damage range before the phase multiplier.
    pub fn base_damage(self) -> (i32, i32) {
        match self {
            Self::Strike => (50, 100),
            Self::Drain => (80, 150),
            Self::DarkWave => (150, 250),
        }
    }
}

impl std::fmt::Display for BossAttack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strike => write!(f, "strike"),
            Self::Drain => write!(f, "life drain"),
            Self::DarkWave => write!(f, "dark wave"),
        }
    }
}

/// One boss attack as it landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossStrike {
    /// Which attack.
    pub attack: BossAttack,
    /// Damage the player took after defense and the floor.
    pub damage: i32,
    /// Health the boss regained from a drain.
    pub drained: i32,
}

/// Rewards for winning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossSpoils {
    /// Gold granted.
    pub gold: u32,
    /// Items granted.
    pub items: Vec<String>,
}

/// How a boss round left the fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BossOutcome {
    /// Both still standing.
    Continue,
    /// The boss fell. Spoils are already in the player's pockets.
    Victory(BossSpoils),
    /// The player fell.
    Defeat,
    /// The player got away. The boss keeps its health and phase.
    Escaped,
}

/// Everything that happened in one boss round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossReport {
    /// Set when the boss entered a new phase at the start of the round.
    pub phase_change: Option<Phase>,
    /// Damage the player dealt.
    pub dealt: Option<i32>,
    /// Health the boss regained by its own heal.
    pub boss_healed: Option<i32>,
    /// Items the player used.
    pub consumed: Option<Consumption>,
    /// The boss's answer.
    pub strike: Option<BossStrike>,
    /// Result.
    pub outcome: BossOutcome,
}

/// The boss and its fight state. Survives the player escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boss {
    health: i32,
    phase: Phase,
    finished: bool,
}

impl Default for Boss {
    fn default() -> Self {
        Self::new()
    }
}

impl Boss {
    /// A boss at full health in phase one.
    pub fn new() -> Self {
        Self {
            health: BOSS_MAX_HEALTH,
            phase: Phase::One,
            finished: false,
        }
    }

    /// Current health.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the boss has fallen.
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// The phase the threshold rule moves to from the current one, if any.
    fn next_phase(&self) -> Option<Phase> {
        match self.phase {
            Phase::One if self.health < BOSS_MAX_HEALTH / 3 => Some(Phase::Two),
            Phase::Two if self.health < BOSS_MAX_HEALTH / 10 => Some(Phase::Three),
            _ => None,
        }
    }

    fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount).min(BOSS_MAX_HEALTH);
        self.health - before
    }

    /// Resolve one round.
    ///
    /// The phase check comes first, then the player's action, then the boss
    /// attacks if it is still standing and the player did not escape. If the
    /// chosen items cannot be used the round is rejected with nothing changed.
    pub fn round(
        &mut self,
        player: &mut Player,
        catalog: &ItemCatalog,
        action: &BossAction,
        roller: &mut dyn Roller,
    ) -> MechResult<BossReport> {
        if self.finished {
            return Err(MechError::EncounterOver);
        }

        let phase_change = self.next_phase();
        let consumed = match action {
            BossAction::UseItem(items) => Some(economy::consume(player, catalog, items)?),
            BossAction::Attack | BossAction::Flee => None,
        };
        if let Some(phase) = phase_change {
            tracing::info!(%phase, health = self.health, "boss phase change");
            self.phase = phase;
        }

        let mut report = BossReport {
            phase_change,
            dealt: None,
            boss_healed: None,
            consumed,
            strike: None,
            outcome: BossOutcome::Continue,
        };

        match action {
            BossAction::Attack => {
                let dealt = player_damage(player, roller) * self.phase.damage_taken_percent() / 100;
                self.health -= dealt;
                report.dealt = Some(dealt);
                tracing::debug!(dealt, left = self.health, "player hits boss");

                if self.is_defeated() {
                    report.outcome = BossOutcome::Victory(self.claim_spoils(player));
                    return Ok(report);
                }
                if roller.chance(BOSS_HEAL_CHANCE) {
                    let amount = roller.range(100, 300);
                    report.boss_healed = Some(self.heal(amount));
                }
            }
            BossAction::Flee => {
                if roller.chance(BOSS_FLEE_CHANCE) {
                    tracing::info!(health = self.health, "escaped the boss");
                    report.outcome = BossOutcome::Escaped;
                    return Ok(report);
                }
            }
            BossAction::UseItem(_) => {}
        }

        let strike = self.attack(player, roller);
        report.strike = Some(strike);
        if player.is_defeated() {
            tracing::info!("player defeated by the boss");
            report.outcome = BossOutcome::Defeat;
            self.finished = true;
        }
        Ok(report)
    }

    fn attack(&mut self, player: &mut Player, roller: &mut dyn Roller) -> BossStrike {
        let attack = BossAttack::roll(roller);
        let (low, high) = attack.base_damage();
        let raw = roller.range(low, high) * self.phase.number();
        let drained = match attack {
            BossAttack::Drain => self.heal(raw / 2),
            BossAttack::Strike | BossAttack::DarkWave => 0,
        };
        let damage = raw.saturating_sub(player.defense_bonus).max(MIN_BOSS_DAMAGE);
        player.take_damage(damage);
        tracing::debug!(%attack, raw, damage, drained, "boss attacks");
        BossStrike {
            attack,
            damage,
            drained,
        }
    }

    fn claim_spoils(&mut self, player: &mut Player) -> BossSpoils {
        self.finished = true;
        player.gold = player.gold.saturating_add(BOSS_REWARD_GOLD);
        player.add_items(BOSS_REWARD_ITEMS);
        tracing::info!(gold = BOSS_REWARD_GOLD, "boss defeated");
        BossSpoils {
            gold: BOSS_REWARD_GOLD,
            items: BOSS_REWARD_ITEMS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

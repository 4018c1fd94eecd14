//! Player state and derived stats.

use chrono::{DateTime, Duration, Utc};

use crate::item::{EquipSlot, ItemCatalog};
use crate::quest::QuestLedger;

/// Max health before armor.
pub const BASE_MAX_HEALTH: i32 = 100;

/// The player character.
///
/// `attack_bonus`, `defense_bonus` and `max_health` are derived from the
/// equipped items. Change equipment only through the economy functions, which
/// call [`refresh_stats`] afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Current health, at most `max_health`. At or below zero means defeat.
    pub health: i32,
    /// `BASE_MAX_HEALTH + defense_bonus`.
    pub max_health: i32,
    /// Set by a venomous hit. Ticks every round of ordinary combat until
    /// cured.
    pub poisoned: bool,
    /// Gold on hand.
    pub gold: u32,
    /// Carried items in pickup order. Duplicates are separate copies.
    pub inventory: Vec<String>,
    /// Equipped weapon name.
    pub weapon: Option<String>,
    /// Equipped armor name.
    pub armor: Option<String>,
    /// Attack of the equipped weapon.
    pub attack_bonus: i32,
    /// Defense of the equipped armor.
    pub defense_bonus: i32,
    /// Quest state.
    pub quests: QuestLedger,
    /// When the player last rested in the village.
    pub last_rest: DateTime<Utc>,
}

/// Stats computed from equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStats {
    /// Attack of the equipped weapon, or 0.
    pub attack_bonus: i32,
    /// Defense of the equipped armor, or 0.
    pub defense_bonus: i32,
    /// `BASE_MAX_HEALTH + defense_bonus`.
    pub max_health: i32,
}

/// Result of trying to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestOutcome {
    /// Health restored by this amount (possibly 0 when already full).
    Rested {
        /// Health actually gained.
        healed: i32,
    },
    /// Still on cooldown.
    Cooldown {
        /// Whole seconds until the next rest.
        remaining_secs: i64,
    },
}

impl Player {
    /// A fresh player at full health with nothing equipped.
    ///
    /// `now` seeds the rest timer, so the first rest is only available once
    /// the cooldown has passed.
    pub fn new(name: impl Into<String>, gold: u32, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            health: BASE_MAX_HEALTH,
            max_health: BASE_MAX_HEALTH,
            poisoned: false,
            gold,
            inventory: Vec::new(),
            weapon: None,
            armor: None,
            attack_bonus: 0,
            defense_bonus: 0,
            quests: QuestLedger::new(),
            last_rest: now,
        }
    }

    /// Whether at least one copy of `item` is carried.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Number of copies carried.
    pub fn count_item(&self, item: &str) -> usize {
        self.inventory.iter().filter(|i| *i == item).count()
    }

    /// Add one copy.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Add several items in order.
    pub fn add_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inventory.extend(items.into_iter().map(Into::into));
    }

    /// Remove the first copy. Returns whether one was found.
    pub fn remove_item(&mut self, item: &str) -> bool {
        match self.inventory.iter().position(|i| i == item) {
            Some(pos) => {
                self.inventory.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Inventory as `(name, count)` in order of first appearance.
    pub fn grouped_inventory(&self) -> Vec<(&str, usize)> {
        let mut groups: Vec<(&str, usize)> = Vec::new();
        for item in &self.inventory {
            match groups.iter_mut().find(|(name, _)| *name == item.as_str()) {
                Some((_, count)) => *count += 1,
                None => groups.push((item.as_str(), 1)),
            }
        }
        groups
    }

    /// Name equipped in a slot.
    pub fn equipped(&self, slot: EquipSlot) -> Option<&str> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_deref(),
            EquipSlot::Armor => self.armor.as_deref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<String> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
        }
    }

    /// Heal, clamped to max health. Returns the health actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
        (self.health - before).max(0)
    }

    /// Restore to max health.
    pub fn heal_full(&mut self) -> i32 {
        let before = self.health;
        self.health = self.health.max(self.max_health);
        self.health - before
    }

    /// Lose health. Health may drop below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Whether health has run out.
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Rest if the cooldown since the last rest has passed.
    pub fn try_rest(&mut self, now: DateTime<Utc>, cooldown: Duration, amount: i32) -> RestOutcome {
        let elapsed = now - self.last_rest;
        if elapsed < cooldown {
            let remaining = cooldown - elapsed;
            // Round up so "0 seconds left" is never reported.
            let secs = remaining.num_seconds() + i64::from(remaining.subsec_nanos() > 0);
            return RestOutcome::Cooldown {
                remaining_secs: secs.max(1),
            };
        }
        self.last_rest = now;
        RestOutcome::Rested {
            healed: self.heal(amount),
        }
    }
}

/// Compute derived stats from the player's equipment.
///
/// An equipped name the catalog does not know contributes nothing.
pub fn derived_stats(player: &Player, catalog: &ItemCatalog) -> DerivedStats {
    let attack_bonus = player
        .weapon
        .as_deref()
        .and_then(|w| catalog.weapon_attack(w))
        .unwrap_or(0);
    let defense_bonus = player
        .armor
        .as_deref()
        .and_then(|a| catalog.armor_defense(a))
        .unwrap_or(0);
    DerivedStats {
        attack_bonus,
        defense_bonus,
        max_health: BASE_MAX_HEALTH.saturating_add(defense_bonus),
    }
}

/// Apply [`derived_stats`] to the player.
///
/// Health is never raised here; it is only clamped down to the new maximum.
pub fn refresh_stats(player: &mut Player, catalog: &ItemCatalog) {
    let stats = derived_stats(player, catalog);
    player.attack_bonus = stats.attack_bonus;
    player.defense_bonus = stats.defense_bonus;
    player.max_health = stats.max_health;
    if player.health > player.max_health {
        player.health = player.max_health;
    }
}

//! Enemy types and their fixed stat lines.

use std::ops::Range;

/// An ordinary enemy that can ambush the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnemyKind {
    /// Fast, weak, drops a pelt.
    Wolf,
    /// Fragile, but its bite poisons.
    VenomSpider,
    /// Tough, tracked by the bandit hunt, drops a full kit.
    Bandit,
    /// Hits hard.
    Bat,
}

/// Fixed numbers for one enemy type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyStats {
    /// Display name.
    pub name: &'static str,
    /// Health the enemy starts each fight with.
    pub max_health: i32,
    /// Half-open range the raw hit is rolled from, before defense.
    pub damage: Range<i32>,
    /// Gold granted on defeat.
    pub reward_gold: u32,
    /// Items granted on defeat, all of them, in order.
    pub loot: &'static [&'static str],
    /// Whether a landed hit poisons the player.
    pub venomous: bool,
}

impl EnemyKind {
    /// Every enemy type.
    pub fn all() -> &'static [Self] {
        &[Self::Wolf, Self::VenomSpider, Self::Bandit, Self::Bat]
    }

    /// The stat line for this enemy.
    pub fn stats(self) -> EnemyStats {
        match self {
            Self::Wolf => EnemyStats {
                name: "Wolf",
                max_health: 20,
                damage: 5..10,
                reward_gold: 5,
                loot: &["Wolf Pelt"],
                venomous: false,
            },
            Self::VenomSpider => EnemyStats {
                name: "Venom Spider",
                max_health: 15,
                damage: 8..13,
                reward_gold: 8,
                loot: &["Spider Venom"],
                venomous: true,
            },
            Self::Bandit => EnemyStats {
                name: "Bandit",
                max_health: 300,
                damage: 10..15,
                reward_gold: 15,
                loot: &[
                    "Coin Pouch",
                    "Pistol",
                    "Short Sword",
                    "Leather Armor",
                    "Bandit Badge",
                    "Spirits",
                ],
                venomous: false,
            },
            Self::Bat => EnemyStats {
                name: "Bat",
                max_health: 80,
                damage: 20..50,
                reward_gold: 12,
                loot: &["Bat Wing", "Bat Fang"],
                venomous: false,
            },
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        self.stats().name
    }
}

impl std::fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_ranges_are_non_empty() {
        for kind in EnemyKind::all() {
            let stats = kind.stats();
            assert!(!stats.damage.is_empty(), "{kind}");
            assert!(stats.damage.start >= 1, "{kind}");
            assert!(stats.max_health > 0, "{kind}");
        }
    }

    #[test]
    fn bandit_loot_table() {
        let stats = EnemyKind::Bandit.stats();
        assert_eq!(stats.loot.len(), 6);
        assert_eq!(stats.reward_gold, 15);
        assert_eq!(stats.max_health, 300);
    }

    #[test]
    fn only_the_spider_is_venomous() {
        let venomous: Vec<_> = EnemyKind::all()
            .iter()
            .filter(|kind| kind.stats().venomous)
            .collect();
        assert_eq!(venomous, vec![&EnemyKind::VenomSpider]);
    }
}

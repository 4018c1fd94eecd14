//! Quest definitions and the rules for offering, accepting and completing them.
//!
//! Each quest moves `NotOffered → Active → Completed`. Repeatable quests may
//! cycle `Completed → Active → Completed` again. The per-player state lives in
//! [`QuestLedger`]; the static rules live in [`QuestBook`].

mod condition;
mod ledger;

pub use condition::Condition;
pub use ledger::QuestLedger;

use crate::bestiary::EnemyKind;
use crate::error::{CoreError, CoreResult};
use crate::player::Player;

/// Identifier of a quest. The key string is what the save file stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestId {
    /// Defeat five bandits for the village chief.
    BanditHunt,
    /// Bring the villager a wooden sword.
    WoodenSword,
    /// Bring the blacksmith some ore.
    CollectOre,
    /// Catch a fish for the fisherman.
    Fishing,
}

impl QuestId {
    /// Every quest id.
    pub fn all() -> &'static [Self] {
        &[
            Self::BanditHunt,
            Self::WoodenSword,
            Self::CollectOre,
            Self::Fishing,
        ]
    }

    /// Stable key used in save files.
    pub fn key(self) -> &'static str {
        match self {
            Self::BanditHunt => "bandit_hunt",
            Self::WoodenSword => "wooden_sword",
            Self::CollectOre => "collect_ore",
            Self::Fishing => "fishing",
        }
    }

    /// Parse a save-file key.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|id| id.key() == s.trim())
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Self::BanditHunt => "Clear the Bandits",
            Self::WoodenSword => "Find the Wooden Sword",
            Self::CollectOre => "Collect Ore",
            Self::Fishing => "Gone Fishing",
        }
    }
}

impl std::fmt::Display for QuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Where a quest currently stands for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestStatus {
    /// Never accepted.
    NotOffered,
    /// In progress.
    Active,
    /// Done.
    Completed,
}

/// What finishes a quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Objective {
    /// Hand over one copy of an item. The item is consumed.
    Deliver {
        /// Item name.
        item: &'static str,
    },
    /// Defeat a number of enemies of one type while the quest is active.
    Defeat {
        /// Enemy that counts.
        enemy: EnemyKind,
        /// Kills required.
        count: u32,
    },
}

/// The static definition of a quest.
#[derive(Debug, Clone)]
pub struct QuestDef {
    /// Identifier.
    pub id: QuestId,
    /// Offer precondition on top of "not active, not completed unless repeatable".
    pub unlock: Condition,
    /// What must be true to hand the quest in.
    pub objective: Objective,
    /// Gold granted on completion.
    pub reward_gold: u32,
    /// Whether a completed quest can be taken again.
    pub repeatable: bool,
    /// Item the giver leaves on the ground when the quest is accepted.
    pub loaned_item: Option<&'static str>,
}

impl QuestDef {
    /// The completion precondition as a [`Condition`].
    pub fn completion(&self) -> Condition {
        match &self.objective {
            Objective::Deliver { item } => Condition::HasItem {
                item: (*item).to_string(),
            },
            Objective::Defeat { count, .. } => Condition::ProgressAtLeast {
                quest: self.id,
                count: *count,
            },
        }
    }
}

/// Result of accepting a quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    /// The quest now active.
    pub quest: QuestId,
    /// Item to place on the ground at the giver's location, if any.
    pub loaned_item: Option<&'static str>,
}

/// Result of handing in a quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestReward {
    /// The quest now completed.
    pub quest: QuestId,
    /// Gold granted.
    pub gold: u32,
    /// Item taken from the inventory, if the objective was a delivery.
    pub consumed: Option<String>,
}

/// Progress made on a counting quest by a single defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestProgress {
    /// The quest that advanced.
    pub quest: QuestId,
    /// Counter after the increment.
    pub current: u32,
    /// Counter value that completes the objective.
    pub required: u32,
}

/// The full set of quest definitions.
#[derive(Debug, Clone)]
pub struct QuestBook {
    quests: Vec<QuestDef>,
}

/// Bandits the chief wants defeated.
pub const BANDIT_QUEST_REQUIREMENT: u32 = 5;

impl QuestBook {
    /// Build a book from definitions.
    pub fn new(quests: Vec<QuestDef>) -> Self {
        Self { quests }
    }

    /// The quest chain of the standard game.
    pub fn standard() -> Self {
        Self::new(vec![
            QuestDef {
                id: QuestId::BanditHunt,
                unlock: Condition::Always,
                objective: Objective::Defeat {
                    enemy: EnemyKind::Bandit,
                    count: BANDIT_QUEST_REQUIREMENT,
                },
                reward_gold: 3000,
                repeatable: false,
                loaned_item: None,
            },
            QuestDef {
                id: QuestId::WoodenSword,
                unlock: Condition::Always,
                objective: Objective::Deliver {
                    item: "Wooden Sword",
                },
                reward_gold: 15,
                repeatable: false,
                loaned_item: None,
            },
            QuestDef {
                id: QuestId::CollectOre,
                unlock: Condition::QuestCompleted(QuestId::WoodenSword),
                objective: Objective::Deliver { item: "Ore" },
                reward_gold: 25,
                repeatable: false,
                loaned_item: None,
            },
            QuestDef {
                id: QuestId::Fishing,
                unlock: Condition::Always,
                objective: Objective::Deliver { item: "Fish" },
                reward_gold: 20,
                repeatable: true,
                loaned_item: Some("Fishing Rod"),
            },
        ])
    }

    /// Look up a definition.
    pub fn get(&self, id: QuestId) -> Option<&QuestDef> {
        self.quests.iter().find(|q| q.id == id)
    }

    fn require(&self, id: QuestId) -> CoreResult<&QuestDef> {
        self.get(id).ok_or(CoreError::QuestLocked(id))
    }

    /// All definitions in book order.
    pub fn quests(&self) -> &[QuestDef] {
        &self.quests
    }

    /// Check whether a quest may be offered to the player right now.
    pub fn check_offer(&self, id: QuestId, player: &Player) -> CoreResult<()> {
        let def = self.require(id)?;
        match player.quests.status(id) {
            QuestStatus::Active => return Err(CoreError::QuestAlreadyActive(id)),
            QuestStatus::Completed if !def.repeatable => {
                return Err(CoreError::QuestAlreadyCompleted(id));
            }
            _ => {}
        }
        if !def.unlock.evaluate(player) {
            return Err(CoreError::QuestLocked(id));
        }
        Ok(())
    }

    /// Whether [`QuestBook::check_offer`] passes.
    pub fn can_offer(&self, id: QuestId, player: &Player) -> bool {
        self.check_offer(id, player).is_ok()
    }

    /// Accept an offered quest.
    pub fn accept(&self, id: QuestId, player: &mut Player) -> CoreResult<Acceptance> {
        self.check_offer(id, player)?;
        let def = self.require(id)?;
        player.quests.activate(id, def.repeatable)?;
        tracing::info!(quest = id.key(), "quest accepted");

        let loaned_item = def.loaned_item.filter(|item| !player.has_item(item));
        Ok(Acceptance {
            quest: id,
            loaned_item,
        })
    }

    /// Whether an active quest's completion precondition holds.
    pub fn is_ready(&self, id: QuestId, player: &Player) -> bool {
        player.quests.is_active(id)
            && self
                .get(id)
                .is_some_and(|def| def.completion().evaluate(player))
    }

    /// Hand in an active quest whose objective is met.
    ///
    /// Either every effect applies (item consumed, gold granted, quest moved
    /// to completed) or none does.
    pub fn complete(&self, id: QuestId, player: &mut Player) -> CoreResult<QuestReward> {
        let def = self.require(id)?;
        if !player.quests.is_active(id) {
            return Err(CoreError::QuestNotActive(id));
        }
        if !def.completion().evaluate(player) {
            return Err(CoreError::ObjectiveIncomplete(id));
        }

        let consumed = match &def.objective {
            Objective::Deliver { item } => {
                player.remove_item(item);
                Some((*item).to_string())
            }
            Objective::Defeat { .. } => None,
        };
        player.gold = player.gold.saturating_add(def.reward_gold);
        player.quests.complete(id)?;
        tracing::info!(quest = id.key(), gold = def.reward_gold, "quest completed");

        Ok(QuestReward {
            quest: id,
            gold: def.reward_gold,
            consumed,
        })
    }

    /// Count a defeated enemy toward every active quest that tracks it.
    pub fn record_defeat(&self, enemy: EnemyKind, player: &mut Player) -> Vec<QuestProgress> {
        let mut advanced = Vec::new();
        for def in &self.quests {
            if let Objective::Defeat {
                enemy: tracked,
                count,
            } = def.objective
                && tracked == enemy
                && let Some(current) = player.quests.bump_progress(def.id)
            {
                tracing::debug!(quest = def.id.key(), current, "quest progress");
                advanced.push(QuestProgress {
                    quest: def.id,
                    current,
                    required: count,
                });
            }
        }
        advanced
    }

    /// Whether every quest in the book is in the completed set.
    ///
    /// Recomputed on every call; nothing is cached.
    pub fn all_completed(&self, player: &Player) -> bool {
        self.quests
            .iter()
            .all(|def| player.quests.is_completed(def.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn player() -> Player {
        Player::new("Tester", 0, Utc::now())
    }

    #[test]
    fn quest_keys_round_trip() {
        for id in QuestId::all() {
            assert_eq!(QuestId::parse(id.key()), Some(*id));
        }
        assert_eq!(QuestId::parse("dragon_slaying"), None);
    }

    #[test]
    fn ore_quest_is_gated_on_sword_quest() {
        let book = QuestBook::standard();
        let mut player = player();
        assert_eq!(
            book.check_offer(QuestId::CollectOre, &player),
            Err(CoreError::QuestLocked(QuestId::CollectOre))
        );

        book.accept(QuestId::WoodenSword, &mut player).unwrap();
        player.add_item("Wooden Sword");
        book.complete(QuestId::WoodenSword, &mut player).unwrap();

        assert!(book.can_offer(QuestId::CollectOre, &player));
    }

    #[test]
    fn delivery_consumes_item_and_pays() {
        let book = QuestBook::standard();
        let mut player = player();
        book.accept(QuestId::WoodenSword, &mut player).unwrap();
        player.add_item("Wooden Sword");
        player.add_item("Wooden Sword");

        let reward = book.complete(QuestId::WoodenSword, &mut player).unwrap();
        assert_eq!(reward.gold, 15);
        assert_eq!(reward.consumed.as_deref(), Some("Wooden Sword"));
        assert_eq!(player.gold, 15);
        assert_eq!(player.count_item("Wooden Sword"), 1);
        assert!(player.quests.is_completed(QuestId::WoodenSword));
    }

    #[test]
    fn incomplete_objective_changes_nothing() {
        let book = QuestBook::standard();
        let mut player = player();
        book.accept(QuestId::CollectOre, &mut player).unwrap_err();
        book.accept(QuestId::Fishing, &mut player).unwrap();

        let before = player.clone();
        assert_eq!(
            book.complete(QuestId::Fishing, &mut player),
            Err(CoreError::ObjectiveIncomplete(QuestId::Fishing))
        );
        assert_eq!(player, before);
    }

    #[test]
    fn bandit_hunt_counts_only_bandits() {
        let book = QuestBook::standard();
        let mut player = player();
        assert!(book.record_defeat(EnemyKind::Bandit, &mut player).is_empty());

        book.accept(QuestId::BanditHunt, &mut player).unwrap();
        assert!(book.record_defeat(EnemyKind::Wolf, &mut player).is_empty());

        for _ in 0..BANDIT_QUEST_REQUIREMENT {
            book.record_defeat(EnemyKind::Bandit, &mut player);
        }
        assert!(book.is_ready(QuestId::BanditHunt, &player));

        let reward = book.complete(QuestId::BanditHunt, &mut player).unwrap();
        assert_eq!(reward.gold, 3000);
        assert_eq!(reward.consumed, None);
        assert_eq!(player.quests.progress(QuestId::BanditHunt), 0);
    }

    #[test]
    fn fishing_loans_rod_unless_carried() {
        let book = QuestBook::standard();
        let mut player = player();
        let first = book.accept(QuestId::Fishing, &mut player).unwrap();
        assert_eq!(first.loaned_item, Some("Fishing Rod"));

        player.add_item("Fishing Rod");
        player.add_item("Fish");
        book.complete(QuestId::Fishing, &mut player).unwrap();

        let again = book.accept(QuestId::Fishing, &mut player).unwrap();
        assert_eq!(again.loaned_item, None);
        assert!(player.quests.is_active(QuestId::Fishing));
    }

    #[test]
    fn all_completed_requires_every_quest() {
        let book = QuestBook::standard();
        let mut player = player();
        player.quests = QuestLedger::restore(
            [],
            [QuestId::BanditHunt, QuestId::WoodenSword, QuestId::CollectOre],
            [],
        );
        assert!(!book.all_completed(&player));

        player.quests = QuestLedger::restore([], QuestId::all().iter().copied(), []);
        assert!(book.all_completed(&player));
    }
}

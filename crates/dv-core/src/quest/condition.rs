//! Preconditions evaluated against the player.

use super::QuestId;
use crate::player::Player;

/// A condition that can be evaluated against player state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Condition {
    /// The player carries at least one copy of an item.
    HasItem {
        /// Item name.
        item: String,
    },
    /// A quest is in the completed set.
    QuestCompleted(QuestId),
    /// A quest's progress counter has reached a value.
    ProgressAtLeast {
        /// Quest whose counter is checked.
        quest: QuestId,
        /// Minimum counter value.
        count: u32,
    },
    /// Always true.
    #[default]
    Always,
}

impl Condition {
    /// Evaluate the condition against the current state.
    pub fn evaluate(&self, player: &Player) -> bool {
        match self {
            Condition::HasItem { item } => player.has_item(item),
            Condition::QuestCompleted(id) => player.quests.is_completed(*id),
            Condition::ProgressAtLeast { quest, count } => player.quests.progress(*quest) >= *count,
            Condition::Always => true,
        }
    }
}

//! Per-player quest state.

use std::collections::BTreeMap;

use super::{QuestId, QuestStatus};
use crate::error::{CoreError, CoreResult};

/// Tracks which quests are active or completed, plus per-quest counters.
///
/// A quest id is never in both the active and the completed list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestLedger {
    active: Vec<QuestId>,
    completed: Vec<QuestId>,
    progress: BTreeMap<QuestId, u32>,
}

impl QuestLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from saved lists.
    ///
    /// An id listed as both active and completed is treated as active, which
    /// is where a re-accepted repeatable quest sits. Duplicates are dropped.
    pub fn restore(
        active: impl IntoIterator<Item = QuestId>,
        completed: impl IntoIterator<Item = QuestId>,
        progress: impl IntoIterator<Item = (QuestId, u32)>,
    ) -> Self {
        let mut ledger = Self::new();
        for id in active {
            if !ledger.active.contains(&id) {
                ledger.active.push(id);
            }
        }
        for id in completed {
            if !ledger.active.contains(&id) && !ledger.completed.contains(&id) {
                ledger.completed.push(id);
            }
        }
        for (id, count) in progress {
            if count > 0 && ledger.active.contains(&id) {
                ledger.progress.insert(id, count);
            }
        }
        ledger
    }

    /// Current state of a quest.
    pub fn status(&self, id: QuestId) -> QuestStatus {
        if self.active.contains(&id) {
            QuestStatus::Active
        } else if self.completed.contains(&id) {
            QuestStatus::Completed
        } else {
            QuestStatus::NotOffered
        }
    }

    /// Whether a quest is in progress.
    pub fn is_active(&self, id: QuestId) -> bool {
        self.active.contains(&id)
    }

    /// Whether a quest has been completed.
    pub fn is_completed(&self, id: QuestId) -> bool {
        self.completed.contains(&id)
    }

    /// Active quests in the order they were accepted.
    pub fn active(&self) -> &[QuestId] {
        &self.active
    }

    /// Completed quests in the order they were completed.
    pub fn completed(&self) -> &[QuestId] {
        &self.completed
    }

    /// Counter for a quest (0 when untracked).
    pub fn progress(&self, id: QuestId) -> u32 {
        self.progress.get(&id).copied().unwrap_or(0)
    }

    /// Counters that have moved off zero.
    pub fn progress_entries(&self) -> impl Iterator<Item = (QuestId, u32)> + '_ {
        self.progress.iter().map(|(id, count)| (*id, *count))
    }

    /// Move a quest to active, resetting its counter.
    ///
    /// A completed quest may only be re-activated when `repeatable`.
    pub fn activate(&mut self, id: QuestId, repeatable: bool) -> CoreResult<()> {
        match self.status(id) {
            QuestStatus::Active => return Err(CoreError::QuestAlreadyActive(id)),
            QuestStatus::Completed if !repeatable => {
                return Err(CoreError::QuestAlreadyCompleted(id));
            }
            QuestStatus::Completed => self.completed.retain(|q| *q != id),
            QuestStatus::NotOffered => {}
        }
        self.active.push(id);
        self.progress.remove(&id);
        Ok(())
    }

    /// Move an active quest to completed and drop its counter.
    pub fn complete(&mut self, id: QuestId) -> CoreResult<()> {
        if !self.is_active(id) {
            return Err(CoreError::QuestNotActive(id));
        }
        self.active.retain(|q| *q != id);
        self.completed.push(id);
        self.progress.remove(&id);
        Ok(())
    }

    /// Increment an active quest's counter. Returns the new value, or `None`
    /// when the quest is not active.
    pub fn bump_progress(&mut self, id: QuestId) -> Option<u32> {
        if !self.is_active(id) {
            return None;
        }
        let count = self.progress.entry(id).or_insert(0);
        *count += 1;
        Some(*count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut ledger = QuestLedger::new();
        assert_eq!(ledger.status(QuestId::CollectOre), QuestStatus::NotOffered);

        ledger.activate(QuestId::CollectOre, false).unwrap();
        assert_eq!(ledger.status(QuestId::CollectOre), QuestStatus::Active);

        ledger.complete(QuestId::CollectOre).unwrap();
        assert_eq!(ledger.status(QuestId::CollectOre), QuestStatus::Completed);
        assert!(ledger.active().is_empty());
    }

    #[test]
    fn no_regression_for_one_shot_quests() {
        let mut ledger = QuestLedger::new();
        ledger.activate(QuestId::WoodenSword, false).unwrap();
        assert_eq!(
            ledger.activate(QuestId::WoodenSword, false),
            Err(CoreError::QuestAlreadyActive(QuestId::WoodenSword))
        );
        ledger.complete(QuestId::WoodenSword).unwrap();
        assert_eq!(
            ledger.activate(QuestId::WoodenSword, false),
            Err(CoreError::QuestAlreadyCompleted(QuestId::WoodenSword))
        );
    }

    #[test]
    fn repeatable_cycles_back_to_active() {
        let mut ledger = QuestLedger::new();
        ledger.activate(QuestId::Fishing, true).unwrap();
        ledger.complete(QuestId::Fishing).unwrap();
        ledger.activate(QuestId::Fishing, true).unwrap();

        assert!(ledger.is_active(QuestId::Fishing));
        assert!(!ledger.is_completed(QuestId::Fishing));
    }

    #[test]
    fn complete_requires_active() {
        let mut ledger = QuestLedger::new();
        assert_eq!(
            ledger.complete(QuestId::Fishing),
            Err(CoreError::QuestNotActive(QuestId::Fishing))
        );
    }

    #[test]
    fn progress_only_counts_while_active() {
        let mut ledger = QuestLedger::new();
        assert_eq!(ledger.bump_progress(QuestId::BanditHunt), None);

        ledger.activate(QuestId::BanditHunt, false).unwrap();
        assert_eq!(ledger.bump_progress(QuestId::BanditHunt), Some(1));
        assert_eq!(ledger.bump_progress(QuestId::BanditHunt), Some(2));

        ledger.complete(QuestId::BanditHunt).unwrap();
        assert_eq!(ledger.progress(QuestId::BanditHunt), 0);
        assert_eq!(ledger.bump_progress(QuestId::BanditHunt), None);
    }

    #[test]
    fn restore_keeps_lists_disjoint() {
        let ledger = QuestLedger::restore(
            [QuestId::Fishing, QuestId::Fishing],
            [QuestId::Fishing, QuestId::WoodenSword],
            [(QuestId::Fishing, 3), (QuestId::WoodenSword, 9)],
        );
        assert_eq!(ledger.active(), &[QuestId::Fishing]);
        assert_eq!(ledger.completed(), &[QuestId::WoodenSword]);
        assert_eq!(ledger.progress(QuestId::Fishing), 3);
        assert_eq!(ledger.progress(QuestId::WoodenSword), 0);
    }
}

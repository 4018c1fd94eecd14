use crate::item::EquipSlot;
use crate::quest::QuestId;
use crate::world::Direction;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the core data model.
///
/// Every variant is recoverable: the operation that produced it left the
/// player and the world untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The current location has no exit in that direction.
    #[error("you can't go {0} from here")]
    InvalidDirection(Direction),

    /// A location name did not resolve to any location in the graph.
    #[error("location not found: \"{0}\"")]
    UnknownLocation(String),

    /// A purchase costs more than the player owns.
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientFunds {
        /// Total cost of the batch.
        needed: u32,
        /// Gold the player had.
        available: u32,
    },

    /// One or more item names are not in the relevant table.
    #[error("unknown item(s): {}", .0.join(", "))]
    UnknownItem(Vec<String>),

    /// A purchase or consume request named no items at all.
    #[error("no items given")]
    EmptyBatch,

    /// A menu index or quantity was out of range.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// The player does not carry the named item.
    #[error("item not in inventory: {0}")]
    ItemNotInInventory(String),

    /// The item is neither a weapon nor armor.
    #[error("{0} cannot be equipped")]
    NotEquippable(String),

    /// None of the selected items can be consumed.
    #[error("none of the selected items can be eaten or drunk")]
    NothingConsumable,

    /// Unequip requested on an empty slot.
    #[error("no {0} equipped")]
    SlotEmpty(EquipSlot),

    /// The quest is already in progress.
    #[error("quest already active: {0}")]
    QuestAlreadyActive(QuestId),

    /// The quest was completed and cannot be taken again.
    #[error("quest already completed: {0}")]
    QuestAlreadyCompleted(QuestId),

    /// An upstream quest has not been completed yet.
    #[error("quest not yet available: {0}")]
    QuestLocked(QuestId),

    /// The quest is not in progress.
    #[error("quest not active: {0}")]
    QuestNotActive(QuestId),

    /// The completion precondition does not hold yet.
    #[error("quest objective incomplete: {0}")]
    ObjectiveIncomplete(QuestId),

    /// A save file exists but holds no usable record.
    #[error("corrupt save: {0}")]
    CorruptSave(String),
}

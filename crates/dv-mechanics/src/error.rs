//! Error types for the mechanics engine.

use dv_core::CoreError;

/// Errors that can occur while resolving a fight or a fishing duel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A rule from the data model rejected the action (for example using an
    /// item the player does not carry).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The fight already ended.
    #[error("this fight is already over")]
    EncounterOver,

    /// The fish was already landed or lost.
    #[error("there is no fish on the line")]
    DuelOver,
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

use thiserror::Error;

use crate::storage::StoreError;

/// Errors surfaced by the game-layer APIs.
///
/// Normal game randomness (a miss, an expired cooldown, not enough mana) is
/// control flow and never appears here; these are the conditions a caller
/// cannot proceed past sensibly.
#[derive(Debug, Error)]
pub enum GameError {
    /// Class name not present in the configured class table.
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// Registration attempted for an id that already has a player record.
    #[error("player already exists: {0}")]
    PlayerExists(String),

    /// Persistence failure bubbled up from the store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

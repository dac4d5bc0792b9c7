//! Error types for Elemclash

use thiserror::Error;

/// Hard failures surfaced by the engine.
///
/// Invalid player input (unaffordable card, occupied slot) is not an
/// error: those calls return `Ok(false)` and leave state untouched.
/// These variants cover invariant violations - typically a corrupted or
/// adversarial payload from a remote peer - where continuing silently
/// would desynchronize replicated copies of the game.
#[derive(Error, Debug)]
pub enum ClashError {
    #[error("Card not found in catalog: {0}")]
    CardNotFound(u32),

    #[error("Player not found: {0}")]
    PlayerNotFound(u8),

    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, ClashError>;

//! Elemclash - deterministic engine for a two-player card duel
//!
//! Both players pick a card in secret each turn, reveal simultaneously,
//! and a fixed resolution pipeline applies the effects. Everything is
//! turn-quantized and reproducible from a seed, so a host-authoritative
//! peer can mirror the game to a remote client via snapshots.

pub mod core;
pub mod game;
pub mod error;

pub use error::{ClashError, Result};

//! Game simulation: events, economy, unit lifecycles, combat, draft,
//! opponent AI, and the turn resolution engine

pub mod ai;
pub mod combat;
pub mod draft;
pub mod energy;
pub mod engine;
pub mod events;
pub mod miner;
pub mod phase;
pub mod snapshot;
pub mod state;
pub mod wall;

pub use ai::{AiOpponent, Difficulty};
pub use combat::{check_victory, resolve_attack, AttackResult, GameOutcome};
pub use draft::{Deck, DraftAllocator, DraftCategory, DraftPick, DraftRound};
pub use engine::GameEngine;
pub use events::{BlockReason, EventBus, EventKind, GameEvent};
pub use phase::{GamePhase, InputMode, LockedAction, TurnPhase, TurnState};
pub use snapshot::GameSnapshot;
pub use state::{GameState, TurnRecord};

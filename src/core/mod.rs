//! Core game types and the static card catalog

pub mod card;
pub mod catalog;
pub mod player;
pub mod rules;

pub use card::{CardDefinition, CardId, CardType, Element, MinerKind, Subtype};
pub use catalog::CardCatalog;
pub use player::{MinerInstance, PlayerId, PlayerState, WallInstance};

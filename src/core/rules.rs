//! Fixed rule constants
//!
//! The whole rule set is deliberately small and numeric; keeping it in one
//! place makes the turn economy auditable at a glance.

/// Starting and maximum player health.
pub const STARTING_HP: i32 = 20;

/// Energy both players start the game with, before the turn-1 regeneration.
pub const STARTING_ENERGY: u8 = 3;

/// Hard cap on stored energy; regeneration beyond this is discarded.
pub const ENERGY_CAP: u8 = 10;

/// Energy granted at the start of odd-numbered turns.
pub const REGEN_ODD_TURN: u8 = 2;

/// Energy granted at the start of even-numbered turns.
///
/// The odd/even split yields a 2.5/turn long-run average.
pub const REGEN_EVEN_TURN: u8 = 3;

/// Flat damage removed from a continuous attack by an active deflection.
pub const DEFLECTION_REDUCTION: i32 = 4;

/// Wall HP lost to decay at the end of every resolution pass.
pub const WALL_DECAY_PER_TURN: i32 = 2;

/// Power of the free projectile fired by a projectile-miner payout.
pub const PROJECTILE_MINER_POWER: i32 = 3;

/// Power of the free continuous attack fired by a continuous-miner payout.
pub const CONTINUOUS_MINER_POWER: i32 = 4;

/// Cards in a finished deck.
pub const DECK_SIZE: usize = 6;

/// Options presented per non-miner draft round.
pub const DRAFT_OPTIONS_PER_ROUND: usize = 4;

/// Selection-phase timer, carried as configuration for the UI/transport.
/// The engine itself is clock-free; expiry arrives via `on_timer_expired`.
pub const SELECTION_TIMER_SECS: u32 = 30;

/// Draft timer for rounds one through four.
pub const DRAFT_TIMER_SECS: u32 = 15;

/// Draft timer for the two miner rounds.
pub const DRAFT_TIMER_LONG_SECS: u32 = 20;

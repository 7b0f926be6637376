//! The memory-matching game: a shuffled deck of face pairs, a turn state
//! machine, and the delayed flips that drive it.

pub mod deck;
pub mod engine;
pub mod timer;

pub use deck::{BoardSize, Card, CardRef, FaceId, deal};
pub use engine::{Effect, GameRules, MemoryGame, Outcome, TurnState};
pub use timer::{Generation, Scheduled, TimerQueue};

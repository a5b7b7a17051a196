//! Wellness challenge engine
//!
//! A static table of prompts, a small session state machine on top of it, and
//! the session progress record. Rewards are spawned through the playground's
//! own entity factory, so everything visible stays in one collection.

pub mod data;
pub mod engine;
pub mod progress;

pub use data::{CHALLENGES, Challenge, ChallengeKind, challenges_of_kind, random_challenge};
pub use engine::{ActiveChallenge, ChallengeEngine, ChallengePhase, Notification};
pub use progress::{CompletionRecord, DayStamp, UserProgress, badges, streak_emoji};

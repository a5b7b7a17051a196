//! Yimo Playground - a browser toy of bouncing, multiplying Yimos
//!
//! Core modules:
//! - `sim`: Deterministic playground simulation (movement, bouncing, spawning)
//! - `challenge`: Wellness challenge engine, prompt table, and progress tracking
//!
//! All gameplay logic is pure and deterministic: seeded RNG only, no platform
//! dependencies. The wasm32 driver in `main.rs` owns the animation loop and DOM.

pub mod challenge;
pub mod sim;

pub use challenge::{Challenge, ChallengeEngine, ChallengeKind, Notification, UserProgress};
pub use sim::{Fill, PlaygroundState, Shape, Yimo, YimoSprite};

/// Playground tuning constants
pub mod consts {
    /// Boundary-triggered spawning stops once the output collection reaches
    /// this many Yimos. Click-bursts and challenge rewards are exempt.
    pub const MAX_BOUNDARY_POPULATION: usize = 50;

    /// Yimos spawned around a clicked Yimo
    pub const BURST_COUNT: usize = 3;
    /// Distance from the clicked Yimo to each burst spawn
    pub const BURST_RADIUS: f32 = 100.0;

    /// Yimo size range (pixels)
    pub const MIN_YIMO_SIZE: f32 = 30.0;
    pub const MAX_YIMO_SIZE: f32 = 70.0;

    /// Velocity components are drawn from [-MAX_AXIS_SPEED, MAX_AXIS_SPEED)
    /// pixels per tick
    pub const MAX_AXIS_SPEED: f32 = 2.0;
}

//! Deterministic playground simulation
//!
//! All entity logic lives here. This module must be pure and deterministic:
//! - One update per display-refresh tick
//! - Seeded RNG only
//! - Stable append order (new Yimos go to the back)
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{ColorTag, Fill, GradientKind, PlaygroundState, Shape, Yimo, YimoSprite};
pub use tick::{click_burst, tick};

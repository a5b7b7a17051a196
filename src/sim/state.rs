//! Playground state and core simulation types
//!
//! Everything the driver renders lives here. State is deterministic: all
//! randomness is drawn from the seeded RNG owned by `PlaygroundState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;

/// Solid Yimo colors (CSS theme tokens on the page side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Pink,
    Blue,
    Green,
    Purple,
    Orange,
    Yellow,
}

impl ColorTag {
    pub const ALL: [ColorTag; 6] = [
        ColorTag::Pink,
        ColorTag::Blue,
        ColorTag::Green,
        ColorTag::Purple,
        ColorTag::Orange,
        ColorTag::Yellow,
    ];
}

/// Gradient fills, used both by Yimos and as challenge accent colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Playful,
    Cosmic,
    Sunset,
}

impl GradientKind {
    pub const ALL: [GradientKind; 3] = [
        GradientKind::Playful,
        GradientKind::Cosmic,
        GradientKind::Sunset,
    ];
}

/// A Yimo's visual fill: one of six solid colors or one of three gradients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fill {
    Solid(ColorTag),
    Gradient(GradientKind),
}

impl Fill {
    /// Pick a fill: 50/50 solid vs gradient, uniform within each group
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            Fill::Solid(ColorTag::ALL[rng.random_range(0..ColorTag::ALL.len())])
        } else {
            Fill::Gradient(GradientKind::ALL[rng.random_range(0..GradientKind::ALL.len())])
        }
    }

    /// CSS class hook for the DOM renderer
    pub fn css_class(&self) -> &'static str {
        match self {
            Fill::Solid(ColorTag::Pink) => "bg-yimo-pink",
            Fill::Solid(ColorTag::Blue) => "bg-yimo-blue",
            Fill::Solid(ColorTag::Green) => "bg-yimo-green",
            Fill::Solid(ColorTag::Purple) => "bg-yimo-purple",
            Fill::Solid(ColorTag::Orange) => "bg-yimo-orange",
            Fill::Solid(ColorTag::Yellow) => "bg-yimo-yellow",
            Fill::Gradient(GradientKind::Playful) => "bg-gradient-playful",
            Fill::Gradient(GradientKind::Cosmic) => "bg-gradient-cosmic",
            Fill::Gradient(GradientKind::Sunset) => "bg-gradient-sunset",
        }
    }
}

/// Shape variant for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Round,
    Heart,
}

/// A bouncing Yimo entity
#[derive(Debug, Clone, Serialize)]
pub struct Yimo {
    pub id: u32,
    /// Top-left corner in viewport coordinates
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: f32,
    pub fill: Fill,
}

/// Render-ready descriptor, recomputed every frame via [`PlaygroundState::scene`]
#[derive(Debug, Clone, Serialize)]
pub struct YimoSprite {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub fill: Fill,
    pub shape: Shape,
}

/// Complete playground state (deterministic)
#[derive(Debug, Clone)]
pub struct PlaygroundState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Viewport extents in pixels
    pub viewport: Vec2,
    /// Whether the simulation is ticking
    pub active: bool,
    /// Render Yimos as hearts instead of circles
    pub heart_mode: bool,
    /// Active Yimos, in spawn/append order
    pub yimos: Vec<Yimo>,
    /// Single source of randomness for the whole playground
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl PlaygroundState {
    /// Create an inactive, empty playground for the given seed and viewport
    pub fn new(seed: u64, viewport: Vec2) -> Self {
        Self {
            seed,
            viewport,
            active: false,
            heart_mode: false,
            yimos: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build a Yimo without appending it: random velocity, size, and fill,
    /// positioned at `at` or at a random spot inside the viewport.
    pub fn make_yimo(&mut self, at: Option<Vec2>) -> Yimo {
        let id = self.next_entity_id();
        let size = self.rng.random_range(MIN_YIMO_SIZE..MAX_YIMO_SIZE);
        let pos = at.unwrap_or_else(|| {
            Vec2::new(
                self.rng.random_range(0.0..(self.viewport.x - size).max(1.0)),
                self.rng.random_range(0.0..(self.viewport.y - size).max(1.0)),
            )
        });
        let vel = Vec2::new(
            self.rng.random_range(-MAX_AXIS_SPEED..MAX_AXIS_SPEED),
            self.rng.random_range(-MAX_AXIS_SPEED..MAX_AXIS_SPEED),
        );
        let fill = Fill::random(&mut self.rng);
        Yimo { id, pos, vel, size, fill }
    }

    /// Append a freshly made Yimo and return its ID
    pub fn spawn_yimo(&mut self, at: Option<Vec2>) -> u32 {
        let yimo = self.make_yimo(at);
        let id = yimo.id;
        self.yimos.push(yimo);
        id
    }

    /// Seed the playground with one Yimo at viewport center and activate ticking
    pub fn start(&mut self) {
        let center = self.viewport / 2.0;
        self.yimos.clear();
        self.spawn_yimo(Some(center));
        self.active = true;
        log::info!("Playground started (seed {})", self.seed);
    }

    /// Clear the collection and deactivate ticking
    pub fn reset(&mut self) {
        self.yimos.clear();
        self.active = false;
        log::info!("Playground reset");
    }

    /// Update the boundary extents (driver calls this on window resize)
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Render-ready sprite list for the current frame
    pub fn scene(&self) -> Vec<YimoSprite> {
        let shape = if self.heart_mode { Shape::Heart } else { Shape::Round };
        self.yimos
            .iter()
            .map(|y| YimoSprite {
                id: y.id,
                pos: y.pos,
                size: y.size,
                fill: y.fill,
                shape,
            })
            .collect()
    }
}

//! Per-frame simulation step
//!
//! Advances every Yimo, reflects off viewport edges, and spawns new Yimos on
//! boundary hits (capped) and on clicks (uncapped).

use glam::Vec2;

use super::state::PlaygroundState;
use crate::consts::*;

/// Advance the playground by one display-refresh tick.
///
/// Each Yimo moves by its velocity; an axis whose tentative position leaves
/// `[0, extent - size]` is clamped to the boundary it crossed and has that
/// velocity component negated. Every bounced Yimo triggers one boundary
/// spawn, appended in processing order, as long as the live collection is
/// still under [`MAX_BOUNDARY_POPULATION`]. Yimos spawned this tick are not
/// themselves advanced until the next tick.
pub fn tick(state: &mut PlaygroundState) {
    if !state.active {
        return;
    }

    let viewport = state.viewport;
    let count = state.yimos.len();

    for i in 0..count {
        let bounced = {
            let yimo = &mut state.yimos[i];
            let max = viewport - Vec2::splat(yimo.size);
            let mut pos = yimo.pos + yimo.vel;
            let mut bounced = false;

            if pos.x <= 0.0 || pos.x >= max.x {
                yimo.vel.x = -yimo.vel.x;
                pos.x = if pos.x <= 0.0 { 0.0 } else { max.x };
                bounced = true;
            }
            if pos.y <= 0.0 || pos.y >= max.y {
                yimo.vel.y = -yimo.vel.y;
                pos.y = if pos.y <= 0.0 { 0.0 } else { max.y };
                bounced = true;
            }

            yimo.pos = pos;
            bounced
        };

        if bounced && state.yimos.len() < MAX_BOUNDARY_POPULATION {
            let spawned = state.make_yimo(None);
            state.yimos.push(spawned);
        }
    }
}

/// Burst-spawn around a clicked Yimo.
///
/// Appends exactly [`BURST_COUNT`] new Yimos at equal angular offsets around
/// the clicked Yimo's position at [`BURST_RADIUS`], regardless of population
/// size (the boundary-spawn cap does not apply here). Unknown ids are
/// ignored.
pub fn click_burst(state: &mut PlaygroundState, clicked_id: u32) {
    let Some(origin) = state
        .yimos
        .iter()
        .find(|y| y.id == clicked_id)
        .map(|y| y.pos)
    else {
        return;
    };

    for i in 0..BURST_COUNT {
        let angle = (i as f32 / BURST_COUNT as f32) * std::f32::consts::TAU;
        let offset = Vec2::new(angle.cos(), angle.sin()) * BURST_RADIUS;
        state.spawn_yimo(Some(origin + offset));
    }
}

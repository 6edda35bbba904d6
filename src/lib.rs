//! Obstacle Dash - side-scrolling obstacle gauntlet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, boss state machine, world tick)
//!
//! Rendering, input capture, and physics collision detection live in the
//! embedding layer. This crate consumes per-tick time deltas, movement
//! intents, and externally detected contact/damage reports, and emits
//! state changes and spawn/attack requests as plain data.

pub mod sim;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (logical pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_SPAWN_X: f32 = 120.0;
    pub const PLAYER_SPAWN_Y: f32 = 300.0;
    /// Duration of the hit feedback flash (seconds)
    pub const HIT_FLASH_DURATION: f32 = 0.25;

    /// Obstacle defaults
    pub const OBSTACLE_BASE_SPEED: f32 = 160.0;
    /// Horizontal wave frequency for Moving obstacles (radians per pixel)
    pub const MOVING_WAVE_FREQ: f32 = 0.02;
    /// Vertical wave amplitude for Moving obstacles
    pub const MOVING_WAVE_AMPLITUDE: f32 = 60.0;
    /// Pulsing scale bounds and period
    pub const PULSE_SCALE_MIN: f32 = 0.7;
    pub const PULSE_SCALE_MAX: f32 = 1.3;
    pub const PULSE_PERIOD: f32 = 1.2;
    /// Rotating angular rate (radians per second)
    pub const ROTATION_RATE: f32 = 3.0;
    /// Bouncing vertical travel and period
    pub const BOUNCE_AMPLITUDE: f32 = 80.0;
    pub const BOUNCE_PERIOD: f32 = 1.6;
    /// Per-tick teleport chance for Teleporting obstacles
    pub const TELEPORT_CHANCE: f32 = 0.02;
    /// Vertical margin kept clear when teleporting
    pub const TELEPORT_MARGIN: f32 = 40.0;
    /// Per-tick split chance for Splitting obstacles
    pub const SPLIT_CHANCE: f32 = 0.01;
    /// Laser warning pulse period
    pub const LASER_PULSE_PERIOD: f32 = 0.8;
    /// Obstacles fully left of this x are reclaimed by the pool
    pub const DESPAWN_MARGIN: f32 = 64.0;
    /// Hard cap on live obstacles
    pub const MAX_OBSTACLES: usize = 64;

    /// Boss defaults
    pub const BOSS_SPAWN_X: f32 = 640.0;
    pub const BOSS_SPAWN_Y: f32 = 300.0;
    pub const BOSS_INVULN_WINDOW: f32 = 0.5;
    /// Seconds the defeat fade-out runs before the boss is removed
    pub const BOSS_DEFEAT_FADE: f32 = 1.5;
}

/// Clamp a scalar into `[lo, hi]`, tolerating an inverted range
/// (a playfield smaller than the entity collapses to `lo`).
#[inline]
pub fn clamp_or_pin(v: f32, lo: f32, hi: f32) -> f32 {
    if hi < lo { lo } else { v.clamp(lo, hi) }
}

/// True when both components are finite (no NaN/infinity)
#[inline]
pub fn vec2_is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

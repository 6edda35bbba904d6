//! Obstacle hazards
//!
//! Nine behavior variants share one scroll rule: every tick the obstacle
//! moves `speed * dt` toward the player (negative x). The variant rule is
//! applied after the scroll. Randomness comes only from the explicit RNG
//! handle the coordinator threads through `update`, so runs replay exactly
//! from a seed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::*;

/// Fixed set of obstacle behavior kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Spike,
    Block,
    Moving,
    Pulsing,
    Rotating,
    Bouncing,
    Teleporting,
    Splitting,
    Laser,
}

impl ObstacleKind {
    /// Base collision size (half-extent in pixels)
    pub fn base_size(&self) -> f32 {
        match self {
            Self::Spike => 16.0,
            Self::Block => 24.0,
            Self::Moving => 20.0,
            Self::Pulsing => 20.0,
            Self::Rotating => 22.0,
            Self::Bouncing => 20.0,
            Self::Teleporting => 18.0,
            Self::Splitting => 26.0,
            Self::Laser => 12.0,
        }
    }

    /// Everything except the two baseline hazards carries a per-tick rule
    pub fn has_special_behavior(&self) -> bool {
        !matches!(self, Self::Spike | Self::Block)
    }
}

/// Request emitted by a Splitting obstacle. The obstacle never inserts
/// into the world itself; the pool owner decides whether to honor this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub speed: f32,
}

/// A scrolling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    /// Scroll speed in pixels per second
    pub speed: f32,
    pub visible: bool,
    /// Vertical anchor for Moving/Bouncing oscillation
    baseline_y: f32,
    /// Periodic behavior accumulator (seconds)
    #[serde(default)]
    pub phase: f32,
    /// Visual scale for Pulsing (collision size is unaffected)
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Visual rotation for Rotating (radians)
    #[serde(default)]
    pub rotation: f32,
    /// Warning pulse intensity for Laser (0..1, visual only)
    #[serde(default)]
    pub warning: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, pos: Vec2, speed: f32) -> Self {
        Self {
            kind,
            pos,
            speed,
            visible: true,
            baseline_y: pos.y,
            phase: 0.0,
            scale: 1.0,
            rotation: 0.0,
            warning: 0.0,
        }
    }

    /// Advance one tick. `playfield` supplies the vertical bounds the
    /// Teleporting rule needs; `None` skips that roll's effect rather than
    /// faulting. Returns a spawn request when the Splitting roll fires.
    pub fn update(
        &mut self,
        dt: f32,
        playfield: Option<Vec2>,
        rng: &mut Pcg32,
    ) -> Option<SpawnRequest> {
        self.pos.x -= self.speed * dt;

        match self.kind {
            ObstacleKind::Spike | ObstacleKind::Block => None,
            ObstacleKind::Moving => {
                self.pos.y =
                    self.baseline_y + (self.pos.x * MOVING_WAVE_FREQ).sin() * MOVING_WAVE_AMPLITUDE;
                None
            }
            ObstacleKind::Pulsing => {
                self.phase += dt;
                let osc = 0.5 * (1.0 + (TAU * self.phase / PULSE_PERIOD).sin());
                self.scale = PULSE_SCALE_MIN + (PULSE_SCALE_MAX - PULSE_SCALE_MIN) * osc;
                None
            }
            ObstacleKind::Rotating => {
                self.rotation = (self.rotation + ROTATION_RATE * dt).rem_euclid(TAU);
                None
            }
            ObstacleKind::Bouncing => {
                self.phase += dt;
                self.pos.y =
                    self.baseline_y + (TAU * self.phase / BOUNCE_PERIOD).sin() * BOUNCE_AMPLITUDE;
                None
            }
            ObstacleKind::Teleporting => {
                // Roll first so the RNG stream is identical with or
                // without bounds available.
                let roll: f32 = rng.random();
                if roll < TELEPORT_CHANCE {
                    if let Some(screen) = playfield {
                        let lo = TELEPORT_MARGIN;
                        let hi = screen.y - TELEPORT_MARGIN;
                        if hi > lo {
                            self.pos.y = rng.random_range(lo..hi);
                        }
                    }
                }
                None
            }
            ObstacleKind::Splitting => {
                let roll: f32 = rng.random();
                if roll < SPLIT_CHANCE {
                    // Fragments are plain spikes, offset below the parent
                    Some(SpawnRequest {
                        kind: ObstacleKind::Spike,
                        pos: self.pos + Vec2::new(0.0, self.kind.base_size() * 1.5),
                        speed: self.speed,
                    })
                } else {
                    None
                }
            }
            ObstacleKind::Laser => {
                self.phase += dt;
                self.warning = 0.5 + 0.5 * (TAU * self.phase / LASER_PULSE_PERIOD).sin();
                None
            }
        }
    }

    /// Contact hook. Obstacles take no damage and keep all their state;
    /// the coordinator reports the contact and the embedding layer decides
    /// the outcome.
    pub fn handle_collision(&mut self) {}

    /// Clear running behavior accumulators and restore visibility.
    /// Does not reposition - that is the pool's job on reuse.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.scale = 1.0;
        self.rotation = 0.0;
        self.warning = 0.0;
        self.visible = true;
    }
}

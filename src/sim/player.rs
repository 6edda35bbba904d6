//! Player actor
//!
//! The player owns its position and speed; health/fail-state bookkeeping is
//! the embedding layer's concern. Collisions only arm transient visual
//! feedback for the renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{clamp_or_pin, vec2_is_finite};

/// The player actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Movement speed in pixels per second
    pub speed: f32,
    pub visible: bool,
    /// Hit feedback timer for the renderer (seconds remaining, 0 = idle)
    pub hit_flash: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            speed: PLAYER_SPEED,
            visible: true,
            hit_flash: 0.0,
        }
    }
}

impl Player {
    /// Half-extent used for bounds clamping, derived from the collision radius
    pub fn half_extent(&self) -> f32 {
        PLAYER_RADIUS
    }

    /// Apply a movement intent. `direction` is caller-normalized; the
    /// magnitude is not clamped here. Non-finite math is dropped rather
    /// than poisoning the position.
    pub fn apply_movement(&mut self, direction: Vec2, dt: f32) {
        let delta = direction * self.speed * dt;
        if vec2_is_finite(delta) {
            self.pos += delta;
        }
    }

    /// Clamp the position into the legal rectangle of the playfield
    pub fn constrain_to_bounds(&mut self, screen: Vec2) {
        let half = self.half_extent();
        self.pos.x = clamp_or_pin(self.pos.x, half, screen.x - half);
        self.pos.y = clamp_or_pin(self.pos.y, half, screen.y - half);
    }

    /// Advance feedback timers
    pub fn update(&mut self, dt: f32) {
        if self.hit_flash > 0.0 {
            self.hit_flash = (self.hit_flash - dt).max(0.0);
        }
    }

    /// Side-effect-only contact hook: arms the renderer's flash/shake.
    /// Never touches position or any health bookkeeping.
    pub fn handle_collision(&mut self) {
        self.hit_flash = HIT_FLASH_DURATION;
    }

    /// Restore the fixed spawn position and visibility. Idempotent.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_scales_by_speed_and_dt() {
        let mut player = Player::default();
        let start = player.pos;
        player.apply_movement(Vec2::new(1.0, 0.0), 0.5);
        assert!((player.pos.x - (start.x + PLAYER_SPEED * 0.5)).abs() < 1e-3);
        assert!((player.pos.y - start.y).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_movement_is_dropped() {
        let mut player = Player::default();
        let start = player.pos;
        player.apply_movement(Vec2::new(f32::NAN, 0.0), 1.0);
        assert_eq!(player.pos, start);
        player.apply_movement(Vec2::new(f32::INFINITY, 0.0), 1.0);
        assert_eq!(player.pos, start);
    }

    #[test]
    fn test_constrain_to_bounds() {
        let screen = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let mut player = Player::default();

        player.pos = Vec2::new(-50.0, 10_000.0);
        player.constrain_to_bounds(screen);
        assert_eq!(player.pos.x, player.half_extent());
        assert_eq!(player.pos.y, SCREEN_HEIGHT - player.half_extent());

        // Interior positions are untouched
        player.pos = Vec2::new(400.0, 300.0);
        player.constrain_to_bounds(screen);
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_collision_arms_flash_only() {
        let mut player = Player::default();
        let pos = player.pos;
        player.handle_collision();
        assert_eq!(player.hit_flash, HIT_FLASH_DURATION);
        assert_eq!(player.pos, pos);

        // Flash decays with update and clamps at zero
        player.update(HIT_FLASH_DURATION * 2.0);
        assert_eq!(player.hit_flash, 0.0);
    }

    #[test]
    fn test_reset_idempotent() {
        let mut player = Player::default();
        player.pos = Vec2::new(5.0, 5.0);
        player.visible = false;
        player.hit_flash = 0.2;

        player.reset();
        let once = player.clone();
        player.reset();
        assert_eq!(player.pos, once.pos);
        assert_eq!(player.visible, once.visible);
        assert_eq!(player.hit_flash, once.hit_flash);
        assert!(player.visible);
    }
}

//! Boss encounter state machine
//!
//! Health drives a strictly one-directional phase progression
//! `Phase1 -> Phase2 -> Phase3 -> Defeated`. Every hit opens a short
//! invulnerability window so one impact cannot be counted twice; attack
//! cadence shortens per phase. The boss is driven entirely by externally
//! reported damage - it never inspects other entities.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{BOSS_DEFEAT_FADE, BOSS_INVULN_WINDOW, BOSS_SPAWN_X, BOSS_SPAWN_Y};

/// Health ratio below which Phase2 begins
const PHASE2_HEALTH_RATIO: f32 = 0.7;
/// Health ratio below which Phase3 begins
const PHASE3_HEALTH_RATIO: f32 = 0.3;

/// Boss archetypes. Each fixes max health, size, and the attack set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossKind {
    Guardian,
    Destroyer,
    Overlord,
}

impl BossKind {
    pub fn max_health(&self) -> f32 {
        match self {
            Self::Guardian => 1000.0,
            Self::Destroyer => 1500.0,
            Self::Overlord => 2000.0,
        }
    }

    /// Collision half-extent in pixels
    pub fn radius(&self) -> f32 {
        match self {
            Self::Guardian => 48.0,
            Self::Destroyer => 56.0,
            Self::Overlord => 64.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Guardian => "Guardian",
            Self::Destroyer => "Destroyer",
            Self::Overlord => "Overlord",
        }
    }
}

/// Combat stage. Ordering matches progression: later phases compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    Phase1,
    Phase2,
    Phase3,
    Defeated,
}

impl BossPhase {
    /// Seconds between attacks. Zero means no further attacks.
    pub fn attack_interval(&self) -> f32 {
        match self {
            Self::Phase1 => 2.0,
            Self::Phase2 => 1.5,
            Self::Phase3 => 1.0,
            Self::Defeated => 0.0,
        }
    }
}

/// Attack requests the boss hands to the embedding layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    LaserBeam,
    SpikeWave,
    ProjectileBarrage,
    Shockwave,
    MinionSpawn,
    TeleportStrike,
    UltimateAttack,
}

/// One-shot side effects surfaced from `take_damage` for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossEvent {
    /// Escalation (color/glow change). Fires exactly once per transition.
    PhaseChanged { from: BossPhase, to: BossPhase },
    /// Terminal: start of the defeat fade-out
    Defeated,
}

/// The boss entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub kind: BossKind,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub phase: BossPhase,
    /// Seconds since the last attack was issued
    pub attack_timer: f32,
    /// Seconds spent in the current phase
    pub phase_timer: f32,
    pub invulnerable: bool,
    pub invulnerability_timer: f32,
    /// Defeat fade-out remaining (runs once `phase == Defeated`)
    pub fade: f32,
    pub visible: bool,
}

impl Boss {
    pub fn new(kind: BossKind) -> Self {
        Self {
            kind,
            pos: Vec2::new(BOSS_SPAWN_X, BOSS_SPAWN_Y),
            health: kind.max_health(),
            max_health: kind.max_health(),
            phase: BossPhase::Phase1,
            attack_timer: 0.0,
            phase_timer: 0.0,
            invulnerable: false,
            invulnerability_timer: 0.0,
            fade: BOSS_DEFEAT_FADE,
            visible: true,
        }
    }

    /// Apply externally resolved damage. Silent no-op while the
    /// invulnerability window is open or once defeated - no state changes,
    /// no logging. Otherwise clamps health at zero, opens the window, and
    /// evaluates the phase transition.
    pub fn take_damage(&mut self, amount: f32) -> Option<BossEvent> {
        if self.invulnerable || self.phase == BossPhase::Defeated {
            return None;
        }

        self.health = (self.health - amount).max(0.0);
        self.invulnerable = true;
        self.invulnerability_timer = BOSS_INVULN_WINDOW;
        self.advance_phase()
    }

    /// Move to the most advanced phase the current health satisfies.
    /// A single large hit can cross several thresholds at once; the phase
    /// never regresses, and an unchanged phase fires nothing.
    fn advance_phase(&mut self) -> Option<BossEvent> {
        let target = if self.health <= 0.0 {
            BossPhase::Defeated
        } else {
            let ratio = self.health / self.max_health;
            if ratio < PHASE3_HEALTH_RATIO {
                BossPhase::Phase3
            } else if ratio < PHASE2_HEALTH_RATIO {
                BossPhase::Phase2
            } else {
                BossPhase::Phase1
            }
        };

        if target <= self.phase {
            return None;
        }

        let from = self.phase;
        self.phase = target;
        self.phase_timer = 0.0;

        if target == BossPhase::Defeated {
            log::info!("{} defeated", self.kind.name());
            Some(BossEvent::Defeated)
        } else {
            log::info!("{} escalated {:?} -> {:?}", self.kind.name(), from, target);
            Some(BossEvent::PhaseChanged { from, to: target })
        }
    }

    /// Advance timers. Always runs the attack/phase clocks; expires the
    /// invulnerability window; runs the defeat fade once defeated.
    pub fn update(&mut self, dt: f32) {
        self.attack_timer += dt;
        self.phase_timer += dt;

        if self.invulnerable {
            self.invulnerability_timer -= dt;
            if self.invulnerability_timer <= 0.0 {
                self.invulnerable = false;
                self.invulnerability_timer = 0.0;
            }
        }

        if self.phase == BossPhase::Defeated && self.visible {
            self.fade -= dt;
            if self.fade <= 0.0 {
                self.fade = 0.0;
                self.visible = false;
            }
        }
    }

    /// True once the defeat fade has finished and the entity can be removed
    pub fn faded_out(&self) -> bool {
        self.phase == BossPhase::Defeated && !self.visible
    }

    /// True when the cadence timer has elapsed for the current phase
    pub fn ready_to_attack(&self) -> bool {
        let interval = self.phase.attack_interval();
        interval > 0.0 && self.attack_timer >= interval
    }

    /// Select the next attack. Deterministic per (kind, phase) except in
    /// Phase3, where every boss type picks uniformly from its pool.
    /// Returns `None` once defeated.
    pub fn perform_attack(&self, rng: &mut Pcg32) -> Option<AttackKind> {
        match (self.kind, self.phase) {
            (_, BossPhase::Defeated) => None,
            (BossKind::Guardian, BossPhase::Phase1) => Some(AttackKind::LaserBeam),
            (BossKind::Guardian, BossPhase::Phase2) => Some(AttackKind::SpikeWave),
            (BossKind::Guardian, BossPhase::Phase3) => Some(if rng.random::<bool>() {
                AttackKind::LaserBeam
            } else {
                AttackKind::SpikeWave
            }),
            (BossKind::Destroyer, BossPhase::Phase1) => Some(AttackKind::ProjectileBarrage),
            (BossKind::Destroyer, BossPhase::Phase2) => Some(AttackKind::Shockwave),
            (BossKind::Destroyer, BossPhase::Phase3) => Some(if rng.random::<bool>() {
                AttackKind::ProjectileBarrage
            } else {
                AttackKind::Shockwave
            }),
            (BossKind::Overlord, BossPhase::Phase1) => Some(AttackKind::MinionSpawn),
            (BossKind::Overlord, BossPhase::Phase2) => Some(AttackKind::TeleportStrike),
            (BossKind::Overlord, BossPhase::Phase3) => Some(match rng.random_range(0..3) {
                0 => AttackKind::MinionSpawn,
                1 => AttackKind::TeleportStrike,
                _ => AttackKind::UltimateAttack,
            }),
        }
    }

    /// Contact hook. The boss is a hazard to the player; touching it does
    /// not damage the boss (damage arrives only via `take_damage`).
    pub fn handle_collision(&mut self) {}

    /// Full restart: the only way out of Defeated. Idempotent.
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}

//! World coordinator
//!
//! Owns every live entity and drives one tick at a time. Data flows one
//! direction per tick: driver -> coordinator -> entities (`update`), and
//! detector -> coordinator -> entities (queued contact/damage reports).
//! Reports discovered during a tick are queued and applied only after the
//! whole update pass, so a tick never double-applies movement to an
//! entity that was also just hit.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::{AttackKind, Boss, BossEvent, BossKind, BossPhase};
use super::entity::{ContactKind, Entity, EntityArena, EntityId};
use super::obstacle::{Obstacle, ObstacleKind};
use super::player::Player;
use crate::consts::*;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Caller-normalized movement direction for the player
    pub move_dir: Vec2,
}

/// State changes surfaced to the embedding layer, drained per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    ObstacleSpawned(EntityId),
    /// Scrolled off the playfield and reclaimed by the pool
    ObstacleDespawned(EntityId),
    /// The player touched a hazard; outcome (fail state) is external
    PlayerHit,
    BossPhaseChanged { from: BossPhase, to: BossPhase },
    BossAttack(AttackKind),
    BossDefeated,
    /// Defeat fade finished; the boss entity is gone
    BossRemoved,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Playfield dimensions
    pub screen: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    entities: EntityArena,
    player_id: EntityId,
    boss_id: Option<EntityId>,
    /// Contacts reported by the external detector, applied after updates
    pending_contacts: Vec<(EntityId, EntityId)>,
    /// Damage reported by the external attack resolver
    pending_damage: Vec<(EntityId, f32)>,
    events: Vec<WorldEvent>,
}

impl World {
    pub fn new(seed: u64) -> Self {
        let mut entities = EntityArena::new();
        let player_id = entities.insert(Entity::Player(Player::default()));
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            time_ticks: 0,
            entities,
            player_id,
            boss_id: None,
            pending_contacts: Vec::new(),
            pending_damage: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn entities(&self) -> &EntityArena {
        &self.entities
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn boss_id(&self) -> Option<EntityId> {
        self.boss_id
    }

    pub fn player(&self) -> Option<&Player> {
        match self.entities.get(self.player_id) {
            Some(Entity::Player(p)) => Some(p),
            _ => None,
        }
    }

    pub fn boss(&self) -> Option<&Boss> {
        match self.boss_id.and_then(|id| self.entities.get(id)) {
            Some(Entity::Boss(b)) => Some(b),
            _ => None,
        }
    }

    pub fn obstacle_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|(_, e)| matches!(e, Entity::Obstacle(_)))
            .count()
    }

    /// Spawn an obstacle, honoring the population cap. Rejections are
    /// logged and dropped; the requester holds no obstacle ownership.
    pub fn spawn_obstacle(&mut self, kind: ObstacleKind, pos: Vec2, speed: f32) -> Option<EntityId> {
        if self.obstacle_count() >= MAX_OBSTACLES {
            log::warn!("obstacle cap {MAX_OBSTACLES} reached, dropping {kind:?} spawn");
            return None;
        }
        let id = self
            .entities
            .insert(Entity::Obstacle(Obstacle::new(kind, pos, speed)));
        self.events.push(WorldEvent::ObstacleSpawned(id));
        Some(id)
    }

    /// Start a boss encounter, replacing any boss already present
    pub fn spawn_boss(&mut self, kind: BossKind) -> EntityId {
        if let Some(old) = self.boss_id.take() {
            self.entities.remove(old);
        }
        log::info!(
            "boss {} enters with {} health",
            kind.name(),
            kind.max_health()
        );
        let id = self.entities.insert(Entity::Boss(Boss::new(kind)));
        self.boss_id = Some(id);
        id
    }

    /// Report a contact detected by the external physics layer. Applied
    /// after the next update pass; stale handles are silently dropped.
    pub fn queue_contact(&mut self, a: EntityId, b: EntityId) {
        self.pending_contacts.push((a, b));
    }

    /// Report externally resolved damage against an entity
    pub fn queue_damage(&mut self, target: EntityId, amount: f32) {
        self.pending_damage.push((target, amount));
    }

    /// Convenience: damage the current boss, if any
    pub fn queue_boss_damage(&mut self, amount: f32) {
        if let Some(id) = self.boss_id {
            self.pending_damage.push((id, amount));
        }
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the simulation by one fixed timestep
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        self.time_ticks += 1;

        // Movement intent, then bounds clamp
        let screen = self.screen;
        if let Some(Entity::Player(p)) = self.entities.get_mut(self.player_id) {
            p.apply_movement(input.move_dir, dt);
            p.constrain_to_bounds(screen);
        }

        // Update pass: every live entity, stable slot order
        let playfield = Some(screen);
        let mut spawn_requests = Vec::new();
        for id in self.entities.ids() {
            if let Some(entity) = self.entities.get_mut(id) {
                if let Some(req) = entity.update(dt, playfield, &mut self.rng) {
                    spawn_requests.push(req);
                }
            }
        }

        // Boss attack cadence
        if let Some(boss_id) = self.boss_id {
            if let Some(Entity::Boss(boss)) = self.entities.get_mut(boss_id) {
                if boss.ready_to_attack() {
                    boss.attack_timer = 0.0;
                    if let Some(attack) = boss.perform_attack(&mut self.rng) {
                        self.events.push(WorldEvent::BossAttack(attack));
                    }
                }
            }
        }

        // Queued contact reports, applied only after the update pass
        let contacts = std::mem::take(&mut self.pending_contacts);
        for (a, b) in contacts {
            let (Some(kind_a), Some(kind_b)) = (
                self.entities.get(a).map(Entity::contact_kind),
                self.entities.get(b).map(Entity::contact_kind),
            ) else {
                continue;
            };
            if let Some(entity) = self.entities.get_mut(a) {
                entity.handle_collision(kind_b);
            }
            if let Some(entity) = self.entities.get_mut(b) {
                entity.handle_collision(kind_a);
            }
            if kind_a == ContactKind::Player || kind_b == ContactKind::Player {
                self.events.push(WorldEvent::PlayerHit);
            }
        }

        // Queued damage reports
        let damage = std::mem::take(&mut self.pending_damage);
        for (target, amount) in damage {
            if let Some(Entity::Boss(boss)) = self.entities.get_mut(target) {
                match boss.take_damage(amount) {
                    Some(BossEvent::PhaseChanged { from, to }) => {
                        self.events.push(WorldEvent::BossPhaseChanged { from, to });
                    }
                    Some(BossEvent::Defeated) => self.events.push(WorldEvent::BossDefeated),
                    None => {}
                }
            }
        }

        // Honor split requests through the pool cap
        for req in spawn_requests {
            self.spawn_obstacle(req.kind, req.pos, req.speed);
        }

        // Reclaim scrolled-out obstacles and a fully faded boss
        let mut to_remove = Vec::new();
        for (id, entity) in self.entities.iter() {
            match entity {
                Entity::Obstacle(o) if o.pos.x < -DESPAWN_MARGIN => to_remove.push(id),
                Entity::Boss(b) if b.faded_out() => to_remove.push(id),
                _ => {}
            }
        }
        for id in to_remove {
            match self.entities.remove(id) {
                Some(Entity::Boss(_)) => {
                    self.boss_id = None;
                    self.events.push(WorldEvent::BossRemoved);
                }
                Some(Entity::Obstacle(_)) => {
                    self.events.push(WorldEvent::ObstacleDespawned(id));
                }
                _ => {}
            }
        }
    }

    /// Encounter reset: every live entity back to its spawn state, queues
    /// cleared. Safe on a fresh or already-reset world.
    pub fn reset(&mut self) {
        for id in self.entities.ids() {
            if let Some(entity) = self.entities.get_mut(id) {
                entity.reset();
            }
        }
        self.pending_contacts.clear();
        self.pending_damage.clear();
        self.events.clear();
        self.time_ticks = 0;
    }
}

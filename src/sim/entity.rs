//! Entity collection
//!
//! The simulated actor set is closed: player, obstacle, boss. Dispatch is
//! a pattern match over the `Entity` enum, and identity is a generational
//! handle into the arena - two entities are the same entity iff their
//! handles are equal. Stale handles (freed or reused slots) resolve to
//! `None` instead of aliasing a new occupant.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::obstacle::{Obstacle, SpawnRequest};
use super::player::Player;

/// What kind of entity sat on the other side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Player,
    Obstacle,
    Boss,
}

/// Stable handle to an arena slot. Equality is identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

/// A simulated actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Player(Player),
    Obstacle(Obstacle),
    Boss(Boss),
}

impl Entity {
    pub fn position(&self) -> Vec2 {
        match self {
            Self::Player(p) => p.pos,
            Self::Obstacle(o) => o.pos,
            Self::Boss(b) => b.pos,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Self::Player(p) => p.visible,
            Self::Obstacle(o) => o.visible,
            Self::Boss(b) => b.visible,
        }
    }

    pub fn contact_kind(&self) -> ContactKind {
        match self {
            Self::Player(_) => ContactKind::Player,
            Self::Obstacle(_) => ContactKind::Obstacle,
            Self::Boss(_) => ContactKind::Boss,
        }
    }

    /// Advance one tick. Only obstacles ever return a spawn request.
    pub fn update(
        &mut self,
        dt: f32,
        playfield: Option<Vec2>,
        rng: &mut Pcg32,
    ) -> Option<SpawnRequest> {
        match self {
            Self::Player(p) => {
                p.update(dt);
                None
            }
            Self::Obstacle(o) => o.update(dt, playfield, rng),
            Self::Boss(b) => {
                b.update(dt);
                None
            }
        }
    }

    /// Side-effect-only contact hook. Hazards keep their own state; the
    /// player arms its renderer feedback when touched by a hazard.
    pub fn handle_collision(&mut self, other: ContactKind) {
        match self {
            Self::Player(p) => {
                if matches!(other, ContactKind::Obstacle | ContactKind::Boss) {
                    p.handle_collision();
                }
            }
            Self::Obstacle(o) => o.handle_collision(),
            Self::Boss(b) => b.handle_collision(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Player(p) => p.reset(),
            Self::Obstacle(o) => o.reset(),
            Self::Boss(b) => b.reset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Generational arena owning every live entity. Iteration is in slot
/// order, which is stable across a tick and deterministic across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            EntityId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                entity: Some(entity),
            });
            EntityId {
                index,
                generation: 0,
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_mut()
    }

    /// Free a slot and bump its generation so outstanding handles go stale
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation || slot.entity.is_none() {
            return None;
        }
        let entity = slot.entity.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        entity
    }

    /// Live handles in slot order
    pub fn ids(&self) -> Vec<EntityId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.entity.is_some())
            .map(|(index, slot)| EntityId {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let entity = slot.entity.as_ref()?;
                Some((
                    EntityId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    entity,
                ))
            })
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleKind;

    fn spike() -> Entity {
        Entity::Obstacle(Obstacle::new(
            ObstacleKind::Spike,
            Vec2::new(500.0, 300.0),
            100.0,
        ))
    }

    #[test]
    fn test_insert_get_remove() {
        let mut arena = EntityArena::new();
        let id = arena.insert(spike());
        assert_eq!(arena.len(), 1);
        assert!(arena.get(id).is_some());

        let removed = arena.remove(id);
        assert!(removed.is_some());
        assert_eq!(arena.len(), 0);
        assert!(arena.get(id).is_none());
        // Double remove is a no-op
        assert!(arena.remove(id).is_none());
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut arena = EntityArena::new();
        let old = arena.insert(spike());
        arena.remove(old);

        // Slot is reused with a new generation
        let new = arena.insert(spike());
        assert_ne!(old, new);
        assert!(arena.get(old).is_none());
        assert!(arena.get(new).is_some());
    }

    #[test]
    fn test_ids_in_slot_order() {
        let mut arena = EntityArena::new();
        let a = arena.insert(spike());
        let b = arena.insert(spike());
        let c = arena.insert(spike());
        arena.remove(b);
        assert_eq!(arena.ids(), vec![a, c]);
    }

    #[test]
    fn test_enum_dispatch() {
        use crate::sim::boss::{Boss, BossKind};
        use rand::SeedableRng;

        let mut player = Entity::Player(Player::default());
        let mut obstacle = spike();
        let mut boss = Entity::Boss(Boss::new(BossKind::Guardian));

        assert_eq!(player.contact_kind(), ContactKind::Player);
        assert_eq!(obstacle.contact_kind(), ContactKind::Obstacle);
        assert_eq!(boss.contact_kind(), ContactKind::Boss);
        assert!(player.is_visible() && obstacle.is_visible() && boss.is_visible());

        // A hazard contact arms the player flash; hazards keep their state
        player.handle_collision(ContactKind::Obstacle);
        match &player {
            Entity::Player(p) => assert!(p.hit_flash > 0.0),
            _ => unreachable!(),
        }
        let before = boss.position();
        boss.handle_collision(ContactKind::Player);
        assert_eq!(boss.position(), before);

        // Obstacles scroll through the enum dispatch too
        let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
        let x0 = obstacle.position().x;
        obstacle.update(1.0, None, &mut rng);
        assert!((obstacle.position().x - (x0 - 100.0)).abs() < 1e-3);
    }

    #[test]
    fn test_handle_equality_is_identity() {
        let mut arena = EntityArena::new();
        // Two value-identical obstacles are still distinct entities
        let a = arena.insert(spike());
        let b = arena.insert(spike());
        assert_ne!(a, b);
    }
}

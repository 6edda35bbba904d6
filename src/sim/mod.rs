//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, threaded explicitly through update calls
//! - Stable iteration order (by entity slot)
//! - No rendering or platform dependencies
//!
//! Cross-entity effects are values: obstacles return spawn requests, the
//! boss returns phase/attack events, and externally detected contacts are
//! queued on the world and applied between update passes. Entities never
//! mutate each other directly.

pub mod boss;
pub mod entity;
pub mod obstacle;
pub mod player;
pub mod world;

pub use boss::{AttackKind, Boss, BossEvent, BossKind, BossPhase};
pub use entity::{ContactKind, Entity, EntityArena, EntityId};
pub use obstacle::{Obstacle, ObstacleKind, SpawnRequest};
pub use player::Player;
pub use world::{TickInput, World, WorldEvent};

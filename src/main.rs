//! Obstacle Dash headless demo
//!
//! Runs a scripted encounter without a renderer: spawns a hazard field and
//! a boss, feeds the world synthetic movement intents and damage reports,
//! logs every surfaced event, and dumps a JSON snapshot at the end.

use glam::Vec2;

use obstacle_dash::consts::*;
use obstacle_dash::sim::{BossKind, ObstacleKind, TickInput, World, WorldEvent};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xDA5E);
    log::info!("starting headless encounter with seed {seed}");

    let mut world = World::new(seed);

    for (i, kind) in [
        ObstacleKind::Spike,
        ObstacleKind::Moving,
        ObstacleKind::Bouncing,
        ObstacleKind::Teleporting,
        ObstacleKind::Splitting,
        ObstacleKind::Laser,
    ]
    .into_iter()
    .enumerate()
    {
        let y = 100.0 + i as f32 * 80.0;
        world.spawn_obstacle(kind, Vec2::new(SCREEN_WIDTH + i as f32 * 120.0, y), OBSTACLE_BASE_SPEED);
    }
    world.spawn_boss(BossKind::Guardian);

    // 60 seconds of simulated time at a 60 fps frame cadence, stepped
    // through the fixed-timestep accumulator like a real frame loop
    const FRAME_DT: f32 = 1.0 / 60.0;
    let max_frames = (60.0 / FRAME_DT) as u64;
    let mut accumulator = 0.0f32;
    let mut attacks = 0u32;
    let mut hits_landed = 0u32;
    'run: for frame in 0..max_frames {
        let t = frame as f32 * FRAME_DT;
        let input = TickInput {
            move_dir: Vec2::new(0.0, (t * 1.3).sin()),
        };

        // Scripted player offense: one connected attack every 0.75 s
        if frame % ((0.75 / FRAME_DT) as u64) == 0 {
            world.queue_boss_damage(35.0);
            hits_landed += 1;
        }

        accumulator += FRAME_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            world.tick(&input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in world.drain_events() {
            match event {
                WorldEvent::BossAttack(kind) => {
                    attacks += 1;
                    log::info!("boss attack: {kind:?}");
                }
                WorldEvent::BossPhaseChanged { from, to } => {
                    log::info!("boss phase {from:?} -> {to:?}");
                }
                WorldEvent::BossDefeated => log::info!("boss defeated at t={t:.2}s"),
                WorldEvent::BossRemoved => {
                    log::info!("boss removed, encounter over");
                    break 'run;
                }
                WorldEvent::PlayerHit => log::debug!("player hit"),
                WorldEvent::ObstacleSpawned(id) => log::debug!("obstacle spawned: {id:?}"),
                WorldEvent::ObstacleDespawned(id) => log::debug!("obstacle reclaimed: {id:?}"),
            }
        }
    }

    println!(
        "encounter finished after {} ticks ({} boss attacks, {} player hits queued)",
        world.time_ticks, attacks, hits_landed
    );
    match serde_json::to_string_pretty(&world) {
        Ok(snapshot) => println!("{snapshot}"),
        Err(e) => log::error!("snapshot failed: {e}"),
    }
}

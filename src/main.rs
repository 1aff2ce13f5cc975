use anyhow::Result;
use bloksel_core::{
    player::MoveKey, EngineConfig, PhysicsHandler, Player, World,
};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{path::Path, time::Duration};

const FRAME_RATE: f32 = 60.0;
const SIMULATED_SECONDS: usize = 3;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(Path::new(&path))?,
        None => EngineConfig::default(),
    };

    let mut world = World::new(&config)?;
    world.generate(config.worldgen.seed, config.worldgen.clone())?;

    let mut player = Player::new(&config.gameplay)?;
    let [spawn_x, _, spawn_z] = config.gameplay.spawn_point;
    if let Some(surface) = world.surface_height(spawn_x.floor() as i32, spawn_z.floor() as i32) {
        // Drop in from one block above the top face of the surface block.
        player.position.y = surface as f32 + 0.5 + player.height + 1.0;
    }
    info!("Spawned player at {:?}", player.position);

    let mut physics = PhysicsHandler::new(&config.physics)?;
    player.input.handle_key(MoveKey::Forward, true);

    let frame = Duration::from_secs_f32(1.0 / FRAME_RATE);
    let mut steps = 0;
    for second in 1..=SIMULATED_SECONDS {
        for _ in 0..FRAME_RATE as usize {
            steps += physics.update(frame, &mut player, &world);
        }
        info!(
            "t={}s position={:?} on_ground={} contacts={}",
            second,
            player.position,
            player.on_ground,
            physics.last_step().contacts.len()
        );
    }

    info!(
        "Simulated {} steps, {} chunks visible from the player",
        steps,
        world.visible_chunks(player.position).len()
    );
    Ok(())
}

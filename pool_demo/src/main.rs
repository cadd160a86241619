//! Pool demo application
//!
//! Spawns and despawns pooled projectiles and effects over a few simulated
//! frames and reports how the pools grew.

use pool_system::foundation::logging;
use pool_system::prelude::*;
use rand::Rng;

const FRAMES: u32 = 30;
const BULLET_LIFETIME: u32 = 6;

/// Instances that deal damage on contact
struct Damaging;
impl Capability for Damaging {}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("Failed to load pool settings: {0}")]
    Config(#[from] ConfigError),

    #[error("Pool operation failed: {0}")]
    Pool(#[from] PoolError),
}

/// A spawned object and the frame it expires on
struct Live {
    instance: NodeKey,
    expires: u32,
}

fn catalog(name: &str) -> Option<Prefab> {
    match name {
        "Bullet" => Some(Prefab::new("Bullet").with_capability::<Damaging>()),
        "Explosion" => Some(Prefab::new("Explosion")),
        "Debris" => Some(Prefab::new("Debris")),
        _ => None,
    }
}

fn run() -> Result<(), DemoError> {
    let settings_path = concat!(env!("CARGO_MANIFEST_DIR"), "/pools.toml");
    let settings = PoolSettings::load_from_file(settings_path)?;

    let mut scene = SceneHost::new();
    let holding = scene.create_container("Pool");
    let mut pools = MultiKeyPool::new(holding);

    let report = pools.initialize_all(settings.resolve(catalog), &mut scene);
    for err in &report.errors {
        log::warn!("Skipped pool configuration: {}", err);
    }

    let mut rng = rand::thread_rng();
    let mut live: Vec<Live> = Vec::new();

    for frame in 0..FRAMES {
        // Expire everything whose lifetime ran out this frame
        let (expired, remaining): (Vec<Live>, Vec<Live>) =
            live.into_iter().partition(|object| object.expires <= frame);
        live = remaining;
        for object in expired {
            pools.release(object.instance, &mut scene)?;
        }

        for _ in 0..rng.gen_range(0..4) {
            let bullet = pools.acquire_typed::<Damaging>("bullet", &mut scene)?;
            live.push(Live {
                instance: bullet.instance(),
                expires: frame + BULLET_LIFETIME,
            });
        }

        if rng.gen_bool(0.2) {
            let explosion = pools.acquire("explosion", &mut scene)?;
            live.push(Live {
                instance: explosion,
                expires: frame + 2,
            });
        }

        // A misconfigured pool is a reported condition, not a crash
        if let Err(err) = pools.acquire("missile", &mut scene) {
            log::debug!("Frame {}: {}", frame, err);
        }

        log::debug!("Frame {}: {} live objects", frame, live.len());
    }

    let stats = pools.stats();
    log::info!(
        "{} pools, {} instances ({} active), {} acquired, {} released, {} grown",
        stats.pools,
        stats.total_instances,
        stats.active_instances,
        stats.total_acquired,
        stats.total_released,
        stats.total_grown
    );
    for key in pools.keys() {
        if let Some(pool) = pools.pool(key) {
            log::info!("  {:<10} {:>3} instances, {:>3} active", key, pool.len(), pool.active_count());
        }
    }

    pools.destroy_all(&mut scene);
    log::info!("Scene left with {} nodes", scene.len());
    Ok(())
}

fn main() {
    logging::init();

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

//! Pattern emitters — turn a firing intent into pooled bullet entities.
//!
//! One `Emitter` covers every pattern shape; the shape is picked by
//! configuration, not by subclassing. Emitters track the bullets they have
//! in flight so a phase can sweep or retarget them later.

use std::collections::BTreeSet;

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use barrage_core::components::{
    Bullet, Kinematics, Lifespan, Orientation, Rotation, TriggerState,
};
use barrage_core::config::{BatchFire, EmitterConfig, TriggerConfig};
use barrage_core::enums::{AimMode, BulletType, Pattern, PickupKind, RotationMode};
use barrage_core::events::GameEvent;
use barrage_core::types::{heading_degrees, Position, Velocity};

use barrage_patterns::aim::resolve_aim;
use barrage_patterns::spread::launch_directions;

use crate::boss::ScoreState;
use crate::pool::ObjectPool;

/// Index into the engine's emitter table. Bullets hold this instead of a
/// reference, so detaching an owner is a plain value assignment.
pub type EmitterId = usize;

/// Per-emission rotation override. Exactly one rotation mode applies to a
/// volley: the emitter's configured mode, an explicit spin pair, or
/// face-direction-of-travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotRotation {
    /// Use the emitter's configured rotation mode.
    Inherit,
    /// Orient each bullet along its direction of travel.
    FaceTravel,
    /// Spin each bullet at the given speed/acceleration (degrees/s, /s²).
    Spin { speed: f32, acceleration: f32 },
}

/// One in-flight burst sequence started by a single `shoot` call.
#[derive(Debug, Clone, Copy)]
struct BatchRun {
    volleys_left: u32,
    cooldown_left: f32,
}

/// A configured pattern emitter with its live-bullet set.
#[derive(Debug)]
pub struct Emitter {
    pub id: EmitterId,
    pub bullet_type: BulletType,
    /// Position relative to the boss.
    pub offset: Vec2,
    pub damage: i32,
    pub rotation: RotationMode,
    pub aim: AimMode,
    /// Degrees per second applied to a fixed aim angle.
    pub aim_rotation_speed: f32,
    pub pattern: Pattern,
    pub batch: Option<BatchFire>,
    pub gravity: bool,
    pub lifespan_secs: Option<f32>,
    pub trigger: Option<TriggerConfig>,

    /// Current launch speed; diverges from the original under scaling.
    pub speed: f32,
    /// Current launch acceleration; diverges under scaling.
    pub acceleration: f32,
    original_speed: f32,
    original_acceleration: f32,

    /// Inactive emitters ignore fire requests.
    pub active: bool,
    /// Explicit lock-on target; the player when unset.
    pub target: Option<Vec2>,

    // Ordered so sweeps and recalls visit bullets deterministically.
    live: BTreeSet<Entity>,
    batch_runs: Vec<BatchRun>,
}

impl Emitter {
    pub fn from_config(id: EmitterId, config: &EmitterConfig) -> Self {
        Self {
            id,
            bullet_type: config.bullet_type,
            offset: config.offset,
            damage: config.damage,
            rotation: config.rotation,
            aim: config.aim,
            aim_rotation_speed: config.aim_rotation_speed,
            pattern: config.pattern,
            batch: config.batch,
            gravity: config.gravity,
            lifespan_secs: config.lifespan_secs,
            trigger: config.trigger.clone(),
            speed: config.speed,
            acceleration: config.acceleration,
            original_speed: config.speed,
            original_acceleration: config.acceleration,
            active: false,
            target: None,
            live: BTreeSet::new(),
            batch_runs: Vec::new(),
        }
    }

    /// Launch speed recorded at construction, the baseline for scaling.
    pub fn original_speed(&self) -> f32 {
        self.original_speed
    }

    /// Launch acceleration recorded at construction.
    pub fn original_acceleration(&self) -> f32 {
        self.original_acceleration
    }

    /// Restore speed/acceleration to their baseline and drop any pending
    /// burst sequences. Called when a phase (re-)initializes.
    pub fn reset_to_original(&mut self) {
        self.speed = self.original_speed;
        self.acceleration = self.original_acceleration;
        self.batch_runs.clear();
    }

    /// Drop pending burst sequences without firing their remaining volleys.
    pub fn clear_batches(&mut self) {
        self.batch_runs.clear();
    }

    /// Forget all live bullets and deactivate. Used at encounter teardown,
    /// after the pool has already despawned the handles.
    pub fn retire(&mut self) {
        self.active = false;
        self.live.clear();
        self.batch_runs.clear();
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Visit every live bullet handle (for recall/retarget effects).
    pub fn for_each_live(&self, mut f: impl FnMut(Entity)) {
        for &handle in &self.live {
            f(handle);
        }
    }

    /// Remove a bullet from the live set; true if it was tracked.
    pub fn detach(&mut self, handle: Entity) -> bool {
        self.live.remove(&handle)
    }

    /// Slew a fixed aim angle. Lock-on emitters aim live and ignore this.
    pub fn advance_aim(&mut self, dt: f32) {
        if self.aim_rotation_speed != 0.0 {
            if let AimMode::Fixed { angle_deg } = &mut self.aim {
                *angle_deg = (*angle_deg + self.aim_rotation_speed * dt).rem_euclid(360.0);
            }
        }
    }

    /// Fire one emission with the configured rotation mode. With a batch
    /// configured this starts a burst: the first volley now, the rest on a
    /// cooldown advanced by [`advance_batches`](Self::advance_batches).
    pub fn shoot(
        &mut self,
        world: &mut World,
        pool: &mut ObjectPool<BulletType>,
        rng: &mut ChaCha8Rng,
        boss_position: Vec2,
        player_position: Vec2,
    ) {
        self.shoot_with(
            ShotRotation::Inherit,
            world,
            pool,
            rng,
            boss_position,
            player_position,
        );
    }

    /// Fire one emission with an explicit rotation override.
    pub fn shoot_with(
        &mut self,
        rotation: ShotRotation,
        world: &mut World,
        pool: &mut ObjectPool<BulletType>,
        rng: &mut ChaCha8Rng,
        boss_position: Vec2,
        player_position: Vec2,
    ) {
        if !self.active {
            return;
        }
        self.fire_volley(rotation, world, pool, rng, boss_position, player_position);
        if let Some(batch) = self.batch {
            if batch.count > 1 {
                self.batch_runs.push(BatchRun {
                    volleys_left: batch.count - 1,
                    cooldown_left: batch.cooldown_secs,
                });
            }
        }
    }

    /// Advance pending burst sequences, firing volleys whose cooldown
    /// elapsed. Each `shoot` call gets its own independent sequence.
    pub fn advance_batches(
        &mut self,
        world: &mut World,
        pool: &mut ObjectPool<BulletType>,
        rng: &mut ChaCha8Rng,
        boss_position: Vec2,
        player_position: Vec2,
        dt: f32,
    ) {
        if self.batch_runs.is_empty() {
            return;
        }
        let cooldown = self.batch.map_or(0.0, |b| b.cooldown_secs);
        let mut runs = std::mem::take(&mut self.batch_runs);
        for run in &mut runs {
            run.cooldown_left -= dt;
            while run.cooldown_left <= 0.0 && run.volleys_left > 0 {
                self.fire_volley(
                    ShotRotation::Inherit,
                    world,
                    pool,
                    rng,
                    boss_position,
                    player_position,
                );
                run.volleys_left -= 1;
                run.cooldown_left += cooldown;
            }
        }
        runs.retain(|run| run.volleys_left > 0);
        self.batch_runs = runs;
    }

    /// Dispose every live bullet, spawning a bonus pickup at each one's
    /// last position. Nothing is silently discarded.
    pub fn convert_live_to_pickups(
        &mut self,
        world: &mut World,
        pool: &mut ObjectPool<BulletType>,
        events: &mut Vec<GameEvent>,
        score: &mut ScoreState,
    ) {
        let handles = std::mem::take(&mut self.live);
        for handle in handles {
            if let Some((_owner, position)) = release_to_pool(world, pool, handle) {
                events.push(GameEvent::PickupSpawned {
                    kind: PickupKind::BonusScore,
                    position,
                });
                score.pickups_spawned += 1;
            }
        }
    }

    /// Fire one volley: resolve the aim, fan it out, and emit one bullet
    /// per direction. Assumes a validated configuration.
    fn fire_volley(
        &mut self,
        rotation: ShotRotation,
        world: &mut World,
        pool: &mut ObjectPool<BulletType>,
        rng: &mut ChaCha8Rng,
        boss_position: Vec2,
        player_position: Vec2,
    ) {
        if !self.active {
            return;
        }
        let origin = boss_position + self.offset;
        let aim = resolve_aim(&self.aim, origin, self.target, player_position);

        let mut directions = Vec::new();
        launch_directions(&self.pattern, aim, rng, &mut directions);

        let mode = match rotation {
            ShotRotation::Inherit => self.rotation,
            ShotRotation::FaceTravel => RotationMode::FaceTravel { offset_deg: 0.0 },
            ShotRotation::Spin {
                speed,
                acceleration,
            } => RotationMode::ConstantSpin {
                speed,
                acceleration,
            },
        };

        for direction in directions {
            let handle = self.checkout_bullet(world, pool);
            self.init_bullet(world, handle, origin, direction, mode);
            self.live.insert(handle);
        }
    }

    /// Reuse a pooled handle of our bullet type, or grow the pool.
    fn checkout_bullet(&self, world: &mut World, pool: &mut ObjectPool<BulletType>) -> Entity {
        match pool.acquire(self.bullet_type) {
            Some(handle) => handle,
            None => {
                pool.create_and_register(self.bullet_type, || spawn_blank(world, self.bullet_type))
            }
        }
    }

    /// (Re-)initialize a checked-out bullet's components for this emitter.
    fn init_bullet(
        &self,
        world: &mut World,
        handle: Entity,
        origin: Vec2,
        direction: Vec2,
        mode: RotationMode,
    ) {
        if let Ok(mut bullet) = world.get::<&mut Bullet>(handle) {
            bullet.damage = self.damage;
            bullet.grazed = false;
            bullet.owner = Some(self.id);
            bullet.active = true;
        }
        if let Ok(mut position) = world.get::<&mut Position>(handle) {
            position.0 = origin;
        }
        if let Ok(mut velocity) = world.get::<&mut Velocity>(handle) {
            velocity.0 = direction * self.speed;
        }
        if let Ok(mut kinematics) = world.get::<&mut Kinematics>(handle) {
            kinematics.acceleration = self.acceleration;
            kinematics.gravity = self.gravity;
        }
        if let Ok(mut rotation) = world.get::<&mut Rotation>(handle) {
            rotation.mode = mode;
        }
        let angle_deg = match mode {
            RotationMode::FaceTravel { offset_deg } => heading_degrees(direction) - offset_deg,
            _ => 0.0,
        };
        if let Ok(mut orientation) = world.get::<&mut Orientation>(handle) {
            orientation.angle_deg = angle_deg;
        }

        match self.lifespan_secs {
            Some(total) => {
                let _ = world.insert_one(handle, Lifespan::new(total));
            }
            None => {
                let _ = world.remove_one::<Lifespan>(handle);
            }
        }
        match &self.trigger {
            Some(config) => {
                let _ = world.insert_one(handle, TriggerState::new(config.clone()));
            }
            None => {
                let _ = world.remove_one::<TriggerState>(handle);
            }
        }
    }
}

/// Spawn an inactive bullet entity with the full component set. Used to
/// grow a pool and to prewarm it.
pub fn spawn_blank(world: &mut World, bullet_type: BulletType) -> Entity {
    world.spawn((
        Bullet {
            bullet_type,
            damage: 0,
            grazed: false,
            owner: None,
            active: false,
        },
        Position::default(),
        Velocity::default(),
        Kinematics::default(),
        Rotation::default(),
        Orientation::default(),
    ))
}

/// Return a live bullet to the pool: mark it inactive, clear its per-flight
/// flags, and release the handle. Returns the detached owner and the last
/// position, or `None` if the bullet was already released (making every
/// disposal path idempotent).
pub fn release_to_pool(
    world: &mut World,
    pool: &mut ObjectPool<BulletType>,
    handle: Entity,
) -> Option<(Option<EmitterId>, Vec2)> {
    let (bullet_type, owner) = {
        let mut bullet = world.get::<&mut Bullet>(handle).ok()?;
        if !bullet.active {
            return None;
        }
        bullet.active = false;
        bullet.grazed = false;
        (bullet.bullet_type, bullet.owner.take())
    };
    if let Ok(mut velocity) = world.get::<&mut Velocity>(handle) {
        velocity.0 = Vec2::ZERO;
    }
    let position = world.get::<&Position>(handle).map(|p| p.0).unwrap_or_default();
    pool.release(bullet_type, handle);
    Some((owner, position))
}

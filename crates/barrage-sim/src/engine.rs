//! Simulation engine — the core of the encounter.
//!
//! `SimulationEngine` owns the hecs ECS world, the bullet pool, the boss
//! and its spell cards, processes hit reports from the host's collision
//! layer, runs all systems, and produces `EncounterSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::Bullet;
use barrage_core::config::{EncounterConfig, ZoneConfig};
use barrage_core::constants::{DT, GRAZE_REWARD, POOL_PREWARM_PER_TYPE};
use barrage_core::enums::{BulletType, CueId, DisposalReason, PickupKind};
use barrage_core::events::GameEvent;
use barrage_core::state::EncounterSnapshot;
use barrage_core::types::{Position, SimTime, Velocity};

use crate::boss::{self, Boss, ScoreState};
use crate::emitter::{self, Emitter, EmitterId};
use crate::pool::ObjectPool;
use crate::spellcard::{self, SpellCard};
use crate::systems;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// The encounter to run, already authored as data.
    pub encounter: EncounterConfig,
}

/// Hit reports delivered by the host's collision layer, processed at the
/// next tick boundary.
#[derive(Debug, Clone, Copy)]
pub enum HitReport {
    /// A player projectile struck the boss. The handle is present when the
    /// host routes player shots through the bullet pool.
    BossHit {
        damage: i32,
        bullet: Option<Entity>,
    },
    /// One of our bullets struck the player.
    PlayerHit { bullet: Entity },
    /// The player grazed a bullet. Rewarded once per bullet.
    Graze { bullet: Entity },
}

/// The simulation engine. Owns the ECS world and all encounter state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    pool: ObjectPool<BulletType>,
    emitters: Vec<Emitter>,
    cards: Vec<SpellCard>,
    boss: Boss,
    zones: Vec<ZoneConfig>,
    player_position: Vec2,
    hit_queue: VecDeque<HitReport>,
    events: Vec<GameEvent>,
    score: ScoreState,
    active: bool,
    dispose_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Build an engine from a validated configuration. A configuration
    /// fault is reported here, before anything starts.
    pub fn new(config: SimConfig) -> Result<Self, String> {
        config.encounter.validate()?;
        let encounter = config.encounter;

        let mut world = World::new();
        let mut pool = ObjectPool::new();

        // One emitter table for the whole encounter; cards refer by index.
        let mut emitters: Vec<Emitter> = Vec::new();
        let mut cards = Vec::with_capacity(encounter.phases.len());
        for phase in &encounter.phases {
            let mut option_emitters = Vec::with_capacity(phase.options.len());
            for option in &phase.options {
                let mut ids: Vec<EmitterId> = Vec::with_capacity(option.emitters.len());
                for emitter_config in &option.emitters {
                    let id = emitters.len();
                    emitters.push(Emitter::from_config(id, emitter_config));
                    ids.push(id);
                }
                option_emitters.push(ids);
            }
            cards.push(SpellCard::from_config(phase, option_emitters));
        }

        for bullet_type in encounter.bullet_types() {
            for _ in 0..POOL_PREWARM_PER_TYPE {
                let handle =
                    pool.create_and_register(bullet_type, || emitter::spawn_blank(&mut world, bullet_type));
                pool.release(bullet_type, handle);
            }
        }

        let lives = encounter
            .lives
            .unwrap_or_else(|| encounter.phases.len().saturating_sub(1) as u32);
        let boss = Boss::new(
            encounter.name.clone(),
            encounter.max_health,
            lives,
            encounter.boss_position,
        );

        Ok(Self {
            world,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            pool,
            emitters,
            cards,
            boss,
            zones: encounter.zones,
            player_position: Vec2::ZERO,
            hit_queue: VecDeque::new(),
            events: Vec::new(),
            score: ScoreState::default(),
            active: false,
            dispose_buffer: Vec::new(),
        })
    }

    /// Begin the encounter: reset the boss and invoke the first card.
    pub fn start(&mut self) {
        if self.active || self.boss.defeated {
            return;
        }
        self.active = true;
        boss::initialize(
            &mut self.boss,
            &mut self.cards,
            &mut self.emitters,
            &mut self.rng,
            &mut self.events,
        );
    }

    /// Queue a hit report for processing at the next tick boundary.
    pub fn report(&mut self, hit: HitReport) {
        self.hit_queue.push_back(hit);
    }

    /// Where the player avatar currently is (lock-on and retarget aim at
    /// this). Owned by the host's input/movement code.
    pub fn set_player_position(&mut self, position: Vec2) {
        self.player_position = position;
    }

    /// Where the boss currently is. Emitter offsets are relative to this.
    pub fn set_boss_position(&mut self, position: Vec2) {
        self.boss.position = position;
    }

    /// Whether a boss encounter is currently running. Hosts read this to
    /// suppress ordinary enemy spawns.
    pub fn encounter_active(&self) -> bool {
        self.active
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> EncounterSnapshot {
        self.process_hits();

        if self.active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            &self.time,
            &self.boss,
            &self.cards,
            &self.score,
            events,
            self.active,
        )
    }

    /// Dispose one bullet: detach it from its owner, reset it, and return
    /// the handle to the pool. Safe to call from any path in the same tick;
    /// an already-disposed handle is a no-op. Returns whether the bullet
    /// was live.
    pub fn dispose(&mut self, handle: Entity, reason: DisposalReason) -> bool {
        match emitter::release_to_pool(&mut self.world, &mut self.pool, handle) {
            Some((owner, position)) => {
                if let Some(index) = owner {
                    self.emitters[index].detach(handle);
                }
                if reason == DisposalReason::PhaseSweep {
                    self.events.push(GameEvent::PickupSpawned {
                        kind: PickupKind::BonusScore,
                        position,
                    });
                    self.score.pickups_spawned += 1;
                }
                true
            }
            None => false,
        }
    }

    /// Point every live bullet of an emitter toward `toward`, keeping each
    /// bullet's speed unless an override is given (recall effects).
    pub fn redirect_live_bullets(
        &mut self,
        emitter: EmitterId,
        toward: Vec2,
        speed: Option<f32>,
    ) {
        let mut handles = Vec::new();
        self.emitters[emitter].for_each_live(|handle| handles.push(handle));
        for handle in handles {
            let position = match self.world.get::<&Position>(handle) {
                Ok(position) => position.0,
                Err(_) => continue,
            };
            let direction = (toward - position).try_normalize().unwrap_or(Vec2::Y);
            if let Ok(mut velocity) = self.world.get::<&mut Velocity>(handle) {
                let magnitude = speed.unwrap_or_else(|| velocity.0.length());
                velocity.0 = direction * magnitude;
            }
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn pool(&self) -> &ObjectPool<BulletType> {
        &self.pool
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn cards(&self) -> &[SpellCard] {
        &self.cards
    }

    /// Process all queued hit reports.
    fn process_hits(&mut self) {
        while let Some(hit) = self.hit_queue.pop_front() {
            match hit {
                HitReport::BossHit { damage, bullet } => {
                    if self.active {
                        boss::apply_boss_hit(
                            &mut self.boss,
                            &mut self.cards,
                            &mut self.emitters,
                            &mut self.world,
                            &mut self.pool,
                            &mut self.rng,
                            &mut self.events,
                            &mut self.score,
                            damage,
                        );
                    }
                    if let Some(handle) = bullet {
                        self.dispose(handle, DisposalReason::HitBoss);
                    }
                    if self.boss.defeated && self.active {
                        self.teardown();
                    }
                }
                HitReport::PlayerHit { bullet } => {
                    if self.dispose(bullet, DisposalReason::HitPlayer) {
                        self.events.push(GameEvent::Cue {
                            cue: CueId::PlayerHit,
                        });
                    }
                }
                HitReport::Graze { bullet } => self.handle_graze(bullet),
            }
        }
    }

    /// Reward a graze once per bullet checkout.
    fn handle_graze(&mut self, handle: Entity) {
        let rewarded = match self.world.get::<&mut Bullet>(handle) {
            Ok(mut bullet) => {
                if bullet.active && !bullet.grazed {
                    bullet.grazed = true;
                    true
                } else {
                    false
                }
            }
            Err(_) => false,
        };
        if rewarded {
            self.score.award(&mut self.events, GRAZE_REWARD);
            self.score.grazes += 1;
            self.events.push(GameEvent::Cue { cue: CueId::Graze });
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Boss timers (invulnerability window, phase time budget)
        boss::advance_timers(
            &mut self.boss,
            &mut self.cards,
            &mut self.emitters,
            &mut self.world,
            &mut self.pool,
            &mut self.rng,
            &mut self.events,
            &mut self.score,
            DT,
        );
        if self.boss.defeated {
            self.teardown();
            return;
        }

        // 2. Aim slewing for fixed-angle emitters
        for emitter in &mut self.emitters {
            emitter.advance_aim(DT);
        }

        // 3. Fire loops (only the invoking card has running loops)
        for card in &mut self.cards {
            spellcard::advance_fire_loops(
                card,
                &mut self.emitters,
                &mut self.world,
                &mut self.pool,
                &mut self.rng,
                self.boss.position,
                self.player_position,
                DT,
            );
        }

        // 4. Burst sequences started by earlier volleys
        for emitter in &mut self.emitters {
            emitter.advance_batches(
                &mut self.world,
                &mut self.pool,
                &mut self.rng,
                self.boss.position,
                self.player_position,
                DT,
            );
        }

        // 5. Motion integration + lifespan expiry
        let mut buffer = std::mem::take(&mut self.dispose_buffer);
        systems::motion::run(&mut self.world, DT, &mut buffer);
        for handle in buffer.drain(..) {
            self.dispose(handle, DisposalReason::LifespanExpired);
        }

        // 6. Effect zones
        systems::effect_zone::run(&mut self.world, &self.zones, self.player_position);

        // 7. Boundary cleanup
        systems::cleanup::run(&mut self.world, &mut buffer);
        for handle in buffer.drain(..) {
            self.dispose(handle, DisposalReason::OutOfBounds);
        }
        self.dispose_buffer = buffer;
    }

    /// Retire the encounter: despawn every pooled bullet and deactivate.
    fn teardown(&mut self) {
        for key in self.pool.type_keys() {
            for handle in self.pool.clear_type(key) {
                let _ = self.world.despawn(handle);
            }
        }
        for emitter in &mut self.emitters {
            emitter.retire();
        }
        self.active = false;
    }
}

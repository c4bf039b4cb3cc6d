//! Spell cards — named attack phases and their cooperative fire loops.
//!
//! A card owns one or more fire options. While the card is invoking, every
//! option runs an independent loop: wait for its activation delay, then
//! fire all of its emitters and wait out the fire interval, over and over.
//! The loops are plain timers advanced by the tick — flipping `invoking`
//! off lets each loop finish its current wait and stop at the next check.

use glam::Vec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use barrage_core::config::PhaseConfig;
use barrage_core::enums::BulletType;
use barrage_core::events::GameEvent;

use crate::boss::ScoreState;
use crate::emitter::{Emitter, EmitterId};
use crate::pool::ObjectPool;

/// Cooperative fire-loop state for one option.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FireLoop {
    /// Card not invoked yet.
    Idle,
    /// Waiting out the activation delay before the first volley.
    Delay { remaining: f32 },
    /// Waiting out the fire interval between volleys.
    Interval { remaining: f32 },
    /// Loop observed `invoking == false` and exited.
    Stopped,
}

/// One fire option: a set of emitters sharing a fire loop and scaling
/// parameters.
#[derive(Debug)]
pub struct SpellOption {
    pub emitters: Vec<EmitterId>,
    /// Current seconds between volleys; diverges from the original under
    /// health scaling.
    pub fire_interval: f32,
    pub activation_delay: f32,
    pub scale_by_health: bool,
    pub fire_interval_delta: f32,
    pub bullet_speed_delta: f32,
    pub bullet_acceleration_delta: f32,
    original_fire_interval: f32,
    state: FireLoop,
}

impl SpellOption {
    /// Fire interval recorded at construction, the baseline for scaling.
    pub fn original_fire_interval(&self) -> f32 {
        self.original_fire_interval
    }

    /// Whether this option's fire loop has stopped.
    pub fn stopped(&self) -> bool {
        self.state == FireLoop::Stopped
    }
}

/// A named attack phase.
#[derive(Debug)]
pub struct SpellCard {
    pub name: String,
    /// Time budget in seconds; `None` runs until the health bar empties.
    pub duration_secs: Option<f32>,
    pub options: Vec<SpellOption>,
    /// Ever started during this encounter.
    pub invoked: bool,
    /// Currently running.
    pub invoking: bool,
}

impl SpellCard {
    /// Build a card from its configuration and the engine-assigned emitter
    /// ids for each option.
    pub fn from_config(config: &PhaseConfig, option_emitters: Vec<Vec<EmitterId>>) -> Self {
        let options = config
            .options
            .iter()
            .zip(option_emitters)
            .map(|(option, emitters)| SpellOption {
                emitters,
                fire_interval: option.fire_interval_secs,
                activation_delay: option.activation_delay_secs,
                scale_by_health: option.scale_by_health,
                fire_interval_delta: option.fire_interval_delta,
                bullet_speed_delta: option.bullet_speed_delta,
                bullet_acceleration_delta: option.bullet_acceleration_delta,
                original_fire_interval: option.fire_interval_secs,
                state: FireLoop::Idle,
            })
            .collect();
        Self {
            name: config.name.clone(),
            duration_secs: config.duration_secs,
            options,
            invoked: false,
            invoking: false,
        }
    }

    /// Reset to the pre-invocation baseline: flags cleared, every option's
    /// fire interval and every emitter's speed/acceleration back to their
    /// recorded originals. Idempotent.
    pub fn initialize(&mut self, emitters: &mut [Emitter]) {
        self.invoked = false;
        self.invoking = false;
        for option in &mut self.options {
            option.fire_interval = option.original_fire_interval;
            option.state = FireLoop::Idle;
            for &id in &option.emitters {
                emitters[id].reset_to_original();
                emitters[id].active = false;
            }
        }
    }

    /// Start the card: one fire loop per option, each beginning with its
    /// activation delay.
    pub fn invoke(&mut self, emitters: &mut [Emitter]) {
        self.invoked = true;
        self.invoking = true;
        for option in &mut self.options {
            option.state = FireLoop::Delay {
                remaining: option.activation_delay,
            };
            for &id in &option.emitters {
                emitters[id].active = true;
            }
        }
    }

    /// Re-interpolate every scale-flagged option from its recorded
    /// baseline toward its configured deltas. `t` is the boss's missing
    /// health fraction, clamped to [0, 1]; at `t == 0` everything equals
    /// the original.
    pub fn scale_on_damage(&mut self, emitters: &mut [Emitter], t: f32) {
        let t = t.clamp(0.0, 1.0);
        for option in &mut self.options {
            if !option.scale_by_health {
                continue;
            }
            option.fire_interval = option.original_fire_interval + option.fire_interval_delta * t;
            for &id in &option.emitters {
                let emitter = &mut emitters[id];
                emitter.speed = emitter.original_speed() + option.bullet_speed_delta * t;
                emitter.acceleration =
                    emitter.original_acceleration() + option.bullet_acceleration_delta * t;
            }
        }
    }

    /// Stop the card: fire loops halt, every emitter's live bullets are
    /// converted to score pickups, and the emitters deactivate.
    pub fn end(
        &mut self,
        emitters: &mut [Emitter],
        world: &mut World,
        pool: &mut ObjectPool<BulletType>,
        events: &mut Vec<GameEvent>,
        score: &mut ScoreState,
    ) {
        self.invoking = false;
        for option in &mut self.options {
            option.state = FireLoop::Stopped;
            for &id in &option.emitters {
                emitters[id].convert_live_to_pickups(world, pool, events, score);
                emitters[id].active = false;
                emitters[id].clear_batches();
            }
        }
    }
}

/// Advance one card's fire loops by `dt`. Each option counts down on its
/// own; a wait that elapses checks `invoking` before firing, so no volley
/// fires after the wait that observed the cancellation.
#[allow(clippy::too_many_arguments)]
pub fn advance_fire_loops(
    card: &mut SpellCard,
    emitters: &mut [Emitter],
    world: &mut World,
    pool: &mut ObjectPool<BulletType>,
    rng: &mut ChaCha8Rng,
    boss_position: Vec2,
    player_position: Vec2,
    dt: f32,
) {
    let invoking = card.invoking;
    for option in &mut card.options {
        let remaining = match option.state {
            FireLoop::Idle | FireLoop::Stopped => continue,
            FireLoop::Delay { remaining } | FireLoop::Interval { remaining } => remaining - dt,
        };

        if remaining > 0.0 {
            option.state = match option.state {
                FireLoop::Delay { .. } => FireLoop::Delay { remaining },
                _ => FireLoop::Interval { remaining },
            };
            continue;
        }

        // The wait elapsed: check the cancellation flag before firing.
        if invoking {
            fire_option(option, emitters, world, pool, rng, boss_position, player_position);
            option.state = FireLoop::Interval {
                remaining: option.fire_interval,
            };
        } else {
            option.state = FireLoop::Stopped;
        }
    }
}

/// Fire every emitter of one option.
fn fire_option(
    option: &SpellOption,
    emitters: &mut [Emitter],
    world: &mut World,
    pool: &mut ObjectPool<BulletType>,
    rng: &mut ChaCha8Rng,
    boss_position: Vec2,
    player_position: Vec2,
) {
    for &id in &option.emitters {
        emitters[id].shoot(world, pool, rng, boss_position, player_position);
    }
}

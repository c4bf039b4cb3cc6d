//! Boss encounter controller — health, lives, and phase transitions.
//!
//! The boss owns no firing logic of its own: it selects spell cards,
//! reacts to damage, and wires card outcomes to the reward/audio events.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::constants::{
    DEATH_PICKUP_COUNT, DEATH_REWARD, PHASE_CLEAR_REWARD, TIMEOUT_PENALTY,
    TRANSITION_INVULN_SECS, TRANSITION_PICKUP_COUNT, TRANSITION_PICKUP_RADIUS,
};
use barrage_core::enums::{BulletType, CueId, PickupKind};
use barrage_core::events::GameEvent;
use barrage_core::types::direction_from_degrees;

use crate::emitter::Emitter;
use crate::pool::ObjectPool;
use crate::spellcard::SpellCard;

/// Running score totals tracked by the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreState {
    pub total: i64,
    pub grazes: u32,
    pub pickups_spawned: u32,
    pub phases_cleared: u32,
}

impl ScoreState {
    /// Apply a score change and mirror it to the reward collaborator.
    pub fn award(&mut self, events: &mut Vec<GameEvent>, amount: i64) {
        self.total += amount;
        events.push(GameEvent::ScoreAwarded { amount });
    }
}

/// Boss health/life bookkeeping and the current card selection.
#[derive(Debug)]
pub struct Boss {
    pub name: String,
    pub max_health: i32,
    pub health: i32,
    pub max_life: u32,
    pub life: u32,
    pub invulnerable: bool,
    pub position: Vec2,
    /// Index of the invoking card, if any.
    pub current: Option<usize>,
    /// Seconds left on the current card's time budget.
    pub phase_time_left: Option<f32>,
    pub defeated: bool,
    invuln_left: f32,
}

impl Boss {
    pub fn new(name: String, max_health: i32, lives: u32, position: Vec2) -> Self {
        Self {
            name,
            max_health,
            health: max_health,
            max_life: lives,
            life: lives,
            invulnerable: false,
            position,
            current: None,
            phase_time_left: None,
            defeated: false,
            invuln_left: 0.0,
        }
    }

    /// Health bar fraction in [0, 1].
    pub fn health_fraction(&self) -> f32 {
        self.health.max(0) as f32 / self.max_health as f32
    }

    /// Missing-health fraction in [0, 1], the scaling parameter.
    pub fn damage_fraction(&self) -> f32 {
        ((self.max_health - self.health) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Start the encounter: reset every card to its baseline, restore health
/// and lives, pick and invoke the first card.
pub fn initialize(
    boss: &mut Boss,
    cards: &mut [SpellCard],
    emitters: &mut [Emitter],
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    boss.invulnerable = false;
    boss.invuln_left = 0.0;
    boss.defeated = false;
    boss.health = boss.max_health;
    boss.life = boss.max_life;
    for card in cards.iter_mut() {
        card.initialize(emitters);
    }
    events.push(GameEvent::HealthFraction { value: 1.0 });
    invoke_next_card(boss, cards, emitters, rng, events);
}

/// Apply a reported hit on the boss.
#[allow(clippy::too_many_arguments)]
pub fn apply_boss_hit(
    boss: &mut Boss,
    cards: &mut [SpellCard],
    emitters: &mut [Emitter],
    world: &mut World,
    pool: &mut ObjectPool<BulletType>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    damage: i32,
) {
    if boss.defeated || boss.invulnerable {
        return;
    }

    boss.health -= damage;
    events.push(GameEvent::HealthFraction {
        value: boss.health_fraction(),
    });

    if boss.health <= 0 && boss.life > 0 {
        life_loss(boss, cards, emitters, world, pool, rng, events, score);
    } else if boss.health <= 0 {
        death(boss, cards, emitters, world, pool, rng, events, score);
    } else {
        events.push(GameEvent::Cue { cue: CueId::BossHit });
        if let Some(index) = boss.current {
            cards[index].scale_on_damage(emitters, boss.damage_fraction());
        }
    }
}

/// Advance the invulnerability window and the phase time budget.
#[allow(clippy::too_many_arguments)]
pub fn advance_timers(
    boss: &mut Boss,
    cards: &mut [SpellCard],
    emitters: &mut [Emitter],
    world: &mut World,
    pool: &mut ObjectPool<BulletType>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    dt: f32,
) {
    if boss.defeated {
        return;
    }

    if boss.invulnerable {
        boss.invuln_left -= dt;
        if boss.invuln_left <= 0.0 {
            boss.invulnerable = false;
            boss.invuln_left = 0.0;
        }
    }

    if let Some(left) = &mut boss.phase_time_left {
        *left -= dt;
        if *left <= 0.0 {
            // The countdown expired on its own; don't emit a cancel.
            boss.phase_time_left = None;
            handle_timeout(boss, cards, emitters, world, pool, rng, events, score);
        }
    }
}

/// The card's time budget ran out without a defeat: penalize the score and
/// force the transition damage would have caused.
#[allow(clippy::too_many_arguments)]
fn handle_timeout(
    boss: &mut Boss,
    cards: &mut [SpellCard],
    emitters: &mut [Emitter],
    world: &mut World,
    pool: &mut ObjectPool<BulletType>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
) {
    score.award(events, -TIMEOUT_PENALTY);
    events.push(GameEvent::Cue {
        cue: CueId::Timeout,
    });
    if boss.life > 0 {
        life_loss(boss, cards, emitters, world, pool, rng, events, score);
    } else {
        death(boss, cards, emitters, world, pool, rng, events, score);
    }
}

/// Life-loss transition: sweep the current card, refill health, move to a
/// fresh card behind a short invulnerability window.
#[allow(clippy::too_many_arguments)]
fn life_loss(
    boss: &mut Boss,
    cards: &mut [SpellCard],
    emitters: &mut [Emitter],
    world: &mut World,
    pool: &mut ObjectPool<BulletType>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
) {
    end_current_card(boss, cards, emitters, world, pool, events, score);

    boss.life -= 1;
    boss.health = boss.max_health;

    score.award(events, PHASE_CLEAR_REWARD);
    score.phases_cleared += 1;
    scatter_pickups(boss, rng, events, score, TRANSITION_PICKUP_COUNT);

    events.push(GameEvent::LifeLost {
        remaining: boss.life,
    });
    events.push(GameEvent::HealthFraction { value: 1.0 });
    events.push(GameEvent::Cue {
        cue: CueId::Transition,
    });

    boss.invulnerable = true;
    boss.invuln_left = TRANSITION_INVULN_SECS;

    invoke_next_card(boss, cards, emitters, rng, events);
}

/// Death transition: sweep the current card, pay out the defeat reward,
/// and mark the encounter for teardown.
#[allow(clippy::too_many_arguments)]
fn death(
    boss: &mut Boss,
    cards: &mut [SpellCard],
    emitters: &mut [Emitter],
    world: &mut World,
    pool: &mut ObjectPool<BulletType>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
) {
    end_current_card(boss, cards, emitters, world, pool, events, score);

    score.award(events, DEATH_REWARD);
    score.phases_cleared += 1;
    scatter_pickups(boss, rng, events, score, DEATH_PICKUP_COUNT);

    events.push(GameEvent::Cue {
        cue: CueId::BossDeath,
    });
    events.push(GameEvent::BossDefeated);

    boss.defeated = true;
    boss.current = None;
}

/// End the invoking card, cancelling its countdown if one is still running.
fn end_current_card(
    boss: &mut Boss,
    cards: &mut [SpellCard],
    emitters: &mut [Emitter],
    world: &mut World,
    pool: &mut ObjectPool<BulletType>,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
) {
    if let Some(index) = boss.current {
        if cards[index].invoking {
            cards[index].end(emitters, world, pool, events, score);
            events.push(GameEvent::Cue {
                cue: CueId::PhaseEnd,
            });
        }
    }
    if boss.phase_time_left.take().is_some() {
        events.push(GameEvent::CountdownCancelled);
    }
}

/// Pick and invoke the next card, announcing it and starting its countdown.
fn invoke_next_card(
    boss: &mut Boss,
    cards: &mut [SpellCard],
    emitters: &mut [Emitter],
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let index = pick_card(boss.current, cards, rng);
    boss.current = Some(index);
    cards[index].invoke(emitters);
    boss.phase_time_left = cards[index].duration_secs;

    events.push(GameEvent::PhaseAnnounced {
        name: cards[index].name.clone(),
    });
    events.push(GameEvent::Cue {
        cue: CueId::PhaseStart,
    });
    if let Some(seconds) = cards[index].duration_secs {
        events.push(GameEvent::CountdownStarted { seconds });
    }
}

/// Uniform draw among the cards not yet invoked. Once every card has been
/// used, the invoked set resets and the draw repeats over the full deck,
/// skipping an immediate repeat when there is an alternative.
fn pick_card(current: Option<usize>, cards: &mut [SpellCard], rng: &mut ChaCha8Rng) -> usize {
    let mut candidates: Vec<usize> = cards
        .iter()
        .enumerate()
        .filter(|(_, card)| !card.invoked)
        .map(|(index, _)| index)
        .collect();

    if candidates.is_empty() {
        for card in cards.iter_mut() {
            card.invoked = false;
        }
        candidates = (0..cards.len())
            .filter(|&index| cards.len() == 1 || Some(index) != current)
            .collect();
    }

    candidates[rng.gen_range(0..candidates.len())]
}

/// Scatter bonus pickups around the boss for the spawn collaborator.
fn scatter_pickups(
    boss: &Boss,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    count: u32,
) {
    for _ in 0..count {
        let angle = rng.gen_range(0.0..360.0);
        let radius = rng.gen_range(0.0..=TRANSITION_PICKUP_RADIUS);
        let position = boss.position + direction_from_degrees(angle) * radius;
        events.push(GameEvent::PickupSpawned {
            kind: PickupKind::BonusScore,
            position,
        });
        score.pickups_spawned += 1;
    }
}

//! Snapshot builder — collects the visible state for the host each tick.

use hecs::World;

use barrage_core::components::{Bullet, Orientation};
use barrage_core::events::GameEvent;
use barrage_core::state::{BossView, BulletView, EncounterSnapshot, ScoreView};
use barrage_core::types::{Position, SimTime};

use crate::boss::{Boss, ScoreState};
use crate::spellcard::SpellCard;

/// Build the snapshot for the tick that just ran.
pub fn build(
    world: &World,
    time: &SimTime,
    boss: &Boss,
    cards: &[SpellCard],
    score: &ScoreState,
    events: Vec<GameEvent>,
    active: bool,
) -> EncounterSnapshot {
    let phase_name = boss
        .current
        .filter(|&index| cards[index].invoking)
        .map(|index| cards[index].name.clone());

    let mut bullets = Vec::new();
    let mut query = world.query::<(&Bullet, &Position, &Orientation)>();
    for (_entity, (bullet, position, orientation)) in query.iter() {
        if !bullet.active {
            continue;
        }
        bullets.push(BulletView {
            bullet_type: bullet.bullet_type,
            position: position.0,
            angle_deg: orientation.angle_deg,
            grazed: bullet.grazed,
        });
    }

    EncounterSnapshot {
        time: *time,
        active,
        boss: Some(BossView {
            name: boss.name.clone(),
            health: boss.health,
            max_health: boss.max_health,
            life: boss.life,
            max_life: boss.max_life,
            invulnerable: boss.invulnerable,
            position: boss.position,
            phase_name,
            phase_time_left: boss.phase_time_left,
        }),
        bullets,
        events,
        score: ScoreView {
            total: score.total,
            grazes: score.grazes,
            pickups_spawned: score.pickups_spawned,
            phases_cleared: score.phases_cleared,
        },
    }
}

//! Boundary cleanup: bullets that drift past the playfield margin are
//! collected for disposal.

use hecs::{Entity, World};

use barrage_core::components::Bullet;
use barrage_core::constants::{OOB_MARGIN, PLAYFIELD_HALF_HEIGHT, PLAYFIELD_HALF_WIDTH};
use barrage_core::types::Position;

/// Push every live bullet beyond the playfield (plus margin) into `oob`
/// for the engine to dispose.
pub fn run(world: &mut World, oob: &mut Vec<Entity>) {
    let max_x = PLAYFIELD_HALF_WIDTH + OOB_MARGIN;
    let max_y = PLAYFIELD_HALF_HEIGHT + OOB_MARGIN;

    for (entity, (bullet, position)) in world.query_mut::<(&Bullet, &Position)>() {
        if !bullet.active {
            continue;
        }
        if position.0.x.abs() > max_x || position.0.y.abs() > max_y {
            oob.push(entity);
        }
    }
}

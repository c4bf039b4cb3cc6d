//! Aim resolution — where a volley points before the pattern fans it out.

use glam::Vec2;

use barrage_core::enums::AimMode;
use barrage_core::types::direction_from_degrees;

/// Resolve the base firing direction for an emitter at `origin`.
///
/// Lock-on aims at `target`, falling back to the player when no explicit
/// target is set. A fixed aim converts the stored angle (degrees, 0° = up,
/// clockwise) into a unit vector. A lock-on with the target sitting exactly
/// on the origin falls back to straight up.
pub fn resolve_aim(aim: &AimMode, origin: Vec2, target: Option<Vec2>, player: Vec2) -> Vec2 {
    match aim {
        AimMode::Fixed { angle_deg } => direction_from_degrees(*angle_deg),
        AimMode::LockOn => {
            let at = target.unwrap_or(player);
            (at - origin).try_normalize().unwrap_or(Vec2::Y)
        }
    }
}

//! Launch-direction fan-out for each pattern shape.

use glam::Vec2;
use rand::Rng;

use barrage_core::enums::Pattern;
use barrage_core::types::rotate_cw;

/// Compute the launch directions of one volley, appended to `out`.
///
/// `aim` must be a unit vector (see [`crate::aim::resolve_aim`]). Angles
/// grow clockwise, so a radial fan walks clockwise from the aim and an arc
/// is symmetric about it.
pub fn launch_directions(pattern: &Pattern, aim: Vec2, rng: &mut impl Rng, out: &mut Vec<Vec2>) {
    match *pattern {
        Pattern::Linear => out.push(aim),
        Pattern::Radial { count } => {
            let step = 360.0 / count as f32;
            for i in 0..count {
                out.push(rotate_cw(aim, step * i as f32));
            }
        }
        Pattern::Arc {
            count,
            wideness_deg,
        } => {
            // First bullet lands at step - wideness/2 so the fan is
            // symmetric about the aim.
            let step = wideness_deg / (count + 1) as f32;
            let mut angle = step - wideness_deg / 2.0;
            for _ in 0..count {
                out.push(rotate_cw(aim, angle));
                angle += step;
            }
        }
        Pattern::Spray { spread_deg } => {
            let half = spread_deg / 2.0;
            let jitter = if half > 0.0 {
                rng.gen_range(-half..=half)
            } else {
                0.0
            };
            out.push(rotate_cw(aim, jitter));
        }
    }
}

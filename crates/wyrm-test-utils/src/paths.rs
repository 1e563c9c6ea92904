//! Scripted head trajectories for driving followers in tests.

use bevy::math::DVec3;
use wyrm_follow::plugin::HeadInput;

/// Head on a horizontal circle of `radius` around `center`, at angle `t`,
/// facing along the direction of travel (counter-clockwise seen from +Y).
pub fn circle_head(center: DVec3, radius: f64, t: f64) -> HeadInput {
    let (sin, cos) = t.sin_cos();
    HeadInput::new(
        center + DVec3::new(cos * radius, 0.0, sin * radius),
        DVec3::new(-sin, 0.0, cos),
    )
}

/// Head moving along `direction` from `start`, `step` units per tick.
pub fn line_head(start: DVec3, direction: DVec3, step: f64, tick: u32) -> HeadInput {
    HeadInput::new(start + direction * step * f64::from(tick), direction)
}

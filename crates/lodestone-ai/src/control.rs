//! Pursuit/orbit control law.
//!
//! Not a state machine: every output is a continuous function of the
//! current situation. Orbit-and-strafe emerges from the stationing
//! point alone — the ship thrusts toward a point held off the target's
//! radius, overshoots, and circles while the fire cone gates the
//! trigger.

use glam::Vec2;

use lodestone_core::input::ShipInput;
use lodestone_core::specs::AiSpec;

/// Situation snapshot for one enemy ship.
#[derive(Debug, Clone, Copy)]
pub struct PursuitContext {
    /// Ship world position.
    pub position: Vec2,
    /// Ship facing (unit length).
    pub facing: Vec2,
    /// Target world position.
    pub target: Vec2,
    /// Target effective radius; grows as the player accretes mass.
    pub target_radius: f32,
    pub spec: AiSpec,
}

/// Compute one tick of control input for the situation.
pub fn steer(ctx: &PursuitContext) -> ShipInput {
    let to_target = ctx.target - ctx.position;
    let aim = to_target.normalize_or(ctx.facing);

    // Hold station behind the standoff distance, not at the target.
    let station = ctx.target - aim * (ctx.target_radius + ctx.spec.standoff);
    let to_station = station - ctx.position;
    let gap = to_station.length();

    // Zero throttle inside min_gap, full at full_gap, linear between.
    let span = (ctx.spec.full_gap - ctx.spec.min_gap).max(f32::EPSILON);
    let ramp = ((gap - ctx.spec.min_gap) / span).clamp(0.0, 1.0);
    let throttle = (to_station.normalize_or_zero() * ramp).clamp_length_max(1.0);

    // Hold the trigger while the target sits inside the fire cone.
    let shoot = ctx.facing.normalize_or(Vec2::Y).dot(aim) >= ctx.spec.fire_cone.cos();

    ShipInput {
        throttle,
        point: ctx.target,
        aim,
        shoot,
        cheat_health: false,
    }
}

//! Per-tick update phases for the particle field.
//!
//! The typical tick looks like:
//! 1. [`pulse_phase`] — advance each particle's radius oscillation.
//! 2. [`motion_phase`] — integrate velocities and reflect at the
//!    viewport edges.
//! 3. [`repulsion_phase`] — push particles away from the pointer.
//! 4. [`connection_phase`] — collect the lines between nearby particles
//!    into a [`ConnectionBuffer`] for the renderer.
//!
//! All phases are total over finite inputs and fully deterministic;
//! randomness is confined to population generation.

use crate::{
    config::Config,
    connections::{Connection, ConnectionBuffer},
    field::ParticleField,
};

/// Advances the pulse oscillation of every particle.
///
/// Each particle's `pulse_phase` grows by its own `pulse_speed`. The
/// phase is left unwrapped; `sin` is periodic, so the multiplier
/// computed by [`crate::particle::Particle::pulse_scale`] is unaffected.
///
/// Does nothing when `cfg.pulse` is disabled.
///
/// ### Parameters
/// - `field` - The field whose particles are advanced.
/// - `cfg` - Global configuration, providing the pulse flag.
pub fn pulse_phase(field: &mut ParticleField, cfg: &Config) {
    if !cfg.pulse {
        return;
    }
    for p in &mut field.particles {
        p.pulse_phase += p.pulse_speed;
    }
}

/// Integrates particle positions and reflects velocities at the edges.
///
/// For each particle:
///
/// 1. `pos += vel`.
/// 2. If the x coordinate lies outside `[0, bounds.x]`, the x velocity
///    is multiplied by `-cfg.bounce_damping`; same for y against
///    `bounds.y`. The two axes are checked independently.
///
/// The position is never clamped back inside the bounds. Reflection
/// fires after integration, so a particle that has just crossed an edge
/// keeps its outward position for this tick and turns around on the
/// next.
///
/// ### Parameters
/// - `field` - The field to advance; positions and velocities mutate.
/// - `cfg` - Global configuration, providing the damping factor.
pub fn motion_phase(field: &mut ParticleField, cfg: &Config) {
    let bounds = field.bounds;
    for p in &mut field.particles {
        p.pos += p.vel;

        if p.pos.x < 0.0 || p.pos.x > bounds.x {
            p.vel.x *= -cfg.bounce_damping;
        }
        if p.pos.y < 0.0 || p.pos.y > bounds.y {
            p.vel.y *= -cfg.bounce_damping;
        }
    }
}

/// Displaces particles away from the pointer.
///
/// For each particle strictly within `cfg.pointer_radius` of the
/// pointer:
///
/// 1. `force = (pointer_radius − distance) / pointer_radius`, in `(0, 1]`.
/// 2. The particle's position moves by `force * cfg.push_strength`
///    along the unit vector away from the pointer.
///
/// This is an instantaneous positional displacement, not a velocity
/// change; it stops as soon as the particle leaves the radius. A
/// particle sitting exactly on the pointer has no defined push
/// direction (`normalize_or_zero` yields zero) and stays put.
///
/// Does nothing while no pointer is set.
///
/// ### Parameters
/// - `field` - The field to displace; only positions mutate.
/// - `cfg` - Global configuration, providing the interaction radius and
///   push strength.
pub fn repulsion_phase(field: &mut ParticleField, cfg: &Config) {
    let Some(pointer) = field.pointer else {
        return;
    };

    for p in &mut field.particles {
        let delta = pointer - p.pos;
        let distance = delta.length();
        if distance < cfg.pointer_radius {
            let force = (cfg.pointer_radius - distance) / cfg.pointer_radius;
            let dir = delta.normalize_or_zero();
            p.pos -= dir * force * cfg.push_strength;
        }
    }
}

/// Collects the connection lines between nearby particles.
///
/// Every unordered pair `(i, j)` with `i < j` is considered exactly
/// once. Pairs strictly closer than `cfg.link_distance` produce a
/// [`Connection`] whose strength is
/// `(1 − distance / link_distance) * cfg.link_alpha`, so opacity falls
/// off linearly with distance. A pair at exactly the threshold produces
/// nothing.
///
/// The buffer is cleared at the start of the phase, so it always holds
/// this tick's connections only. This is the O(n²) step of the tick.
///
/// ### Parameters
/// - `field` - The field to scan; only read access is required.
/// - `cfg` - Global configuration, providing threshold and alpha.
/// - `links` - Scratch buffer receiving this tick's connections.
pub fn connection_phase(field: &ParticleField, cfg: &Config, links: &mut ConnectionBuffer) {
    links.clear();

    for i in 0..field.particles.len() {
        for j in (i + 1)..field.particles.len() {
            let distance = (field.particles[i].pos - field.particles[j].pos).length();
            if distance < cfg.link_distance {
                links.push(Connection {
                    a: i,
                    b: j,
                    strength: (1.0 - distance / cfg.link_distance) * cfg.link_alpha,
                });
            }
        }
    }
}

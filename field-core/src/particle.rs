use crate::config::Config;
use crate::types::Rgb;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub pulse_phase: f32,
    pub pulse_speed: f32,
}

impl Particle {
    /// Samples a fresh particle uniformly within the given bounds.
    ///
    /// Radius, color, and pulse parameters are fixed for the particle's
    /// lifetime; only position (and velocity, at the edges) change after
    /// this.
    pub fn random_in(bounds: Vec2, cfg: &Config, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..=bounds.x),
                rng.random_range(0.0..=bounds.y),
            ),
            vel: Vec2::new(
                rng.random_range(-cfg.max_speed..=cfg.max_speed),
                rng.random_range(-cfg.max_speed..=cfg.max_speed),
            ),
            radius: rng.random_range(cfg.radius_min..=cfg.radius_max),
            color: cfg.palette[rng.random_range(0..cfg.palette.len())],
            pulse_phase: rng.random_range(0.0..TAU),
            pulse_speed: rng.random_range(cfg.pulse_speed_min..=cfg.pulse_speed_max),
        }
    }

    /// Current radius multiplier from the pulse oscillation.
    ///
    /// `1.0` when pulsing is disabled.
    pub fn pulse_scale(&self, cfg: &Config) -> f32 {
        if cfg.pulse {
            1.0 + self.pulse_phase.sin() * cfg.pulse_depth
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn random_in_stays_within_configured_ranges() {
        let cfg = Config::default();
        let bounds = Vec2::new(640.0, 480.0);
        let mut rng = rand::rng();

        for _ in 0..200 {
            let p = Particle::random_in(bounds, &cfg, &mut rng);

            assert!(p.pos.x >= 0.0 && p.pos.x <= bounds.x);
            assert!(p.pos.y >= 0.0 && p.pos.y <= bounds.y);
            assert!(p.vel.x.abs() <= cfg.max_speed);
            assert!(p.vel.y.abs() <= cfg.max_speed);
            assert!(p.radius >= cfg.radius_min && p.radius <= cfg.radius_max);
            assert!(cfg.palette.contains(&p.color));
            assert!(p.pulse_phase >= 0.0 && p.pulse_phase < TAU);
            assert!(p.pulse_speed >= cfg.pulse_speed_min && p.pulse_speed <= cfg.pulse_speed_max);
        }
    }

    #[test]
    fn pulse_scale_peaks_at_quarter_phase() {
        let cfg = Config::default();
        let mut rng = rand::rng();
        let mut p = Particle::random_in(Vec2::new(100.0, 100.0), &cfg, &mut rng);
        p.pulse_phase = FRAC_PI_2;

        // sin(pi/2) = 1, so the multiplier is 1 + pulse_depth.
        assert!((p.pulse_scale(&cfg) - (1.0 + cfg.pulse_depth)).abs() < 1e-6);
    }

    #[test]
    fn pulse_scale_is_unity_when_disabled() {
        let cfg = Config::minimal();
        let mut rng = rand::rng();
        let mut p = Particle::random_in(Vec2::new(100.0, 100.0), &cfg, &mut rng);
        p.pulse_phase = FRAC_PI_2;

        assert_eq!(p.pulse_scale(&cfg), 1.0);
    }
}

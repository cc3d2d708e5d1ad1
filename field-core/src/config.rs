use crate::error::{ConfigError, Result};
use crate::types::Rgb;

/// Tuning parameters for the particle field.
///
/// Every constant that differs between the two renditions of the field
/// lives here, so either can be reproduced by configuration alone:
/// [`Config::default`] is the full rendition (pulsing radii, glow
/// rendering, damped bounces), [`Config::minimal`] the lighter one
/// (fewer particles, flat discs, perfect bounces).
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of particles generated at construction and on every rebuild.
    pub particle_count: usize,
    /// Velocity components are drawn uniformly from `-max_speed..=max_speed`.
    pub max_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Colors particles pick from, uniformly at random.
    pub palette: Vec<Rgb>,

    /// Whether particle radii oscillate over time.
    pub pulse: bool,
    pub pulse_speed_min: f32,
    pub pulse_speed_max: f32,
    /// Relative amplitude of the radius oscillation.
    pub pulse_depth: f32,

    /// Render particles as a radial glow instead of a flat disc.
    pub glow: bool,

    /// Velocity scale applied on boundary reflection; `1.0` is a perfect bounce.
    pub bounce_damping: f32,

    /// Particles strictly closer to the pointer than this are pushed away.
    pub pointer_radius: f32,
    /// Positional displacement scale of the pointer push.
    pub push_strength: f32,

    /// Particles strictly closer than this are joined by a line.
    pub link_distance: f32,
    /// Link opacity as the pair distance approaches zero.
    pub link_alpha: f32,
    pub link_color: Rgb,
    pub link_width: f32,

    /// Quiet period in seconds before a viewport change rebuilds the field.
    pub resize_debounce: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_count: 100,
            max_speed: 0.2,
            radius_min: 0.5,
            radius_max: 3.0,
            palette: vec![
                [0xc9, 0x48, 0x5b],
                [0xb8, 0xa9, 0xc9],
                [0x7d, 0x9f, 0x7a],
                [0xd4, 0xa5, 0x74],
            ],
            pulse: true,
            pulse_speed_min: 0.02,
            pulse_speed_max: 0.04,
            pulse_depth: 0.3,
            glow: true,
            bounce_damping: 0.95,
            pointer_radius: 180.0,
            push_strength: 1.5,
            link_distance: 140.0,
            link_alpha: 0.5,
            link_color: [0xb8, 0xa9, 0xc9],
            link_width: 0.5,
            resize_debounce: 0.25,
        }
    }
}

impl Config {
    /// The lighter rendition: fewer, larger particles, flat discs,
    /// undamped bounces, and no resize coalescing.
    pub fn minimal() -> Self {
        Self {
            particle_count: 80,
            max_speed: 0.25,
            radius_min: 1.0,
            radius_max: 3.0,
            palette: vec![[0xc9, 0x48, 0x5b], [0xb8, 0xa9, 0xc9], [0x7d, 0x9f, 0x7a]],
            pulse: false,
            glow: false,
            bounce_damping: 1.0,
            pointer_radius: 150.0,
            push_strength: 2.0,
            link_distance: 120.0,
            link_alpha: 1.0,
            link_width: 1.0,
            resize_debounce: 0.0,
            ..Self::default()
        }
    }

    /// Checks that the configuration can drive a population.
    ///
    /// Random generation indexes the palette and samples the radius and
    /// pulse ranges, so those must be well-formed; the remaining scalars
    /// only need to be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if !(self.radius_min > 0.0 && self.radius_min <= self.radius_max) {
            return Err(ConfigError::InvalidRadiusRange {
                min: self.radius_min,
                max: self.radius_max,
            });
        }
        if !(self.pulse_speed_min <= self.pulse_speed_max) {
            return Err(ConfigError::InvalidPulseRange {
                min: self.pulse_speed_min,
                max: self.pulse_speed_max,
            });
        }
        for (name, value) in [
            ("max_speed", self.max_speed),
            ("pulse_depth", self.pulse_depth),
            ("bounce_damping", self.bounce_damping),
            ("pointer_radius", self.pointer_radius),
            ("push_strength", self.push_strength),
            ("link_distance", self.link_distance),
            ("link_alpha", self.link_alpha),
            ("link_width", self.link_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_presets_validate() {
        assert_eq!(Config::default().validate(), Ok(()));
        assert_eq!(Config::minimal().validate(), Ok(()));
    }

    #[test]
    fn empty_palette_is_rejected() {
        let mut cfg = Config::default();
        cfg.palette.clear();
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn inverted_radius_range_is_rejected() {
        let mut cfg = Config::default();
        cfg.radius_min = 4.0;
        cfg.radius_max = 2.0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidRadiusRange { min: 4.0, max: 2.0 })
        );
    }

    #[test]
    fn zero_radius_is_rejected() {
        let mut cfg = Config::default();
        cfg.radius_min = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidRadiusRange { .. })
        ));
    }

    #[test]
    fn non_finite_scalar_is_rejected() {
        let mut cfg = Config::default();
        cfg.max_speed = f32::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidParameter {
                name: "max_speed",
                ..
            })
        ));
    }

    #[test]
    fn negative_scalar_is_rejected() {
        let mut cfg = Config::minimal();
        cfg.link_distance = -1.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidParameter {
                name: "link_distance",
                ..
            })
        ));
    }
}

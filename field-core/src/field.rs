use crate::config::Config;
use crate::error::Result;
use crate::particle::Particle;
use glam::Vec2;
use rand::Rng;

/// The complete simulation state: one particle population, the viewport
/// bounds it moves in, and the pointer acting as a repulsion source.
///
/// A `ParticleField` is a plain owned value; whoever composes the page
/// holds exactly one, and tests hold as many as they like.
#[derive(Clone, Debug)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub bounds: Vec2,
    /// Last known pointer position while over the surface, in the same
    /// coordinate space as particle positions. `None` while the pointer
    /// is elsewhere.
    pub pointer: Option<Vec2>,
}

impl ParticleField {
    /// Generates a fresh field of exactly `cfg.particle_count` particles.
    ///
    /// Fails if the configuration cannot drive generation (see
    /// [`Config::validate`]).
    pub fn generate(bounds: Vec2, cfg: &Config, rng: &mut impl Rng) -> Result<Self> {
        cfg.validate()?;
        let particles = (0..cfg.particle_count)
            .map(|_| Particle::random_in(bounds, cfg, rng))
            .collect();

        Ok(Self {
            particles,
            bounds,
            pointer: None,
        })
    }

    /// Builds a field from hand-picked particles.
    pub fn from_particles(bounds: Vec2, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            bounds,
            pointer: None,
        }
    }

    /// Replaces the entire population at new bounds.
    ///
    /// The prior population is discarded wholesale; nothing is remapped,
    /// so a rebuild visibly scatters the field. Pointer state is kept.
    pub fn regenerate(&mut self, bounds: Vec2, cfg: &Config, rng: &mut impl Rng) -> Result<()> {
        cfg.validate()?;
        self.bounds = bounds;
        self.particles.clear();
        self.particles
            .extend((0..cfg.particle_count).map(|_| Particle::random_in(bounds, cfg, rng)));
        Ok(())
    }

    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }
}

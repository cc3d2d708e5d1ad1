/// Identifier for a particle in a [`crate::field::ParticleField`].
///
/// This is an index into `ParticleField::particles`, and is only meaningful
/// within the lifetime of a given population (a rebuild invalidates it).
pub type ParticleId = usize;

/// An sRGB color as `[r, g, b]` bytes.
pub type Rgb = [u8; 3];

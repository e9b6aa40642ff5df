// Simple particle struct to keep track of individual position, velocity,
// and the visual attributes it was born with

use crate::color::Color;
use crate::config::{FieldConfig, Lifecycle};
use crate::field::Bounds;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub color: Color,
    pub opacity: f64,
    pub life: f64,
    pub decay: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, size: f64, color: Color) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
            color,
            opacity: 1.0,
            life: 1.0,
            decay: 0.0,
        }
    }

    pub fn random<R: Rng>(
        rng: &mut R,
        config: &FieldConfig,
        palette: &[Color],
        bounds: Bounds,
    ) -> Particle {
        let color = palette[rng.gen_range(0, palette.len())];
        let size = config.particle_size.sample(rng);
        let mut p = Particle::new(0.0, 0.0, 0.0, 0.0, size, color);
        p.scatter(rng, config, bounds);
        p.opacity = config.opacity.sample(rng);
        p.decay = config.decay.sample(rng);
        p.life = match config.lifecycle {
            Lifecycle::Steady => 1.0,
            Lifecycle::Decaying => rng.gen::<f64>(),
        };
        p
    }

    // New random position over the surface and a new velocity in
    // [-speed.max / 2, speed.max / 2] on each axis
    fn scatter<R: Rng>(&mut self, rng: &mut R, config: &FieldConfig, bounds: Bounds) {
        let max_vel = config.particle_speed.max;
        self.pos = [rng.gen::<f64>() * bounds.width, rng.gen::<f64>() * bounds.height];
        self.vel = [
            (rng.gen::<f64>() - 0.5) * max_vel,
            (rng.gen::<f64>() - 0.5) * max_vel,
        ];
    }

    pub fn respawn<R: Rng>(&mut self, rng: &mut R, config: &FieldConfig, bounds: Bounds) {
        self.scatter(rng, config, bounds);
        self.life = 1.0;
    }

    /// Counts life down by the decay rate. Returns true when the particle
    /// has expired and needs a respawn.
    pub fn age(&mut self) -> bool {
        self.life = (self.life - self.decay).max(0.0);
        self.life <= 0.0
    }

    pub fn fill_alpha(&self) -> f64 {
        self.opacity * self.life
    }
}

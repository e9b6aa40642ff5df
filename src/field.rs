//! The particle field simulation and its per-frame renderer.
//!
//! [`Field`] owns the particles, the simulation bounds and the last known
//! pointer position. It knows nothing about the DOM: [`Field::frame`] paints
//! onto any [`Surface`], which keeps the whole simulation testable off the
//! browser.

use crate::color::Color;
use crate::config::{FieldConfig, Lifecycle};
use crate::error::ConfigError;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vecmath::Vector2;

/// Pixel dimensions of the drawing surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Bounds {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Alpha of a connection line between two particles `distance` apart.
///
/// Falls off linearly from `base` at distance 0 to nothing at
/// `max_distance`. Pairs at or beyond `max_distance` are not connected.
pub fn connection_alpha(distance: f64, max_distance: f64, base: f64) -> Option<f64> {
    if distance < max_distance {
        Some((1.0 - distance / max_distance) * base)
    } else {
        None
    }
}

// Reflects one axis off the [0, extent] walls
fn reflect(pos: &mut f64, vel: &mut f64, extent: f64) {
    if *pos < 0.0 || *pos > extent {
        *vel *= -1.0;
        *pos = (*pos).max(0.0).min(extent);
    }
}

pub struct Field {
    config: FieldConfig,
    connection_color: Color,
    particles: Vec<Particle>,
    bounds: Bounds,
    pointer: Vector2<f64>,
    rng: StdRng,
}

impl Field {
    /// Builds a field seeded from the platform's entropy source.
    pub fn new(config: FieldConfig, bounds: Bounds) -> Result<Self, ConfigError> {
        Field::with_rng(config, bounds, StdRng::from_entropy())
    }

    pub fn with_rng(config: FieldConfig, bounds: Bounds, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let palette = config.palette()?;
        let connection_color = Color::from_hex(&config.connection_color)?;
        let count = config.particle_count_for(bounds.width);
        let particles = (0..count)
            .map(|_| Particle::random(&mut rng, &config, &palette, bounds))
            .collect();
        Ok(Field {
            config,
            connection_color,
            particles,
            bounds,
            pointer: [0.0, 0.0],
            rng,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pointer(&self) -> Vector2<f64> {
        self.pointer
    }

    /// Records the pointer position in surface coordinates. Picked up by
    /// the next [`step`](Field::step).
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = [x, y];
    }

    /// Changes the simulation bounds. Particles keep their state and drift
    /// back inside on their own through reflection.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Advances every particle by one frame.
    pub fn step(&mut self) {
        let radius = self.config.mouse_radius;
        let coefficient = self.config.pointer_coefficient();
        let drag = self.config.drag;
        let decaying = self.config.lifecycle == Lifecycle::Decaying;
        let bounds = self.bounds;
        let pointer = self.pointer;

        for particle in &mut self.particles {
            let to_pointer = vecmath::vec2_sub(pointer, particle.pos);
            let distance = vecmath::vec2_len(to_pointer);
            if distance < radius {
                let force = (radius - distance) / radius;
                // atan2 rather than normalizing so a particle sitting right
                // on the pointer still gets a finite push
                let angle = to_pointer[1].atan2(to_pointer[0]);
                let push = vecmath::vec2_scale([angle.cos(), angle.sin()], force * coefficient);
                particle.vel = vecmath::vec2_add(particle.vel, push);
            }

            particle.pos = vecmath::vec2_add(particle.pos, particle.vel);

            reflect(&mut particle.pos[0], &mut particle.vel[0], bounds.width);
            reflect(&mut particle.pos[1], &mut particle.vel[1], bounds.height);

            if decaying && particle.age() {
                particle.respawn(&mut self.rng, &self.config, bounds);
            }

            particle.vel = vecmath::vec2_scale(particle.vel, drag);
        }
    }

    /// Paints connections and then particles. Does not clear.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        let max_distance = self.config.connection_distance;
        let base = self.config.connection_opacity;
        let line_width = self.config.line_width;

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = vecmath::vec2_len(vecmath::vec2_sub(a.pos, b.pos));
                if let Some(alpha) = connection_alpha(distance, max_distance, base) {
                    surface.draw_line(a.pos, b.pos, self.connection_color, alpha, line_width);
                }
            }
        }

        for p in &self.particles {
            surface.fill_circle(p.pos, p.size, p.color, p.fill_alpha(), self.config.glow);
        }
    }

    /// One full frame: clear, simulate, draw.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) {
        surface.clear(self.bounds.width, self.bounds.height);
        self.step();
        self.render(surface);
    }
}

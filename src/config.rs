//! Field configuration.
//!
//! Every option has a default, so a host may pass `{}` or nothing at all and
//! get the stock network-of-dots look. Keys are camelCase in JSON.

use crate::color::Color;
use crate::error::ConfigError;
use rand::Rng;
use serde::Deserialize;

/// A closed `{min, max}` interval that attributes are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }

    /// Uniform sample in `[min, max)`, or exactly `min` when the range is empty.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        self.min + rng.gen::<f64>() * (self.max - self.min)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ConfigError::InvalidRange(name));
        }
        Ok(())
    }

    fn validate_non_negative(&self, name: &'static str) -> Result<(), ConfigError> {
        self.validate(name)?;
        if self.min < 0.0 {
            return Err(ConfigError::Negative(name));
        }
        Ok(())
    }
}

/// How particle life evolves between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Life stays at 1, particles keep their opacity forever.
    Steady,
    /// Life counts down by each particle's decay rate and the particle
    /// respawns somewhere new when it runs out.
    Decaying,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Caps the count at `floor(width / width_per_particle)` so narrow
    /// surfaces get a sparser field.
    pub width_per_particle: Option<f64>,
    pub particle_size: Range,
    pub particle_speed: Range,
    pub connection_distance: f64,
    pub connection_color: String,
    pub connection_opacity: f64,
    pub line_width: f64,
    pub colors: Vec<String>,
    pub opacity: Range,
    pub mouse_radius: f64,
    pub mouse_repulsion: bool,
    pub repulsion_strength: f64,
    pub attraction_strength: f64,
    pub drag: f64,
    pub glow: f64,
    pub lifecycle: Lifecycle,
    pub decay: Range,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: 100,
            width_per_particle: None,
            particle_size: Range::new(1.0, 3.0),
            particle_speed: Range::new(0.5, 2.0),
            connection_distance: 120.0,
            connection_color: "#00ff88".to_owned(),
            connection_opacity: 0.3,
            line_width: 1.0,
            colors: vec![
                "#00ff88".to_owned(),
                "#00d4ff".to_owned(),
                "#ff6b6b".to_owned(),
                "#ffd93d".to_owned(),
            ],
            opacity: Range::new(0.3, 0.8),
            mouse_radius: 150.0,
            mouse_repulsion: true,
            repulsion_strength: 0.5,
            attraction_strength: 0.3,
            drag: 0.99,
            glow: 10.0,
            lifecycle: Lifecycle::Decaying,
            decay: Range::new(0.005, 0.015),
        }
    }
}

fn non_negative(value: f64, name: &'static str) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Negative(name));
    }
    Ok(())
}

fn unit_interval(value: f64, name: &'static str) -> Result<(), ConfigError> {
    non_negative(value, name)?;
    if value > 1.0 {
        return Err(ConfigError::OutOfRange(name));
    }
    Ok(())
}

impl FieldConfig {
    /// Parses and validates a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.particle_size.validate_non_negative("particleSize")?;
        self.particle_speed.validate_non_negative("particleSpeed")?;
        self.opacity.validate_non_negative("opacity")?;
        // opacity lives in (0, 1]
        if self.opacity.min <= 0.0 || self.opacity.max > 1.0 {
            return Err(ConfigError::OutOfRange("opacity"));
        }
        self.decay.validate_non_negative("decay")?;

        non_negative(self.connection_distance, "connectionDistance")?;
        unit_interval(self.connection_opacity, "connectionOpacity")?;
        non_negative(self.line_width, "lineWidth")?;
        non_negative(self.mouse_radius, "mouseRadius")?;
        non_negative(self.repulsion_strength, "repulsionStrength")?;
        non_negative(self.attraction_strength, "attractionStrength")?;
        unit_interval(self.drag, "drag")?;
        non_negative(self.glow, "glow")?;
        if let Some(w) = self.width_per_particle {
            if !w.is_finite() || w <= 0.0 {
                return Err(ConfigError::OutOfRange("widthPerParticle"));
            }
        }

        Color::from_hex(&self.connection_color)?;
        let palette = self.palette()?;
        if palette.is_empty() && self.particle_count > 0 {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    pub fn palette(&self) -> Result<Vec<Color>, ConfigError> {
        self.colors.iter().map(|c| Color::from_hex(c)).collect()
    }

    /// Number of particles to create on a surface this wide.
    pub fn particle_count_for(&self, width: f64) -> usize {
        match self.width_per_particle {
            Some(per) => {
                let cap = (width.max(0.0) / per).floor() as usize;
                self.particle_count.min(cap)
            }
            None => self.particle_count,
        }
    }

    /// Signed pointer force coefficient: negative pushes particles away
    /// from the pointer, positive pulls them in.
    pub fn pointer_coefficient(&self) -> f64 {
        if self.mouse_repulsion {
            -self.repulsion_strength
        } else {
            self.attraction_strength
        }
    }
}

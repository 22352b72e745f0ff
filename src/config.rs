//! Simulation constants and the runtime configuration built from them.
//!
//! The constants are the values the simulation ships with. A
//! [`SimulationConfig`] starts from them and can be overridden by a YAML file:
//!
//! ```yaml
//! max_particles: 80
//! min_particle_size: 8
//! max_particle_size: 24
//! pointer_collision_radius: 50.0
//! collision_velocity: 0.25
//! velocity_leak_rate: 0.02
//! mode: collision          # or "edit"
//! velocity_leak: true
//! ```
//!
//! Keys that are left out keep their default value.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Number of particles created when a simulation starts.
pub const MAX_PARTICLES: usize = 60;
/// Largest radius a particle may have.
pub const MAX_PARTICLE_SIZE: u32 = 30;
/// Smallest radius a particle may have.
pub const MIN_PARTICLE_SIZE: u32 = 10;
/// Radius of the pointer's influence in collision mode.
pub const POINTER_COLLISION_RADIUS: f32 = 40.0;
/// Impulse added per axis for every detected overlap.
pub const COLLISION_VELOCITY: f32 = 0.3;
/// Fraction of velocity removed per tick while the leak is on.
pub const VELOCITY_LEAK_RATE: f32 = 0.02;

/// What the pointer does.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The pointer pushes particles away.
    #[serde(rename = "collision")]
    #[default]
    Collision,
    /// The pointer is inert; the host uses it for picking and dragging.
    #[serde(rename = "edit")]
    Edit,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub max_particles: usize,
    pub min_particle_size: u32,
    pub max_particle_size: u32,
    pub pointer_collision_radius: f32,
    pub collision_velocity: f32,
    pub velocity_leak_rate: f32,
    pub mode: Mode,         // mode the simulator starts in
    pub velocity_leak: bool, // whether the leak starts enabled
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_particles: MAX_PARTICLES,
            min_particle_size: MIN_PARTICLE_SIZE,
            max_particle_size: MAX_PARTICLE_SIZE,
            pointer_collision_radius: POINTER_COLLISION_RADIUS,
            collision_velocity: COLLISION_VELOCITY,
            velocity_leak_rate: VELOCITY_LEAK_RATE,
            mode: Mode::Collision,
            velocity_leak: true,
        }
    }
}

impl SimulationConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        let config: SimulationConfig = serde_yaml::from_reader(BufReader::new(file))?;
        config.validate()?;
        log::info!("loaded simulation config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Checks the ranges the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_particles == 0 {
            return Err(ConfigError::Invalid("max_particles must be at least 1".into()));
        }
        if self.min_particle_size == 0 {
            return Err(ConfigError::Invalid("min_particle_size must be at least 1".into()));
        }
        if self.min_particle_size > self.max_particle_size {
            return Err(ConfigError::Invalid(format!(
                "min_particle_size ({}) exceeds max_particle_size ({})",
                self.min_particle_size, self.max_particle_size
            )));
        }

        let non_negative = [
            ("pointer_collision_radius", self.pointer_collision_radius),
            ("collision_velocity", self.collision_velocity),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if !(0.0..1.0).contains(&self.velocity_leak_rate) {
            return Err(ConfigError::Invalid(format!(
                "velocity_leak_rate must be in [0, 1), got {}",
                self.velocity_leak_rate
            )));
        }

        Ok(())
    }

    pub fn min_radius(&self) -> f32 {
        self.min_particle_size as f32
    }

    pub fn max_radius(&self) -> f32 {
        self.max_particle_size as f32
    }
}

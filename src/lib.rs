//! A bounded 2-D population of circular particles that repel from a pointer
//! and from each other, bounce off the arena edges and optionally leak
//! velocity over time.
//!
//! [`Simulator`] owns the population and runs one [`Simulator::tick`] per
//! frame; drawing, pointer input and UI live in the host binary.

pub mod arena;
pub mod color;
pub mod config;
pub mod error;
pub mod particle;
pub mod simulator;

pub use arena::Arena;
pub use color::Color;
pub use config::{
    COLLISION_VELOCITY, MAX_PARTICLE_SIZE, MAX_PARTICLES, MIN_PARTICLE_SIZE, Mode,
    POINTER_COLLISION_RADIUS, SimulationConfig, VELOCITY_LEAK_RATE,
};
pub use error::{ColorParseError, ConfigError, EditError};
pub use particle::{Particle, StepContext};
pub use simulator::{Canvas, ParticleId, ParticleSprite, Simulator};

//! The particle population and the per-frame tick that drives it.
//!
//! A tick steps the particles one after another in storage order. Each step
//! sees its neighbours as they are at that moment, so particles stepped later
//! in a tick react to positions already advanced earlier in the same tick.

use cgmath::Vector2;
use rand::prelude::*;
use rayon::prelude::*;

use crate::arena::Arena;
use crate::color::Color;
use crate::config::{Mode, SimulationConfig};
use crate::error::{ConfigError, EditError};
use crate::particle::{Particle, StepContext};

/// Stable handle to a particle; the population never changes size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId(usize);

impl ParticleId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// What the host needs to draw one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSprite {
    pub id: ParticleId,
    pub center: Vector2<f32>,
    pub radius: f32,
    pub color: Color,
}

/// Receives the renderable state of each particle as it is stepped.
pub trait Canvas {
    fn draw_particle(&mut self, sprite: &ParticleSprite);
}

impl Canvas for Vec<ParticleSprite> {
    fn draw_particle(&mut self, sprite: &ParticleSprite) {
        self.push(*sprite);
    }
}

pub struct Simulator {
    arena: Arena,
    particles: Vec<Particle>,
    mode: Mode,
    velocity_leak: bool,
    config: SimulationConfig,
}

impl Simulator {
    /// Creates `config.max_particles` random particles in parallel.
    pub fn new(arena: Arena, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let particles: Vec<Particle> = (0..config.max_particles)
            .into_par_iter()
            .map(|_| {
                let mut thread_rng = thread_rng();
                Particle::random(&mut thread_rng, arena, &config)
            })
            .collect();

        Self::from_particles(arena, config, particles)
    }

    /// Like [`Simulator::new`] but draws from `rng`, so a seeded generator
    /// gives the same population every time.
    pub fn with_rng<R: Rng + ?Sized>(
        arena: Arena,
        config: SimulationConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let particles = (0..config.max_particles)
            .map(|_| Particle::random(rng, arena, &config))
            .collect();

        Self::from_particles(arena, config, particles)
    }

    /// Adopts an existing population. Radii outside the configured size
    /// range are clamped into it.
    pub fn from_particles(
        arena: Arena,
        config: SimulationConfig,
        mut particles: Vec<Particle>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        for (index, particle) in particles.iter_mut().enumerate() {
            particle.radius = clamp_radius(&config, ParticleId(index), particle.radius);
        }

        log::info!(
            "created {} particles in a {}x{} arena",
            particles.len(),
            arena.width,
            arena.height
        );

        Ok(Self {
            arena,
            particles,
            mode: config.mode,
            velocity_leak: config.velocity_leak,
            config,
        })
    }

    /// Steps every particle once and hands each one to `canvas` right after
    /// its step. `pointer` is in arena coordinates; `None` means the pointer
    /// is not over the arena.
    pub fn tick<C: Canvas + ?Sized>(&mut self, pointer: Option<Vector2<f32>>, canvas: &mut C) {
        let ctx = StepContext {
            pointer,
            mode: self.mode,
            velocity_leak: self.velocity_leak,
            arena: self.arena,
            config: &self.config,
        };

        for index in 0..self.particles.len() {
            let (before, rest) = self.particles.split_at_mut(index);
            let Some((particle, after)) = rest.split_first_mut() else {
                break;
            };

            particle.step(before.iter().chain(after.iter()), &ctx);
            canvas.draw_particle(&sprite(ParticleId(index), particle));
        }
    }

    /// Changes the arena size. Particles are not moved here; any that end up
    /// past an edge are clamped back by their next step.
    pub fn resize(&mut self, arena: Arena) {
        if arena != self.arena {
            log::debug!(
                "arena resized from {}x{} to {}x{}",
                self.arena.width,
                self.arena.height,
                arena.width,
                arena.height
            );
            self.arena = arena;
        }
    }

    /// First particle, in storage order, whose bounding box contains the point.
    pub fn find_particle_at(&self, point: Vector2<f32>) -> Option<ParticleId> {
        self.particles
            .iter()
            .position(|particle| particle.bounding_box_contains(point))
            .map(ParticleId)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            log::debug!("mode changed to {:?}", mode);
            self.mode = mode;
        }
    }

    pub fn set_velocity_leak(&mut self, enabled: bool) {
        if enabled != self.velocity_leak {
            log::debug!("velocity leak {}", if enabled { "enabled" } else { "disabled" });
            self.velocity_leak = enabled;
        }
    }

    pub fn set_color(&mut self, id: ParticleId, color: Color) -> Result<(), EditError> {
        self.particle_mut(id)?.color = color;
        Ok(())
    }

    /// Sets the radius, clamped to the configured size range. The center is
    /// moved inward if the larger circle would cross an edge.
    pub fn set_radius(&mut self, id: ParticleId, radius: f32) -> Result<(), EditError> {
        let radius = clamp_radius(&self.config, id, radius);
        let arena = self.arena;
        let particle = self.particle_mut(id)?;
        particle.radius = radius;
        particle.position = arena.clamp_center(particle.position, radius);
        Ok(())
    }

    /// Moves a particle, clamping it so it lies fully inside the arena.
    pub fn set_position(&mut self, id: ParticleId, position: Vector2<f32>) -> Result<(), EditError> {
        let arena = self.arena;
        let particle = self.particle_mut(id)?;
        let clamped = arena.clamp_center(position, particle.radius);
        if clamped != position {
            log::warn!(
                "position ({}, {}) clamped to ({}, {}) for particle {}",
                position.x,
                position.y,
                clamped.x,
                clamped.y,
                id.index()
            );
        }

        particle.position = clamped;
        Ok(())
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.0)
    }

    fn particle_mut(&mut self, id: ParticleId) -> Result<&mut Particle, EditError> {
        self.particles.get_mut(id.0).ok_or(EditError::UnknownParticle(id))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Renderable state of every particle without stepping.
    pub fn sprites(&self) -> impl Iterator<Item = ParticleSprite> + '_ {
        self.particles
            .iter()
            .enumerate()
            .map(|(index, particle)| sprite(ParticleId(index), particle))
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn velocity_leak(&self) -> bool {
        self.velocity_leak
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

fn clamp_radius(config: &SimulationConfig, id: ParticleId, radius: f32) -> f32 {
    let (min, max) = (config.min_radius(), config.max_radius());
    let clamped = if radius.is_nan() { min } else { radius.max(min).min(max) };
    if clamped != radius {
        log::warn!("radius {} clamped to {} for particle {}", radius, clamped, id.index());
    }
    clamped
}

fn sprite(id: ParticleId, particle: &Particle) -> ParticleSprite {
    ParticleSprite {
        id,
        center: particle.position,
        radius: particle.radius,
        color: particle.color,
    }
}

use std::cmp::Ordering;

use cgmath::prelude::*;
use cgmath::Vector2;
use rand::Rng;

use crate::arena::{Arena, clamp_axis};
use crate::color::Color;
use crate::config::{Mode, SimulationConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,
    pub color: Color,
}

/// Everything a particle needs to know about the world for one step.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub pointer: Option<Vector2<f32>>,
    pub mode: Mode,
    pub velocity_leak: bool,
    pub arena: Arena,
    pub config: &'a SimulationConfig,
}

impl Particle {
    pub fn new(position: Vector2<f32>, radius: f32, color: Color) -> Self {
        Self {
            position,
            velocity: cgmath::vec2(0.0, 0.0),
            radius,
            color,
        }
    }

    /// A resting particle with an integer radius in the configured range,
    /// placed uniformly where it fits inside the arena.
    ///
    /// Panics if `config` has an inverted size range; [`SimulationConfig::validate`]
    /// rejects such configs.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, arena: Arena, config: &SimulationConfig) -> Self {
        let radius = rng.gen_range(config.min_particle_size..=config.max_particle_size) as f32;
        let mut coordinate = |extent: f32| {
            if radius <= extent - radius {
                rng.gen_range(radius..=extent - radius)
            } else {
                extent * 0.5
            }
        };
        let position = cgmath::vec2(coordinate(arena.width), coordinate(arena.height));

        Self::new(position, radius, Color::random(rng))
    }

    /// Adds an impulse of `impulse` per axis pushing this particle away from
    /// `point` if the two overlap. Impulses from several calls accumulate.
    pub fn collide_with_point(&mut self, point: Vector2<f32>, collision_radius: f32, impulse: f32) {
        if self.position.distance(point) >= collision_radius + self.radius {
            return;
        }

        self.velocity.x += impulse * away(self.position.x, point.x);
        self.velocity.y += impulse * away(self.position.y, point.y);
    }

    /// Advances this particle by one tick.
    ///
    /// Order within a step: pointer and neighbour impulses, integration,
    /// edge bounce and clamp (X then Y), then the leak. Bouncing after the
    /// move keeps the particle inside the arena when the step returns.
    ///
    /// `neighbours` must not contain the particle itself; the simulator
    /// guarantees this by splitting its storage around the stepped index.
    pub fn step<'n>(
        &mut self,
        neighbours: impl IntoIterator<Item = &'n Particle>,
        ctx: &StepContext<'_>,
    ) {
        let impulse = ctx.config.collision_velocity;

        if ctx.mode == Mode::Collision {
            if let Some(pointer) = ctx.pointer {
                self.collide_with_point(pointer, ctx.config.pointer_collision_radius, impulse);
            }
        }

        for other in neighbours {
            self.collide_with_point(other.position, other.radius, impulse);
        }

        self.position += self.velocity;
        self.apply_boundary_conditions(ctx.arena);

        if ctx.velocity_leak {
            self.velocity -= self.velocity * ctx.config.velocity_leak_rate;
        }
    }

    // A corner hit runs both branches, so each axis is damped twice.
    fn apply_boundary_conditions(&mut self, arena: Arena) {
        macro_rules! handle_boundary {
            ($axis:ident, $other:ident, $extent:expr) => {
                if self.position.$axis + self.radius >= $extent
                    || self.position.$axis - self.radius <= 0.0
                {
                    self.velocity.$axis *= -0.5;
                    self.velocity.$other *= 0.5;
                    self.position.$axis = clamp_axis(self.position.$axis, self.radius, $extent);
                }
            };
        }

        handle_boundary!(x, y, arena.width);
        handle_boundary!(y, x, arena.height);
    }

    /// Hit test against the particle's square bounding box, edges included.
    pub fn bounding_box_contains(&self, point: Vector2<f32>) -> bool {
        (point.x - self.position.x).abs() <= self.radius
            && (point.y - self.position.y).abs() <= self.radius
    }
}

fn away(from: f32, to: f32) -> f32 {
    match from.partial_cmp(&to) {
        Some(Ordering::Less) => -1.0,
        Some(Ordering::Greater) => 1.0,
        _ => 0.0,
    }
}

//! Runs the simulation without a window, sweeping a virtual pointer around
//! the arena and logging how the population behaves.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cgmath::prelude::*;
use clap::Parser;
use particle_repel::{Arena, Canvas, ParticleSprite, SimulationConfig, Simulator};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Parser, Debug)]
struct Args {
    /// YAML file overriding the built-in simulation constants
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 800.0)]
    width: f32,
    #[arg(long, default_value_t = 600.0)]
    height: f32,
    #[arg(short, long, default_value_t = 1000)]
    ticks: usize,
    /// Log statistics every this many ticks
    #[arg(long, default_value_t = 100)]
    report_every: usize,
    /// Seed for the initial population; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,
}

// Counts sprites that were handed over outside the arena.
struct ContainmentCheck {
    arena: Arena,
    drawn: usize,
    escaped: usize,
}

impl Canvas for ContainmentCheck {
    fn draw_particle(&mut self, sprite: &ParticleSprite) {
        self.drawn += 1;
        if !self.arena.contains_circle(sprite.center, sprite.radius) {
            self.escaped += 1;
        }
    }
}

fn pointer_at(tick: usize, arena: Arena) -> cgmath::Vector2<f32> {
    let angle = tick as f32 * 0.03;
    cgmath::vec2(
        arena.width * (0.5 + 0.35 * angle.cos()),
        arena.height * (0.5 + 0.35 * (2.0 * angle).sin()),
    )
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let arena = Arena::new(args.width, args.height);
    let mut simulator = match args.seed {
        Some(seed) => Simulator::with_rng(arena, config, &mut StdRng::seed_from_u64(seed)),
        None => Simulator::new(arena, config),
    }
    .context("failed to create the simulation")?;

    let mut check = ContainmentCheck {
        arena,
        drawn: 0,
        escaped: 0,
    };
    let report_every = args.report_every.max(1);

    for tick in 1..=args.ticks {
        simulator.tick(Some(pointer_at(tick, arena)), &mut check);

        if tick % report_every == 0 {
            let speeds = simulator.particles().iter().map(|p| p.velocity.magnitude());
            let (sum, max) = speeds.fold((0.0f32, 0.0f32), |(sum, max), s| (sum + s, max.max(s)));
            log::info!(
                "tick {}: mean speed {:.4}, max speed {:.4}",
                tick,
                sum / simulator.particles().len() as f32,
                max
            );
        }
    }

    log::info!(
        "{} ticks done, {} sprites drawn, {} outside the arena",
        args.ticks,
        check.drawn,
        check.escaped
    );
    Ok(())
}

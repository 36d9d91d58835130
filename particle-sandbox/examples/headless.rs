// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Headless particle sandbox run
//!
//! Drives the sandbox the way the interactive frontend would, without a
//! window: a scripted sequence of pointer presses drops bodies into the box,
//! then the simulation runs for a number of frames while pile statistics are
//! printed at a fixed interval.
//!
//! # Running
//!
//! ```bash
//! # 60 bodies, 600 frames
//! cargo run --example headless --release
//!
//! # Custom body count, frame count and seed
//! cargo run --example headless --release -- --bodies 200 --frames 2000 --seed 7
//!
//! # Load parameters from a JSON preset
//! cargo run --example headless --release -- --preset zero_gravity.json
//! ```

use particle_sandbox::engine::{self, collision};
use particle_sandbox::input::{PointerButton, PointerPress};
use particle_sandbox::{Sandbox, SimulationParams};
use std::time::{Duration, Instant};

/// Run configuration
struct RunConfig {
    bodies: usize,
    frames: usize,
    report_interval: usize,
    seed: u64,
    preset: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            bodies: 60,
            frames: 600,
            report_interval: 100,
            seed: 12345,
            preset: None,
        }
    }
}

fn parse_args() -> RunConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = RunConfig::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--bodies", Some(v)) => match v.parse::<usize>() {
                Ok(n) => config.bodies = n,
                Err(_) => eprintln!("Warning: Invalid body count '{}', using default", v),
            },
            ("--frames", Some(v)) => match v.parse::<usize>() {
                Ok(n) => config.frames = n,
                Err(_) => eprintln!("Warning: Invalid frame count '{}', using default", v),
            },
            ("--seed", Some(v)) => match v.parse::<u64>() {
                Ok(n) => config.seed = n,
                Err(_) => eprintln!("Warning: Invalid seed '{}', using default", v),
            },
            ("--preset", Some(v)) => config.preset = Some(v.clone()),
            (flag, None) if flag.starts_with("--") => {
                eprintln!("Error: {} requires an argument", flag);
                std::process::exit(1);
            }
            _ => {
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    config
}

fn load_params(path: &str) -> SimulationParams {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Error: cannot read preset '{}': {}", path, err);
            std::process::exit(1);
        }
    };
    match SimulationParams::from_json_str(&text) {
        Ok(params) => params,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

/// Mean wall time per frame; zero frames count as one
fn per_step(elapsed: Duration, frames: usize) -> Duration {
    Duration::from_secs_f64(elapsed.as_secs_f64() / frames.max(1) as f64)
}

fn print_state(frame: usize, sandbox: &Sandbox) {
    let bodies = sandbox.bodies().as_slice();
    let energy = engine::total_kinetic_energy(bodies);
    let lowest = bodies
        .iter()
        .map(|b| b.position.y)
        .fold(f32::INFINITY, f32::min);
    let gap = collision::min_pair_distance(bodies).unwrap_or(f32::NAN);

    println!(
        "Frame {:>5}: bodies={:<4} KE={:.3e} lowest_y={:+.3} min_gap={:.4}",
        frame,
        bodies.len(),
        energy,
        lowest,
        gap
    );
}

fn main() {
    println!("==========================================================");
    println!("             Headless Particle Sandbox");
    println!("==========================================================");
    println!();

    let config = parse_args();

    let mut sandbox = Sandbox::with_seed(config.seed);
    if let Some(path) = &config.preset {
        sandbox = match sandbox.with_params(load_params(path)) {
            Ok(sandbox) => sandbox,
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        };
    }

    let params = sandbox.params().clone();
    println!("Configuration:");
    println!("  Bodies:      {}", config.bodies);
    println!("  Frames:      {}", config.frames);
    println!("  Seed:        {}", config.seed);
    println!("  Radius:      {}", params.radius);
    println!("  Gravity:     {}", params.gravity);
    println!("  Time step:   {}", params.time_step);
    println!("  Friction:    {} (energy loss {})", params.friction, params.energy_loss_enabled);
    println!();

    // Clicks sweep across the upper half of the window
    let viewport = *sandbox.viewport();
    let columns = 12usize;
    for i in 0..config.bodies {
        let column = i % columns;
        let row = i / columns;
        let x = (column as f32 + 0.5) / columns as f32 * viewport.width();
        let y = (0.1 + 0.05 * (row % 8) as f32) * viewport.height();
        sandbox.handle_pointer(PointerPress::new(PointerButton::Primary, x, y));
    }

    let start = Instant::now();
    let mut contacts = 0usize;
    print_state(0, &sandbox);
    for frame in 1..=config.frames {
        if let Some(report) = sandbox.tick() {
            contacts += report.collisions.contacts;
        }
        if frame % config.report_interval == 0 || frame == config.frames {
            print_state(frame, &sandbox);
        }
    }
    let elapsed = start.elapsed();

    // Right click in the middle of the floor
    let removed = sandbox.handle_pointer(PointerPress::new(
        PointerButton::Secondary,
        viewport.width() * 0.5,
        viewport.height() * 0.97,
    ));

    println!();
    println!("Summary:");
    println!("  Steps:        {}", sandbox.ticks());
    println!("  Contacts:     {}", contacts);
    println!("  Wall time:    {:.2?}", elapsed);
    println!("  Per step:     {:.2?}", per_step(elapsed, config.frames));
    println!("  Floor click:  {:?}", removed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_step_average() {
        assert_eq!(per_step(Duration::from_secs(4), 2), Duration::from_secs(2));
        assert_eq!(per_step(Duration::from_secs(3), 0), Duration::from_secs(3));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_per_step_frame_count_beyond_u32() {
        let frames = (u32::MAX as usize) + 1;
        let mean = per_step(Duration::from_secs(4), frames);
        assert!(mean < Duration::from_nanos(2));
    }
}

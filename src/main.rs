//! Headless demo driver for the easel runtime core.
//!
//! Builds a small scripted scene and runs the event loop without any
//! renderer attached: the stage state is observable through logging and an
//! optional JSON snapshot dump. Useful for exercising the core during
//! development and as an executable example of the API.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --ticks 300 --snapshot
//! RUST_LOG=debug cargo run -- --realtime
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;

use easel::components::shape::Color;
use easel::director::Director;
use easel::resources::handlers::{on_clicking_entity, on_starting, on_typing, when_entity};
use easel::resources::input::Key;
use easel::resources::loopcontrol::stop_loop;
use easel::resources::stage::Stage;
use easel::resources::stageconfig::StageConfig;
use easel::systems::snapshot::snapshot;
use easel::{animate, motion, shapes};

/// Easel headless demo
#[derive(Parser)]
#[command(version, about = "Runs a scripted easel scene without a renderer")]
struct Cli {
    /// Configuration file (INI). Missing file falls back to defaults.
    #[arg(long, value_name = "PATH", default_value = "./easel.ini")]
    config: PathBuf,

    /// Number of ticks to run before stopping.
    #[arg(long, default_value_t = 300)]
    ticks: u64,

    /// Pace ticks against the wall clock instead of free-running.
    #[arg(long)]
    realtime: bool,

    /// Print the final scene snapshot as JSON.
    #[arg(long)]
    snapshot: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = StageConfig::with_path(cli.config);
    config.load_from_file().ok(); // missing file: defaults are fine

    let mut director = match Director::with_config(config.clone()) {
        Ok(director) => director,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = build_scene(&mut director, config.seed) {
        eprintln!("Error building scene: {e}");
        std::process::exit(1);
    }

    let interval = Duration::from_secs_f32(1.0 / config.fps as f32);
    let mut next_tick = Instant::now();
    let mut ran = 0;
    for _ in 0..cli.ticks {
        match director.tick() {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                eprintln!("Handler error: {e}");
                std::process::exit(1);
            }
        }
        ran += 1;
        if cli.realtime {
            next_tick += interval;
            if let Some(wait) = next_tick.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
        }
    }
    info!("loop finished after {ran} ticks");

    if cli.snapshot {
        match serde_json::to_string_pretty(&snapshot(director.world())) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing snapshot: {e}"),
        }
    }
}

/// A ball drifting across the stage, a spinning block, and a jittering
/// satellite group. The loop ends when the ball leaves the stage or
/// Escape is typed.
fn build_scene(director: &mut Director, seed: u64) -> easel::Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let world = director.world_mut();
    let (width, height) = {
        let stage = world.resource::<Stage>();
        (stage.width, stage.height)
    };

    let ball = shapes::circle(world, Color::RED, 20.0, 40.0, height * 0.5)?;
    animate::glide_right(world, ball, width / 4.0)?;

    let block = shapes::rectangle(
        world,
        Color::BLUE,
        60.0,
        60.0,
        width * 0.5 - 30.0,
        height * 0.5 - 30.0,
    )?;
    animate::spin(world, block, 90.0)?;

    let mut satellites = Vec::new();
    for _ in 0..3 {
        let x = rng.f32() * width;
        let y = rng.f32() * height;
        satellites.push(shapes::circle(world, Color::GREEN, 6.0, x, y)?);
    }
    let cluster = shapes::group(world, &satellites, width * 0.5, height * 0.5)?;
    animate::glide_around(world, cluster, 2.0)?;

    on_starting(world, |_| {
        info!("scene is live");
        Ok(())
    });

    on_typing(world, |world, key, _delta| {
        if key == Key::Escape {
            info!("escape typed, stopping");
            stop_loop(world);
        }
        Ok(())
    });

    on_clicking_entity(world, block, |_, at| {
        info!("block clicked at ({}, {})", at.x, at.y);
        Ok(())
    });

    when_entity(
        world,
        ball,
        move |world| motion::get_x(world, ball).is_ok_and(|x| x >= width),
        move |world| {
            info!("ball reached the right edge");
            stop_loop(world);
            Ok(())
        },
    );

    Ok(())
}

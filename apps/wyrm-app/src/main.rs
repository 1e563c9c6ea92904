//! Wyrm chain follower CLI.
//!
//! Provides three modes of operation:
//! - `run`: Load followers from TOML (or the leviathan preset) and drive
//!   their heads around a circle, printing the solved chains
//! - `preset`: Print the leviathan preset as a TOML config
//! - `info`: Print workspace crate versions

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::log::LogPlugin;
use bevy::math::DVec3;
use bevy::prelude::*;
use clap::{Parser, Subcommand};

use wyrm_core::prelude::*;
use wyrm_follow::WyrmFollowPlugin;
use wyrm_follow::obstacle::BlockPos;
use wyrm_follow::plugin::{
    Follower, HeadInput, ObstacleMap, attach_skeleton, spawn_follower, to_dvec,
};
use wyrm_follow::presets::leviathan;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Head-driven articulated chain follower.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive followers around a circle and print the solved chains.
    Run {
        /// TOML config with `[[follower]]` tables. Defaults to the leviathan.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of ticks to simulate.
        #[arg(short, long, default_value_t = 100)]
        ticks: u32,

        /// Circle radius for the scripted head, in blocks.
        #[arg(short, long, default_value_t = 12.0)]
        radius: f64,

        /// Head speed in blocks per second.
        #[arg(short, long, default_value_t = 4.0)]
        speed: f64,

        /// Make every cell below this Y solid.
        #[arg(short, long, allow_negative_numbers = true)]
        floor: Option<i32>,
    },

    /// Print the leviathan preset as TOML.
    Preset,

    /// Print crate information.
    Info,
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn circle_head(radius: f64, angle: f64) -> HeadInput {
    let (sin, cos) = angle.sin_cos();
    HeadInput::new(
        DVec3::new(cos * radius, 0.5, sin * radius),
        DVec3::new(-sin, 0.0, cos),
    )
}

fn require_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.into(),
            message: format!("{value} must be finite and > 0"),
        })
    }
}

fn run_follow(
    config_path: Option<PathBuf>,
    ticks: u32,
    radius: f64,
    speed: f64,
    floor: Option<i32>,
) -> Result<(), WyrmError> {
    let config = match config_path {
        Some(path) => WyrmConfig::from_file(path)?,
        None => WyrmConfig {
            followers: vec![leviathan::config()],
            ..WyrmConfig::default()
        },
    };
    if config.followers.is_empty() {
        warn!("config has no [[follower]] tables, nothing to run");
        return Ok(());
    }
    require_positive("radius", radius)?;
    require_positive("speed", speed)?;

    let mut app = App::new();
    app.add_plugins(LogPlugin::default());
    app.insert_resource(config.simulation.clone());
    app.add_plugins((WyrmCorePlugin, WyrmFollowPlugin));
    if let Some(floor_y) = floor {
        app.insert_resource(ObstacleMap::new(move |cell: BlockPos| cell.y < floor_y));
    }
    app.finish();
    app.cleanup();

    let start = circle_head(radius, 0.0);
    let mut entities = Vec::with_capacity(config.followers.len());
    for follower in &config.followers {
        let entity = spawn_follower(app.world_mut(), follower, start)?;
        attach_skeleton(app.world_mut(), entity, follower);
        info!(
            "follower '{}': {} links, {} bones, total length {:.3}",
            follower.name,
            follower.link_count(),
            follower.bone_count(),
            follower.rest_lengths.iter().sum::<f64>()
        );
        entities.push(entity);
    }

    let step = speed / (radius * config.simulation.tick_hz);
    for t in 0..ticks {
        let head = circle_head(radius, f64::from(t) * step);
        for &entity in &entities {
            if let Some(mut input) = app.world_mut().get_mut::<HeadInput>(entity) {
                *input = head;
            }
        }
        app.update();
        debug!("{}", app.world().resource::<SimTick>());
    }

    let tick = *app.world().resource::<SimTick>();
    println!(
        "{tick} ({:.2}s simulated)",
        tick.elapsed(config.simulation.tick_hz).as_secs_f64()
    );
    for (entity, follower_cfg) in entities.iter().zip(&config.followers) {
        let Some(follower) = app.world().get::<Follower>(*entity) else {
            continue;
        };
        print_follower(&follower_cfg.name, follower);
    }
    Ok(())
}

fn print_follower(name: &str, follower: &Follower) {
    let chain = &follower.chain;
    let angles = chain.angles();
    println!();
    println!("{name}: max link error {:.2e}", chain.link_error());
    println!("  joint            position                 yaw°    pitch°   dyaw°   dpitch°");
    for (i, joint) in chain.joints().iter().enumerate() {
        let p = to_dvec(joint);
        let link = angles
            .absolute(i)
            .zip(angles.relative(i))
            .map(|((yaw, pitch), (dyaw, dpitch))| {
                format!(
                    "{:7.1} {:7.1} {:7.1} {:7.1}",
                    yaw.to_degrees(),
                    pitch.to_degrees(),
                    dyaw.to_degrees(),
                    dpitch.to_degrees()
                )
            })
            .unwrap_or_default();
        println!(
            "  {i:>5}  ({:8.3}, {:8.3}, {:8.3})  {link}",
            p.x, p.y, p.z
        );
    }
}

fn run_preset() -> Result<(), WyrmError> {
    let config = WyrmConfig {
        followers: vec![leviathan::config()],
        ..WyrmConfig::default()
    };
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn run_info() {
    println!("wyrm v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  wyrm-core    {}", env!("CARGO_PKG_VERSION"));
    println!("  wyrm-follow  {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!(
        "leviathan preset: {} links, {} bones",
        leviathan::REST_SIXTEENTHS.len(),
        leviathan::BONE_COUNT
    );
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            config,
            ticks,
            radius,
            speed,
            floor,
        }) => run_follow(config, ticks, radius, speed, floor),
        Some(Commands::Preset) => run_preset(),
        Some(Commands::Info) => {
            run_info();
            Ok(())
        }
        None => run_follow(None, 100, 12.0, 4.0, None),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Vibespring - Audio-reactive spring spiral
//!
//! Headless driver: runs the tick loop against an audio source, reports
//! what the geometry is doing, and can dump the final frame as JSON.

use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use vibespring::cli::Args;
use vibespring::geometry::{FrameDelta, GeometrySnapshot, SpringSystem};
use vibespring::Result;

fn main() -> ExitCode {
    // RUST_LOG takes precedence over the default level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut surface = args.parameter_surface()?;
    if let Some(path) = &args.save_presets {
        surface.presets().save(path)?;
        info!("Presets written to {}", path.display());
    }

    let params = surface.snapshot();
    info!(
        "Preset '{}': {} curves x {} nodes",
        args.start_preset(&surface),
        params.num_curves,
        params.nodes_per_curve
    );

    let mut system = SpringSystem::new(params, args.sampler_config());
    let mut audio = args.open_audio()?;

    let frame_time = Duration::from_secs_f64(1.0 / args.fps as f64);
    let switch_at = args.frames / 2;
    let run_started = Instant::now();

    for frame_num in 0..args.frames {
        let frame_started = Instant::now();

        if frame_num == switch_at {
            if let Some(name) = &args.switch_to {
                let change = surface.load_preset(name)?;
                system.apply(surface.snapshot());
                info!(
                    "Frame {}: switched to '{}' ({:?} change, generation {})",
                    frame_num,
                    name,
                    change,
                    system.store().generation
                );
            }
        }

        let delta = system.tick_from(audio.as_mut());

        if (frame_num + 1) % args.fps as u64 == 0 {
            log_summary(frame_num + 1, &system, &delta);
        }

        if args.realtime {
            let elapsed = frame_started.elapsed();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }
    }

    info!(
        "Ran {} frames in {:.2?}",
        system.ticks(),
        run_started.elapsed()
    );

    if let Some(path) = &args.snapshot {
        let snapshot = GeometrySnapshot::capture(system.store(), system.params());
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &snapshot)?;
        info!("Snapshot written to {}", path.display());
    }

    Ok(())
}

/// One line per second of frames: how tall the springs are and how fast the disc spins
fn log_summary(frame_num: u64, system: &SpringSystem, delta: &FrameDelta) {
    let store = system.store();
    let tips: Vec<f32> = store
        .curves
        .iter()
        .filter_map(|c| c.points().last().map(|p| p.y))
        .collect();
    let mean_tip = if tips.is_empty() {
        0.0
    } else {
        tips.iter().sum::<f32>() / tips.len() as f32
    };
    let max_tip = tips.iter().copied().fold(0.0f32, f32::max);
    let rotation = store.segments.first().map_or(0.0, |s| s.rotation);
    let triangles: usize = store.segments.iter().map(|s| s.mesh.triangle_count()).sum();
    let instances = store.segment_instances();

    info!(
        "Frame {:>6}: volume {:.3}, tip height mean {:.2} max {:.2}, spin {:.3} rad, {} curves dirty",
        frame_num,
        delta.volume_boost,
        mean_tip,
        max_tip,
        rotation,
        delta.dirty_curves.len()
    );
    tracing::debug!(
        "Frame {:>6}: {} segment instances ({} bytes), {} triangles",
        frame_num,
        instances.len(),
        std::mem::size_of_val(instances.as_slice()),
        triangles
    );
}

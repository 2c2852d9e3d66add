//! Hex map pathfinding and field-of-view demo.
//!
//! Run: cargo run --bin hexmap -- --radius 8 --density 0.3 --target 6,-2

use std::time::Duration;

use clap::Parser;
use hexfield_core::{Context, HexCoord};
use hexfield_demos::{DemoError, HexMap, parse_coord, run_scene};

/// Generate a random hex map, find a path across it and show what the
/// origin can see.
#[derive(Parser, Debug)]
#[command(name = "hexmap")]
#[command(version)]
struct Args {
    /// Map radius in hexes
    #[arg(short, long, default_value_t = 8)]
    radius: i32,

    /// Probability of a hex being a wall
    #[arg(short, long, default_value_t = 0.3)]
    density: f64,

    /// Random seed for map generation
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Path origin as "q,r"
    #[arg(long, default_value = "0,0", value_parser = parse_coord)]
    origin: HexCoord,

    /// Path target as "q,r"; defaults to the east edge of the map
    #[arg(long, value_parser = parse_coord)]
    target: Option<HexCoord>,

    /// Sight radius for the field of view
    #[arg(long, default_value_t = 5)]
    sight: i32,

    /// Abandon the search after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn run(args: &Args) -> Result<(), DemoError> {
    let target = args
        .target
        .unwrap_or_else(|| HexCoord::new(args.radius.saturating_abs(), 0));
    let map = HexMap::generate(args.radius, args.density, args.seed, &[args.origin, target])?;
    let ctx = args
        .timeout_ms
        .map(|ms| Context::with_timeout(Duration::from_millis(ms)));
    let scene = run_scene(&map, args.origin, target, args.sight, ctx)?;

    print!("{}", map.render(Some(&scene)));
    match &scene.path {
        Some(path) => println!(
            "path {} -> {}: {} steps, cost {}",
            scene.origin,
            scene.target,
            path.len() - 1,
            path.total_cost()
        ),
        None if scene.cancelled => println!("search timed out"),
        None => println!("no path from {} to {}", scene.origin, scene.target),
    }
    println!(
        "expanded {} of {} discovered hexes; {} hexes in sight",
        scene.stats.expanded,
        scene.stats.discovered,
        scene.seen.len()
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

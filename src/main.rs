//! Polycube enumerator
//!
//! Generates all distinct polycubes of a given size, up to the 24 proper
//! rotations of the cube, with optional on-disk caching and an interactive
//! 3-D viewer.

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use polycube_lib::cache;
use polycube_lib::growth;
use polycube_lib::renderer;

/// Enumerates polycubes of a given size up to rotation.
#[derive(Parser)]
#[command(name = "polycube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate all distinct polycubes of size N.
    Generate {
        /// Number of cubes per shape.
        n: i64,
        /// Skip the on-disk cache (`polycubes_<n>.bin` is neither read nor
        /// written). Caching is on by default.
        #[arg(long)]
        no_cache: bool,
        /// Open the interactive viewer after generating.
        #[arg(long)]
        render: bool,
    },
    /// Report whether a cache file exists for size N, and its shape count.
    CacheInfo {
        /// Number of cubes per shape.
        n: i64,
    },
}

fn main() -> ExitCode {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Generate { n, no_cache, render }) => {
            run_generate(n, !no_cache, render)
        }
        Some(Command::CacheInfo { n }) => run_cache_info(n),
        None => {
            eprintln!("no command given; try `polycube generate <n>`");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(n: i64, use_cache: bool, render: bool) -> polycube_lib::Result<()> {
    // The CLI surface requires N >= 1 (§6), stricter than the library's
    // `growth::generate`, which also accepts n=0 as a base case (§4.6) for
    // callers that drive the Growth Engine directly rather than through
    // this binary.
    if n < 1 {
        return Err(polycube_lib::Error::InvalidSize(n));
    }

    log::info!("generating polycubes of size {n}");
    let started = Instant::now();
    let shapes = growth::generate(n, use_cache)?;
    let elapsed = started.elapsed();

    println!(
        "Found {} unique polycube{} of size {n} in {:.2}s",
        shapes.len(),
        if shapes.len() == 1 { "" } else { "s" },
        elapsed.as_secs_f64()
    );

    if render {
        renderer::display(shapes);
    }

    Ok(())
}

fn run_cache_info(n: i64) -> polycube_lib::Result<()> {
    if n < 0 {
        return Err(polycube_lib::Error::InvalidSize(n));
    }
    let n = n as u32;
    if !cache::exists(n) {
        println!("no cache file for n={n}");
        return Ok(());
    }
    match cache::load(n) {
        Some(shapes) => println!("cache for n={n}: {} shapes", shapes.len()),
        None => println!("cache file for n={n} exists but could not be read"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_generate_rejects_zero_and_negative_n() {
        assert!(matches!(
            run_generate(0, false, false),
            Err(polycube_lib::Error::InvalidSize(0))
        ));
        assert!(matches!(
            run_generate(-3, false, false),
            Err(polycube_lib::Error::InvalidSize(-3))
        ));
    }

    #[test]
    fn known_count_snapshot_for_n_four() {
        let shapes = growth::generate(4, false).unwrap();
        let mut fingerprints: Vec<Vec<u8>> =
            shapes.iter().map(polycube_lib::canonical::fingerprint).collect();
        fingerprints.sort();
        insta::assert_debug_snapshot!(fingerprints.len());
    }
}

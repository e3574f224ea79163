//! Reads `N` triangles from stdin and prints the indices of those that
//! intersect at least one other triangle.

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use triangles_driver::{render, solve, IndexBase, Method, OutputFormat};
use triangles_geometry::OctreeConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Report triangles that intersect at least one other triangle")]
struct Args {
    /// Print 1-based indices instead of 0-based
    #[arg(long)]
    one_based: bool,
    /// Compare every pair directly instead of building an octree
    #[arg(long)]
    brute_force: bool,
    /// Octree nodes with this many triangles or fewer are not split
    #[arg(long, default_value_t = OctreeConfig::default().min_node_size)]
    min_node_size: usize,
    /// Maximum octree depth
    #[arg(long, default_value_t = OctreeConfig::default().max_depth)]
    max_depth: usize,
    /// Worker threads (defaults to the available parallelism)
    #[arg(long)]
    workers: Option<usize>,
    /// Use single-precision arithmetic
    #[arg(long)]
    single: bool,
    /// Print the indices as a JSON array
    #[arg(long)]
    json: bool,
}

impl Args {
    fn method(&self) -> Method {
        if self.brute_force {
            return Method::BruteForce;
        }
        let config = OctreeConfig {
            min_node_size: self.min_node_size,
            max_depth: self.max_depth,
            ..OctreeConfig::default()
        };
        Method::Octree(config.with_workers(self.workers.unwrap_or(0)))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read triangles from stdin")?;

    let method = args.method();
    info!(?method, single = args.single, "solving");
    let found = if args.single {
        solve::<f32>(&input, &method)
    } else {
        solve::<f64>(&input, &method)
    }
    .context("invalid triangle input")?;

    let base = if args.one_based { IndexBase::One } else { IndexBase::Zero };
    let format = if args.json { OutputFormat::Json } else { OutputFormat::Lines };
    let rendered = render(&found, base, format)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

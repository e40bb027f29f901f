mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use huetree_dt::DecisionTreeConfig;
use huetree_io::SampleReader;

use crate::config::{RunConfig, USAGE};

#[derive(Parser)]
#[command(name = "huetree")]
#[command(about = "Grow a fixed-depth decision tree that names colors from labeled RGB samples")]
#[command(version)]
struct Cli {
    /// Positional settings in any order: a `.txt` sample file, a render mode
    /// (code, condensed, super-brief), and a tree depth
    #[arg(allow_negative_numbers = true)]
    tokens: Vec<String>,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,

    /// Number of threads for parallel classification (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Write the built tree to this path as a binary model
    #[arg(long)]
    save_model: Option<PathBuf>,

    /// Classify a color with the built tree, given as R,G,B (repeatable)
    #[arg(long, value_parser = parse_rgb)]
    rgb: Vec<(u8, u8, u8)>,
}

fn parse_rgb(s: &str) -> Result<(u8, u8, u8), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = *parts.as_slice() else {
        return Err(format!("expected R,G,B but got \"{s}\""));
    };
    let channel = |c: &str| {
        c.parse::<u8>()
            .map_err(|_| format!("color channel \"{c}\" is not an integer in 0..=255"))
    };
    Ok((channel(r)?, channel(g)?, channel(b)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let run = match RunConfig::from_tokens(&cli.tokens) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };
    debug!(?run, "run configuration");

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    let samples = SampleReader::new(&run.sample_path)
        .read()
        .with_context(|| format!("error getting the file {}", run.sample_path.display()))?;
    println!("Collected {} samples", samples.len());

    let tree = DecisionTreeConfig::new(run.depth).fit(samples.samples());
    info!(
        n_nodes = tree.n_nodes(),
        n_leaves = tree.n_leaves(),
        depth = tree.depth(),
        "tree built"
    );

    if !samples.is_empty() {
        let cm = tree
            .evaluate(samples.samples())
            .context("failed to evaluate the tree on its training samples")?;
        info!(accuracy = cm.accuracy(), "training accuracy");
        for m in cm.class_metrics().iter().filter(|m| m.support > 0) {
            debug!(
                class = %m.class,
                precision = m.precision,
                recall = m.recall,
                f1 = m.f1,
                support = m.support,
                "class metrics"
            );
        }
    }

    print!("{}", tree.render(0, run.render_mode));

    if let Some(path) = &cli.save_model {
        tree.save(path)
            .with_context(|| format!("failed to save model to {}", path.display()))?;
    }

    for &(r, g, b) in &cli.rgb {
        println!("{r},{g},{b} -> {}", tree.classify_rgb(r, g, b));
    }

    Ok(())
}

//! meet-decision CLI.
//!
//! Reads the generated meeting tables, decides a final time and venue for
//! each meeting, and writes the final-decision table.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use meet_decision::config::{RunConfig, TableFiles};
use meet_decision::dataset::{
    format_timestamp, prior_commitments, read_decisions, write_decisions, Dataset, JoinStats,
};
use meet_decision::resolver::{GreedyResolver, ResolutionSummary};
use meet_decision::sampling::MeetingSampler;
use meet_decision::validation::{validate_input, ValidationError};

#[derive(Parser)]
#[command(name = "meet-decision", version)]
#[command(about = "Pick conflict-free final times and venues for generated meetings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct DatasetArgs {
    /// TOML run configuration
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Directory holding the input tables
    #[arg(long, short)]
    dataset_dir: Option<PathBuf>,
    /// Use the camelCase file names (meets.csv, isAvailableAt.csv, ...)
    #[arg(long)]
    legacy_layout: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve final decisions and write them.
    Resolve {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Output CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Earlier decisions to keep as fixed commitments
        #[arg(long)]
        prior: Option<PathBuf>,
        /// Fraction of meetings to leave undecided on purpose
        #[arg(long)]
        skip_ratio: Option<f64>,
        /// Seed for sampling
        #[arg(long)]
        seed: Option<u64>,
        /// Write a JSON run report here
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Check the input tables and list every problem.
    Validate {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Show the ranked candidates of one meeting.
    Candidates {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Meeting ID
        meeting: String,
        /// Show at most this many candidates
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Serialize)]
struct RunReport<'a> {
    config: &'a RunConfig,
    join: &'a JoinStats,
    summary: &'a ResolutionSummary,
    unresolved: Vec<&'a str>,
    errors: Vec<&'a ValidationError>,
}

fn load_config(args: &DatasetArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(dir) = &args.dataset_dir {
        config.dataset_dir = dir.clone();
    }
    if args.legacy_layout {
        config.tables = TableFiles::legacy();
    }
    Ok(config)
}

fn run_resolve(
    mut config: RunConfig,
    output: Option<PathBuf>,
    prior: Option<PathBuf>,
    skip_ratio: Option<f64>,
    seed: Option<u64>,
    report: Option<PathBuf>,
) -> Result<()> {
    if let Some(output) = output {
        config.output = output;
    }
    if let Some(prior) = prior {
        config.prior = Some(prior);
    }
    if let Some(ratio) = skip_ratio {
        config.skip_ratio = ratio;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    config.validate()?;

    let dataset = Dataset::load(&config)?;
    let (candidates, join_stats) = dataset.candidates()?;

    let prior = match &config.prior {
        Some(path) => {
            let decisions = read_decisions(path)
                .with_context(|| format!("reading prior decisions {}", path.display()))?;
            prior_commitments(&decisions, &dataset.meetings)
        }
        None => Vec::new(),
    };

    // Meetings with a prior decision are never sampled away.
    let mut rng = StdRng::seed_from_u64(config.seed);
    let meetings = {
        let decided: HashSet<&str> = prior.iter().map(|c| c.meeting_id.as_str()).collect();
        MeetingSampler::new(config.skip_ratio).sample_keeping(
            &dataset.meetings,
            |m| decided.contains(m.id.as_str()),
            &mut rng,
        )
    };

    let resolution = GreedyResolver::new()
        .with_prior_commitments(prior)
        .resolve(&meetings, &candidates, &dataset.venues);
    let summary = ResolutionSummary::calculate(&resolution);

    for e in resolution.errors() {
        warn!(entity_id = %e.entity_id, kind = ?e.kind, "{}", e.message);
    }

    write_decisions(&config.output, &resolution.decisions())?;

    info!(
        committed = summary.committed,
        already_decided = summary.already_decided,
        unresolved = summary.unresolved,
        invalid = summary.invalid,
        rate = summary.resolution_rate,
        fallbacks = summary.fallbacks,
        "done"
    );

    if let Some(path) = report {
        let report = RunReport {
            config: &config,
            join: &join_stats,
            summary: &summary,
            unresolved: resolution.unresolved(),
            errors: resolution.errors(),
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)
            .with_context(|| format!("writing report {}", path.display()))?;
    }
    Ok(())
}

fn run_validate(config: RunConfig) -> Result<bool> {
    let dataset = Dataset::load(&config)?;
    let (candidates, join_stats) = dataset.candidates()?;

    println!(
        "{} meetings, {} venues, {} candidates ({} links dropped)",
        dataset.meetings.len(),
        dataset.venues.len(),
        candidates.candidate_count(),
        join_stats.dropped()
    );

    match validate_input(&dataset.meetings, &candidates, &dataset.venues) {
        Ok(()) => {
            println!("OK");
            Ok(true)
        }
        Err(errors) => {
            for e in &errors {
                println!("{:?}\t{}\t{}", e.kind, e.entity_id, e.message);
            }
            println!("{} problem(s)", errors.len());
            Ok(false)
        }
    }
}

fn run_candidates(config: RunConfig, meeting: &str, limit: usize) -> Result<()> {
    let dataset = Dataset::load(&config)?;
    let (candidates, _) = dataset.candidates()?;
    let ranked = candidates.get(meeting);
    if ranked.is_empty() {
        println!("No candidates for meeting {meeting}");
        return Ok(());
    }
    println!("rank\tsupport\tvenue\ttime");
    for (rank, c) in ranked.iter().take(limit).enumerate() {
        println!(
            "{}\t{}\t{}\t{}",
            rank + 1,
            c.support,
            c.venue_id,
            format_timestamp(c.time_ms)
        );
    }
    if ranked.len() > limit {
        println!("... {} more", ranked.len() - limit);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve {
            dataset,
            output,
            prior,
            skip_ratio,
            seed,
            report,
        } => run_resolve(load_config(&dataset)?, output, prior, skip_ratio, seed, report),
        Commands::Validate { dataset } => {
            if !run_validate(load_config(&dataset)?)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Candidates {
            dataset,
            meeting,
            limit,
        } => run_candidates(load_config(&dataset)?, &meeting, limit),
    }
}

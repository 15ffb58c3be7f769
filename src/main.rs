use std::path::PathBuf;

use clap::Parser;

use digraph_census::census;
use digraph_census::config::RunConfig;
use digraph_census::oracle::{OracleKind, PermutationOracle, Vf2Oracle};
use digraph_census::partition::Strategy;
use digraph_census::types::{IndexRange, NodeCount};
use digraph_census::Error;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Number of nodes.
    #[arg(value_name = "INT", allow_negative_numbers = true)]
    nodes: i64,

    /// Directory for the output artifacts.
    #[arg(long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Index range: `exclusive` (0..2^(n²-n)) or `inclusive` (also 2^(n²-n)).
    #[arg(long, value_name = "RANGE", default_value = "exclusive")]
    range: IndexRange,

    /// Partitioning strategy: `linear` or `bucketed`.
    #[arg(long, value_name = "STRATEGY", default_value = "linear")]
    strategy: Strategy,

    /// Isomorphism oracle: `vf2` or `permutation`.
    #[arg(long, value_name = "ORACLE", default_value = "vf2")]
    oracle: OracleKind,

    /// Match representatives in parallel.
    #[arg(long)]
    parallel: bool,

    /// Stream the full index log to disk instead of buffering it.
    #[arg(long)]
    stream: bool,

    /// Refuse runs enumerating more configurations than this.
    #[arg(long, value_name = "INT")]
    budget: Option<u64>,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Formats a crate error as `"<kind> error: <message>"`.
fn diagnostic(e: Error) -> color_eyre::Report {
    color_eyre::eyre::eyre!("{} error: {}", e.kind(), e)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = match args.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let nodes = NodeCount::try_from(args.nodes).map_err(diagnostic)?;
    let config = RunConfig::new(nodes)
        .with_range(args.range)
        .with_strategy(args.strategy)
        .with_parallel(args.parallel)
        .with_budget(args.budget)
        .with_output_dir(args.output)
        .with_stream_log(args.stream);

    let summary = match args.oracle {
        OracleKind::Vf2 => census::execute(&config, &Vf2Oracle),
        OracleKind::Permutation => census::execute(&config, &PermutationOracle::default()),
    }
    .map_err(diagnostic)?;

    println!("{}", summary);
    println!("Total time: {:.3} s", time_total.elapsed().as_secs_f64());

    Ok(())
}

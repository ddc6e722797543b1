use anyhow::{Context, Result};
use binary_trees::stats::CountingAllocator;
use binary_trees::{AllocatorKind, BenchConfig, Scheduler, MAX_DEPTH, MIN_DEPTH};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator::new();

#[derive(Parser, Debug)]
#[command(
    name = "binary-trees",
    about = "Binary-trees benchmark with naive and buffered node allocation"
)]
struct Cli {
    /// Problem size: depth of the long-lived tree (at least min-depth + 2).
    #[arg(
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_DEPTH))
    )]
    size: u32,

    /// Allocator type: naive (0) or buffered (1).
    #[arg(long, default_value = "naive")]
    allocator: String,

    /// Shallowest depth of the iterated trees.
    #[arg(
        long,
        default_value_t = MIN_DEPTH,
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_DEPTH - 2))
    )]
    min_depth: u32,

    /// Trees built in parallel (default: available parallelism).
    #[arg(long, short = 'j')]
    jobs: Option<usize>,

    /// Skip the trailing allocation statistics line.
    #[arg(long)]
    no_memstats: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let allocator: AllocatorKind = cli
        .allocator
        .parse()
        .context("invalid --allocator selector")?;

    let mut config = BenchConfig {
        min_depth: cli.min_depth,
        ..BenchConfig::new(cli.size, allocator)
    };
    if let Some(jobs) = cli.jobs {
        config = config.with_parallelism(jobs).context("invalid --jobs value")?;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let scheduler = Scheduler::new(config);
    let report = runtime
        .block_on(scheduler.run())
        .context("benchmark run failed")?;

    print!("{}", report);
    if !cli.no_memstats {
        println!("{}", GLOBAL.snapshot());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_bounded_by_max_depth() {
        let cli = Cli::try_parse_from(["binary-trees", "21", "--allocator", "buffered"]).unwrap();
        assert_eq!(cli.size, 21);
        assert!(Cli::try_parse_from(["binary-trees", "29"]).is_ok());
        assert!(Cli::try_parse_from(["binary-trees", "30"]).is_err());
        assert!(Cli::try_parse_from(["binary-trees", "--min-depth", "28"]).is_err());
    }
}

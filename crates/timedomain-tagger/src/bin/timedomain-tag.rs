use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use timedomain_tagger::{
    CacheConfig, InvalidPatternPolicy, LineSource, TaggerConfig, TimeDomainTagger,
    DEFAULT_TAG_KEY,
};

/// Translate time domain patterns into opening_hours restrictions.
///
/// Reads `context_id<TAB>pattern` lines and writes one
/// `context_id<TAB>restriction` line per feature that has a restriction,
/// in context id order.
#[derive(Parser, Debug)]
#[command(name = "timedomain-tag", version, about)]
struct CliArgs {
    /// Input file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tag key printed in the header line
    #[arg(long, env = "TIMEDOMAIN_TAG_KEY", default_value = DEFAULT_TAG_KEY)]
    tag_key: String,

    /// Print a `context_id<TAB>tag key` header line first
    #[arg(long)]
    header: bool,

    /// Leave features with invalid patterns untagged instead of failing
    #[arg(long, env = "TIMEDOMAIN_SKIP_INVALID")]
    skip_invalid: bool,

    /// Number of distinct pattern texts to cache (0 disables caching)
    #[arg(long, env = "TIMEDOMAIN_CACHE_SIZE", default_value = "10000")]
    cache_size: usize,

    /// Tag features on all cores (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,
}

impl CliArgs {
    fn tagger_config(&self) -> TaggerConfig {
        let policy = if self.skip_invalid {
            InvalidPatternPolicy::Skip
        } else {
            InvalidPatternPolicy::Fail
        };
        let mut builder = TaggerConfig::builder()
            .with_tag_key(self.tag_key.clone())
            .with_policy(policy)
            .with_parallel(self.parallel);
        if self.cache_size > 0 {
            builder = builder.with_cache(CacheConfig {
                max_entries: self.cache_size,
            });
        }
        builder.build()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();

    let source = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => LineSource::from_path(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?,
        _ => LineSource::from_reader(io::stdin().lock()).context("failed to read stdin")?,
    };
    info!(entries = source.len(), "loaded time domain entries");

    let tagger = TimeDomainTagger::with_config(args.tagger_config())?;
    let report = tagger.tag_all(&source)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create '{}'", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    if args.header {
        writeln!(out, "context_id\t{}", report.tag_key)?;
    }
    for (context_id, value) in report.iter() {
        writeln!(out, "{}\t{}", context_id, value)?;
    }
    out.flush()?;

    for skipped in &report.skipped {
        eprintln!("skipped {}: {}", skipped.context_id, skipped.error);
    }
    Ok(())
}

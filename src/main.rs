//! PrEx CLI entry point
//!
//! Return the promoter sequence for each given gene identifier.

use clap::Parser;
use log::{info, warn};
use prex::core::{promoter_region, validate, AnnotationStore, Config, IdKind, LookupColumn, CONFIG_FILE};
use prex::extract;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "prex")]
#[command(about = "Return promoter sequence for given gene")]
#[command(version)]
#[command(author = "PrEx Contributors")]
struct Cli {
    /// Gene identifier: Gene symbol, ensembl! gene/transcript id, Refseq gene id, UCSC gene id
    #[arg(required = true)]
    identifiers: Vec<String>,

    /// (multi)FASTA file
    #[arg(short = 'f', long, value_name = "filename")]
    fasta: Option<PathBuf>,

    /// GFF3 formatted annotation
    #[arg(short = 'g', long, value_name = "filename")]
    gff3: Option<PathBuf>,

    /// Bases upstream of TSS
    #[arg(short = 'u', long, value_name = "nt", default_value_t = 1000, allow_negative_numbers = true)]
    up: i64,

    /// Bases downstream of TSS
    #[arg(short = 'd', long, value_name = "nt", default_value_t = 500, allow_negative_numbers = true)]
    down: i64,
}

/// Process one identifier end to end. Every failure here is
/// recoverable: warn, skip, and move on to the next identifier.
fn process_identifier(
    store: &AnnotationStore,
    identifier: &str,
    fasta: &std::path::Path,
    up: i64,
    down: i64,
) {
    let kind = match IdKind::classify(identifier) {
        Some(kind) => kind,
        None => {
            warn!("I was unable to understand your gene id: {}", identifier);
            return;
        }
    };
    info!("{} => {}", identifier, kind.description());

    let column = kind.lookup_column();
    if let Err(e) = validate(store, column, identifier) {
        warn!("{}", e);
        return;
    }

    // Safe only after validation: a unique principal start codon
    // exists, so the first principal-tagged transcript is
    // representative even if several share that start codon.
    let principal_tid = match store.principal_transcript_id(column, identifier) {
        Some(tid) => tid.to_string(),
        None => {
            warn!("no principal isoform found for {}", identifier);
            return;
        }
    };

    let rows = store.records_matching(LookupColumn::TranscriptId, &principal_tid);
    let region = match promoter_region(rows, identifier, up, down) {
        Some(region) => region,
        None => {
            warn!("empty promoter region for {}", identifier);
            return;
        }
    };

    let fasta_out = PathBuf::from(format!("{}.fa", identifier));
    match extract::extract(&region, fasta, &fasta_out) {
        Ok(()) => info!(
            "{} promoter written to {}",
            identifier,
            fasta_out.display()
        ),
        Err(e) => warn!("extraction failed for {}: {}", identifier, e),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let start = Instant::now();

    let config = Config::load(CONFIG_FILE)?
        .merge_args(cli.fasta, cli.gff3)
        .resolve()?;

    info!("loading gff3: {}", config.gff3.display());
    let store = AnnotationStore::from_path(&config.gff3)?;
    info!("loaded {} annotation rows in {:.2}s", store.len(), start.elapsed().as_secs_f64());

    info!("probing genes");
    for identifier in &cli.identifiers {
        process_identifier(&store, identifier, &config.fasta, cli.up, cli.down);
    }

    Ok(())
}

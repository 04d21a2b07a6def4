//! snp-refalt CLI entry point
//!
//! Assigns REF/ALT alleles to SNP records using a per-chromosome reference genome.

use anyhow::Context;
use clap::Parser;
use log::error;
use snp_refalt::convert_snps;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "snp-refalt")]
#[command(about = "Determine reference and alternate alleles for SNP records")]
#[command(version)]
#[command(author = "snp-refalt Contributors")]
struct Cli {
    /// Input file (#CHROM POS ID allele1 allele2), optionally gzip/bzip2 compressed
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output file (#CHROM POS ID REF ALT); gzip compressed when it ends in .gz
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Directory with per-chromosome FASTA files (chr<N>.fa)
    #[arg(short = 'r', long = "ref")]
    ref_dir: PathBuf,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let start = Instant::now();
    let stats = convert_snps(&cli.input, &cli.output, &cli.ref_dir)
        .with_context(|| format!("Failed to process {}", cli.input.display()))?;

    eprintln!("\n=== Conversion Statistics ===");
    eprintln!("Total records:     {}", stats.total);
    eprintln!("allele1 is REF:    {}", stats.allele1_ref);
    eprintln!("allele2 is REF:    {}", stats.allele2_ref);
    eprintln!("Pass-through:      {}", stats.fallback());
    eprintln!("  - NoReference:   {}", stats.missing_reference);
    eprintln!("  - OutOfRange:    {}", stats.out_of_range);
    eprintln!("  - Mismatch:      {}", stats.mismatch);
    eprintln!("  - LookupFailed:  {}", stats.lookup_failed);
    eprintln!("Time elapsed:      {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

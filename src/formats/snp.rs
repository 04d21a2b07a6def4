//! SNP table adapter
//!
//! Reads `#CHROM POS ID allele1 allele2` records, decides which allele is
//! the reference base, and writes `#CHROM POS ID REF ALT`.

use crate::core::io::{create_output, open_input, LineIterator};
use crate::core::{InputError, InputResult, ReferenceError, Result};
use crate::reference::ReferenceGenome;
use log::{debug, error, info, warn};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Required prefix of the input header line
pub const INPUT_HEADER_PREFIX: &str = "#CHROM";

/// Header written to the output file
pub const OUTPUT_HEADER: &str = "#CHROM\tPOS\tID\tREF\tALT";

/// Number of columns in an input record
const FIELD_COUNT: usize = 5;

/// One input SNP record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpRecord {
    pub chrom: String,
    /// 1-based position
    pub pos: u64,
    pub id: String,
    pub allele1: String,
    pub allele2: String,
}

impl SnpRecord {
    /// Parse a whitespace-delimited record line
    pub fn parse(line: &str, line_number: usize) -> InputResult<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != FIELD_COUNT {
            return Err(InputError::InvalidRecord {
                line: line_number,
                message: format!(
                    "expected {} fields (CHROM POS ID allele1 allele2), found {}",
                    FIELD_COUNT,
                    fields.len()
                ),
            });
        }

        let pos = fields[1].parse::<u64>().map_err(|e| InputError::InvalidRecord {
            line: line_number,
            message: format!("invalid position '{}': {}", fields[1], e),
        })?;

        Ok(Self {
            chrom: fields[0].to_string(),
            pos,
            id: fields[2].to_string(),
            allele1: fields[3].to_string(),
            allele2: fields[4].to_string(),
        })
    }
}

/// A record with REF/ALT assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecord {
    pub chrom: String,
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
}

impl ResolvedRecord {
    fn from_record(record: SnpRecord, resolution: &Resolution) -> Self {
        let (ref_allele, alt_allele) = match resolution {
            Resolution::Allele2IsRef => (record.allele2, record.allele1),
            _ => (record.allele1, record.allele2),
        };
        Self {
            chrom: record.chrom,
            pos: record.pos,
            id: record.id,
            ref_allele,
            alt_allele,
        }
    }
}

impl fmt::Display for ResolvedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.chrom, self.pos, self.id, self.ref_allele, self.alt_allele
        )
    }
}

/// Why a record kept its input allele order without confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No FASTA file for the chromosome
    MissingReference { path: PathBuf },
    /// Position is 0 or past the end of the sequence
    OutOfRange { length: u64 },
    /// Reference base matches neither allele
    Mismatch { base: char },
    /// Any other lookup failure
    LookupFailed { message: String },
}

/// Outcome of allele resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Reference base equals allele1
    Allele1IsRef,
    /// Reference base equals allele2; alleles are swapped
    Allele2IsRef,
    /// Pass-through: REF=allele1, ALT=allele2
    Fallback(FallbackReason),
}

/// Compare a reference base against the two candidate alleles.
///
/// Returns `None` when neither allele matches. `base` is expected upper-cased
/// and alleles must equal it exactly, so lowercase alleles never match;
/// allele1 wins when both alleles match.
pub fn compare_alleles(base: u8, allele1: &str, allele2: &str) -> Option<Resolution> {
    let matches = |allele: &str| allele.as_bytes() == [base];

    if matches(allele1) {
        Some(Resolution::Allele1IsRef)
    } else if matches(allele2) {
        Some(Resolution::Allele2IsRef)
    } else {
        None
    }
}

/// Decide REF/ALT for one record against the reference genome.
///
/// Every lookup problem is logged and resolved as pass-through.
pub fn resolve_alleles(genome: &mut ReferenceGenome, record: SnpRecord) -> (ResolvedRecord, Resolution) {
    let resolution = match genome.fetch_base(&record.chrom, record.pos) {
        Ok(base) => match compare_alleles(base, &record.allele1, &record.allele2) {
            Some(resolution) => resolution,
            None => {
                warn!(
                    "SNP {} ({}:{}): reference base ({}) matches neither allele1 ({}) nor allele2 ({})",
                    record.id, record.chrom, record.pos, base as char, record.allele1, record.allele2
                );
                Resolution::Fallback(FallbackReason::Mismatch { base: base as char })
            }
        },
        Err(ReferenceError::FastaNotFound { chrom, path }) => {
            warn!(
                "Reference FASTA for chromosome {} not found: {}",
                chrom,
                path.display()
            );
            Resolution::Fallback(FallbackReason::MissingReference { path })
        }
        Err(ReferenceError::PositionOutOfRange { length, .. }) => {
            warn!(
                "SNP {} ({}:{}): position outside sequence length ({})",
                record.id, record.chrom, record.pos, length
            );
            Resolution::Fallback(FallbackReason::OutOfRange { length })
        }
        Err(e) => {
            error!(
                "Failed to process SNP {} ({}:{}): {}",
                record.id, record.chrom, record.pos, e
            );
            Resolution::Fallback(FallbackReason::LookupFailed { message: e.to_string() })
        }
    };

    (ResolvedRecord::from_record(record, &resolution), resolution)
}

/// Check the first input line
pub fn validate_header(line: &str) -> InputResult<()> {
    if line.trim().starts_with(INPUT_HEADER_PREFIX) {
        Ok(())
    } else {
        Err(InputError::MalformedHeader {
            found: line.trim().to_string(),
        })
    }
}

/// Conversion statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub total: usize,
    pub allele1_ref: usize,
    pub allele2_ref: usize,
    pub missing_reference: usize,
    pub out_of_range: usize,
    pub mismatch: usize,
    pub lookup_failed: usize,
}

impl ConversionStats {
    fn record(&mut self, resolution: &Resolution) {
        self.total += 1;
        match resolution {
            Resolution::Allele1IsRef => self.allele1_ref += 1,
            Resolution::Allele2IsRef => self.allele2_ref += 1,
            Resolution::Fallback(FallbackReason::MissingReference { .. }) => self.missing_reference += 1,
            Resolution::Fallback(FallbackReason::OutOfRange { .. }) => self.out_of_range += 1,
            Resolution::Fallback(FallbackReason::Mismatch { .. }) => self.mismatch += 1,
            Resolution::Fallback(FallbackReason::LookupFailed { .. }) => self.lookup_failed += 1,
        }
    }

    /// Records written in pass-through order without confirmation
    pub fn fallback(&self) -> usize {
        self.missing_reference + self.out_of_range + self.mismatch + self.lookup_failed
    }
}

/// Resolve every record of an SNP table against a reference directory
///
/// # Arguments
/// * `input` - Input table (`#CHROM POS ID allele1 allele2`), plain, gzip or bzip2
/// * `output` - Output table (`#CHROM POS ID REF ALT`); gzip when it ends in `.gz`
/// * `ref_dir` - Directory of `<chrom>.fa` / `chr<chrom>.fa` files
///
/// # Returns
/// Conversion statistics
pub fn convert_snps<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    input: P,
    output: Q,
    ref_dir: R,
) -> Result<ConversionStats> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(InputError::FileNotFound(input.to_path_buf()).into());
    }
    let mut genome = ReferenceGenome::open(ref_dir)?;

    info!("Processing input file: {}", input.display());
    let mut lines = LineIterator::new(open_input(input).map_err(InputError::Io)?);

    match lines.next_line() {
        Some(header) => validate_header(header.map_err(InputError::Io)?)?,
        None => return Err(InputError::MissingHeader.into()),
    }

    info!("Writing results to: {}", output.display());
    let mut writer = create_output(output)?;
    writeln!(writer, "{}", OUTPUT_HEADER)?;

    let mut stats = ConversionStats::default();
    loop {
        let line_number = lines.line_number() + 1;
        let Some(line) = lines.next_line() else {
            break;
        };
        let line = line.map_err(InputError::Io)?;
        if line.trim().is_empty() {
            debug!("Skipping blank line {}", line_number);
            continue;
        }
        let record = SnpRecord::parse(line, line_number)?;

        let (resolved, resolution) = resolve_alleles(&mut genome, record);
        stats.record(&resolution);
        writeln!(writer, "{}", resolved)?;
    }
    writer.flush()?;

    info!(
        "Processing finished: {} records ({} allele1=REF, {} allele2=REF, {} pass-through)",
        stats.total,
        stats.allele1_ref,
        stats.allele2_ref,
        stats.fallback()
    );
    Ok(stats)
}

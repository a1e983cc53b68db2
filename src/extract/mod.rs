//! Sequence extraction via bedtools
//!
//! Materializes a promoter `Region` as a one-line BED interval in a
//! temporary file and runs `bedtools getfasta` over it. The interval
//! name encodes identifier, genomic span and strand and becomes the
//! FASTA header; `-s` makes bedtools reverse-complement minus-strand
//! intervals.
//!
//! `bedtools getfasta` changed its calling convention in v2.25: older
//! releases take the output file as `-fo <out>`, newer ones dropped the
//! flag and print to stdout, so the caller has to redirect. The
//! installed version is probed at invocation time and the matching
//! convention selected.

use crate::core::{ExtractError, ExtractResult, Region};
use log::info;
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

/// First bedtools release without the `-fo` flag
const NEW_CONVENTION: BedtoolsVersion = BedtoolsVersion { major: 2, minor: 25, patch: 0 };

/// Parsed `bedtools --version` triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BedtoolsVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl BedtoolsVersion {
    /// Parse version text like `bedtools v2.30.0` or `v2.17.0`.
    /// The last whitespace-separated token is taken, a leading `v`
    /// stripped, and up to three dot-separated numeric components read.
    pub fn parse(text: &str) -> ExtractResult<Self> {
        let token = text
            .split_whitespace()
            .last()
            .ok_or_else(|| ExtractError::VersionProbe(text.to_string()))?;
        let token = token.strip_prefix('v').unwrap_or(token);

        let mut parts = token.split('.');
        let mut component = |dflt| -> ExtractResult<u32> {
            match parts.next() {
                None => Ok(dflt),
                Some(p) => p
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect::<String>()
                    .parse()
                    .map_err(|_| ExtractError::VersionProbe(text.to_string())),
            }
        };

        let major = component(0)?;
        let minor = component(0)?;
        let patch = component(0)?;
        Ok(BedtoolsVersion { major, minor, patch })
    }

    /// True for releases that dropped the `-fo` output flag
    pub fn uses_stdout_convention(&self) -> bool {
        *self >= NEW_CONVENTION
    }
}

/// Probe the installed bedtools version
fn probe_version() -> ExtractResult<BedtoolsVersion> {
    let output = Command::new("bedtools").arg("--version").output().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ExtractError::ToolNotFound
        } else {
            ExtractError::Io(e)
        }
    })?;
    let text = String::from_utf8_lossy(&output.stdout);
    BedtoolsVersion::parse(text.trim())
}

/// Composite interval name: identifier, genomic span and strand,
/// carried into the output FASTA header by `bedtools -name`.
pub fn bed_name(region: &Region) -> String {
    format!(
        "{};promoter;{}:{}-{}({})",
        region.name, region.chrom, region.start, region.end, region.strand
    )
}

/// Single-entry BED line describing the region. Trailing newline is
/// required; bedtools silently ignores an unterminated last line.
pub fn bed_line(region: &Region) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\n",
        region.chrom,
        region.start,
        region.end,
        bed_name(region),
        region.score,
        region.strand
    )
}

/// Extract the region's sequence from `fasta_in` into `fasta_out`.
///
/// The temporary BED descriptor is removed on every exit path,
/// including tool failure, when the `NamedTempFile` drops.
pub fn extract(region: &Region, fasta_in: &Path, fasta_out: &Path) -> ExtractResult<()> {
    let mut bedfile = NamedTempFile::new()?;
    bedfile.write_all(bed_line(region).as_bytes())?;
    bedfile.flush()?;

    let version = probe_version()?;

    let mut cmd = Command::new("bedtools");
    cmd.arg("getfasta")
        .arg("-name")
        .arg("-s")
        .arg("-fi")
        .arg(fasta_in)
        .arg("-bed")
        .arg(bedfile.path());

    if version.uses_stdout_convention() {
        cmd.stdout(Stdio::from(File::create(fasta_out)?));
    } else {
        cmd.arg("-fo").arg(fasta_out);
    }

    info!("Running {:?}", cmd);
    let status = cmd.status().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ExtractError::ToolNotFound
        } else {
            ExtractError::Io(e)
        }
    })?;

    if !status.success() {
        return Err(ExtractError::ToolFailed { status });
    }
    Ok(())
}

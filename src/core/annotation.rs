//! Annotation store
//!
//! Loads a GFF3/GTF annotation into queryable records and builds
//! per-column indexes so identifier lookups are explicit map probes
//! rather than full-table scans. Coordinates are 1-based, closed
//! interval [start, end], as in the GFF specification.

use crate::core::error::{AnnotationResult, GffParseError};
use crate::core::identifier::LookupColumn;
use bzip2::read::BzDecoder;
use flate2::read::MultiGzDecoder;
use memchr::memchr;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Genomic strand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strand {
    #[default]
    Plus,
    Minus,
}

impl Strand {
    /// Parse strand from char
    ///
    /// # Examples
    /// ```
    /// use prex::core::Strand;
    /// assert_eq!(Strand::from_char('+'), Some(Strand::Plus));
    /// assert_eq!(Strand::from_char('-'), Some(Strand::Minus));
    /// assert_eq!(Strand::from_char('.'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Plus),
            '-' => Some(Strand::Minus),
            _ => None,
        }
    }

    /// Strand as the character used in BED/GFF output
    pub fn as_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One row of the loaded annotation, with the attribute fields the
/// promoter workflow cares about lifted out of column 9.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    /// Chromosome / contig name
    pub seqname: String,
    /// Feature type (gene, transcript, exon, start_codon, ...)
    pub feature: String,
    /// Start position (1-based)
    pub start: u64,
    /// End position (1-based, inclusive)
    pub end: u64,
    /// Strand; `.` in the file becomes `None`
    pub strand: Option<Strand>,
    pub gene_id: Option<String>,
    pub gene_name: Option<String>,
    pub transcript_id: Option<String>,
    pub transcript_name: Option<String>,
    /// APPRIS principal tag value (e.g. "appris_principal_1").
    /// Present only on rows of a principal transcript isoform.
    pub appris_principal: Option<String>,
}

impl AnnotationRecord {
    /// Parse one annotation line. GFF has exactly 9 tab-separated
    /// fields; source, score and frame are not retained.
    pub fn parse(line: &[u8], line_no: usize) -> AnnotationResult<Self> {
        let mut field_bounds = Vec::with_capacity(9);
        let mut start_pos = 0;
        let mut pos = 0;

        while pos < line.len() {
            if let Some(tab_pos) = memchr(b'\t', &line[pos..]) {
                let end_pos = pos + tab_pos;
                field_bounds.push((start_pos, end_pos));
                start_pos = end_pos + 1;
                pos = start_pos;
            } else {
                field_bounds.push((start_pos, line.len()));
                break;
            }
        }

        if field_bounds.len() < 9 {
            return Err(GffParseError::TooFewFields {
                line: line_no,
                found: field_bounds.len(),
            });
        }

        let get_field = |idx: usize, name: &'static str| -> AnnotationResult<&str> {
            let (start, end) = field_bounds[idx];
            std::str::from_utf8(&line[start..end])
                .map_err(|_| GffParseError::InvalidUtf8 { line: line_no, field: name })
        };

        let seqname = get_field(0, "seqname")?;
        let feature = get_field(2, "feature")?;

        let start_str = get_field(3, "start")?;
        let start: u64 = start_str.parse().map_err(|_| GffParseError::InvalidCoordinate {
            line: line_no,
            field: "start",
            value: start_str.to_string(),
        })?;

        let end_str = get_field(4, "end")?;
        let end: u64 = end_str.parse().map_err(|_| GffParseError::InvalidCoordinate {
            line: line_no,
            field: "end",
            value: end_str.to_string(),
        })?;

        let strand = Strand::from_char(get_field(6, "strand")?.chars().next().unwrap_or('.'));
        let attrs = Attributes::parse(get_field(8, "attributes")?);

        Ok(Self {
            seqname: seqname.to_string(),
            feature: feature.to_string(),
            start,
            end,
            strand,
            gene_id: attrs.gene_id,
            gene_name: attrs.gene_name,
            transcript_id: attrs.transcript_id,
            transcript_name: attrs.transcript_name,
            appris_principal: attrs.appris_principal,
        })
    }
}

/// Attribute fields extracted from column 9
#[derive(Debug, Default)]
struct Attributes {
    gene_id: Option<String>,
    gene_name: Option<String>,
    transcript_id: Option<String>,
    transcript_name: Option<String>,
    appris_principal: Option<String>,
}

impl Attributes {
    /// Parse GFF3 (`key=value;`) or GTF (`key "value";`) attributes.
    ///
    /// The APPRIS principal marker appears either as a dedicated
    /// `appris_principal` attribute or, in Gencode files, as one of the
    /// `tag` values (`tag "appris_principal_2"` in GTF, a comma-joined
    /// `tag=basic,appris_principal_2` in GFF3). All spellings land in
    /// `appris_principal`.
    fn parse(raw: &str) -> Self {
        let mut attrs = Attributes::default();

        for pair in raw.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (key, value) = match Self::split_pair(pair) {
                Some(kv) => kv,
                None => continue,
            };
            match key {
                "gene_id" => attrs.gene_id = Some(value.to_string()),
                "gene_name" => attrs.gene_name = Some(value.to_string()),
                "transcript_id" => attrs.transcript_id = Some(value.to_string()),
                "transcript_name" => attrs.transcript_name = Some(value.to_string()),
                "appris_principal" => attrs.appris_principal = Some(value.to_string()),
                "tag" => {
                    // GFF3 joins multiple tags with commas; GTF repeats
                    // the key instead, so each pair holds one value.
                    for tag in value.split(',') {
                        if tag.starts_with("appris_principal") {
                            attrs.appris_principal = Some(tag.to_string());
                        }
                    }
                }
                _ => {}
            }
        }

        attrs
    }

    /// Split one attribute pair in either GTF or GFF3 style
    fn split_pair(pair: &str) -> Option<(&str, &str)> {
        if let Some(eq) = pair.find('=') {
            let (key, value) = pair.split_at(eq);
            return Some((key, &value[1..]));
        }
        let space = pair.find(' ')?;
        let (key, value) = pair.split_at(space);
        let value = value.trim_start().trim_matches('"');
        Some((key, value))
    }
}

/// Compression format of the annotation file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Plain,
    Gzip,
    Bzip2,
}

/// Detect compression by extension, then by magic bytes
pub fn detect_compression(path: &Path) -> AnnotationResult<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

const EMPTY_INDEX: &[usize] = &[];

/// Queryable annotation table with per-column identifier indexes
#[derive(Debug, Default)]
pub struct AnnotationStore {
    records: Vec<AnnotationRecord>,
    by_transcript_id: HashMap<String, Vec<usize>>,
    by_gene_id: HashMap<String, Vec<usize>>,
    by_gene_name: HashMap<String, Vec<usize>>,
}

impl AnnotationStore {
    /// Load an annotation from a plain, gzip or bzip2 compressed file
    pub fn from_path<P: AsRef<Path>>(path: P) -> AnnotationResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GffParseError::FileNotFound(path.to_path_buf()));
        }

        let format = detect_compression(path)?;
        let file = File::open(path)?;
        let reader: Box<dyn Read> = match format {
            CompressionFormat::Gzip => Box::new(MultiGzDecoder::new(file)),
            CompressionFormat::Bzip2 => Box::new(BzDecoder::new(file)),
            CompressionFormat::Plain => Box::new(file),
        };

        Self::from_reader(BufReader::with_capacity(128 * 1024, reader))
    }

    /// Parse annotation rows from any buffered reader
    pub fn from_reader<R: BufRead>(mut reader: R) -> AnnotationResult<Self> {
        let mut store = AnnotationStore::default();
        let mut line_buf = String::with_capacity(4096);
        let mut line_no = 0;

        loop {
            line_buf.clear();
            let bytes_read = reader.read_line(&mut line_buf)?;
            if bytes_read == 0 {
                break;
            }
            line_no += 1;

            let line = line_buf.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let record = AnnotationRecord::parse(line.as_bytes(), line_no)?;
            store.push(record);
        }

        Ok(store)
    }

    fn push(&mut self, record: AnnotationRecord) {
        let idx = self.records.len();
        if let Some(tid) = &record.transcript_id {
            self.by_transcript_id.entry(tid.clone()).or_default().push(idx);
        }
        if let Some(gid) = &record.gene_id {
            self.by_gene_id.entry(gid.clone()).or_default().push(idx);
        }
        if let Some(name) = &record.gene_name {
            self.by_gene_name.entry(name.clone()).or_default().push(idx);
        }
        self.records.push(record);
    }

    /// Row indices whose `column` equals `value`, in file order.
    /// `LookupColumn::Undefined` matches nothing by construction.
    pub fn rows_matching(&self, column: LookupColumn, value: &str) -> &[usize] {
        let index = match column {
            LookupColumn::TranscriptId => &self.by_transcript_id,
            LookupColumn::GeneId => &self.by_gene_id,
            LookupColumn::GeneName => &self.by_gene_name,
            LookupColumn::Undefined => return EMPTY_INDEX,
        };
        index.get(value).map(Vec::as_slice).unwrap_or(EMPTY_INDEX)
    }

    /// Record by row index
    pub fn record(&self, idx: usize) -> &AnnotationRecord {
        &self.records[idx]
    }

    /// Records whose `column` equals `value`, in file order
    pub fn records_matching<'a>(
        &'a self,
        column: LookupColumn,
        value: &str,
    ) -> impl Iterator<Item = &'a AnnotationRecord> {
        self.rows_matching(column, value)
            .iter()
            .map(move |&idx| &self.records[idx])
    }

    /// Transcript id of the first principal-tagged row matching the
    /// identifier. Only safe to act on after validation has confirmed a
    /// unique principal start codon; if several principal transcripts
    /// share that start codon it is safe to arbitrarily pick one.
    pub fn principal_transcript_id(&self, column: LookupColumn, value: &str) -> Option<&str> {
        self.records_matching(column, value)
            .filter(|r| r.appris_principal.is_some())
            .find_map(|r| r.transcript_id.as_deref())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

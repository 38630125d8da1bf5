// FASTA input using bio::io::fasta
//
// Query and target files are small enough to load whole. Records are kept in
// file order so they can be selected by 1-based index or by header token.
// Files ending in .gz are decompressed on the fly; MultiGzDecoder also reads
// BGZF since every BGZF block is a complete gzip member.

use anyhow::{bail, Context, Result};
use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;

/// One FASTA record with its sequence uppercased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// First whitespace-delimited token of the header line
    pub id: String,
    /// Rest of the header line, if any
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

impl FastaRecord {
    /// Header as written, `id` plus description when present
    pub fn label(&self) -> String {
        match &self.desc {
            Some(desc) => format!("{} {}", self.id, desc),
            None => self.id.clone(),
        }
    }
}

/// FASTA reader with gzip detection by extension
pub struct FastaReader {
    records: fasta::Records<BufReader<Box<dyn Read>>>,
}

impl FastaReader {
    /// Open a FASTA file (.fa, .fasta, .fa.gz, ...)
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            log::debug!("Reading gzip-compressed FASTA {}", path.display());
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };

        Ok(Self::from_reader(reader))
    }

    /// Wrap any reader, e.g. an in-memory buffer
    pub fn from_reader(reader: Box<dyn Read>) -> Self {
        Self {
            records: fasta::Reader::new(reader).records(),
        }
    }

    /// Read the next FASTA record
    ///
    /// Returns `Ok(Some(record))` if a record is found, `Ok(None)` at EOF,
    /// and `Err(e)` on a parse error.
    pub fn read_record(&mut self) -> io::Result<Option<FastaRecord>> {
        match self.records.next() {
            Some(Ok(record)) => Ok(Some(FastaRecord {
                id: record.id().to_string(),
                desc: record.desc().map(str::to_string),
                seq: record.seq().to_ascii_uppercase(),
            })),
            Some(Err(e)) => Err(io::Error::new(io::ErrorKind::Other, e)),
            None => Ok(None),
        }
    }

    /// Drain the remaining records
    pub fn read_all(&mut self) -> io::Result<Vec<FastaRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record()? {
            records.push(record);
        }
        Ok(records)
    }
}

/// Load every record of a FASTA file.
pub fn read_all_fasta(path: &Path) -> Result<Vec<FastaRecord>> {
    let mut reader = FastaReader::new(path)
        .with_context(|| format!("Error opening FASTA file {}", path.display()))?;
    let records = reader
        .read_all()
        .with_context(|| format!("Error parsing FASTA file {}", path.display()))?;
    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Load a plain sequence file: the whole file, trimmed and uppercased.
pub fn read_raw_sequence(path: &Path) -> Result<Vec<u8>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Error reading sequence file {}", path.display()))?;
    Ok(text.trim().as_bytes().to_ascii_uppercase())
}

/// Pick one record.
///
/// A header token (`wanted_id`) takes precedence over a 1-based `index`;
/// with neither, the first record is used. `label` names the input
/// ("query"/"target") in error messages.
pub fn select_record<'a>(
    records: &'a [FastaRecord],
    index: Option<usize>,
    wanted_id: Option<&str>,
    label: &str,
) -> Result<&'a FastaRecord> {
    if let Some(id) = wanted_id {
        return match records.iter().find(|r| r.id == id) {
            Some(record) => Ok(record),
            None => bail!("{} id '{}' not found", label, id),
        };
    }
    if let Some(index) = index {
        if index == 0 || index > records.len() {
            bail!(
                "{} index {} out of range (n={})",
                label,
                index,
                records.len()
            );
        }
        return Ok(&records[index - 1]);
    }
    match records.first() {
        Some(record) => Ok(record),
        None => bail!("{} FASTA is empty", label),
    }
}

// Pairwise driver: load, select and window the input sequences, align them
// with the configured method and write the text report.

use anyhow::Result;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use crate::align_opt::AlignOpt;
use crate::core::alignment::cigar;
use crate::core::alignment::{align, align_batch, Alignment};
use crate::core::io::fasta_reader::{read_all_fasta, read_raw_sequence, select_record};
use crate::core::io::report_output::{write_pair_header, write_report};
use crate::core::io::selection::apply_window;

/// Driver failure, split by where it happened so the binary can report
/// input problems and output problems differently.
#[derive(Debug)]
pub enum PairwiseError {
    /// Inputs could not be read, or the requested records do not exist
    Input(anyhow::Error),
    /// The report could not be written
    Output(io::Error),
}

impl fmt::Display for PairwiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairwiseError::Input(e) => write!(f, "{:#}", e),
            PairwiseError::Output(e) => write!(f, "Error writing alignment report: {}", e),
        }
    }
}

impl std::error::Error for PairwiseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PairwiseError::Input(e) => Some(&**e),
            PairwiseError::Output(e) => Some(e),
        }
    }
}

/// Query/target pair ready for alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    pub query_id: String,
    pub target_id: String,
    pub query: Vec<u8>,
    pub target: Vec<u8>,
}

impl SequencePair {
    /// Apply the configured slices, then the limit
    fn windowed(mut self, opt: &AlignOpt) -> Self {
        self.query = apply_window(self.query, opt.slice_q.as_ref(), opt.limit);
        self.target = apply_window(self.target, opt.slice_t.as_ref(), opt.limit);
        self
    }
}

/// Load the single query/target pair selected by `opt`.
pub fn load_pair(opt: &AlignOpt) -> Result<SequencePair> {
    let pair = if opt.fasta {
        let queries = read_all_fasta(&opt.query)?;
        let targets = read_all_fasta(&opt.target)?;
        let q = select_record(&queries, opt.query_index(), opt.qid.as_deref(), "query")?;
        let t = select_record(&targets, opt.target_index(), opt.tid.as_deref(), "target")?;
        log::debug!("Selected query record {}", q.label());
        log::debug!("Selected target record {}", t.label());
        SequencePair {
            query_id: q.id.clone(),
            target_id: t.id.clone(),
            query: q.seq.clone(),
            target: t.seq.clone(),
        }
    } else {
        SequencePair {
            query_id: file_label(&opt.query),
            target_id: file_label(&opt.target),
            query: read_raw_sequence(&opt.query)?,
            target: read_raw_sequence(&opt.target)?,
        }
    };

    let pair = pair.windowed(opt);
    log::info!(
        "Aligning {} ({} symbols) against {} ({} symbols)",
        pair.query_id,
        pair.query.len(),
        pair.target_id,
        pair.target.len()
    );
    Ok(pair)
}

/// Load record N of the query FASTA with record N of the target FASTA, for
/// every N up to the shorter file.
pub fn load_all_pairs(opt: &AlignOpt) -> Result<Vec<SequencePair>> {
    let queries = read_all_fasta(&opt.query)?;
    let targets = read_all_fasta(&opt.target)?;
    if queries.is_empty() {
        anyhow::bail!("query FASTA is empty");
    }
    if targets.is_empty() {
        anyhow::bail!("target FASTA is empty");
    }
    if queries.len() != targets.len() {
        log::warn!(
            "Query file has {} records but target file has {}; aligning the first {}",
            queries.len(),
            targets.len(),
            queries.len().min(targets.len())
        );
    }

    let pairs: Vec<SequencePair> = queries
        .into_iter()
        .zip(targets)
        .map(|(q, t)| {
            SequencePair {
                query_id: q.id,
                target_id: t.id,
                query: q.seq,
                target: t.seq,
            }
            .windowed(opt)
        })
        .collect();
    log::info!("Loaded {} sequence pairs", pairs.len());
    Ok(pairs)
}

/// Align every pair with the configured method, in parallel when there is
/// more than one.
pub fn align_pairs(opt: &AlignOpt, pairs: &[SequencePair]) -> Vec<Alignment> {
    match pairs {
        [single] => vec![align(opt.method, &single.query, &single.target, &opt.scoring)],
        _ => {
            let seqs: Vec<(&[u8], &[u8])> = pairs
                .iter()
                .map(|p| (p.query.as_slice(), p.target.as_slice()))
                .collect();
            align_batch(opt.method, &seqs, &opt.scoring)
        }
    }
}

/// Write results in input order. Batch output carries a `PAIR` line per block.
pub fn write_results<W: Write + ?Sized>(
    writer: &mut W,
    pairs: &[SequencePair],
    alignments: &[Alignment],
    batch: bool,
) -> std::io::Result<()> {
    for (pair, aln) in pairs.iter().zip(alignments) {
        if batch {
            write_pair_header(writer, &pair.query_id, &pair.target_id)?;
        }
        write_report(writer, aln)?;
    }
    writer.flush()
}

/// Load the configured pair(s).
pub fn load_pairs(opt: &AlignOpt) -> Result<Vec<SequencePair>> {
    if opt.all_pairs {
        load_all_pairs(opt)
    } else {
        Ok(vec![load_pair(opt)?])
    }
}

/// Run the whole driver: load, align, report.
pub fn main_pairwise<W: Write + ?Sized>(
    opt: &AlignOpt,
    writer: &mut W,
) -> std::result::Result<(), PairwiseError> {
    opt.log_parameters();
    let pairs = load_pairs(opt).map_err(PairwiseError::Input)?;
    let alignments = align_pairs(opt, &pairs);
    if log::log_enabled!(log::Level::Debug) {
        for (pair, aln) in pairs.iter().zip(&alignments) {
            log_summary(pair, aln);
        }
    }
    write_results(writer, &pairs, &alignments, opt.all_pairs).map_err(PairwiseError::Output)
}

/// Debug line per alignment: score, `=`/`X` CIGAR and the span it covers
fn log_summary(pair: &SequencePair, aln: &Alignment) {
    let ops = aln.cigar(true);
    log::debug!(
        "{} vs {}: score {}, identity {:.3}, CIGAR {} covering {}/{} query and {}/{} target symbols",
        pair.query_id,
        pair.target_id,
        aln.score,
        aln.identity(),
        cigar::to_string(&ops),
        cigar::query_length(&ops),
        pair.query.len(),
        cigar::target_length(&ops),
        pair.target.len()
    );
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alignment::Method;
    use crate::core::io::selection::SliceSpec;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn fasta_opt(dir: &TempDir, method: Method) -> AlignOpt {
        AlignOpt {
            method,
            query: write_file(dir, "q.fa", ">q1\nGATTACA\n>q2\nAC\n>q3\nCT\n"),
            target: write_file(dir, "t.fa", ">t1\nGCATGCU\n>t2\nAG\n>t3\nAAACTAAA\n"),
            fasta: true,
            ..AlignOpt::default()
        }
    }

    #[test]
    fn test_single_pair_by_index() {
        let dir = TempDir::new().unwrap();
        let opt = AlignOpt {
            index: Some(2),
            ..fasta_opt(&dir, Method::GlobalLinear)
        };
        let mut out = Vec::new();
        main_pairwise(&opt, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "SCORE\t0\nALNQ\tAC\nALNT\tAG\n");
    }

    #[test]
    fn test_single_pair_by_id() {
        let dir = TempDir::new().unwrap();
        let opt = AlignOpt {
            qid: Some("q3".to_string()),
            tid: Some("t3".to_string()),
            ..fasta_opt(&dir, Method::FittingAffine)
        };
        let pair = load_pair(&opt).unwrap();
        assert_eq!(pair.query, b"CT");
        assert_eq!(pair.target, b"AAACTAAA");

        let mut out = Vec::new();
        main_pairwise(&opt, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "SCORE\t6\nALNQ\tCT\nALNT\tCT\n");
    }

    #[test]
    fn test_raw_input_is_trimmed_and_uppercased() {
        let dir = TempDir::new().unwrap();
        let opt = AlignOpt {
            method: Method::GlobalLinear,
            query: write_file(&dir, "q.txt", "  acgt\n"),
            target: write_file(&dir, "t.txt", "ACGT\n\n"),
            ..AlignOpt::default()
        };
        let pair = load_pair(&opt).unwrap();
        assert_eq!(pair.query, b"ACGT");
        assert_eq!(pair.query_id, "q.txt");
    }

    #[test]
    fn test_slice_then_limit() {
        let dir = TempDir::new().unwrap();
        let opt = AlignOpt {
            slice_q: Some(SliceSpec::parse("2:").unwrap()),
            limit: Some(3),
            ..fasta_opt(&dir, Method::GlobalLinear)
        };
        let pair = load_pair(&opt).unwrap();
        assert_eq!(pair.query, b"ATT");
        assert_eq!(pair.target, b"GCA");
    }

    #[test]
    fn test_all_pairs_in_order() {
        let dir = TempDir::new().unwrap();
        let opt = AlignOpt {
            all_pairs: true,
            ..fasta_opt(&dir, Method::GlobalLinear)
        };
        let mut out = Vec::new();
        main_pairwise(&opt, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = "PAIR\tq1\tt1\nSCORE\t2\nALNQ\tG-ATTACA\nALNT\tGCA-TGCU\n\
                        PAIR\tq2\tt2\nSCORE\t0\nALNQ\tAC\nALNT\tAG\n\
                        PAIR\tq3\tt3\nSCORE\t-6\nALNQ\t---CT---\nALNT\tAAACTAAA\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_missing_id_is_error() {
        let dir = TempDir::new().unwrap();
        let opt = AlignOpt {
            qid: Some("nope".to_string()),
            ..fasta_opt(&dir, Method::GlobalLinear)
        };
        let err = load_pair(&opt).unwrap_err();
        assert_eq!(err.to_string(), "query id 'nope' not found");
    }

    #[test]
    fn test_driver_classifies_input_errors() {
        let dir = TempDir::new().unwrap();
        let opt = AlignOpt {
            index: Some(9),
            ..fasta_opt(&dir, Method::LocalLinear)
        };
        let mut out = Vec::new();
        match main_pairwise(&opt, &mut out) {
            Err(PairwiseError::Input(e)) => {
                assert_eq!(e.to_string(), "query index 9 out of range (n=3)")
            }
            other => panic!("expected an input error, got {:?}", other),
        }
        assert!(out.is_empty());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_driver_classifies_output_errors() {
        let dir = TempDir::new().unwrap();
        let opt = fasta_opt(&dir, Method::GlobalAffine);
        let err = main_pairwise(&opt, &mut FailingWriter).unwrap_err();
        assert!(matches!(err, PairwiseError::Output(_)));
        assert_eq!(err.to_string(), "Error writing alignment report: closed");
    }

    #[test]
    fn test_missing_file_is_error() {
        let opt = AlignOpt {
            query: "/nonexistent/q.fa".into(),
            target: "/nonexistent/t.fa".into(),
            fasta: true,
            ..AlignOpt::default()
        };
        assert!(load_pair(&opt).is_err());
    }
}

use clap::Args;
use std::path::PathBuf;

use crate::core::alignment::{Method, Scoring};
use crate::core::io::selection::SliceSpec;

// Run configuration for the pairwise driver.
//
// `AlignCliOptions` is the clap-facing surface; `AlignOpt` is the validated
// option block the driver consumes.

/// Map verbosity (1=error, 2=warning, 3=message, 4=debug, 5+=trace) to a log level
pub fn verbosity_to_level(verbosity: i32) -> log::LevelFilter {
    match verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Validated alignment options
#[derive(Debug, Clone)]
pub struct AlignOpt {
    pub method: Method,
    pub query: PathBuf,
    pub target: PathBuf,
    pub fasta: bool, // Inputs are FASTA (otherwise raw sequence files)

    // Record selection: id > index > first record
    pub index: Option<usize>, // 1-based pair index used for both files
    pub qid: Option<String>,  // Query header token
    pub tid: Option<String>,  // Target header token

    // Windowing: slice first, then limit
    pub limit: Option<usize>,
    pub slice_q: Option<SliceSpec>,
    pub slice_t: Option<SliceSpec>,

    pub scoring: Scoring,

    pub all_pairs: bool, // Align record N of query with record N of target, for all N
    pub n_threads: usize,
    pub verbosity: i32, // 1=error, 2=warning, 3=message, 4=debug, 5+=trace
}

impl Default for AlignOpt {
    fn default() -> Self {
        AlignOpt {
            method: Method::GlobalLinear,
            query: PathBuf::new(),
            target: PathBuf::new(),
            fasta: false,
            index: None,
            qid: None,
            tid: None,
            limit: None,
            slice_q: None,
            slice_t: None,
            scoring: Scoring::default(),
            all_pairs: false,
            n_threads: 1,
            verbosity: 3,
        }
    }
}

impl AlignOpt {
    pub fn log_level(&self) -> log::LevelFilter {
        verbosity_to_level(self.verbosity)
    }

    /// Query index, unless a query id overrides it
    pub fn query_index(&self) -> Option<usize> {
        if self.qid.is_some() {
            None
        } else {
            self.index
        }
    }

    /// Target index, unless a target id overrides it
    pub fn target_index(&self) -> Option<usize> {
        if self.tid.is_some() {
            None
        } else {
            self.index
        }
    }

    pub fn log_parameters(&self) {
        log::debug!("Method: {}", self.method);
        if self.method.is_affine() {
            log::debug!(
                "Scoring: match {}, mismatch {}, gap open {}, gap extend {}",
                self.scoring.match_score,
                self.scoring.mismatch_score,
                self.scoring.gap_open,
                self.scoring.gap_extend
            );
        } else {
            log::debug!(
                "Scoring: match {}, mismatch {}, gap {}",
                self.scoring.match_score,
                self.scoring.mismatch_score,
                self.scoring.gap
            );
        }
        if let Some(limit) = self.limit {
            log::debug!("Truncating both sequences to {} symbols", limit);
        }
    }

    /// Parse an optional slice string; empty means "no slice"
    pub fn parse_slice(s: Option<&str>) -> Result<Option<SliceSpec>, String> {
        match s {
            None | Some("") => Ok(None),
            Some(spec) => SliceSpec::parse(spec).map(Some),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AlignCliOptions {
    /// Alignment method: global-linear, local-linear, fitting-affine, global-affine
    #[arg(long, value_name = "METHOD")]
    pub method: Method,

    /// Path to query (FASTA or raw)
    #[arg(long, value_name = "FILE")]
    pub query: PathBuf,

    /// Path to target (FASTA or raw)
    #[arg(long, value_name = "FILE")]
    pub target: PathBuf,

    /// Interpret inputs as FASTA
    #[arg(long)]
    pub fasta: bool,

    /// 1-based pair index from each FASTA (qN vs tN)
    #[arg(long, value_name = "INT")]
    pub index: Option<usize>,

    /// Query FASTA header token to select (e.g. q3)
    #[arg(long, value_name = "STR")]
    pub qid: Option<String>,

    /// Target FASTA header token to select (e.g. t3)
    #[arg(long, value_name = "STR")]
    pub tid: Option<String>,

    /// Truncate both sequences to the first INT symbols
    #[arg(long, value_name = "INT")]
    pub limit: Option<usize>,

    /// 1-based inclusive slice for the query, e.g. 1:4000
    #[arg(long = "slice-q", value_name = "A:B")]
    pub slice_q: Option<String>,

    /// 1-based inclusive slice for the target, e.g. 1:4000
    #[arg(long = "slice-t", value_name = "A:B")]
    pub slice_t: Option<String>,

    // ===== Scoring Options =====
    /// Score for a symbol match
    #[arg(short = 'A', long, value_name = "INT", default_value_t = crate::core::alignment::scoring::MATCH, allow_hyphen_values = true)]
    pub match_score: i32,

    /// Score for a symbol mismatch
    #[arg(short = 'B', long, value_name = "INT", default_value_t = crate::core::alignment::scoring::MISMATCH, allow_hyphen_values = true)]
    pub mismatch_score: i32,

    /// Linear gap score per gap symbol
    #[arg(short = 'G', long, value_name = "INT", default_value_t = crate::core::alignment::scoring::GAP, allow_hyphen_values = true)]
    pub gap: i32,

    /// Affine gap-open score
    #[arg(short = 'O', long, value_name = "INT", default_value_t = crate::core::alignment::scoring::GAP_OPEN, allow_hyphen_values = true)]
    pub gap_open: i32,

    /// Affine gap-extend score
    #[arg(short = 'E', long, value_name = "INT", default_value_t = crate::core::alignment::scoring::GAP_EXT, allow_hyphen_values = true)]
    pub gap_extend: i32,

    // ===== Processing Options =====
    /// Align every qN against tN (FASTA only)
    #[arg(long)]
    pub all_pairs: bool,

    /// Number of threads for --all-pairs (default: all available cores)
    #[arg(short = 't', long, value_name = "INT")]
    pub threads: Option<usize>,

    /// Verbose level: 1=error, 2=warning, 3=message, 4+=debugging
    #[arg(short = 'v', long, value_name = "INT", default_value_t = 3)]
    pub verbosity: i32,
}

impl AlignCliOptions {
    /// Validate and convert into an `AlignOpt`
    pub fn into_opt(self) -> Result<AlignOpt, String> {
        if self.all_pairs && !self.fasta {
            return Err("--all-pairs requires --fasta".to_string());
        }

        let slice_q = AlignOpt::parse_slice(self.slice_q.as_deref())?;
        let slice_t = AlignOpt::parse_slice(self.slice_t.as_deref())?;

        let scoring = Scoring::new(
            self.match_score,
            self.mismatch_score,
            self.gap,
            self.gap_open,
            self.gap_extend,
        );
        scoring.check_magnitude()?;

        let mut n_threads = self.threads.unwrap_or_else(num_cpus::get);
        if n_threads < 1 {
            log::warn!("Invalid thread count {}, using 1 thread", n_threads);
            n_threads = 1;
        }

        Ok(AlignOpt {
            method: self.method,
            query: self.query,
            target: self.target,
            fasta: self.fasta,
            index: self.index,
            qid: self.qid,
            tid: self.tid,
            // A zero limit means "no limit"
            limit: self.limit.filter(|&l| l > 0),
            slice_q,
            slice_t,
            scoring,
            all_pairs: self.all_pairs,
            n_threads,
            verbosity: self.verbosity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        options: AlignCliOptions,
    }

    fn parse(extra: &[&str]) -> Result<AlignCliOptions, clap::Error> {
        let mut args = vec![
            "pairwise-align",
            "--method",
            "global-affine",
            "--query",
            "q.txt",
            "--target",
            "t.txt",
        ];
        args.extend_from_slice(extra);
        TestCli::try_parse_from(args).map(|cli| cli.options)
    }

    fn cli(method: Method) -> AlignCliOptions {
        AlignCliOptions {
            method,
            query: PathBuf::from("q.fa"),
            target: PathBuf::from("t.fa"),
            fasta: true,
            index: None,
            qid: None,
            tid: None,
            limit: None,
            slice_q: None,
            slice_t: None,
            match_score: 3,
            mismatch_score: -3,
            gap: -2,
            gap_open: -5,
            gap_extend: -1,
            all_pairs: false,
            threads: Some(2),
            verbosity: 3,
        }
    }

    #[test]
    fn test_default_scoring_matches_constants() {
        let opt = AlignOpt::default();
        assert_eq!(opt.scoring, Scoring::default());
        assert_eq!(opt.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_id_overrides_index() {
        let opt = AlignOpt {
            index: Some(3),
            qid: Some("q5".to_string()),
            ..AlignOpt::default()
        };
        assert_eq!(opt.query_index(), None);
        assert_eq!(opt.target_index(), Some(3));
    }

    #[test]
    fn test_parse_slice() {
        assert_eq!(AlignOpt::parse_slice(None), Ok(None));
        assert_eq!(AlignOpt::parse_slice(Some("")), Ok(None));
        assert!(AlignOpt::parse_slice(Some("1:4")).unwrap().is_some());
        assert!(AlignOpt::parse_slice(Some("oops")).is_err());
    }

    #[test]
    fn test_into_opt() {
        let mut c = cli(Method::FittingAffine);
        c.slice_q = Some("2:".to_string());
        c.limit = Some(0);
        let opt = c.into_opt().unwrap();
        assert_eq!(opt.method, Method::FittingAffine);
        assert_eq!(opt.n_threads, 2);
        assert_eq!(opt.limit, None);
        assert_eq!(opt.slice_q.and_then(|s| s.start), Some(2));
    }

    #[test]
    fn test_all_pairs_requires_fasta() {
        let mut c = cli(Method::GlobalLinear);
        c.all_pairs = true;
        c.fasta = false;
        assert!(c.into_opt().is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let level = |v| AlignOpt {
            verbosity: v,
            ..AlignOpt::default()
        }
        .log_level();
        assert_eq!(level(0), log::LevelFilter::Error);
        assert_eq!(level(2), log::LevelFilter::Warn);
        assert_eq!(level(4), log::LevelFilter::Debug);
        assert_eq!(level(9), log::LevelFilter::Trace);
    }

    #[test]
    fn test_negative_scoring_flags_parse() {
        let c = parse(&["-A", "-1", "-B", "-4", "-G", "-3", "-O", "-6", "-E", "-2"]).unwrap();
        assert_eq!(c.match_score, -1);
        let opt = c.into_opt().unwrap();
        assert_eq!(opt.scoring, Scoring::new(-1, -4, -3, -6, -2));
    }

    #[test]
    fn test_defaults_from_command_line() {
        let opt = parse(&[]).unwrap().into_opt().unwrap();
        assert_eq!(opt.method, Method::GlobalAffine);
        assert_eq!(opt.scoring, Scoring::default());
        assert!(!opt.fasta);
    }

    #[test]
    fn test_out_of_range_scoring_is_rejected() {
        let mut c = cli(Method::FittingAffine);
        c.gap_open = -1_700_000_000;
        let err = c.into_opt().unwrap_err();
        assert!(err.starts_with("gap open -1700000000 out of range"), "{}", err);
    }
}

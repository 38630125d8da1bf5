use clap::Parser;
use std::io::{self, BufWriter};

use pairwise_align::align_opt::{verbosity_to_level, AlignCliOptions};
use pairwise_align::pairwise::{self, PairwiseError};

#[derive(Parser)]
#[command(name = "pairwise-align")]
#[command(about = "Pairwise sequence alignment (global/local linear-gap, global/fitting affine-gap)", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    options: AlignCliOptions,
}

/// Exit status for argument, input and runtime errors
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    let verbosity = cli.options.verbosity;

    let opt = match cli.options.into_opt() {
        Ok(opt) => opt,
        Err(e) => {
            init_logger(verbosity);
            log::error!("ARG_ERROR\t{}", e);
            std::process::exit(EXIT_ERROR);
        }
    };
    init_logger(opt.verbosity);

    if opt.all_pairs {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(opt.n_threads)
            .build_global()
        {
            Ok(_) => log::debug!("Built global Rayon thread pool with {} threads", opt.n_threads),
            Err(e) => log::warn!(
                "Failed to configure thread pool: {} (may already be initialized)",
                e
            ),
        }
    }

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    match pairwise::main_pairwise(&opt, &mut writer) {
        Ok(()) => {}
        Err(e @ PairwiseError::Input(_)) => {
            log::error!("ARG_ERROR\t{}", e);
            std::process::exit(EXIT_ERROR);
        }
        Err(e @ PairwiseError::Output(_)) => {
            log::error!("RUNTIME_ERROR\t{}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn init_logger(verbosity: i32) {
    env_logger::Builder::from_default_env()
        .filter_level(verbosity_to_level(verbosity))
        .format_timestamp(None) // Don't show timestamps
        .format_target(false) // Don't show module names
        .init();
}

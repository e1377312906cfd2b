//! Core module for Rfam RNA type inference
//! rfam-infer, 2026
//!
//! This module contains the main function for assigning INSDC ncRNA
//! classes to every family of an Rfam release.
//!
//! In short, the module reads the Rfam family catalog, its Sequence
//! Ontology cross-references, the ontology itself and a JSON file of
//! curated assignments, classifies the families in parallel and writes
//! one RNA type per family (or, with `--mode compare`, what every
//! strategy proposed) as a delimited table.

use clap::Parser;
use config::ArgCheck;
use log::{error, info, Level};
use simple_logger::init_with_level;

use rfam_infer::{cli::Args, core::infer_types};

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).expect("ERROR: Could not initialize logger");

    let args: Args = Args::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .unwrap_or_else(|e| {
            error!("{}", e);
            std::process::exit(1);
        });

    args.check().unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    infer_types(args).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}

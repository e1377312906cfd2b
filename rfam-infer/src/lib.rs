//! Rfam RNA type inference
//!
//! Assigns every Rfam family one or more INSDC ncRNA classes. Families
//! are run through an ordered chain of curated heuristics (manual
//! overrides, name patterns, the native rna type, optionally a direct
//! ontology term table) and, when none of them gives a specific answer,
//! through a bounded search of the Sequence Ontology starting at the
//! family's cross-referenced terms.
//!
//! Families are independent of each other and every table is read-only
//! once loaded, so the classification loop runs in parallel.

use anyhow::Result;
use crate::core::infer_types;

pub mod classifier;
pub mod cli;
pub mod core;
pub mod error;
pub mod manual;
pub mod ontology;
pub mod strategy;
pub mod types;

pub use classifier::Classifier;
pub use error::InferError;
pub use types::{InferredType, RnaType};

pub fn lib_rfam_infer(args: Vec<String>) -> Result<()> {
    let args = cli::Args::from(args);
    infer_types(args)
}

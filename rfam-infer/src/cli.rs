use clap::{ArgAction, Parser, ValueEnum};
use config::{ArgCheck, DEFAULT_MAX_DEPTH};
use std::path::PathBuf;

use crate::strategy::StrategyKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportMode {
    /// one row per family with the accepted type
    Infer,
    /// one row per family with every strategy's own proposal
    Compare,
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(
        value_name = "LINK_FILE",
        help = "Path to the family -> ontology cross-reference file"
    )]
    pub link: PathBuf,

    #[arg(value_name = "FAMILY_FILE", help = "Path to the tab-separated family catalog")]
    pub family: PathBuf,

    #[arg(value_name = "OBO_FILE", help = "Path to the ontology .obo file")]
    pub obo: PathBuf,

    #[arg(
        value_name = "MANUAL_FILE",
        help = "Path to the manual assignments .json file"
    )]
    pub manual: PathBuf,

    #[arg(
        long = "max-depth",
        help = "Maximum ontology search depth",
        value_name = "DEPTH",
        default_value_t = DEFAULT_MAX_DEPTH,
        action = ArgAction::Set
    )]
    pub max_depth: usize,

    #[arg(
        short = 'm',
        long = "mode",
        help = "Report the accepted type or every strategy's proposal",
        value_name = "MODE",
        value_enum,
        default_value = "infer"
    )]
    pub mode: ReportMode,

    #[arg(
        short = 's',
        long = "strategies",
        help = "Ordered strategies tried before the ontology search",
        value_name = "STRATEGIES",
        value_enum,
        value_delimiter = ',',
        default_values = ["manual", "name", "rna-type"]
    )]
    pub strategies: Vec<StrategyKind>,

    #[arg(
        short = 't',
        long = "threads",
        help = "Number of threads",
        value_name = "THREADS",
        default_value_t = num_cpus::get()
    )]
    pub threads: usize,

    #[arg(
        short = 'o',
        long = "output",
        required = false,
        value_name = "PATH",
        help = "Output file path [default: stdout]"
    )]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn from(args: Vec<String>) -> Self {
        let mut full_args = vec![env!("CARGO_PKG_NAME").to_string()];
        full_args.extend(args);

        Args::parse_from(full_args)
    }
}

impl ArgCheck for Args {
    fn get_inputs(&self) -> Vec<&PathBuf> {
        vec![&self.family, &self.obo, &self.manual]
    }

    // a family set without any ontology cross-reference is valid
    fn get_maybe_empty(&self) -> Vec<&PathBuf> {
        vec![&self.link]
    }
}

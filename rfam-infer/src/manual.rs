use hashbrown::HashMap;
use log::info;
use serde::Deserialize;
use serde_json::{Map, Value};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::InferError;
use crate::types::RawLabels;

pub type LabelTable = HashMap<String, Option<RawLabels>>;

/// Curated tables shared by the inference strategies.
///
/// `informative_names` keeps the order of the file: the first pattern
/// that matches a family name wins.
#[derive(Debug, Deserialize)]
pub struct ManualConfig {
    pub hardcoded: LabelTable,
    pub informative_names: Map<String, Value>,
    pub rna_type_mapping: LabelTable,
    #[serde(default)]
    pub assignments: HashMap<String, Option<String>>,
}

impl ManualConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, InferError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config: Self = serde_json::from_reader(reader)?;

        info!(
            "Manual config: {} hardcoded, {} name patterns, {} rna types, {} term assignments",
            config.hardcoded.len(),
            config.informative_names.len(),
            config.rna_type_mapping.len(),
            config.assignments.len()
        );

        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, InferError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Name patterns with their labels, in file order.
    pub fn name_patterns(&self) -> Result<Vec<(String, Option<RawLabels>)>, InferError> {
        self.informative_names
            .iter()
            .map(|(pattern, label)| -> Result<_, InferError> {
                let label: Option<RawLabels> = serde_json::from_value(label.clone())?;
                Ok((pattern.clone(), label))
            })
            .collect()
    }
}

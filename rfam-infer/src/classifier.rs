//! Fallback composition of the inference strategies
//!
//! Strategies run in the configured order and the first proposal that
//! survives [`Classifier::simplify`] and passes
//! [`Classifier::is_acceptable`] is the family's type. The ontology
//! search runs only when the whole chain fails. A lone `other` or
//! `misc_RNA` never ends the chain.

use rfam_pack::FamilyRecord;

use crate::error::InferError;
use crate::manual::ManualConfig;
use crate::ontology::OntologyIndex;
use crate::strategy::{SoTermSearch, Strategy, StrategyKind};
use crate::types::{InferredType, RnaType};

#[derive(Debug)]
pub struct Classifier {
    chain: Vec<Strategy>,
    search: Strategy,
}

impl Classifier {
    pub fn new(chain: Vec<Strategy>, search: SoTermSearch) -> Self {
        Self {
            chain,
            search: Strategy::SoSearch(search),
        }
    }

    pub fn build(
        config: &ManualConfig,
        ontology: OntologyIndex,
        kinds: &[StrategyKind],
        max_depth: usize,
    ) -> Result<Self, InferError> {
        let chain = kinds
            .iter()
            .map(|kind| Strategy::build(*kind, config))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Strategy chain: {}",
            chain
                .iter()
                .map(Strategy::name)
                .chain(std::iter::once(SoTermSearch::NAME))
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        Ok(Self::new(chain, SoTermSearch::new(ontology, max_depth)))
    }

    /// Names of every strategy, in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies().map(Strategy::name).collect()
    }

    fn strategies(&self) -> impl Iterator<Item = &Strategy> {
        self.chain.iter().chain(std::iter::once(&self.search))
    }

    /// Drop generic labels next to specific ones and rewrite a lone
    /// `miRNA` to `precursor_RNA`. `misc_RNA` goes before `other`.
    pub fn simplify<'a>(result: InferredType<'a>) -> InferredType<'a> {
        if result.is_empty() {
            return result;
        }

        let result = if result.len() > 1 && result.contains(RnaType::MiscRna) {
            result.remove(RnaType::MiscRna)
        } else {
            result
        };

        let result = if result.len() > 1 && result.contains(RnaType::Other) {
            result.remove(RnaType::Other)
        } else {
            result
        };

        // only precursors are modelled, never the mature miRNA
        if result.is_only(RnaType::MiRna) {
            return result.rewrite(RnaType::MiRna, RnaType::PrecursorRna);
        }

        result
    }

    pub fn is_acceptable(result: &InferredType) -> bool {
        !result.is_empty()
            && !result.is_only(RnaType::Other)
            && !result.is_only(RnaType::MiscRna)
    }

    /// The single accepted type of a family, or an empty `ALL` result.
    pub fn infer<'a>(&self, family: &'a FamilyRecord) -> InferredType<'a> {
        self.strategies()
            .map(|strategy| Self::simplify(strategy.infer(family)))
            .find(Self::is_acceptable)
            .unwrap_or_else(|| InferredType::unclassified(family))
    }

    /// What every strategy proposes on its own, without cleanup.
    pub fn compare<'a>(&self, family: &'a FamilyRecord) -> Vec<InferredType<'a>> {
        self.strategies()
            .map(|strategy| strategy.infer(family))
            .collect()
    }
}

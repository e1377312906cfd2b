//! Inference strategies
//!
//! Each strategy looks at one signal of a family (its id, its name, its
//! native rna type, or its ontology cross-references) and proposes zero
//! or more RNA types. Every proposal goes through the same normalization
//! in [`InferredType::build`].

use hashbrown::HashMap;
use regex::{Regex, RegexBuilder};
use rfam_pack::{rna_type_to_key, FamilyRecord};

use std::collections::BTreeSet;

use crate::error::InferError;
use crate::manual::{LabelTable, ManualConfig};
use crate::ontology::OntologyIndex;
use crate::types::{InferredType, RawLabels, RnaType};

/// Strategies that can be placed in the fallback chain. The ontology
/// search is not one of them: it always runs last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyKind {
    Manual,
    Name,
    RnaType,
    SoTerm,
}

pub const DEFAULT_CHAIN: [StrategyKind; 3] =
    [StrategyKind::Manual, StrategyKind::Name, StrategyKind::RnaType];

#[derive(Debug)]
pub enum Strategy {
    Manual(ManualInference),
    Name(FromName),
    RnaType(FromRnaType),
    SoTerm(FromSoTerms),
    SoSearch(SoTermSearch),
}

impl Strategy {
    pub fn build(kind: StrategyKind, config: &ManualConfig) -> Result<Self, InferError> {
        let strategy = match kind {
            StrategyKind::Manual => Strategy::Manual(ManualInference::new(config.hardcoded.clone())),
            StrategyKind::Name => Strategy::Name(FromName::new(config.name_patterns()?)?),
            StrategyKind::RnaType => Strategy::RnaType(FromRnaType::new(&config.rna_type_mapping)),
            StrategyKind::SoTerm => Strategy::SoTerm(FromSoTerms::new(config.assignments.clone())),
        };

        Ok(strategy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Manual(_) => ManualInference::NAME,
            Strategy::Name(_) => FromName::NAME,
            Strategy::RnaType(_) => FromRnaType::NAME,
            Strategy::SoTerm(_) => FromSoTerms::NAME,
            Strategy::SoSearch(_) => SoTermSearch::NAME,
        }
    }

    pub fn infer<'a>(&self, family: &'a FamilyRecord) -> InferredType<'a> {
        match self {
            Strategy::Manual(s) => s.infer(family),
            Strategy::Name(s) => s.infer(family),
            Strategy::RnaType(s) => s.infer(family),
            Strategy::SoTerm(s) => s.infer(family),
            Strategy::SoSearch(s) => s.infer(family),
        }
    }
}

/// Curator decisions keyed by family id.
#[derive(Debug, Clone)]
pub struct ManualInference {
    assignments: LabelTable,
}

impl ManualInference {
    pub const NAME: &'static str = "manual";

    pub fn new(assignments: LabelTable) -> Self {
        Self { assignments }
    }

    pub fn infer<'a>(&self, family: &'a FamilyRecord) -> InferredType<'a> {
        let raw = self.assignments.get(family.id()).and_then(Option::as_ref);
        InferredType::build(family, Self::NAME, raw)
    }
}

/// Case-insensitive name patterns, first match wins.
#[derive(Debug, Clone)]
pub struct FromName {
    informative_names: Vec<(Regex, Option<RawLabels>)>,
}

impl FromName {
    pub const NAME: &'static str = "name";

    pub fn new(patterns: Vec<(String, Option<RawLabels>)>) -> Result<Self, InferError> {
        let informative_names = patterns
            .into_iter()
            .map(|(pattern, label)| {
                RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (re, label))
                    .map_err(|source| InferError::Pattern { pattern, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { informative_names })
    }

    pub fn infer<'a>(&self, family: &'a FamilyRecord) -> InferredType<'a> {
        let raw = self
            .informative_names
            .iter()
            .find(|(pattern, _)| pattern.is_match(family.name()))
            .and_then(|(_, label)| label.as_ref());

        InferredType::build(family, Self::NAME, raw)
    }
}

/// Lookup of the family's native rna type key.
#[derive(Debug, Clone)]
pub struct FromRnaType {
    mapping: HashMap<Vec<String>, Option<RawLabels>>,
}

impl FromRnaType {
    pub const NAME: &'static str = "rna-type";

    pub fn new(given: &LabelTable) -> Self {
        let mapping = given
            .iter()
            .map(|(rna_type, label)| (rna_type_to_key(rna_type), label.clone()))
            .collect();

        Self { mapping }
    }

    pub fn infer<'a>(&self, family: &'a FamilyRecord) -> InferredType<'a> {
        let raw = self.mapping.get(family.rna_type()).and_then(Option::as_ref);
        InferredType::build(family, Self::NAME, raw)
    }
}

/// Direct term -> RNA type table applied to every cross-referenced term.
/// Unmapped terms add nothing.
#[derive(Debug, Clone)]
pub struct FromSoTerms {
    mapping: HashMap<String, Option<String>>,
}

impl FromSoTerms {
    pub const NAME: &'static str = "so-term";

    pub fn new(mapping: HashMap<String, Option<String>>) -> Self {
        Self { mapping }
    }

    pub fn infer<'a>(&self, family: &'a FamilyRecord) -> InferredType<'a> {
        let rna_types = family
            .so_terms()
            .iter()
            .filter_map(|term| self.mapping.get(term).cloned().flatten())
            .map(|label| RnaType::normalize(Some(label.as_str())));

        InferredType::new(family, Self::NAME, rna_types)
    }
}

/// Iterative-deepening walk of the ontology from each cross-referenced
/// term, returning the labels found at the shallowest depth.
#[derive(Debug)]
pub struct SoTermSearch {
    index: OntologyIndex,
    max_depth: usize,
}

impl SoTermSearch {
    pub const NAME: &'static str = "so-search";

    pub fn new(index: OntologyIndex, max_depth: usize) -> Self {
        Self { index, max_depth }
    }

    /// Annotations exactly `depth` edges away from `term`. A term's own
    /// annotation only counts at depth 0; `None` entries are terms curated
    /// without a type.
    pub fn dfs(&self, term: &str, depth: usize) -> BTreeSet<Option<RnaType>> {
        if depth == 0 {
            return self.index.annotation(term).into_iter().collect();
        }

        self.index
            .children(term)
            .iter()
            .flat_map(|child| self.dfs(child, depth - 1))
            .collect()
    }

    /// Try depths `0..max_depth` and stop at the first that reaches an
    /// annotated term. A term annotated without a type ends the search
    /// with nothing.
    pub fn search(&self, root: &str) -> BTreeSet<RnaType> {
        (0..self.max_depth)
            .map(|depth| self.dfs(root, depth))
            .find(|found| !found.is_empty())
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn infer<'a>(&self, family: &'a FamilyRecord) -> InferredType<'a> {
        let rna_types = family
            .so_terms()
            .iter()
            .flat_map(|term| self.search(term));

        InferredType::new(family, Self::NAME, rna_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::OntologyBuilder;
    use hashbrown::HashSet;

    fn family(id: &str, name: &str, terms: &[&str], rna_type: &str) -> FamilyRecord {
        let terms: HashSet<String> = terms.iter().map(|t| t.to_string()).collect();
        FamilyRecord::new(id, name, terms, rna_type_to_key(rna_type)).unwrap()
    }

    fn raw(label: &str) -> Option<RawLabels> {
        Some(RawLabels::One(label.to_string()))
    }

    #[test]
    fn test_manual_lookup() {
        let mut table = LabelTable::new();
        table.insert("RF00017".to_string(), raw("SRP_RNA"));
        table.insert("RF01854".to_string(), None);
        let manual = ManualInference::new(table);

        let srp = family("RF00017", "Metazoan SRP", &[], "Gene;");
        let unset = family("RF01854", "Bacteria large SRP", &[], "Gene;");
        let absent = family("RF00001", "5S ribosomal RNA", &[], "Gene; rRNA;");

        assert_eq!(
            manual.infer(&srp).rna_types(),
            &BTreeSet::from([RnaType::SrpRna])
        );
        assert!(manual.infer(&unset).is_empty());
        assert!(manual.infer(&absent).is_empty());
    }

    #[test]
    fn test_name_first_match_wins() {
        let from_name = FromName::new(vec![
            ("snoRNA".to_string(), raw("snoRNA")),
            ("RNA".to_string(), raw("misc_RNA")),
            ("antisense".to_string(), raw("antisense")),
        ])
        .unwrap();

        let sno = family("RF00002", "Small nucleolar SNORNA SNORD14", &[], "Gene; snRNA;");
        let misc = family("RF00003", "U1 spliceosomal rna", &[], "Gene; snRNA;");
        let anti = family("RF00004", "Antisense transcript", &[], "Gene; antisense;");
        let none = family("RF00005", "tmp", &[], "Gene;");

        assert_eq!(from_name.infer(&sno).rna_types(), &BTreeSet::from([RnaType::SnoRna]));
        assert_eq!(from_name.infer(&misc).rna_types(), &BTreeSet::from([RnaType::MiscRna]));
        assert_eq!(
            from_name.infer(&anti).rna_types(),
            &BTreeSet::from([RnaType::AntisenseRna])
        );
        assert!(from_name.infer(&none).is_empty());
    }

    #[test]
    fn test_name_rejects_bad_pattern() {
        assert!(FromName::new(vec![("(unclosed".to_string(), raw("tRNA"))]).is_err());
    }

    #[test]
    fn test_rna_type_key_lookup() {
        let mut table = LabelTable::new();
        table.insert("Gene; rRNA;".to_string(), raw("rRNA"));
        table.insert("Cis-reg;".to_string(), raw("Cis-reg"));
        let from_rna_type = FromRnaType::new(&table);

        let rrna = family("RF00001", "5S ribosomal RNA", &[], "Gene; rRNA");
        let cis = family("RF00050", "FMN", &[], "Cis-reg; riboswitch;");
        let cis_only = family("RF00051", "element", &[], "Cis-reg;");

        assert_eq!(from_rna_type.infer(&rrna).rna_types(), &BTreeSet::from([RnaType::RRna]));
        assert!(from_rna_type.infer(&cis).is_empty());
        assert_eq!(
            from_rna_type.infer(&cis_only).rna_types(),
            &BTreeSet::from([RnaType::Other])
        );
    }

    #[test]
    fn test_so_terms_skip_unmapped() {
        let mut mapping = HashMap::new();
        mapping.insert("SO:0000253".to_string(), Some("tRNA".to_string()));
        mapping.insert("SO:0000655".to_string(), None);
        let from_so = FromSoTerms::new(mapping);

        let trna = family("RF00005", "tRNA", &["SO:0000253", "SO:0000655", "SO:1"], "Gene; tRNA;");

        assert_eq!(from_so.infer(&trna).rna_types(), &BTreeSet::from([RnaType::TRna]));
    }

    fn search(max_depth: usize) -> SoTermSearch {
        let mut builder = OntologyBuilder::new();
        builder
            .add_edge("SO:root", "SO:child")
            .add_edge("SO:child", "SO:grandchild")
            .add_edge("SO:labelled", "SO:child")
            .add_edge("SO:wide", "SO:a")
            .add_edge("SO:wide", "SO:b")
            .add_edge("SO:blocked", "SO:deeper")
            .add_edge("SO:mixed", "SO:blocked")
            .add_edge("SO:mixed", "SO:a");
        builder.annotate("SO:child", Some(RnaType::SnRna));
        builder.annotate("SO:grandchild", Some(RnaType::TRna));
        builder.annotate("SO:labelled", Some(RnaType::RRna));
        builder.annotate("SO:a", Some(RnaType::SnoRna));
        builder.annotate("SO:b", Some(RnaType::ScRna));
        builder.annotate("SO:blocked", None);
        builder.annotate("SO:deeper", Some(RnaType::TRna));

        SoTermSearch::new(builder.seal(), max_depth)
    }

    #[test]
    fn test_search_prefers_shallowest_label() {
        let search = search(10);

        assert_eq!(search.search("SO:root"), BTreeSet::from([RnaType::SnRna]));
        assert_eq!(search.search("SO:labelled"), BTreeSet::from([RnaType::RRna]));
        assert_eq!(
            search.search("SO:wide"),
            BTreeSet::from([RnaType::SnoRna, RnaType::ScRna])
        );
    }

    #[test]
    fn test_search_is_bounded_by_max_depth() {
        assert!(search(1).search("SO:root").is_empty());
        assert_eq!(search(2).search("SO:root"), BTreeSet::from([RnaType::SnRna]));
        assert!(search(0).search("SO:labelled").is_empty());
    }

    #[test]
    fn test_search_tolerates_missing_terms() {
        let search = search(10);
        let family = family("RF00001", "x", &["SO:missing", "SO:labelled"], "Gene;");

        assert!(search.search("SO:missing").is_empty());
        assert_eq!(search.infer(&family).rna_types(), &BTreeSet::from([RnaType::RRna]));
    }

    #[test]
    fn test_search_stops_at_term_annotated_without_type() {
        let search = search(10);
        let family = family("RF00080", "x", &["SO:blocked"], "Gene;");

        assert_eq!(search.dfs("SO:blocked", 0), BTreeSet::from([None]));
        assert!(search.search("SO:blocked").is_empty());
        assert!(search.infer(&family).is_empty());
        assert_eq!(search.search("SO:mixed"), BTreeSet::from([RnaType::SnoRna]));
    }

    #[test]
    fn test_strategy_names() {
        let config = ManualConfig::parse(
            r#"{"hardcoded": {}, "informative_names": {}, "rna_type_mapping": {}}"#,
        )
        .unwrap();

        let names: Vec<&str> = [
            StrategyKind::Manual,
            StrategyKind::Name,
            StrategyKind::RnaType,
            StrategyKind::SoTerm,
        ]
        .into_iter()
        .map(|kind| Strategy::build(kind, &config).unwrap().name())
        .collect();

        assert_eq!(names, vec!["manual", "name", "rna-type", "so-term"]);
    }
}

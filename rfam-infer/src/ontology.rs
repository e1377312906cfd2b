//! Ontology term graph with curated RNA type annotations
//!
//! The graph is assembled by an [`OntologyBuilder`] (terms and edges
//! from the OBO file, then the manual term labels laid on top) and only
//! becomes searchable once sealed into an [`OntologyIndex`], which has no
//! mutating methods.

use hashbrown::HashMap;
use log::{info, warn};
use rfam_pack::OboTerm;

use crate::types::RnaType;

// `annotation` is `Some(None)` for a term curated as having no type:
// the search stops there without a label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct OntologyNode {
    annotation: Option<Option<RnaType>>,
    children: Vec<String>,
}

#[derive(Debug, Default)]
pub struct OntologyBuilder {
    nodes: HashMap<String, OntologyNode>,
}

impl OntologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_obo(terms: &[OboTerm]) -> Self {
        let mut builder = Self::new();

        for term in terms {
            builder.add_term(&term.id);
            for edge in &term.edges {
                builder.add_edge(&term.id, &edge.target);
            }
        }

        builder
    }

    pub fn add_term(&mut self, term: &str) -> &mut Self {
        self.nodes.entry(term.to_string()).or_default();
        self
    }

    /// Adds `to` as a child of `from`, creating either node if needed.
    /// Repeated edges between the same pair are kept once.
    pub fn add_edge(&mut self, from: &str, to: &str) -> &mut Self {
        self.add_term(to);

        let node = self.nodes.entry(from.to_string()).or_default();
        if !node.children.iter().any(|c| c == to) {
            node.children.push(to.to_string());
        }

        self
    }

    /// Label a term, `None` marks it as curated without a type. Returns
    /// false if the term is not in the graph.
    pub fn annotate(&mut self, term: &str, rna_type: Option<RnaType>) -> bool {
        match self.nodes.get_mut(term) {
            Some(node) => {
                node.annotation = Some(rna_type);
                true
            }
            None => false,
        }
    }

    /// Lay the curated term labels over the graph. A `null` label still
    /// annotates the term, with no type.
    pub fn overlay(mut self, assignments: &HashMap<String, Option<String>>) -> Self {
        let mut missing = 0;

        for (term, label) in assignments {
            let rna_type = label.as_deref().map(|l| RnaType::normalize(Some(l)));

            if !self.annotate(term, rna_type) {
                log::debug!("Assigned term {} is not in the ontology", term);
                missing += 1;
            }
        }

        if missing > 0 {
            warn!("{} assigned terms are missing from the ontology", missing);
        }

        self
    }

    pub fn seal(self) -> OntologyIndex {
        let annotated = self.nodes.values().filter(|n| n.annotation.is_some()).count();
        info!(
            "Ontology index: {} terms, {} annotated",
            self.nodes.len(),
            annotated
        );

        OntologyIndex { nodes: self.nodes }
    }
}

/// Read-only term graph, safe to share across threads.
#[derive(Debug, Default)]
pub struct OntologyIndex {
    nodes: HashMap<String, OntologyNode>,
}

impl OntologyIndex {
    /// Terms one edge away from `term`, empty for unknown terms.
    pub fn children(&self, term: &str) -> &[String] {
        self.nodes
            .get(term)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// `None` for unknown or unannotated terms, `Some(None)` for terms
    /// curated without a type.
    pub fn annotation(&self, term: &str) -> Option<Option<RnaType>> {
        self.nodes.get(term).and_then(|n| n.annotation)
    }
}

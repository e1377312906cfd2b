//! Minimal reader for OBO 1.2/1.4 ontology files
//!
//! Only the pieces needed to build a term graph are kept: the term id
//! and every `is_a`/`relationship` link to another term. Edges
//! point from a term to the term it references. Obsolete terms and
//! `[Typedef]` stanzas are dropped.

const TERM_STANZA: &str = "[Term]";
const IS_A: &str = "is_a";
const RELATIONSHIP: &str = "relationship";

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct OboTerm {
    pub id: String,
    pub edges: Vec<OboEdge>,
    pub is_obsolete: bool,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct OboEdge {
    pub relation: String,
    pub target: String,
}

pub fn parse_obo(contents: &str) -> Vec<OboTerm> {
    let mut terms = Vec::new();
    let mut current: Option<OboTerm> = None;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            flush(&mut current, &mut terms);
            if line == TERM_STANZA {
                current = Some(OboTerm::default());
            }
            continue;
        }

        let term = match current.as_mut() {
            Some(term) => term,
            None => continue,
        };

        let (tag, value) = match line.split_once(':') {
            Some((tag, value)) => (tag.trim(), strip_comment(value)),
            None => continue,
        };

        match tag {
            "id" => term.id = value.to_string(),
            "is_obsolete" => term.is_obsolete = value == "true",
            IS_A => {
                if let Some(target) = value.split_whitespace().next() {
                    term.edges.push(OboEdge {
                        relation: IS_A.to_string(),
                        target: target.to_string(),
                    });
                }
            }
            RELATIONSHIP => {
                let mut parts = value.split_whitespace();
                if let (Some(relation), Some(target)) = (parts.next(), parts.next()) {
                    term.edges.push(OboEdge {
                        relation: relation.to_string(),
                        target: target.to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    flush(&mut current, &mut terms);
    terms
}

fn flush(current: &mut Option<OboTerm>, terms: &mut Vec<OboTerm>) {
    if let Some(term) = current.take() {
        if !term.id.is_empty() && !term.is_obsolete {
            terms.push(term);
        }
    }
}

// drops trailing `! comment` and `{qualifier}` blocks
fn strip_comment(value: &str) -> &str {
    let value = match value.find(" !") {
        Some(idx) => &value[..idx],
        None => value,
    };
    let value = match value.find(" {") {
        Some(idx) => &value[..idx],
        None => value,
    };

    value.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBO: &str = r#"format-version: 1.2
ontology: so

[Term]
id: SO:0000252
name: rRNA
is_a: SO:0000655 ! ncRNA

[Term]
id: SO:0000652
name: rRNA_5S
is_a: SO:0000651 ! large_subunit_rRNA
relationship: part_of SO:0000252 {cardinality="1"} ! rRNA

[Term]
id: SO:0000000
name: retired
is_obsolete: true

[Typedef]
id: part_of
name: part_of
"#;

    #[test]
    fn test_parse_obo_terms_and_edges() {
        let terms = parse_obo(OBO);

        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].id, "SO:0000252");
        assert_eq!(
            terms[0].edges,
            vec![OboEdge {
                relation: "is_a".to_string(),
                target: "SO:0000655".to_string()
            }]
        );

        let targets: Vec<(&str, &str)> = terms[1]
            .edges
            .iter()
            .map(|e| (e.relation.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(
            targets,
            vec![("is_a", "SO:0000651"), ("part_of", "SO:0000252")]
        );
    }

    #[test]
    fn test_parse_obo_skips_obsolete_and_typedefs() {
        let terms = parse_obo(OBO);
        assert!(terms.iter().all(|t| t.id != "SO:0000000" && t.id != "part_of"));
    }
}

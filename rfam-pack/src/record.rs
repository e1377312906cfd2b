use config::{
    FAMILY_ID_COL, FAMILY_NAME_COL, FAMILY_RNA_TYPE_COL, MIN_FAMILY_FIELDS, MIN_XREF_FIELDS,
    RNA_TYPE_SEP, RNA_TYPE_TRAILER, XREF_KIND, XREF_PREFIX,
};
use hashbrown::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Invalid record: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One catalog entry, immutable after construction.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FamilyRecord {
    id: String,
    name: String,
    so_terms: HashSet<String>,
    rna_type: Vec<String>,
}

impl FamilyRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        so_terms: HashSet<String>,
        rna_type: Vec<String>,
    ) -> Result<Self, PackError> {
        let id = id.into();

        if id.is_empty() {
            return Err(PackError::Validation(
                "family id must not be empty".to_string(),
            ));
        }

        if rna_type.is_empty() {
            return Err(PackError::Validation(format!(
                "family {} has an empty rna type key",
                id
            )));
        }

        Ok(Self {
            id,
            name: name.into(),
            so_terms,
            rna_type,
        })
    }

    /// Build a record from one catalog row, the free-text rna type is
    /// turned into its key here.
    pub fn parse(line: &str, so_terms: HashSet<String>) -> Result<Self, PackError> {
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() < MIN_FAMILY_FIELDS {
            return Err(PackError::Validation(format!(
                "expected at least {} fields, found {}",
                MIN_FAMILY_FIELDS,
                fields.len()
            )));
        }

        Self::new(
            fields[FAMILY_ID_COL],
            fields[FAMILY_NAME_COL],
            so_terms,
            rna_type_to_key(fields[FAMILY_RNA_TYPE_COL]),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn so_terms(&self) -> &HashSet<String> {
        &self.so_terms
    }

    pub fn rna_type(&self) -> &[String] {
        &self.rna_type
    }
}

/// A single cross-reference from a family to an ontology term.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Xref {
    pub family: String,
    pub term: String,
}

impl Xref {
    /// Parse a whitespace-delimited link line, only links of kind
    /// [`XREF_KIND`] are kept.
    pub fn parse(line: &str) -> Result<Self, PackError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < MIN_XREF_FIELDS {
            return Err(PackError::Validation(format!(
                "expected {} fields, found {}",
                MIN_XREF_FIELDS,
                parts.len()
            )));
        }

        if parts[1] != XREF_KIND {
            return Err(PackError::Validation(format!(
                "unexpected reference kind {}",
                parts[1]
            )));
        }

        Ok(Self {
            family: parts[0].to_string(),
            term: format!("{}:{}", XREF_PREFIX, parts[2]),
        })
    }
}

/// Split a semicolon-delimited rna type into its key.
///
/// # Example
///
/// ```rust
/// use rfam_pack::rna_type_to_key;
///
/// assert_eq!(rna_type_to_key("Gene; rRNA;"), vec!["Gene", "rRNA"]);
/// ```
pub fn rna_type_to_key(rna_type: &str) -> Vec<String> {
    rna_type
        .trim_end_matches(RNA_TYPE_TRAILER)
        .split(RNA_TYPE_SEP)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_line(id: &str, name: &str, rna_type: &str) -> String {
        let mut fields = vec![String::from("."); MIN_FAMILY_FIELDS];
        fields[FAMILY_ID_COL] = id.to_string();
        fields[FAMILY_NAME_COL] = name.to_string();
        fields[FAMILY_RNA_TYPE_COL] = rna_type.to_string();
        fields.join("\t")
    }

    #[test]
    fn test_rna_type_to_key_strips_trailer() {
        assert_eq!(rna_type_to_key("tRNA; rRNA;"), vec!["tRNA", "rRNA"]);
        assert_eq!(rna_type_to_key("tRNA; rRNA"), vec!["tRNA", "rRNA"]);
        assert_eq!(
            rna_type_to_key("Gene; snRNA; snoRNA; CD-box;"),
            vec!["Gene", "snRNA", "snoRNA", "CD-box"]
        );
    }

    #[test]
    fn test_family_parse() {
        let line = catalog_line("RF00001", "5S ribosomal RNA", "Gene; rRNA;");
        let mut terms = HashSet::new();
        terms.insert("SO:0000652".to_string());

        let family = FamilyRecord::parse(&line, terms.clone()).unwrap();

        assert_eq!(family.id(), "RF00001");
        assert_eq!(family.name(), "5S ribosomal RNA");
        assert_eq!(family.rna_type(), &["Gene".to_string(), "rRNA".to_string()]);
        assert_eq!(family.so_terms(), &terms);
    }

    #[test]
    fn test_family_parse_rejects_short_rows() {
        assert!(FamilyRecord::parse("RF00001\t5S ribosomal RNA", HashSet::new()).is_err());
    }

    #[test]
    fn test_family_new_rejects_empty_values() {
        assert!(FamilyRecord::new("", "x", HashSet::new(), vec!["rRNA".into()]).is_err());
        assert!(FamilyRecord::new("RF00001", "x", HashSet::new(), Vec::new()).is_err());
    }

    #[test]
    fn test_xref_parse() {
        let xref = Xref::parse("RF00001\tSO\t0000652\t5S_rRNA").unwrap();
        assert_eq!(xref.family, "RF00001");
        assert_eq!(xref.term, "SO:0000652");

        assert!(Xref::parse("RF00001 GO 0005840").is_err());
        assert!(Xref::parse("RF00001 SO").is_err());
    }
}

pub mod fns;
pub use fns::*;

// numeric values
pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const MIN_XREF_FIELDS: usize = 3;
pub const MIN_FAMILY_FIELDS: usize = 19;

// catalog columns
pub const FAMILY_ID_COL: usize = 0;
pub const FAMILY_NAME_COL: usize = 1;
pub const FAMILY_RNA_TYPE_COL: usize = 18;

// ontology cross-references
pub const XREF_KIND: &str = "SO";
pub const XREF_PREFIX: &str = "SO";

// separators
pub const RNA_TYPE_SEP: &str = "; ";
pub const RNA_TYPE_TRAILER: char = ';';
pub const LABEL_SEP: &str = ";";
pub const FIELD_SEP: &str = ",";

// report
pub const FAMILY_COLUMN: &str = "family";
pub const METHOD_COLUMN: &str = "method";
pub const RNA_TYPES_COLUMN: &str = "rna_types";
pub const COMBINED_METHOD: &str = "ALL";

//! Readers for the Rfam family catalog, its ontology cross-references
//! and the ontology itself.
//!
//! Rows that cannot be parsed are skipped and counted, never fatal.

use std::fmt::Debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use hashbrown::{HashMap, HashSet};
use log::{info, warn};
use rayon::prelude::*;

pub mod obo;
pub mod record;
pub use obo::{parse_obo, OboEdge, OboTerm};
pub use record::{rna_type_to_key, FamilyRecord, PackError, Xref};

pub type XrefMap = HashMap<String, HashSet<String>>;

fn reader<P: AsRef<Path> + Debug>(file: P) -> Result<Vec<u8>, PackError> {
    let mut file = File::open(file)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// Read a UTF-8 file into memory.
pub fn utf8_reader<P: AsRef<Path> + Debug>(file: P) -> Result<String, anyhow::Error> {
    let bytes = reader(&file)?;
    String::from_utf8(bytes).map_err(|e| anyhow::anyhow!("ERROR: {:?} is not UTF-8: {}", file, e))
}

/// Read a single-byte (ISO-8859-1) file into memory.
pub fn latin1_reader<P: AsRef<Path> + Debug>(file: P) -> Result<String, anyhow::Error> {
    let bytes = reader(file)?;
    Ok(bytes.iter().map(|&b| b as char).collect())
}

/// Collect the ontology terms linked to each family.
pub fn parse_xrefs(contents: &str) -> XrefMap {
    let skipped = AtomicUsize::new(0);

    let xrefs = contents
        .par_lines()
        .filter(|x| !x.trim().is_empty())
        .filter_map(|x| match Xref::parse(x) {
            Ok(xref) => Some(xref),
            Err(_) => {
                skipped.fetch_add(1, Ordering::Relaxed);
                None
            }
        })
        .fold(
            || HashMap::new(),
            |mut acc: XrefMap, xref| {
                acc.entry(xref.family).or_default().insert(xref.term);
                acc
            },
        )
        .reduce(
            || HashMap::new(),
            |mut acc, map| {
                for (k, v) in map {
                    acc.entry(k).or_default().extend(v);
                }
                acc
            },
        );

    let skipped = skipped.load(Ordering::Relaxed);
    if skipped > 0 {
        warn!("Skipped {} cross-reference rows of another kind or shape", skipped);
    }
    info!("Families with cross-references: {}", xrefs.len());

    xrefs
}

/// Build every family of the catalog, in file order.
pub fn parse_families(contents: &str, xrefs: &XrefMap) -> Vec<FamilyRecord> {
    let skipped = AtomicUsize::new(0);

    let families: Vec<FamilyRecord> = contents
        .par_lines()
        .filter(|x| !x.trim().is_empty())
        .filter_map(|x| {
            let id = x.split('\t').next().unwrap_or_default();
            let terms = xrefs.get(id).cloned().unwrap_or_default();

            match FamilyRecord::parse(x, terms) {
                Ok(family) => Some(family),
                Err(e) => {
                    log::debug!("Skipping catalog row: {}", e);
                    skipped.fetch_add(1, Ordering::Relaxed);
                    None
                }
            }
        })
        .collect();

    let skipped = skipped.load(Ordering::Relaxed);
    if skipped > 0 {
        warn!("Skipped {} malformed catalog rows", skipped);
    }
    info!("Families parsed: {}", families.len());

    families
}

/// Load the catalog and attach each family's cross-referenced terms.
///
/// # Example
///
/// ```rust, no_run
/// let families = rfam_pack::build_all("database_link.txt", "family.txt").unwrap();
/// ```
pub fn build_all<P: AsRef<Path> + Debug + Sync>(
    link_file: P,
    family_file: P,
) -> Result<Vec<FamilyRecord>, anyhow::Error> {
    let (links, catalog) = rayon::join(
        || utf8_reader(&link_file),
        || latin1_reader(&family_file),
    );

    let xrefs = parse_xrefs(&links?);
    Ok(parse_families(&catalog?, &xrefs))
}

/// Load every live term of an OBO file.
pub fn load_obo<P: AsRef<Path> + Debug>(file: P) -> Result<Vec<OboTerm>, anyhow::Error> {
    let contents = utf8_reader(&file)?;
    let terms = parse_obo(&contents);
    info!("Ontology terms parsed: {}", terms.len());

    Ok(terms)
}

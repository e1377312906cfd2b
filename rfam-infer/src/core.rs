use anyhow::Result;
use config::{
    get_progress_bar, write_report, FAMILY_COLUMN, METHOD_COLUMN, RNA_TYPES_COLUMN,
};
use hashbrown::HashMap;
use log::info;
use rayon::prelude::*;
use rfam_pack::{build_all, load_obo, FamilyRecord};

use crate::classifier::Classifier;
use crate::cli::{Args, ReportMode};
use crate::manual::ManualConfig;
use crate::ontology::OntologyBuilder;

pub fn infer_types(args: Args) -> Result<()> {
    let (families, terms) = rayon::join(
        || build_all(&args.link, &args.family),
        || load_obo(&args.obo),
    );
    let (families, terms) = (families?, terms?);

    let manual = ManualConfig::from_path(&args.manual)?;
    let ontology = OntologyBuilder::from_obo(&terms)
        .overlay(&manual.assignments)
        .seal();

    let classifier = Classifier::build(&manual, ontology, &args.strategies, args.max_depth)?;
    let (header, rows) = report(&classifier, &families, args.mode);

    write_report(args.output.as_ref(), &header, &rows)?;

    Ok(())
}

/// Classify every family in parallel and format the rows of the
/// requested report, in catalog order.
pub fn report(
    classifier: &Classifier,
    families: &[FamilyRecord],
    mode: ReportMode,
) -> (Vec<&'static str>, Vec<String>) {
    let pb = get_progress_bar(families.len() as u64, "Inferring RNA types...");

    let (header, rows) = match mode {
        ReportMode::Infer => {
            let results: Vec<_> = families
                .par_iter()
                .map(|family| {
                    let result = classifier.infer(family);
                    pb.inc(1);
                    result
                })
                .collect();

            log_methods(results.iter().map(|r| r.method()));

            let rows: Vec<String> = results.iter().map(|r| r.simple()).collect();
            (vec![FAMILY_COLUMN, METHOD_COLUMN, RNA_TYPES_COLUMN], rows)
        }
        ReportMode::Compare => {
            let rows: Vec<String> = families
                .par_iter()
                .map(|family| {
                    let mut row = vec![family.id().to_string()];
                    row.extend(classifier.compare(family).iter().map(|r| r.fmt_types()));
                    pb.inc(1);
                    config::fmt_row(&row)
                })
                .collect();

            let mut header = vec![FAMILY_COLUMN];
            header.extend(classifier.names());
            (header, rows)
        }
    };

    pb.finish_and_clear();
    (header, rows)
}

fn log_methods<'a>(methods: impl Iterator<Item = &'a str>) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for method in methods {
        *counts.entry(method).or_default() += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_unstable();

    for (method, count) in counts {
        info!("Families typed by {}: {}", method, count);
    }
}

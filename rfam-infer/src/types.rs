use config::{COMBINED_METHOD, LABEL_SEP};
use rfam_pack::FamilyRecord;
use serde::Deserialize;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::InferError;

const ANTISENSE: &str = "antisense";

macro_rules! rna_types {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// INSDC ncRNA classes a family can be labelled with.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum RnaType {
            $($variant),+
        }

        impl RnaType {
            pub const ALL: &'static [RnaType] = &[$(RnaType::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(RnaType::$variant => $name),+
                }
            }
        }

        impl FromStr for RnaType {
            type Err = InferError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(RnaType::$variant),)+
                    _ => Err(InferError::UnknownRnaType(s.to_string())),
                }
            }
        }
    };
}

rna_types! {
    RnaseMrpRna => "RNase_MRP_RNA",
    RnasePRna => "RNase_P_RNA",
    SrpRna => "SRP_RNA",
    YRna => "Y_RNA",
    AntisenseRna => "antisense_RNA",
    AutocatalyticallySplicedIntron => "autocatalytically_spliced_intron",
    GuideRna => "guide_RNA",
    HammerheadRibozyme => "hammerhead_ribozyme",
    LncRna => "lncRNA",
    MiRna => "miRNA",
    NcRna => "ncRNA",
    MiscRna => "misc_RNA",
    Other => "other",
    PrecursorRna => "precursor_RNA",
    PiRna => "piRNA",
    RasiRna => "rasiRNA",
    Ribozyme => "ribozyme",
    ScRna => "scRNA",
    SiRna => "siRNA",
    SnRna => "snRNA",
    SnoRna => "snoRNA",
    TelomeraseRna => "telomerase_RNA",
    VaultRna => "vault_RNA",
    RRna => "rRNA",
    TRna => "tRNA",
    TmRna => "tmRNA",
}

impl RnaType {
    /// Map a raw label onto the enumeration. `antisense` is a synonym of
    /// `antisense_RNA`; anything unknown, or a missing label, is `other`.
    pub fn normalize(label: Option<&str>) -> RnaType {
        match label {
            Some(ANTISENSE) => RnaType::AntisenseRna,
            Some(label) => label.parse().unwrap_or_else(|_| {
                log::debug!("Unknown RNA type {:?}, using other", label);
                RnaType::Other
            }),
            None => RnaType::Other,
        }
    }
}

impl fmt::Display for RnaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label value as written in the manual config: one name, a list of
/// names, or (one level up, as `Option`) nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawLabels {
    One(String),
    Many(Vec<Option<String>>),
}

impl RawLabels {
    pub fn normalize(&self) -> BTreeSet<RnaType> {
        match self {
            RawLabels::One(label) => BTreeSet::from([RnaType::normalize(Some(label))]),
            RawLabels::Many(labels) => labels
                .iter()
                .map(|label| RnaType::normalize(label.as_deref()))
                .collect(),
        }
    }
}

/// The labels one method proposes for one family.
///
/// Values are never modified in place; [`InferredType::remove`] and
/// [`InferredType::rewrite`] hand back a new result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredType<'a> {
    family: &'a FamilyRecord,
    method: &'static str,
    rna_types: BTreeSet<RnaType>,
}

impl<'a> InferredType<'a> {
    pub fn new(
        family: &'a FamilyRecord,
        method: &'static str,
        rna_types: impl IntoIterator<Item = RnaType>,
    ) -> Self {
        Self {
            family,
            method,
            rna_types: rna_types.into_iter().collect(),
        }
    }

    /// Wrap whatever a strategy found, normalizing every label.
    pub fn build(family: &'a FamilyRecord, method: &'static str, raw: Option<&RawLabels>) -> Self {
        let rna_types = raw.map(RawLabels::normalize).unwrap_or_default();
        Self {
            family,
            method,
            rna_types,
        }
    }

    /// The result of a family no method could label.
    pub fn unclassified(family: &'a FamilyRecord) -> Self {
        Self::new(family, COMBINED_METHOD, std::iter::empty())
    }

    pub fn family(&self) -> &'a FamilyRecord {
        self.family
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn rna_types(&self) -> &BTreeSet<RnaType> {
        &self.rna_types
    }

    pub fn contains(&self, rna_type: RnaType) -> bool {
        self.rna_types.contains(&rna_type)
    }

    pub fn len(&self) -> usize {
        self.rna_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rna_types.is_empty()
    }

    /// True when the set holds `rna_type` and nothing else.
    pub fn is_only(&self, rna_type: RnaType) -> bool {
        self.len() == 1 && self.contains(rna_type)
    }

    pub fn remove(&self, rna_type: RnaType) -> Self {
        let mut next = self.clone();
        next.rna_types.remove(&rna_type);
        next
    }

    pub fn rewrite(&self, from: RnaType, to: RnaType) -> Self {
        if !self.contains(from) {
            return self.clone();
        }

        self.remove(from).insert(to)
    }

    fn insert(mut self, rna_type: RnaType) -> Self {
        self.rna_types.insert(rna_type);
        self
    }

    /// Labels joined in enumeration order, empty for an empty set.
    pub fn fmt_types(&self) -> String {
        self.rna_types
            .iter()
            .map(RnaType::as_str)
            .collect::<Vec<&str>>()
            .join(LABEL_SEP)
    }

    /// `family,method,rna_types` row.
    pub fn simple(&self) -> String {
        config::fmt_row(&[self.family.id(), self.method, self.fmt_types().as_str()])
    }
}

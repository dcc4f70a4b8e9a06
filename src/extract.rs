//! Pull the ClinVar annotations out of a record's INFO block.
//!
//! Every field degrades to [`SENTINEL`] on its own; nothing here can fail.

use itertools::Itertools;

use crate::io::vcf::{InfoValue, Metadata};
use crate::model::{tags, SENTINEL};

/// Normalized annotation set for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotations {
    pub gene: String,
    pub clinical_significance: String,
    pub allele_id: String,
    pub review_status: String,
    pub disease_name: String,
    pub variant_type: String,
    pub origin: String,
}

pub fn extract_annotations(info: &Metadata) -> Annotations {
    let origin = match info.get(tags::ORIGIN) {
        Some(v) => text(Some(v)),
        None => text(info.get(tags::ORIGIN_FALLBACK)),
    };

    Annotations {
        gene: gene_symbol(info.get(tags::GENE_INFO)),
        clinical_significance: text(info.get(tags::CLINICAL_SIGNIFICANCE)),
        allele_id: passthrough(info.get(tags::ALLELE_ID)),
        review_status: text(info.get(tags::REVIEW_STATUS)),
        disease_name: text(info.get(tags::DISEASE_NAME)),
        variant_type: text(info.get(tags::VARIANT_TYPE)),
        origin,
    }
}

/// Scalar as-is, multi-value joined with ", ", empty or missing as sentinel.
fn text(value: Option<&InfoValue>) -> String {
    match value {
        Some(InfoValue::Scalar(s)) if !s.is_empty() => s.clone(),
        Some(InfoValue::Multi(v)) if !v.is_empty() => v.iter().join(", "),
        _ => SENTINEL.to_string(),
    }
}

/// `SYMBOL:GeneID|SYMBOL2:GeneID2` -> `SYMBOL`.
fn gene_symbol(value: Option<&InfoValue>) -> String {
    let raw = match value {
        Some(InfoValue::Scalar(s)) => s.as_str(),
        Some(InfoValue::Multi(v)) => v.first().map(String::as_str).unwrap_or_default(),
        _ => "",
    };
    if raw.is_empty() {
        return SENTINEL.to_string();
    }
    let first = raw.split('|').next().unwrap_or_default();
    first.split(':').next().unwrap_or_default().to_string()
}

/// The allele ID is expected to be a single integer; keep whatever is there.
fn passthrough(value: Option<&InfoValue>) -> String {
    match value {
        Some(InfoValue::Scalar(s)) => s.clone(),
        Some(InfoValue::Multi(v)) if !v.is_empty() => v.join(","),
        _ => SENTINEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(entries: &[(&str, InfoValue)]) -> Metadata {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn scalar(s: &str) -> InfoValue {
        InfoValue::Scalar(s.to_string())
    }

    #[test]
    fn empty_block_is_all_sentinels() {
        let a = extract_annotations(&Metadata::new());
        for f in [
            &a.gene,
            &a.clinical_significance,
            &a.allele_id,
            &a.review_status,
            &a.disease_name,
            &a.variant_type,
            &a.origin,
        ] {
            assert_eq!(f, SENTINEL);
        }
    }

    #[test]
    fn gene_takes_first_symbol() {
        let a = extract_annotations(&meta(&[("GENEINFO", scalar("BRCA1:672|BRCA2:675"))]));
        assert_eq!(a.gene, "BRCA1");

        let a = extract_annotations(&meta(&[("GENEINFO", scalar("OR4F5"))]));
        assert_eq!(a.gene, "OR4F5");

        let a = extract_annotations(&meta(&[("GENEINFO", InfoValue::Absent)]));
        assert_eq!(a.gene, SENTINEL);
    }

    #[test]
    fn multi_values_join_in_order() {
        let a = extract_annotations(&meta(&[
            (
                "CLNREVSTAT",
                InfoValue::Multi(vec![
                    "criteria_provided".into(),
                    "_multiple_submitters".into(),
                    "_no_conflicts".into(),
                ]),
            ),
            ("CLNSIG", InfoValue::Multi(vec!["Pathogenic".into()])),
        ]));
        assert_eq!(
            a.review_status,
            "criteria_provided, _multiple_submitters, _no_conflicts"
        );
        assert_eq!(a.clinical_significance, "Pathogenic");
    }

    #[test]
    fn empty_values_fall_back_to_sentinel() {
        let a = extract_annotations(&meta(&[
            ("CLNDN", InfoValue::Multi(Vec::new())),
            ("CLNSIG", scalar("")),
            ("CLNVC", InfoValue::Absent),
        ]));
        assert_eq!(a.disease_name, SENTINEL);
        assert_eq!(a.clinical_significance, SENTINEL);
        assert_eq!(a.variant_type, SENTINEL);
    }

    #[test]
    fn allele_id_passes_through() {
        let a = extract_annotations(&meta(&[("ALLELEID", scalar("15041"))]));
        assert_eq!(a.allele_id, "15041");
    }

    #[test]
    fn origin_prefers_cln_tag() {
        let a = extract_annotations(&meta(&[
            ("ORIGIN", scalar("1")),
            ("CLNORIGIN", InfoValue::Multi(vec!["1".into(), "4".into()])),
        ]));
        assert_eq!(a.origin, "1, 4");

        let a = extract_annotations(&meta(&[("ORIGIN", scalar("1"))]));
        assert_eq!(a.origin, "1");
    }
}

//! Assemble the flat output row from a decoded record.

use crate::extract::extract_annotations;
use crate::io::vcf::InputRecord;
use crate::model::{OutputRecord, PASS_FILTER, SENTINEL};

pub fn format_record(record: &InputRecord) -> OutputRecord {
    let ann = extract_annotations(&record.metadata);

    OutputRecord {
        chromosome: record.chromosome.clone(),
        position: record.position,
        variant_id: first_or_sentinel(&record.ids),
        ref_allele: record.reference.clone(),
        // multi-allelic sites: only the first ALT is reported
        alt_allele: first_or_sentinel(&record.alternates),
        clinvar_id: ann.allele_id,
        gene: ann.gene,
        clinical_significance: ann.clinical_significance,
        review_status: ann.review_status,
        disease_name: ann.disease_name,
        variant_type: ann.variant_type,
        origin: ann.origin,
    }
}

/// True unless FILTER is set to something other than PASS.
pub fn passes_filter(filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) => f == PASS_FILTER,
    }
}

fn first_or_sentinel(values: &[String]) -> String {
    values
        .first()
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| SENTINEL.to_string())
}

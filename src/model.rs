use serde::Serialize;
use std::path::PathBuf;

/// Value written for any field that is missing from the input.
pub const SENTINEL: &str = "N/A";
/// FILTER value of a record that passed all filters.
pub const PASS_FILTER: &str = "PASS";
/// Emit a progress line every this many read records.
pub const PROGRESS_EVERY: u64 = 100_000;

/// INFO tags the extractor understands.
pub mod tags {
    pub const GENE_INFO: &str = "GENEINFO";
    pub const CLINICAL_SIGNIFICANCE: &str = "CLNSIG";
    pub const ALLELE_ID: &str = "ALLELEID";
    pub const REVIEW_STATUS: &str = "CLNREVSTAT";
    pub const DISEASE_NAME: &str = "CLNDN";
    pub const VARIANT_TYPE: &str = "CLNVC";
    pub const ORIGIN: &str = "CLNORIGIN";
    // ClinVar releases spell the origin tag without the CLN prefix
    pub const ORIGIN_FALLBACK: &str = "ORIGIN";
}

/// Column order shared by the CSV header and the JSON objects.
pub const FIELD_NAMES: [&str; 12] = [
    "chromosome",
    "position",
    "variantId",
    "refAllele",
    "altAllele",
    "clinvarId",
    "gene",
    "clinicalSignificance",
    "reviewStatus",
    "diseaseName",
    "variantType",
    "origin",
];

/// One flattened output row. Field declaration order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub chromosome: String,
    pub position: usize,
    /// First entry of the VCF ID column.
    pub variant_id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    /// Taken from the ALLELEID INFO tag, not from the ID column.
    pub clinvar_id: String,
    pub gene: String,
    pub clinical_significance: String,
    pub review_status: String,
    pub disease_name: String,
    pub variant_type: String,
    pub origin: String,
}

impl OutputRecord {
    pub fn field_names(&self) -> Vec<&'static str> {
        FIELD_NAMES.to_vec()
    }

    /// Value of one column by its output name.
    pub fn field(&self, name: &str) -> Option<String> {
        let v = match name {
            "chromosome" => self.chromosome.clone(),
            "position" => self.position.to_string(),
            "variantId" => self.variant_id.clone(),
            "refAllele" => self.ref_allele.clone(),
            "altAllele" => self.alt_allele.clone(),
            "clinvarId" => self.clinvar_id.clone(),
            "gene" => self.gene.clone(),
            "clinicalSignificance" => self.clinical_significance.clone(),
            "reviewStatus" => self.review_status.clone(),
            "diseaseName" => self.disease_name.clone(),
            "variantType" => self.variant_type.clone(),
            "origin" => self.origin.clone(),
            _ => return None,
        };
        Some(v)
    }
}

/// Everything the driver needs for one run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
    /// Stop after this many processed records. `None` reads everything.
    pub limit: Option<u64>,
    pub skip_filtered: bool,
    /// Gzip both outputs and append `.gz` to their paths.
    pub gzip: bool,
    /// Log progress every this many read records; 0 turns it off.
    pub progress_every: u64,
}

impl ConvertConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            csv: None,
            json: None,
            limit: None,
            skip_filtered: false,
            gzip: false,
            progress_every: PROGRESS_EVERY,
        }
    }

    pub fn has_outputs(&self) -> bool {
        self.csv.is_some() || self.json.is_some()
    }
}

/// Counters kept across the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounts {
    /// Records pulled from the input, including filtered and skipped ones.
    pub read: u64,
    /// Records that were formatted and handed to the sinks.
    pub processed: u64,
}

impl RunCounts {
    pub fn limit_reached(&self, limit: Option<u64>) -> bool {
        matches!(limit, Some(n) if self.processed >= n)
    }
}

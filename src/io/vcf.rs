//! VCF input: open (plain or gzip), read the header, decode records.
//!
//! Lines are read lazily by noodles and only decoded against the header
//! one at a time, so a bad INFO value costs one record, not the run.

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use fs_err as fs;
use indexmap::IndexSet;
use noodles_vcf as vcf;
use noodles_vcf::variant::record::Filters as _;
use noodles_vcf::variant::record_buf::info::field::{value::Array, Value};
use noodles_vcf::variant::RecordBuf;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::RecordError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// An INFO value, resolved once at decode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    /// Key present with a missing (`.`) value.
    Absent,
    Scalar(String),
    Multi(Vec<String>),
}

/// INFO block of one record, keyed by tag.
pub type Metadata = HashMap<String, InfoValue>;

/// One decoded record, owned for the duration of a single iteration.
#[derive(Debug, Clone)]
pub struct InputRecord {
    pub chromosome: String,
    pub position: usize,
    pub ids: Vec<String>,
    pub reference: String,
    pub alternates: Vec<String>,
    pub metadata: Metadata,
}

impl InputRecord {
    /// Decode a lazily-read line against the header.
    pub fn decode(header: &vcf::Header, record: &vcf::Record) -> Result<Self, RecordError> {
        let buf = RecordBuf::try_from_variant_record(header, record)?;
        Ok(Self::from(&buf))
    }
}

impl From<&RecordBuf> for InputRecord {
    fn from(r: &RecordBuf) -> Self {
        let ids: &IndexSet<String> = r.ids().as_ref();
        let alternates: &[String] = r.alternate_bases().as_ref();

        let metadata = r
            .info()
            .as_ref()
            .iter()
            .map(|(key, value)| (key.clone(), resolve_value(value.as_ref())))
            .collect();

        Self {
            chromosome: r.reference_sequence_name().to_string(),
            position: r.variant_start().map(usize::from).unwrap_or_default(),
            ids: ids.iter().cloned().collect(),
            reference: r.reference_bases().to_string(),
            alternates: alternates.to_vec(),
            metadata,
        }
    }
}

fn resolve_value(value: Option<&Value>) -> InfoValue {
    match value {
        None => InfoValue::Absent,
        Some(Value::Integer(n)) => InfoValue::Scalar(n.to_string()),
        Some(Value::Float(n)) => InfoValue::Scalar(n.to_string()),
        Some(Value::Flag) => InfoValue::Scalar("true".to_string()),
        Some(Value::Character(c)) => InfoValue::Scalar(c.to_string()),
        Some(Value::String(s)) => InfoValue::Scalar(s.clone()),
        Some(Value::Array(array)) => InfoValue::Multi(resolve_array(array)),
    }
}

fn resolve_array(array: &Array) -> Vec<String> {
    fn render<T: ToString>(v: &[Option<T>]) -> Vec<String> {
        v.iter()
            .map(|x| x.as_ref().map_or_else(|| ".".to_string(), T::to_string))
            .collect()
    }
    match array {
        Array::Integer(v) => render(v),
        Array::Float(v) => render(v),
        Array::Character(v) => render(v),
        Array::String(v) => render(v),
    }
}

/// Open a VCF that may be plain text, gzip or BGZF.
pub fn open_reader(path: &Path) -> Result<vcf::io::Reader<BufReader<Box<dyn Read>>>> {
    let file = fs::File::open(path)?;
    let mut inner = BufReader::new(file);
    let head = inner
        .fill_buf()
        .with_context(|| format!("read {}", path.display()))?;
    let stream: Box<dyn Read> = if head.starts_with(&GZIP_MAGIC) {
        Box::new(MultiGzDecoder::new(inner))
    } else {
        Box::new(inner)
    };
    Ok(vcf::io::Reader::new(BufReader::new(stream)))
}

/// Open the input and read its header. Any failure here is fatal for the run.
pub fn open(path: &Path) -> Result<(vcf::io::Reader<BufReader<Box<dyn Read>>>, vcf::Header)> {
    let mut reader =
        open_reader(path).with_context(|| format!("open VCF {}", path.display()))?;
    let header = reader
        .read_header()
        .with_context(|| format!("read VCF header in {}", path.display()))?;
    Ok((reader, header))
}

/// FILTER column of a lazy record, read without decoding the rest of it.
///
/// `None` when the column is `.` (untested); failing filters are joined
/// with `;`.
pub fn filter_status(header: &vcf::Header, record: &vcf::Record) -> Option<String> {
    let filters = record.filters();
    let ids: Vec<&str> = filters
        .iter(header)
        .filter_map(|id| id.ok())
        .filter(|id| *id != ".")
        .collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids.join(";"))
    }
}

/// Best-effort `chrom:pos` of a lazy record, for log lines.
pub fn locus(record: &vcf::Record) -> String {
    let pos = match record.variant_start() {
        Some(Ok(p)) => usize::from(p).to_string(),
        _ => "?".to_string(),
    };
    format!("{}:{}", record.reference_sequence_name(), pos)
}

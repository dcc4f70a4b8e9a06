//! The single-pass conversion loop.
//!
//! One record is read, filtered, formatted and written to every open sink
//! before the next one is read. Only an unreadable input aborts the run
//! before it starts; after that, sinks are always closed and a summary is
//! always logged.

use anyhow::{Context, Result};
use log::{error, info, warn};
use noodles_vcf as vcf;
use std::io::BufRead;

use crate::format::{format_record, passes_filter};
use crate::io::sinks::{Finish, SinkStatus, Sinks};
use crate::io::vcf::{self as input, InputRecord};
use crate::model::{ConvertConfig, OutputRecord, RunCounts};
use crate::summary;

pub fn run(cfg: &ConvertConfig) -> Result<RunCounts> {
    if !cfg.has_outputs() {
        anyhow::bail!("No output format specified. Use --csv and/or --json.");
    }

    info!("Opening VCF file: {}", cfg.input.display());
    let (mut reader, header) = input::open(&cfg.input)?;
    let mut sinks = Sinks::open(cfg)?;

    let mut counts = RunCounts::default();
    info!("Streaming VCF records...");
    if let Err(e) = stream(&mut reader, &header, &mut sinks, cfg, &mut counts) {
        error!("An unexpected error occurred during VCF processing: {e:#}");
    }

    sinks.close();
    summary::log_summary(&counts);
    Ok(counts)
}

/// Drive records from `reader` into `sinks`. Returns early only when the
/// input itself can no longer be read.
pub fn stream<R: BufRead, W: Finish>(
    reader: &mut vcf::io::Reader<R>,
    header: &vcf::Header,
    sinks: &mut Sinks<W>,
    cfg: &ConvertConfig,
    counts: &mut RunCounts,
) -> Result<()> {
    for result in reader.records() {
        let record = result.with_context(|| format!("read record {}", counts.read + 1))?;
        counts.read += 1;
        let n = counts.read;

        if progress_due(n, cfg.progress_every) {
            info!("Read {} records, processed {}...", n, counts.processed);
        }

        // the FILTER column is checked before anything else is decoded
        if cfg.skip_filtered && !passes_filter(input::filter_status(header, &record).as_deref())
        {
            continue;
        }

        let decoded = match InputRecord::decode(header, &record) {
            Ok(r) => r,
            Err(e) => {
                warn!(
                    "Skipping record {n} due to formatting error: {e} - Record: {}",
                    input::locus(&record)
                );
                continue;
            }
        };

        let row = format_record(&decoded);
        write_row(sinks, &row, n);
        counts.processed += 1;

        if counts.limit_reached(cfg.limit) {
            info!(
                "Reached processed record limit of {}.",
                cfg.limit.unwrap_or_default()
            );
            break;
        }
    }
    Ok(())
}

fn progress_due(read: u64, every: u64) -> bool {
    every > 0 && read % every == 0
}

/// Hand one row to every sink, logging by failure tier.
fn write_row<W: Finish>(sinks: &mut Sinks<W>, row: &OutputRecord, n: u64) {
    if let Some(csv) = sinks.csv.as_mut() {
        match csv.write(row) {
            SinkStatus::Written | SinkStatus::Closed => {}
            SinkStatus::Skipped(e) => {
                warn!("Skipping CSV write for record {n} due to error: {e}")
            }
            SinkStatus::Disabled(e) => {
                error!("Error writing CSV header: {e}");
                error!("Disabling further CSV output.");
            }
        }
    }

    if let Some(json) = sinks.json.as_mut() {
        if let SinkStatus::Skipped(e) = json.write(row) {
            warn!("Skipping JSON write for record {n} due to error: {e}")
        }
    }
}

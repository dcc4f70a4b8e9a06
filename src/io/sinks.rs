//! CSV and JSON Lines sinks.
//!
//! Every write returns a [`SinkStatus`] instead of an error so the driver
//! can tell a skipped row from a sink that has shut itself down.
//!
//! The CSV sink has no header until the first record arrives:
//! `Pending -> Active(header) -> Closed`. A header that cannot be written
//! closes the sink for the rest of the run. The JSON sink is simply open
//! until it is closed.

use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::error::SinkError;
use crate::io::output::{output_path, OutputFile};
use crate::model::{ConvertConfig, OutputRecord};

/// Outcome of one write attempt on one sink.
///
/// Rows go through buffered writers, so `Written` means accepted by the
/// buffer. A failure that only shows up when the buffer drains is reported
/// by `close`, not by the write that queued it.
#[derive(Debug)]
pub enum SinkStatus {
    Written,
    /// This row was not written; the sink stays usable.
    Skipped(SinkError),
    /// The sink closed itself and will ignore further rows.
    Disabled(SinkError),
    /// The sink was already closed.
    Closed,
}

/// A writer that needs an explicit final step (gzip trailer, flush).
pub trait Finish: Write {
    fn finish(self) -> io::Result<()>;
}

impl Finish for OutputFile {
    fn finish(self) -> io::Result<()> {
        OutputFile::finish(self)
    }
}

pub enum CsvSink<W: Finish> {
    Pending(csv::Writer<W>),
    Active {
        writer: csv::Writer<W>,
        header: Vec<&'static str>,
    },
    Closed,
}

impl<W: Finish> CsvSink<W> {
    pub fn new(out: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        CsvSink::Pending(writer)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, CsvSink::Closed)
    }

    pub fn write(&mut self, record: &OutputRecord) -> SinkStatus {
        if matches!(self, CsvSink::Pending(_)) {
            if let Err(e) = self.activate(record) {
                return SinkStatus::Disabled(e);
            }
        }
        match self {
            CsvSink::Active { writer, header } => {
                let row = header.iter().map(|name| record.field(name).unwrap_or_default());
                match writer.write_record(row) {
                    Ok(()) => SinkStatus::Written,
                    Err(e) => SinkStatus::Skipped(e.into()),
                }
            }
            CsvSink::Pending(_) | CsvSink::Closed => SinkStatus::Closed,
        }
    }

    /// Write the header taken from `first` and move to `Active`.
    fn activate(&mut self, first: &OutputRecord) -> Result<(), SinkError> {
        let mut writer = match std::mem::replace(self, CsvSink::Closed) {
            CsvSink::Pending(w) => w,
            other => {
                *self = other;
                return Ok(());
            }
        };
        let header = first.field_names();
        let written = writer
            .write_record(header.iter())
            .and_then(|()| writer.flush().map_err(csv::Error::from));
        match written {
            Ok(()) => {
                *self = CsvSink::Active { writer, header };
                Ok(())
            }
            Err(e) => {
                // stays Closed; release the handle now
                if let Ok(out) = writer.into_inner() {
                    let _ = out.finish();
                }
                Err(e.into())
            }
        }
    }

    pub fn close(self) -> Result<(), SinkError> {
        match self {
            CsvSink::Pending(writer) | CsvSink::Active { writer, .. } => {
                let out = writer.into_inner().map_err(|e| e.into_error())?;
                out.finish()?;
                Ok(())
            }
            CsvSink::Closed => Ok(()),
        }
    }
}

pub struct JsonSink<W: Finish> {
    out: W,
}

impl<W: Finish> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write(&mut self, record: &OutputRecord) -> SinkStatus {
        let written = serde_json::to_writer(&mut self.out, record)
            .map_err(SinkError::from)
            .and_then(|()| self.out.write_all(b"\n").map_err(SinkError::from));
        match written {
            Ok(()) => SinkStatus::Written,
            Err(e) => SinkStatus::Skipped(e),
        }
    }

    pub fn close(self) -> Result<(), SinkError> {
        self.out.finish()?;
        Ok(())
    }
}

/// The configured sinks for one run.
pub struct Sinks<W: Finish> {
    pub csv: Option<CsvSink<W>>,
    pub json: Option<JsonSink<W>>,
}

impl Sinks<OutputFile> {
    /// Open every configured output. If a later one fails, earlier ones are
    /// closed before the error is returned.
    pub fn open(cfg: &ConvertConfig) -> Result<Self> {
        let mut sinks = Sinks {
            csv: None,
            json: None,
        };

        if let Some(p) = &cfg.csv {
            let path = output_path(p, cfg.gzip);
            log::info!("Preparing CSV output to: {}", path.display());
            match OutputFile::create(&path, cfg.gzip) {
                Ok(out) => sinks.csv = Some(CsvSink::new(out)),
                Err(e) => {
                    return Err(e).with_context(|| format!("create CSV output {}", path.display()))
                }
            }
        }

        if let Some(p) = &cfg.json {
            let path = output_path(p, cfg.gzip);
            log::info!("Preparing JSON Lines output to: {}", path.display());
            match OutputFile::create(&path, cfg.gzip) {
                Ok(out) => sinks.json = Some(JsonSink::new(out)),
                Err(e) => {
                    sinks.close();
                    return Err(e)
                        .with_context(|| format!("create JSON Lines output {}", path.display()));
                }
            }
        }

        Ok(sinks)
    }
}

impl<W: Finish> Sinks<W> {
    /// Close every sink exactly once. Failures are logged, not returned.
    pub fn close(self) {
        if let Some(csv) = self.csv {
            let was_open = !csv.is_closed();
            match csv.close() {
                Ok(()) if was_open => log::info!("CSV file closed."),
                Ok(()) => {}
                Err(e) => log::error!("Error closing CSV output: {e}"),
            }
        }
        if let Some(json) = self.json {
            match json.close() {
                Ok(()) => log::info!("JSON Lines file closed."),
                Err(e) => log::error!("Error closing JSON Lines output: {e}"),
            }
        }
    }
}

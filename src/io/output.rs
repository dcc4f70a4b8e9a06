//! Output file handles, optionally gzip-compressed.

use flate2::write::GzEncoder;
use flate2::Compression;
use fs_err as fs;
use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where an output actually lands: `--gz` appends `.gz` to the given path.
pub fn output_path(path: &Path, gzip: bool) -> PathBuf {
    if !gzip {
        return path.to_path_buf();
    }
    let mut s = OsString::from(path.as_os_str());
    s.push(".gz");
    PathBuf::from(s)
}

#[derive(Debug)]
pub enum OutputFile {
    Plain(BufWriter<fs::File>),
    Gzip(GzEncoder<BufWriter<fs::File>>),
}

impl OutputFile {
    /// Create (truncate) `path`. The caller has already applied [`output_path`].
    pub fn create(path: &Path, gzip: bool) -> io::Result<Self> {
        let file = BufWriter::new(fs::File::create(path)?);
        Ok(if gzip {
            OutputFile::Gzip(GzEncoder::new(file, Compression::default()))
        } else {
            OutputFile::Plain(file)
        })
    }

    /// Flush everything and write the gzip trailer if any.
    pub fn finish(self) -> io::Result<()> {
        match self {
            OutputFile::Plain(mut w) => w.flush(),
            OutputFile::Gzip(enc) => enc.finish()?.flush(),
        }
    }
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputFile::Plain(w) => w.write(buf),
            OutputFile::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputFile::Plain(w) => w.flush(),
            OutputFile::Gzip(w) => w.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::MultiGzDecoder;
    use std::io::Read;

    #[test]
    fn gz_suffix_only_when_requested() {
        let p = Path::new("out/variants.csv");
        assert_eq!(output_path(p, false), PathBuf::from("out/variants.csv"));
        assert_eq!(output_path(p, true), PathBuf::from("out/variants.csv.gz"));
    }

    #[test]
    fn gzip_file_is_complete_after_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.jsonl.gz");
        let mut out = OutputFile::create(&path, true).unwrap();
        out.write_all(b"{\"a\":1}\n").unwrap();
        out.finish().unwrap();

        let mut text = String::new();
        MultiGzDecoder::new(fs::File::open(&path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "{\"a\":1}\n");
    }
}

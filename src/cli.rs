//! CLI definition.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use clinvcf::convert;
use clinvcf::model::{ConvertConfig, PROGRESS_EVERY};

#[derive(Parser, Debug)]
#[command(
    name = "clinvcf",
    version,
    about = "Stream a ClinVar VCF into CSV and/or JSON Lines"
)]
pub struct Cli {
    /// Input VCF (plain, gzip or bgzip)
    pub vcf_file: PathBuf,

    #[arg(long, value_name = "PATH", help = "Write CSV to this path")]
    pub csv: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Write JSON Lines to this path")]
    pub json: Option<PathBuf>,

    #[arg(
        long,
        value_name = "N",
        help = "Stop after N processed records (0 = no limit)"
    )]
    pub limit: Option<u64>,

    #[arg(long, help = "Skip records whose FILTER is set and is not PASS")]
    pub skip_filtered: bool,

    #[arg(long, help = "Gzip the outputs (appends .gz to each path)")]
    pub gz: bool,
}

impl Cli {
    pub fn config(&self) -> ConvertConfig {
        ConvertConfig {
            input: self.vcf_file.clone(),
            csv: self.csv.clone(),
            json: self.json.clone(),
            limit: self.limit.filter(|&n| n > 0),
            skip_filtered: self.skip_filtered,
            gzip: self.gz,
            progress_every: PROGRESS_EVERY,
        }
    }

    pub fn run(self) -> Result<()> {
        convert::run(&self.config())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::parse_from([
            "clinvcf",
            "clinvar.vcf.gz",
            "--csv",
            "out.csv",
            "--limit",
            "5",
            "--skip-filtered",
            "--gz",
        ]);
        let cfg = cli.config();
        assert_eq!(cfg.input, PathBuf::from("clinvar.vcf.gz"));
        assert_eq!(cfg.csv, Some(PathBuf::from("out.csv")));
        assert_eq!(cfg.json, None);
        assert_eq!(cfg.limit, Some(5));
        assert!(cfg.skip_filtered);
        assert!(cfg.gzip);
    }

    #[test]
    fn zero_limit_means_unlimited() {
        let cli = Cli::parse_from(["clinvcf", "in.vcf", "--json", "o.jsonl", "--limit", "0"]);
        assert_eq!(cli.config().limit, None);
    }
}

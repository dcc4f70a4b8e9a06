//! clinvcf: ClinVar VCF -> CSV / JSON Lines.
//! Entry point only; see `cli` and `convert`.

mod cli;

use cli::Cli;

fn main() {
    clinvcf::util::logging::init_logging();
    let cli = <Cli as clap::Parser>::parse();
    if let Err(e) = cli.run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

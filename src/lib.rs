pub mod convert;
pub mod error;
pub mod extract;
pub mod format;
pub mod model;
pub mod summary;

pub mod io {
    pub mod output;
    pub mod sinks;
    pub mod vcf;
}

pub mod util {
    pub mod logging;
}

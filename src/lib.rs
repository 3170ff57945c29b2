//! Shard Japan Post's nationwide postal-code list into per-prefix JSON files.
//!
//! A run is strictly linear: [`fetch`] downloads and unpacks the archive,
//! [`process`] parses rows and groups them by 3-digit prefix, and [`emit`]
//! writes one `<prefix>.json` per bucket. [`pipeline::run`] drives the lot.

pub mod cleanup;
pub mod config;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod process;

#[cfg(test)]
mod test_support;

pub use config::PipelineConfig;
pub use error::{Error, ParseErrorKind, Result};

//! Loading and normalization of the accident dataset.

pub mod cache;
pub mod coerce;
pub mod columns;
pub mod export;
pub mod labels;
pub mod record;
pub mod table;

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;

use crate::error::LoadError;
use crate::report::model::SourceInfo;
use crate::source::parse::{ParseConfig, parse_table};
use crate::source::read::{SourceContext, read_source};

pub use record::AccidentRecord;
pub use table::{AccidentTable, normalize};

/// A normalized table bound to the source it was built from.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: SourceInfo,
    pub table: AccidentTable,
}

impl Dataset {
    /// Parse and normalize an already-read source.
    pub fn from_source(ctx: SourceContext, config: &ParseConfig) -> Result<Self, LoadError> {
        let started = Instant::now();
        let raw = parse_table(&ctx.bytes, config)?;

        if raw.headers.is_empty() {
            return Err(LoadError::MissingHeader {
                path: PathBuf::from(ctx.path.clone().unwrap_or_default()),
            });
        }

        let table = normalize(&raw);
        info!(
            "normalized {} rows ({} recognized columns, {} passthrough) in {:?}",
            table.len(),
            table.present_columns().len(),
            table.passthrough_headers().len(),
            started.elapsed()
        );

        Ok(Self {
            source: ctx.into_source_info(),
            table,
        })
    }
}

/// Read, parse and normalize the source at `path`, without caching.
pub fn load_dataset(path: &Path, config: &ParseConfig) -> Result<Dataset, LoadError> {
    info!("loading accident data from {}", path.display());
    let ctx = read_source(path)?;
    Dataset::from_source(ctx, config)
}

#[cfg(test)]
pub(crate) fn table_from_csv(input: &str) -> AccidentTable {
    let raw = parse_table(input.as_bytes(), &ParseConfig::default()).expect("valid csv");
    normalize(&raw)
}

pub mod dataset;
pub mod error;
pub mod report;
pub mod source;
pub mod util;

use std::path::Path;

use anyhow::{Context, Result};

use crate::dataset::Dataset;
use crate::source::parse::ParseConfig;

pub const TOOL_NAME: &str = "ride-eda";

/// JSON schema version of reports.
/// Bump only when the serialized report shape changes.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Read, parse and normalize the source at `path`, with the path attached to
/// any failure.
pub fn load(path: &Path, parse: &ParseConfig) -> Result<Dataset> {
    dataset::load_dataset(path, parse)
        .with_context(|| format!("failed to load accident data from {}", path.display()))
}

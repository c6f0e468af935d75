use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::dataset::Dataset;
use crate::dataset::coerce::TimeFormat;
use crate::report::aggregate::Granularity;
use crate::report::distributions::Distributions;
use crate::report::geography::Geography;
use crate::report::overview::Overview;
use crate::report::severity::SeverityReport;
use crate::report::tables::Tables;
use crate::report::time::TimeReport;

/// Top-level report.
///
/// This struct is the stable JSON contract consumed by chart and table
/// renderers. Identical inputs and options produce identical output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub source: SourceInfo,
    pub dataset: DatasetInfo,
    pub sections: Sections,
}

impl Report {
    pub fn new(tool: ToolInfo, dataset: &Dataset, granularity: Granularity, sections: Sections) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            source: dataset.source.clone(),
            dataset: DatasetInfo::describe(dataset, granularity),
            sections,
        }
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Source file metadata bound to this report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: Option<String>,
    pub size_bytes: u64,
    pub hash: SourceHash,
}

/// Content fingerprint of the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHash {
    pub algorithm: String,
    pub value: String,
}

/// Shape of the normalized table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns_present: Vec<String>,
    pub columns_absent: Vec<String>,
    pub passthrough_columns: Vec<String>,
    pub time_format: Option<TimeFormat>,
    pub granularity: Granularity,
}

impl DatasetInfo {
    pub fn describe(dataset: &Dataset, granularity: Granularity) -> Self {
        let table = &dataset.table;
        Self {
            rows: table.len(),
            columns_present: table.present_columns().to_vec(),
            columns_absent: table.absent_columns().into_iter().map(String::from).collect(),
            passthrough_columns: table.passthrough_headers().to_vec(),
            time_format: table.time_format(),
            granularity,
        }
    }
}

/// Report sections, mirroring the dashboard's section selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Overview,
    Distributions,
    Time,
    Severity,
    Geography,
    Tables,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Overview,
        Section::Distributions,
        Section::Time,
        Section::Severity,
        Section::Geography,
        Section::Tables,
    ];
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Overview => "overview",
            Section::Distributions => "distributions",
            Section::Time => "time",
            Section::Severity => "severity",
            Section::Geography => "geography",
            Section::Tables => "tables",
        };
        f.write_str(name)
    }
}

/// Computed sections. Unrequested sections are `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sections {
    pub overview: Option<Overview>,
    pub distributions: Option<Distributions>,
    pub time: Option<TimeReport>,
    pub severity: Option<SeverityReport>,
    pub geography: Option<Geography>,
    pub tables: Option<Tables>,
}

/// Frequency of one categorical label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Frequency of one label together with its share of the total, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub label: String,
    pub count: u64,
    pub share: f64,
}

/// Occurrences in one calendar month, `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: String,
    pub count: u64,
}

/// One equal-width histogram bin covering `[start, end)`; the last bin is
/// closed on the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

/// Frequency of one integer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: u32,
    pub count: u64,
}

/// Units with and without victims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictimSplit {
    pub with_victims: u64,
    pub without_victims: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_serializes_snake_case() {
        let serialized = serde_json::to_string(&Section::Geography).unwrap();
        assert_eq!(serialized, "\"geography\"");
        assert_eq!(Section::Geography.to_string(), "geography");
    }

    #[test]
    fn unrequested_sections_serialize_as_null() {
        let value = serde_json::to_value(Sections::default()).unwrap();

        for section in Section::ALL {
            assert!(value[section.to_string()].is_null(), "{section}");
        }
    }
}

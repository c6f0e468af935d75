pub mod aggregate;
pub mod distributions;
pub mod geography;
pub mod model;
pub mod overview;
pub mod render;
pub mod severity;
pub mod tables;
pub mod time;

use chrono::Datelike;

use crate::dataset::Dataset;
use crate::dataset::columns::Category;
use aggregate::Granularity;
use model::{Report, Section, Sections, ToolInfo};

/// Caller-selected report options.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Sections to compute; the rest are left out of the report.
    pub sections: Vec<Section>,
    /// Categorical variable for the distributions section.
    pub variable: Category,
    pub granularity: Granularity,
    /// Upper bound of the manufacture-year histogram.
    pub current_year: i32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sections: Section::ALL.to_vec(),
            variable: Category::Municipality,
            granularity: Granularity::default(),
            current_year: chrono::Local::now().year(),
        }
    }
}

/// Compute the requested sections over an already-loaded dataset.
///
/// Every section is an independent read of the same immutable table.
pub fn build_report(dataset: &Dataset, tool: ToolInfo, options: &ReportOptions) -> Report {
    let table = &dataset.table;
    let wants = |section: Section| options.sections.contains(&section);

    let sections = Sections {
        overview: wants(Section::Overview)
            .then(|| overview::overview(table, options.granularity)),
        distributions: wants(Section::Distributions).then(|| {
            distributions::distributions(table, options.variable, options.current_year)
        }),
        time: wants(Section::Time).then(|| time::time_report(table)),
        severity: wants(Section::Severity)
            .then(|| severity::severity(table, options.granularity)),
        geography: wants(Section::Geography)
            .then(|| geography::geography(table))
            .flatten(),
        tables: wants(Section::Tables).then(|| tables::tables(table)),
    };

    Report::new(tool, dataset, options.granularity, sections)
}

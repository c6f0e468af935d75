use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dataset::AccidentTable;
use crate::dataset::columns::{self, Category};
use crate::report::aggregate::{Granularity, distinct, monthly_counts, occurrences, round2, top};
use crate::report::model::{CategoryCount, MonthCount, VictimSplit};
use crate::util::deterministic::sort_by_count_then_name;

const TOP_MUNICIPALITIES: usize = 10;

/// Headline figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub records: usize,
    /// Distinct municipalities; `None` when the column is absent.
    pub municipalities: Option<usize>,
    pub occurrences: usize,
    pub total_victims: u64,
    /// Victims per distinct occurrence, two decimals. `None` for an empty table.
    pub victims_per_occurrence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalitySummary {
    pub municipality: String,
    /// Rows recorded in the municipality.
    pub accidents: u64,
    pub victims: u64,
    pub deaths: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub kpis: Kpis,
    pub top_municipalities: Option<Vec<CategoryCount>>,
    pub monthly: Option<Vec<MonthCount>>,
    /// Row-level split on `has_victims`.
    pub victims_split: VictimSplit,
    pub municipality_summary: Option<Vec<MunicipalitySummary>>,
}

pub fn overview(table: &AccidentTable, granularity: Granularity) -> Overview {
    let occ = occurrences(table, granularity);
    let total_victims: u64 = occ.iter().map(|o| o.total_victims()).sum();
    let has_municipality = table.has_category(Category::Municipality);

    let kpis = Kpis {
        records: table.len(),
        municipalities: has_municipality
            .then(|| distinct(table.records().iter().map(|r| r.municipality()))),
        occurrences: occ.len(),
        total_victims,
        victims_per_occurrence: (!occ.is_empty())
            .then(|| round2(total_victims as f64 / occ.len() as f64)),
    };

    let with_victims = table.records().iter().filter(|r| r.has_victims()).count() as u64;
    let victims_split = VictimSplit {
        with_victims,
        without_victims: table.len() as u64 - with_victims,
    };

    let municipality_summary = has_municipality.then(|| {
        let mut by_name: HashMap<&str, MunicipalitySummary> = HashMap::new();
        for record in table.records() {
            by_name
                .entry(record.municipality())
                .or_insert_with(|| empty_summary(record.municipality()))
                .accidents += 1;
        }
        for o in &occ {
            let entry = by_name
                .entry(o.municipality.as_str())
                .or_insert_with(|| empty_summary(&o.municipality));
            entry.victims += o.total_victims();
            entry.deaths += o.deaths;
        }

        let mut rows: Vec<MunicipalitySummary> = by_name.into_values().collect();
        sort_by_count_then_name(&mut rows, |r| r.accidents, |r| r.municipality.as_str());
        rows
    });

    Overview {
        kpis,
        top_municipalities: has_municipality
            .then(|| top(table.records().iter().map(|r| r.municipality()), TOP_MUNICIPALITIES)),
        monthly: table.has_column(columns::DATE).then(|| monthly_counts(table)),
        victims_split,
        municipality_summary,
    }
}

fn empty_summary(name: &str) -> MunicipalitySummary {
    MunicipalitySummary {
        municipality: name.to_string(),
        accidents: 0,
        victims: 0,
        deaths: 0,
    }
}

use serde::{Deserialize, Serialize};

use crate::dataset::AccidentTable;
use crate::dataset::columns;
use crate::report::aggregate::{Granularity, discrete_counts, occurrences};
use crate::report::model::{ValueCount, VictimSplit};

/// Unit the severity section counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationLevel {
    /// Rows grouped by `id`.
    Occurrence,
    /// No `id` column; every row stands alone.
    Row,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDistribution {
    pub counter: String,
    pub values: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterTotal {
    pub counter: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityReport {
    pub level: AggregationLevel,
    pub units: usize,
    pub victims_split: VictimSplit,
    /// Per-unit frequency of each counter, then of `total_vitimas`.
    pub distributions: Vec<CounterDistribution>,
    pub totals: Vec<CounterTotal>,
}

const COUNTERS: [&str; 5] = [
    columns::UNINJURED,
    columns::MINOR_INJURIES,
    columns::SEVERE_INJURIES,
    columns::DEATHS,
    columns::TOTAL_VICTIMS,
];

pub fn severity(table: &AccidentTable, granularity: Granularity) -> SeverityReport {
    let occ = occurrences(table, granularity);
    let level = if table.has_column(columns::ID) {
        AggregationLevel::Occurrence
    } else {
        AggregationLevel::Row
    };

    let per_unit: Vec<[u64; 5]> = occ
        .iter()
        .map(|o| {
            let [uninjured, minor, severe, deaths] = o.severity();
            [uninjured, minor, severe, deaths, o.total_victims()]
        })
        .collect();

    let with_victims = occ.iter().filter(|o| o.has_victims()).count() as u64;

    let distributions = COUNTERS
        .iter()
        .enumerate()
        .map(|(i, counter)| CounterDistribution {
            counter: counter.to_string(),
            values: discrete_counts(per_unit.iter().map(|u| u[i])),
        })
        .collect();

    let totals = COUNTERS
        .iter()
        .enumerate()
        .map(|(i, counter)| CounterTotal {
            counter: counter.to_string(),
            total: per_unit.iter().map(|u| u[i]).sum(),
        })
        .collect();

    SeverityReport {
        level,
        units: occ.len(),
        victims_split: VictimSplit {
            with_victims,
            without_victims: occ.len() as u64 - with_victims,
        },
        distributions,
        totals,
    }
}

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::dataset::AccidentTable;
use crate::dataset::columns::{self, Category};
use crate::report::aggregate::{monthly_counts, value_counts};
use crate::report::model::{CategoryCount, MonthCount};

/// Weekday labels as written in the PRF `dia_semana` column, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
    "domingo",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u8,
    pub count: u64,
}

/// Rows per weekday (derived from the date) and hour of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heatmap {
    pub weekdays: Vec<String>,
    /// `counts[weekday][hour]`, weekday Monday first.
    pub counts: Vec<[u64; 24]>,
}

impl Heatmap {
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeReport {
    pub day_of_week: Option<Vec<CategoryCount>>,
    /// All 24 hours, including empty ones. Rows without an hour are skipped.
    pub hours: Option<Vec<HourCount>>,
    pub monthly: Option<Vec<MonthCount>>,
    pub heatmap: Option<Heatmap>,
}

pub fn time_report(table: &AccidentTable) -> TimeReport {
    let has_time = table.has_column(columns::TIME);
    let has_date = table.has_column(columns::DATE);

    let hours: Option<Vec<HourCount>> = has_time.then(|| {
        let mut counts = [0u64; 24];
        for hour in table.records().iter().filter_map(|r| r.hour()) {
            counts[usize::from(hour)] += 1;
        }
        (0u8..24)
            .zip(counts)
            .map(|(hour, count)| HourCount { hour, count })
            .collect()
    });

    let heatmap = (has_time && has_date).then(|| {
        let mut counts = vec![[0u64; 24]; WEEKDAYS.len()];
        for record in table.records() {
            if let (Some(date), Some(hour)) = (record.date, record.hour()) {
                let weekday = date.weekday().num_days_from_monday() as usize;
                counts[weekday][usize::from(hour)] += 1;
            }
        }
        Heatmap {
            weekdays: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
            counts,
        }
    });

    TimeReport {
        day_of_week: table.has_category(Category::DayOfWeek).then(|| {
            value_counts(
                table
                    .records()
                    .iter()
                    .map(|r| r.category(Category::DayOfWeek)),
            )
        }),
        hours,
        monthly: has_date.then(|| monthly_counts(table)),
        heatmap,
    }
}

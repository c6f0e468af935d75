//! Aggregation helpers shared by report sections.
//!
//! All of these are pure reads of the normalized table.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::dataset::AccidentTable;
use crate::dataset::columns;
use crate::report::model::{CategoryCount, CategoryShare, HistogramBin, MonthCount, ValueCount};
use crate::util::deterministic::sort_counts;

/// How the severity counters of rows sharing one occurrence `id` combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Each row describes one involved person; counters are summed per occurrence.
    #[default]
    PerPerson,
    /// Each row repeats the occurrence totals; the per-occurrence maximum is kept.
    PerOccurrence,
}

/// Severity counters for one occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceTotals {
    pub id: String,
    /// Municipality of the first row of the occurrence.
    pub municipality: String,
    pub rows: usize,
    pub uninjured: u64,
    pub minor_injuries: u64,
    pub severe_injuries: u64,
    pub deaths: u64,
}

impl OccurrenceTotals {
    pub fn total_victims(&self) -> u64 {
        self.minor_injuries + self.severe_injuries + self.deaths
    }

    pub fn has_victims(&self) -> bool {
        self.total_victims() > 0
    }

    pub fn severity(&self) -> [u64; 4] {
        [
            self.uninjured,
            self.minor_injuries,
            self.severe_injuries,
            self.deaths,
        ]
    }
}

/// Group rows into occurrences by `id`, in order of first appearance.
///
/// Without an `id` column, or for rows whose `id` is blank, every row is its
/// own occurrence.
pub fn occurrences(table: &AccidentTable, granularity: Granularity) -> Vec<OccurrenceTotals> {
    let keyed = table.has_column(columns::ID);
    let mut out: Vec<OccurrenceTotals> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in table.records() {
        let counters = record.severity().map(u64::from);
        let existing = if keyed && !record.id.is_empty() {
            index.get(record.id.as_str()).copied()
        } else {
            None
        };

        match existing {
            Some(i) => {
                let entry = &mut out[i];
                entry.rows += 1;
                let combine = |acc: u64, value: u64| match granularity {
                    Granularity::PerPerson => acc + value,
                    Granularity::PerOccurrence => acc.max(value),
                };
                entry.uninjured = combine(entry.uninjured, counters[0]);
                entry.minor_injuries = combine(entry.minor_injuries, counters[1]);
                entry.severe_injuries = combine(entry.severe_injuries, counters[2]);
                entry.deaths = combine(entry.deaths, counters[3]);
            }
            None => {
                if keyed && !record.id.is_empty() {
                    index.insert(record.id.as_str(), out.len());
                }
                out.push(OccurrenceTotals {
                    id: record.id.clone(),
                    municipality: record.municipality().to_string(),
                    rows: 1,
                    uninjured: counters[0],
                    minor_injuries: counters[1],
                    severe_injuries: counters[2],
                    deaths: counters[3],
                });
            }
        }
    }

    out
}

/// Label frequencies, most frequent first, ties broken by label.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(label, count)| CategoryCount::new(label, count))
        .collect();
    sort_counts(&mut out);
    out
}

/// The `n` most frequent labels.
pub fn top<'a>(values: impl IntoIterator<Item = &'a str>, n: usize) -> Vec<CategoryCount> {
    let mut counts = value_counts(values);
    counts.truncate(n);
    counts
}

/// Attach each count's percentage of the total, rounded to two decimals.
pub fn with_shares(counts: Vec<CategoryCount>) -> Vec<CategoryShare> {
    let total: u64 = counts.iter().map(|c| c.count).sum();
    counts
        .into_iter()
        .map(|c| CategoryShare {
            share: if total == 0 {
                0.0
            } else {
                round2(c.count as f64 * 100.0 / total as f64)
            },
            label: c.label,
            count: c.count,
        })
        .collect()
}

/// Rows per calendar month, chronological. Rows without a date are skipped.
pub fn monthly_counts(table: &AccidentTable) -> Vec<MonthCount> {
    let mut months: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for date in table.records().iter().filter_map(|r| r.date) {
        *months.entry((date.year(), date.month())).or_default() += 1;
    }

    months
        .into_iter()
        .map(|((year, month), count)| MonthCount {
            month: format!("{year:04}-{month:02}"),
            count,
        })
        .collect()
}

/// Equal-width histogram over `[min, max]`. Values outside the range are
/// dropped; `max` itself lands in the last bin.
pub fn histogram(values: impl IntoIterator<Item = f64>, bins: usize, min: f64, max: f64) -> Vec<HistogramBin> {
    if bins == 0 || max <= min {
        return Vec::new();
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for v in values {
        if v < min || v > max {
            continue;
        }
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Frequency of each distinct value, ascending by value.
pub fn discrete_counts(values: impl IntoIterator<Item = u64>) -> Vec<ValueCount> {
    let mut counts: BTreeMap<u64, u64> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: u32::try_from(value).unwrap_or(u32::MAX),
            count,
        })
        .collect()
}

pub fn distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> usize {
    values.into_iter().collect::<HashSet<_>>().len()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Age bands used by the distributions section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgeRange {
    Under18,
    From18To29,
    From30To39,
    From40To49,
    From50To59,
    From60,
}

impl AgeRange {
    pub const ALL: [AgeRange; 6] = [
        AgeRange::Under18,
        AgeRange::From18To29,
        AgeRange::From30To39,
        AgeRange::From40To49,
        AgeRange::From50To59,
        AgeRange::From60,
    ];

    pub fn of(age: u32) -> Self {
        match age {
            0..=17 => AgeRange::Under18,
            18..=29 => AgeRange::From18To29,
            30..=39 => AgeRange::From30To39,
            40..=49 => AgeRange::From40To49,
            50..=59 => AgeRange::From50To59,
            _ => AgeRange::From60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeRange::Under18 => "0-17",
            AgeRange::From18To29 => "18-29",
            AgeRange::From30To39 => "30-39",
            AgeRange::From40To49 => "40-49",
            AgeRange::From50To59 => "50-59",
            AgeRange::From60 => "60+",
        }
    }
}

/// Count ages per band, in band order, including empty bands.
pub fn age_ranges(ages: impl IntoIterator<Item = u32>) -> Vec<CategoryCount> {
    let mut counts = [0u64; AgeRange::ALL.len()];
    for age in ages {
        counts[AgeRange::of(age) as usize] += 1;
    }
    AgeRange::ALL
        .into_iter()
        .map(|range| CategoryCount::new(range.label(), counts[range as usize]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::table_from_csv;

    #[test]
    fn per_person_occurrences_sum_rows() {
        let table = table_from_csv(
            "id,municipio,feridos_leves,mortos\n1,FORMOSA,1,0\n2,GAMA,0,0\n1,PLANALTINA,1,1\n",
        );

        let occ = occurrences(&table, Granularity::PerPerson);

        assert_eq!(occ.len(), 2);
        assert_eq!(occ[0].id, "1");
        assert_eq!(occ[0].rows, 2);
        assert_eq!(occ[0].municipality, "FORMOSA");
        assert_eq!(occ[0].total_victims(), 3);
        assert!(!occ[1].has_victims());
    }

    #[test]
    fn per_occurrence_keeps_replicated_totals() {
        let table = table_from_csv("id,feridos_leves,mortos\n1,2,1\n1,2,1\n");

        let occ = occurrences(&table, Granularity::PerOccurrence);

        assert_eq!(occ.len(), 1);
        assert_eq!(occ[0].severity(), [0, 2, 0, 1]);
    }

    #[test]
    fn rows_without_id_are_their_own_occurrence() {
        let no_column = table_from_csv("mortos\n1\n1\n");
        assert_eq!(occurrences(&no_column, Granularity::PerPerson).len(), 2);

        let blank_ids = table_from_csv("id,mortos\n,1\n,1\n");
        assert_eq!(occurrences(&blank_ids, Granularity::PerPerson).len(), 2);
    }

    #[test]
    fn value_counts_are_sorted() {
        let counts = value_counts(["b", "a", "b", "c", "a", "b"]);

        assert_eq!(
            counts,
            vec![
                CategoryCount::new("b", 3),
                CategoryCount::new("a", 2),
                CategoryCount::new("c", 1),
            ]
        );
        assert_eq!(top(["b", "a", "b"], 1), vec![CategoryCount::new("b", 2)]);
    }

    #[test]
    fn shares_are_percentages() {
        let shares = with_shares(vec![CategoryCount::new("Céu Claro", 3), CategoryCount::new("Chuva", 1)]);

        assert_eq!(shares[0].share, 75.0);
        assert_eq!(shares[1].share, 25.0);
        assert!(with_shares(Vec::new()).is_empty());
    }

    #[test]
    fn monthly_counts_are_chronological_and_skip_null_dates() {
        let table = table_from_csv(
            "data_inversa\n2024-03-01\n2024-01-15\nnot-a-date\n2024-03-20\n2023-12-31\n",
        );

        let months = monthly_counts(&table);

        let pairs: Vec<(&str, u64)> = months.iter().map(|m| (m.month.as_str(), m.count)).collect();
        assert_eq!(pairs, vec![("2023-12", 1), ("2024-01", 1), ("2024-03", 2)]);
    }

    #[test]
    fn histogram_places_edges_in_bins() {
        let bins = histogram([0.0, 3.9, 4.0, 100.0, 101.0, -1.0], 25, 0.0, 100.0);

        assert_eq!(bins.len(), 25);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[1].count, 1);
        assert_eq!(bins[24].count, 1);
        assert_eq!(bins[24].end, 100.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 4);
    }

    #[test]
    fn degenerate_histogram_is_empty() {
        assert!(histogram([1.0], 0, 0.0, 1.0).is_empty());
        assert!(histogram([1.0], 10, 5.0, 5.0).is_empty());
    }

    #[test]
    fn discrete_counts_ascend_by_value() {
        let counts = discrete_counts([2, 0, 2, 1]);
        let pairs: Vec<(u32, u64)> = counts.iter().map(|c| (c.value, c.count)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 1), (2, 2)]);
    }

    #[test]
    fn age_ranges_cover_every_band() {
        let counts = age_ranges([5, 17, 18, 45, 60, 99]);

        let pairs: Vec<(&str, u64)> = counts.iter().map(|c| (c.label.as_str(), c.count)).collect();
        assert_eq!(
            pairs,
            vec![
                ("0-17", 2),
                ("18-29", 1),
                ("30-39", 0),
                ("40-49", 1),
                ("50-59", 0),
                ("60+", 2),
            ]
        );
    }

    #[test]
    fn distinct_counts_unique_labels() {
        assert_eq!(distinct(["GAMA", "GAMA", "FORMOSA"]), 2);
        assert_eq!(round2(2.0 / 3.0), 0.67);
    }
}

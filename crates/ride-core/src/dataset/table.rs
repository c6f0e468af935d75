use log::debug;

use super::coerce::{
    TimeFormat, parse_age, parse_coordinate, parse_count, parse_date, parse_time_column,
    parse_year,
};
use super::columns::{self, Category};
use super::labels::relabel;
use super::record::AccidentRecord;
use crate::source::parse::RawTable;

/// The canonical, read-only accident table.
///
/// Built once by [`normalize`]; nothing hands out mutable access afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccidentTable {
    records: Vec<AccidentRecord>,
    present: Vec<String>,
    passthrough_headers: Vec<String>,
    time_format: Option<TimeFormat>,
}

impl AccidentTable {
    pub fn records(&self) -> &[AccidentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a recognized column was present in the source header.
    ///
    /// Severity counters are always available (synthesized as zero), but this
    /// still reports whether the source carried them.
    pub fn has_column(&self, name: &str) -> bool {
        self.present.iter().any(|c| c == name)
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.has_column(category.column())
    }

    /// Recognized columns present in the source, in canonical order.
    pub fn present_columns(&self) -> &[String] {
        &self.present
    }

    /// Recognized columns missing from the source, in canonical order.
    pub fn absent_columns(&self) -> Vec<&'static str> {
        columns::RECOGNIZED
            .into_iter()
            .filter(|c| !self.has_column(c))
            .collect()
    }

    pub fn passthrough_headers(&self) -> &[String] {
        &self.passthrough_headers
    }

    /// Layout used for the time-of-day column, if any cell parsed.
    pub fn time_format(&self) -> Option<TimeFormat> {
        self.time_format
    }
}

/// Normalize a raw table into the canonical [`AccidentTable`].
///
/// Single pass, total: malformed cells degrade to `None` (dates, times,
/// coordinates, age, year) or `0` (severity counters). Absent recognized
/// columns are defaulted the same way.
pub fn normalize(raw: &RawTable) -> AccidentTable {
    let row_count = raw.row_count();
    let index = |name: &str| raw.column_index(name);

    let present: Vec<String> = columns::RECOGNIZED
        .into_iter()
        .filter(|c| raw.has_column(c))
        .map(str::to_string)
        .collect();

    let passthrough_idx: Vec<usize> = raw
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !columns::is_recognized(h))
        .map(|(i, _)| i)
        .collect();
    let passthrough_headers = passthrough_idx
        .iter()
        .map(|&i| raw.headers[i].clone())
        .collect();

    let (times, time_format) = match raw.column(columns::TIME) {
        Some(cells) => parse_time_column(&cells),
        None => (vec![None; row_count], None),
    };
    debug!("time column parsed with format {time_format:?}");

    let id_idx = index(columns::ID);
    let date_idx = index(columns::DATE);
    let lat_idx = index(columns::LATITUDE);
    let lon_idx = index(columns::LONGITUDE);
    let severity_idx = columns::SEVERITY.map(index);
    let age_idx = index(columns::AGE);
    let year_idx = index(columns::MANUFACTURE_YEAR);
    let category_idx = Category::ALL.map(|c| index(c.column()));

    let records = raw
        .rows
        .iter()
        .zip(times)
        .map(|(row, time)| {
            let cell = |idx: Option<usize>| idx.map_or("", |i| row[i].as_str());
            let [uninjured, minor_injuries, severe_injuries, deaths] =
                severity_idx.map(|idx| parse_count(cell(idx)));

            AccidentRecord {
                id: cell(id_idx).trim().to_string(),
                date: parse_date(cell(date_idx)),
                time,
                latitude: parse_coordinate(cell(lat_idx)),
                longitude: parse_coordinate(cell(lon_idx)),
                uninjured,
                minor_injuries,
                severe_injuries,
                deaths,
                age: parse_age(cell(age_idx)),
                manufacture_year: parse_year(cell(year_idx)),
                categories: Category::ALL.map(|c| relabel(c, cell(category_idx[c as usize]))),
                passthrough: passthrough_idx.iter().map(|&i| row[i].clone()).collect(),
            }
        })
        .collect();

    AccidentTable {
        records,
        present,
        passthrough_headers,
        time_format,
    }
}

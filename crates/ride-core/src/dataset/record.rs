use chrono::{NaiveDate, NaiveTime};

use super::coerce::hour_of;
use super::columns::Category;

/// One normalized row: a single involved party of one occurrence.
///
/// Victim totals are computed from the four counters on every call and are
/// never stored, so they cannot disagree with them.
#[derive(Debug, Clone, PartialEq)]
pub struct AccidentRecord {
    /// Occurrence identifier. Several rows may share it.
    pub id: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub uninjured: u32,
    pub minor_injuries: u32,
    pub severe_injuries: u32,
    pub deaths: u32,

    pub age: Option<u32>,
    pub manufacture_year: Option<i32>,

    /// Relabeled values, indexed by `Category as usize`.
    pub(crate) categories: [String; Category::COUNT],

    /// Unrecognized cells, aligned with `AccidentTable::passthrough_headers`.
    pub(crate) passthrough: Vec<String>,
}

impl AccidentRecord {
    /// Hour of day, 0–23.
    pub fn hour(&self) -> Option<u8> {
        hour_of(self.time)
    }

    pub fn municipality(&self) -> &str {
        self.category(Category::Municipality)
    }

    pub fn category(&self, category: Category) -> &str {
        &self.categories[category as usize]
    }

    pub fn passthrough(&self) -> &[String] {
        &self.passthrough
    }

    /// Injured (minor or severe) plus dead. Uninjured parties are not victims.
    ///
    /// Summed in `u64`; each counter alone may reach `u32::MAX`.
    pub fn total_victims(&self) -> u64 {
        u64::from(self.minor_injuries) + u64::from(self.severe_injuries) + u64::from(self.deaths)
    }

    pub fn has_victims(&self) -> bool {
        self.total_victims() > 0
    }

    /// Counters in `[uninjured, minor, severe, deaths]` order.
    pub fn severity(&self) -> [u32; 4] {
        [
            self.uninjured,
            self.minor_injuries,
            self.severe_injuries,
            self.deaths,
        ]
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

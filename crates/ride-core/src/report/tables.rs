use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dataset::AccidentTable;
use crate::dataset::columns::Category;
use crate::report::aggregate::value_counts;
use crate::report::model::CategoryCount;
use crate::util::deterministic::sort_by_count_then_name;

/// Row-level municipality table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalityRow {
    pub municipality: String,
    pub accidents: u64,
    /// Rows whose `has_victims` flag is set.
    pub with_victims: u64,
    pub deaths: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    pub municipalities: Option<Vec<MunicipalityRow>>,
    pub accident_types: Option<Vec<CategoryCount>>,
}

pub fn tables(table: &AccidentTable) -> Tables {
    let municipalities = table.has_category(Category::Municipality).then(|| {
        let mut by_name: HashMap<&str, MunicipalityRow> = HashMap::new();
        for record in table.records() {
            let row = by_name
                .entry(record.municipality())
                .or_insert_with(|| MunicipalityRow {
                    municipality: record.municipality().to_string(),
                    accidents: 0,
                    with_victims: 0,
                    deaths: 0,
                });
            row.accidents += 1;
            row.with_victims += u64::from(record.has_victims());
            row.deaths += u64::from(record.deaths);
        }

        let mut rows: Vec<MunicipalityRow> = by_name.into_values().collect();
        sort_by_count_then_name(&mut rows, |r| r.accidents, |r| r.municipality.as_str());
        rows
    });

    Tables {
        municipalities,
        accident_types: table.has_category(Category::AccidentType).then(|| {
            value_counts(
                table
                    .records()
                    .iter()
                    .map(|r| r.category(Category::AccidentType)),
            )
        }),
    }
}

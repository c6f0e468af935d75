use serde::{Deserialize, Serialize};

use crate::dataset::AccidentTable;
use crate::dataset::columns::{self, Category};
use crate::report::aggregate::{age_ranges, histogram, top, value_counts, with_shares};
use crate::report::model::{CategoryCount, CategoryShare, HistogramBin};

const VARIABLE_LIMIT: usize = 20;
const TOP_VEHICLE_TYPES: usize = 15;
const TOP_ACCIDENT_TYPES: usize = 10;
const TOP_BRANDS: usize = 10;

const AGE_BINS: usize = 25;
const AGE_MAX: u32 = 100;

const YEAR_BINS: usize = 30;
const YEAR_MIN: i32 = 1970;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distributions {
    /// The categorical variable chosen by the caller.
    pub variable: Category,
    pub variable_counts: Option<Vec<CategoryCount>>,
    /// Ages 0–100.
    pub age_histogram: Option<Vec<HistogramBin>>,
    pub age_ranges: Option<Vec<CategoryCount>>,
    /// Manufacture years from 1970 up to the reference year.
    pub manufacture_years: Option<Vec<HistogramBin>>,
    pub vehicle_types: Option<Vec<CategoryCount>>,
    pub accident_types: Option<Vec<CategoryCount>>,
    pub weather: Option<Vec<CategoryShare>>,
    pub brands: Option<Vec<CategoryCount>>,
}

fn labels(table: &AccidentTable, category: Category) -> impl Iterator<Item = &str> {
    table.records().iter().map(move |r| r.category(category))
}

fn top_of(table: &AccidentTable, category: Category, n: usize) -> Option<Vec<CategoryCount>> {
    table
        .has_category(category)
        .then(|| top(labels(table, category), n))
}

/// `current_year` bounds the manufacture-year histogram.
pub fn distributions(table: &AccidentTable, variable: Category, current_year: i32) -> Distributions {
    let has_age = table.has_column(columns::AGE);
    let ages = || {
        table
            .records()
            .iter()
            .filter_map(|r| r.age)
            .filter(|age| *age <= AGE_MAX)
    };

    let manufacture_years = (table.has_column(columns::MANUFACTURE_YEAR) && current_year > YEAR_MIN)
        .then(|| {
            let years = table
                .records()
                .iter()
                .filter_map(|r| r.manufacture_year)
                .map(f64::from);
            histogram(years, YEAR_BINS, f64::from(YEAR_MIN), f64::from(current_year))
        });

    Distributions {
        variable,
        variable_counts: top_of(table, variable, VARIABLE_LIMIT),
        age_histogram: has_age
            .then(|| histogram(ages().map(f64::from), AGE_BINS, 0.0, f64::from(AGE_MAX))),
        age_ranges: has_age.then(|| age_ranges(ages())),
        manufacture_years,
        vehicle_types: top_of(table, Category::VehicleType, TOP_VEHICLE_TYPES),
        accident_types: top_of(table, Category::AccidentType, TOP_ACCIDENT_TYPES),
        weather: table
            .has_category(Category::Weather)
            .then(|| with_shares(value_counts(labels(table, Category::Weather)))),
        brands: top_of(table, Category::Brand, TOP_BRANDS),
    }
}

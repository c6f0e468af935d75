use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ride_core::dataset::columns::Category;
use ride_core::report::aggregate::Granularity;
use ride_core::report::model::Section;

#[derive(Debug, Parser)]
#[command(
    name = "ride-eda",
    version,
    about = "Exploratory analysis of PRF highway accident records for the RIDE-DF region"
)]
pub struct Args {
    /// Path to the accident CSV
    #[arg(default_value = "data/acidentes_ride.csv")]
    pub source: PathBuf,

    /// Report section to compute; repeat for several (default: all)
    #[arg(long = "section", value_enum)]
    pub sections: Vec<SectionArg>,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Field delimiter of the source file.
    ///
    /// Numbers must use a decimal point: with `;` exports that write
    /// coordinates as `-15,79`, those cells are read as missing and the
    /// points drop out of the geography section.
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Categorical column summarized by the distributions section
    #[arg(long, default_value = "municipio", value_parser = parse_variable)]
    pub variable: Category,

    /// How rows sharing an occurrence id combine their victim counters
    #[arg(long, value_enum, default_value = "per-person")]
    pub granularity: GranularityArg,

    /// Also write the normalized table to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SectionArg {
    Overview,
    Distributions,
    Time,
    Severity,
    Geography,
    Tables,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Overview => Section::Overview,
            SectionArg::Distributions => Section::Distributions,
            SectionArg::Time => Section::Time,
            SectionArg::Severity => Section::Severity,
            SectionArg::Geography => Section::Geography,
            SectionArg::Tables => Section::Tables,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GranularityArg {
    /// One row per involved person
    PerPerson,
    /// Every row repeats its occurrence's totals
    PerOccurrence,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::PerPerson => Granularity::PerPerson,
            GranularityArg::PerOccurrence => Granularity::PerOccurrence,
        }
    }
}

impl Args {
    /// Requested sections, or all of them when none was given.
    pub fn selected_sections(&self) -> Vec<Section> {
        if self.sections.is_empty() {
            return Section::ALL.to_vec();
        }
        let mut sections: Vec<Section> = self.sections.iter().map(|&s| s.into()).collect();
        sections.sort();
        sections.dedup();
        sections
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err("delimiter must be a single ASCII character".to_string()),
    }
}

fn parse_variable(value: &str) -> Result<Category, String> {
    Category::from_column(value)
        .filter(|c| Category::DISTRIBUTABLE.contains(c))
        .ok_or_else(|| {
            let allowed: Vec<&str> = Category::DISTRIBUTABLE.iter().map(|c| c.column()).collect();
            format!("expected one of: {}", allowed.join(", "))
        })
}

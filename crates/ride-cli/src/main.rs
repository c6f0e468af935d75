use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ride_core::TOOL_NAME;
use ride_core::dataset::export::write_normalized_csv;
use ride_core::report::model::ToolInfo;
use ride_core::report::{ReportOptions, build_report, render};
use ride_core::source::parse::ParseConfig;

mod args;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = args::Args::parse();

    let tool = ToolInfo {
        name: TOOL_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let parse = ParseConfig {
        delimiter: args.delimiter,
    };
    let dataset = ride_core::load(&args.source, &parse)?;

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("failed to create export file {}", path.display()))?;
        write_normalized_csv(&dataset.table, BufWriter::new(file))?;
        info!("wrote normalized table to {}", path.display());
    }

    let options = ReportOptions {
        sections: args.selected_sections(),
        variable: args.variable,
        granularity: args.granularity.into(),
        ..ReportOptions::default()
    };
    let report = build_report(&dataset, tool, &options);

    let output = match args.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        args::OutputFormat::Text => render::render_text(&report),
    };

    match args.out {
        Some(path) => std::fs::write(&path, &output)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => print!("{output}"),
    }

    Ok(())
}

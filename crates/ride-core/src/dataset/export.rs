use std::io::Write;

use anyhow::{Context, Result};

use super::columns::{self, Category};
use super::record::AccidentRecord;
use super::table::AccidentTable;

/// Columns written for a table: the recognized columns the source carried
/// (plus the severity counters, which always exist after normalization),
/// then the derived victim columns.
fn export_columns(table: &AccidentTable) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = columns::RECOGNIZED
        .into_iter()
        .filter(|c| table.has_column(c) || columns::SEVERITY.contains(c))
        .collect();
    out.push(columns::TOTAL_VICTIMS);
    out.push(columns::HAS_VICTIMS);
    out
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn cell(record: &AccidentRecord, column: &str) -> String {
    if let Some(category) = Category::from_column(column) {
        return record.category(category).to_string();
    }

    match column {
        columns::ID => record.id.clone(),
        columns::DATE => optional(record.date.map(|d| d.format("%Y-%m-%d"))),
        columns::TIME => optional(record.time.map(|t| t.format("%H:%M:%S"))),
        columns::LATITUDE => optional(record.latitude),
        columns::LONGITUDE => optional(record.longitude),
        columns::UNINJURED => record.uninjured.to_string(),
        columns::MINOR_INJURIES => record.minor_injuries.to_string(),
        columns::SEVERE_INJURIES => record.severe_injuries.to_string(),
        columns::DEATHS => record.deaths.to_string(),
        columns::AGE => optional(record.age),
        columns::MANUFACTURE_YEAR => optional(record.manufacture_year),
        columns::TOTAL_VICTIMS => record.total_victims().to_string(),
        columns::HAS_VICTIMS => u8::from(record.has_victims()).to_string(),
        _ => String::new(),
    }
}

/// Write the normalized table as CSV, in source-shaped columns.
///
/// Feeding the output back through normalization reproduces the same
/// counters and derived values.
pub fn write_normalized_csv<W: Write>(table: &AccidentTable, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    let recognized = export_columns(table);

    let header = recognized
        .iter()
        .copied()
        .chain(table.passthrough_headers().iter().map(String::as_str));
    out.write_record(header)
        .context("failed to write normalized header")?;

    for record in table.records() {
        let row = recognized
            .iter()
            .map(|c| cell(record, c))
            .chain(record.passthrough().iter().cloned());
        out.write_record(row)
            .with_context(|| format!("failed to write row for occurrence {}", record.id))?;
    }

    out.flush().context("failed to flush normalized CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::table_from_csv;

    fn export(table: &AccidentTable) -> String {
        let mut buf = Vec::new();
        write_normalized_csv(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_source_shaped_columns_with_derived_values() {
        let table = table_from_csv("id,horario,mortos,feridos_leves,br\n7,08:30,1,,020\n");
        let csv = export(&table);
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "id,horario,ilesos,feridos_leves,feridos_graves,mortos,total_vitimas,tem_vitimas,br"
        );
        assert_eq!(lines.next().unwrap(), "7,08:30:00,0,0,0,1,1,1,020");
    }

    #[test]
    fn renormalizing_the_export_is_idempotent() {
        let source = "id,data_inversa,latitude,mortos,feridos_leves,feridos_graves,tipo_veiculo\n\
                      1,2024-01-02,-15.8,2,,1,Automóvel\n\
                      1,bad,N/A,,3,,0\n\
                      2,2024-02-03,-16.0,0,0,0,Motocicleta\n";
        let first = table_from_csv(source);
        let second = table_from_csv(&export(&first));

        let derived = |t: &AccidentTable| -> Vec<(u64, bool)> {
            t.records()
                .iter()
                .map(|r| (r.total_victims(), r.has_victims()))
                .collect()
        };

        assert_eq!(derived(&first), derived(&second));
        assert_eq!(first.records(), second.records());
    }
}

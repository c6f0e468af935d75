use csv::{ByteRecord, ReaderBuilder};

use crate::error::LoadError;

/// Parsing-time configuration for the delimited source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseConfig {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Header plus string rows, before any type coercion.
///
/// Every row has exactly `headers.len()` cells: short rows are padded with
/// empty cells and long rows are truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Index of a column by exact (trimmed) header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of one column, top to bottom. `None` when the column is absent.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Parse delimited bytes into a [`RawTable`].
///
/// Cells are decoded lossily so that one badly encoded cell cannot abort
/// the whole load. A source with no header line yields an empty
/// `headers` vector; deciding whether that is fatal is the caller's job.
pub fn parse_table(bytes: &[u8], config: &ParseConfig) -> Result<RawTable, LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| decode(h).trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Ok(RawTable::default());
    }

    let width = headers.len();
    let mut rows = Vec::new();
    let mut record = ByteRecord::new();

    while reader.read_byte_record(&mut record)? {
        let mut row: Vec<String> = record.iter().take(width).map(decode).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

fn decode(cell: &[u8]) -> String {
    String::from_utf8_lossy(cell).into_owned()
}

use std::io::{Read, Write};
use std::path::Path;

use crate::error::{CraftError, Result};
use crate::table::KeyedTable;

/// Parse a single cell. Empty cells mean "no data" and load as `NaN`.
fn parse_cell(raw: &str, row: &str, column: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse().map_err(|_| {
        CraftError::InvalidInput(format!(
            "cell '{}' / '{}' is not a number: '{}'",
            row, column, raw
        ))
    })
}

/// Read a table from any reader.
///
/// The first record is the header (`"", col1, col2, ...`); every following
/// record is `row_label, v1, v2, ...`.
pub fn read_table_from<R: Read>(reader: R) -> Result<KeyedTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut records = rdr.records();
    let header = match records.next() {
        Some(record) => record?,
        None => return Ok(KeyedTable::new()),
    };
    let columns: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

    let mut rows = Vec::new();
    let mut data = Vec::new();
    for record in records {
        let record = record?;
        let label = record.get(0).unwrap_or_default().to_string();
        let values = record
            .iter()
            .skip(1)
            .zip(&columns)
            .map(|(raw, column)| parse_cell(raw, &label, column))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(label);
        data.push(values);
    }

    KeyedTable::from_parts(rows, columns, data)
}

/// Write a table to any writer using the same layout [`read_table_from`] expects.
pub fn write_table_to<W: Write>(table: &KeyedTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![String::new()];
    header.extend(table.columns().iter().cloned());
    wtr.write_record(&header)?;

    for row in table.iter_rows() {
        let mut record = vec![row.label().to_string()];
        record.extend(row.iter().map(|(_, v)| v.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Load a table from a CSV file.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<KeyedTable> {
    let file = std::fs::File::open(path.as_ref())?;
    let table = read_table_from(file)?;
    log::debug!(
        "Loaded {} x {} table from {}",
        table.rows().len(),
        table.columns().len(),
        path.as_ref().display()
    );
    Ok(table)
}

/// Save a table to a CSV file.
pub fn write_table<P: AsRef<Path>>(path: P, table: &KeyedTable) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_table_to(table, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_layout() {
        let csv = ",wood,ore\n4.0,2,3\n4.1,5,\n";
        let table = read_table_from(csv.as_bytes()).unwrap();

        assert_eq!(table.columns(), ["wood", "ore"]);
        assert_eq!(table.rows(), ["4.0", "4.1"]);
        assert_eq!(table.get_cell("4.0", "ore"), Some(3.0));
        assert!(table.get_cell("4.1", "ore").unwrap().is_nan());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let csv = ",wood,ore\n4.0,2,3\n4.1,5\n";
        assert!(read_table_from(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_empty_input_is_empty_table() {
        let table = read_table_from("".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn test_bad_number_rejected() {
        let csv = ",wood\n4.0,cheap\n";
        assert!(matches!(
            read_table_from(csv.as_bytes()),
            Err(CraftError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_file_roundtrip() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b",head,body\n4.0,100.5,200\n8.3,0.1,NaN\n")
            .unwrap();

        let table = read_table(file.path()).unwrap();

        let out = NamedTempFile::new().unwrap();
        write_table(out.path(), &table).unwrap();
        let reloaded = read_table(out.path()).unwrap();

        assert_eq!(reloaded.rows(), table.rows());
        assert_eq!(reloaded.columns(), table.columns());
        assert_eq!(reloaded.get_cell("4.0", "head"), Some(100.5));
        assert_eq!(reloaded.get_cell("8.3", "head"), Some(0.1));
        assert!(reloaded.get_cell("8.3", "body").unwrap().is_nan());
    }
}

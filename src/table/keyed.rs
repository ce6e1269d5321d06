use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{CraftError, Result};

/// Two-dimensional numeric table addressed by row and column labels.
///
/// Labels are unique on both axes and the matrix is always
/// `rows.len() x columns.len()`. Values are stored row-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyedTable {
    rows: Vec<String>,
    columns: Vec<String>,
    row_index: HashMap<String, usize>,
    column_index: HashMap<String, usize>,
    data: Vec<Vec<f64>>,
}

/// Which axis a [`Line`] runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Row,
    Column,
}

/// Borrowed view of a single row or column, keyed by the opposite axis.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    table: &'a KeyedTable,
    axis: Axis,
    idx: usize,
}

impl<'a> Line<'a> {
    /// Label of this row or column.
    pub fn label(&self) -> &'a str {
        match self.axis {
            Axis::Row => &self.table.rows[self.idx],
            Axis::Column => &self.table.columns[self.idx],
        }
    }

    /// Value stored under `key` on the opposite axis.
    pub fn get(&self, key: &str) -> Option<f64> {
        match self.axis {
            Axis::Row => {
                let col = *self.table.column_index.get(key)?;
                Some(self.table.data[self.idx][col])
            }
            Axis::Column => {
                let row = *self.table.row_index.get(key)?;
                Some(self.table.data[row][self.idx])
            }
        }
    }

    /// Like [`Line::get`], but a `NaN` cell also counts as missing.
    pub fn get_value(&self, key: &str) -> Option<f64> {
        self.get(key).filter(|v| !v.is_nan())
    }

    /// Iterate `(key, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        let table = self.table;
        let idx = self.idx;
        let keys = match self.axis {
            Axis::Row => &table.columns,
            Axis::Column => &table.rows,
        };
        let axis = self.axis;
        keys.iter().enumerate().map(move |(i, key)| {
            let value = match axis {
                Axis::Row => table.data[idx][i],
                Axis::Column => table.data[i][idx],
            };
            (key.as_str(), value)
        })
    }

    /// Copy the line into an owned map.
    pub fn to_map(&self) -> HashMap<String, f64> {
        self.iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

fn index_labels(labels: &[String], axis: &str) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if index.insert(label.clone(), i).is_some() {
            return Err(CraftError::Schema(format!("duplicate {} label '{}'", axis, label)));
        }
    }
    Ok(index)
}

/// Check that `keys` is exactly the label set described by `index`.
fn check_keys(
    keys: &HashMap<String, f64>,
    index: &HashMap<String, usize>,
    axis: &str,
    label: &str,
) -> Result<()> {
    if keys.len() != index.len() || keys.keys().any(|k| !index.contains_key(k)) {
        let mut missing: Vec<&str> = index
            .keys()
            .filter(|k| !keys.contains_key(*k))
            .map(String::as_str)
            .collect();
        let mut extra: Vec<&str> = keys
            .keys()
            .filter(|k| !index.contains_key(*k))
            .map(String::as_str)
            .collect();
        missing.sort_unstable();
        extra.sort_unstable();
        return Err(CraftError::Schema(format!(
            "'{}' does not match the table's {} labels (missing: [{}], unexpected: [{}])",
            label,
            axis,
            missing.join(", "),
            extra.join(", ")
        )));
    }
    Ok(())
}

impl KeyedTable {
    /// Create an empty table with no rows and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from labels and a row-major matrix.
    pub fn from_parts(rows: Vec<String>, columns: Vec<String>, data: Vec<Vec<f64>>) -> Result<Self> {
        if data.len() != rows.len() || data.iter().any(|r| r.len() != columns.len()) {
            return Err(CraftError::Schema(format!(
                "matrix does not match {} rows x {} columns",
                rows.len(),
                columns.len()
            )));
        }
        let row_index = index_labels(&rows, "row")?;
        let column_index = index_labels(&columns, "column")?;
        Ok(Self {
            rows,
            columns,
            row_index,
            column_index,
            data,
        })
    }

    /// Create a table with the given row labels and no columns yet.
    pub fn with_rows<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<String> = rows.into_iter().map(Into::into).collect();
        let data = vec![Vec::new(); rows.len()];
        Self::from_parts(rows, Vec::new(), data)
    }

    /// Create a table with the given column labels and no rows yet.
    pub fn with_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        Self::from_parts(Vec::new(), columns, Vec::new())
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get_row(&self, label: &str) -> Option<Line<'_>> {
        let idx = *self.row_index.get(label)?;
        Some(Line {
            table: self,
            axis: Axis::Row,
            idx,
        })
    }

    pub fn get_column(&self, label: &str) -> Option<Line<'_>> {
        let idx = *self.column_index.get(label)?;
        Some(Line {
            table: self,
            axis: Axis::Column,
            idx,
        })
    }

    /// Cell lookup. `None` means an unknown label; a stored `NaN` is returned as is.
    pub fn get_cell(&self, row: &str, column: &str) -> Option<f64> {
        let r = *self.row_index.get(row)?;
        let c = *self.column_index.get(column)?;
        Some(self.data[r][c])
    }

    /// Overwrite an existing cell.
    pub fn set_cell(&mut self, row: &str, column: &str, value: f64) -> Result<()> {
        let r = *self
            .row_index
            .get(row)
            .ok_or_else(|| CraftError::Schema(format!("unknown row '{}'", row)))?;
        let c = *self
            .column_index
            .get(column)
            .ok_or_else(|| CraftError::Schema(format!("unknown column '{}'", column)))?;
        self.data[r][c] = value;
        Ok(())
    }

    /// Iterate all rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = Line<'_>> {
        (0..self.rows.len()).map(move |idx| Line {
            table: self,
            axis: Axis::Row,
            idx,
        })
    }

    /// Append a column. The value keys must be exactly the current row labels.
    pub fn add_column(&mut self, label: &str, values: &HashMap<String, f64>) -> Result<()> {
        if self.column_index.contains_key(label) {
            return Err(CraftError::Schema(format!("column '{}' already exists", label)));
        }
        check_keys(values, &self.row_index, "row", label)?;

        for (row, cells) in self.rows.iter().zip(self.data.iter_mut()) {
            cells.push(values[row]);
        }
        self.column_index.insert(label.to_string(), self.columns.len());
        self.columns.push(label.to_string());
        Ok(())
    }

    /// Append a row. The value keys must be exactly the current column labels.
    pub fn add_row(&mut self, label: &str, values: &HashMap<String, f64>) -> Result<()> {
        if self.row_index.contains_key(label) {
            return Err(CraftError::Schema(format!("row '{}' already exists", label)));
        }
        check_keys(values, &self.column_index, "column", label)?;

        let cells = self.columns.iter().map(|c| values[c]).collect();
        self.data.push(cells);
        self.row_index.insert(label.to_string(), self.rows.len());
        self.rows.push(label.to_string());
        Ok(())
    }

    /// Keep only the rows for which `keep` returns true, preserving order.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(Line<'_>) -> bool,
    {
        let mask: Vec<bool> = self.iter_rows().map(&mut keep).collect();
        self.apply_order(
            mask.iter()
                .enumerate()
                .filter(|(_, k)| **k)
                .map(|(i, _)| i)
                .collect(),
        );
    }

    /// Stable sort of rows by a column. `NaN` cells always sort last.
    pub fn sort_rows_by_column(&mut self, column: &str, descending: bool) -> Result<()> {
        let c = *self
            .column_index
            .get(column)
            .ok_or_else(|| CraftError::Schema(format!("unknown column '{}'", column)))?;

        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| {
            let (x, y) = (self.data[a][c], self.data[b][c]);
            match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
                    if descending { ord.reverse() } else { ord }
                }
            }
        });
        self.apply_order(order);
        Ok(())
    }

    /// Keep at most the first `n` rows.
    pub fn truncate_rows(&mut self, n: usize) {
        if n < self.rows.len() {
            self.apply_order((0..n).collect());
        }
    }

    /// Rebuild rows from the given indices into the current row list.
    fn apply_order(&mut self, order: Vec<usize>) {
        let rows: Vec<String> = order.iter().map(|&i| self.rows[i].clone()).collect();
        let data: Vec<Vec<f64>> = order.iter().map(|&i| self.data[i].clone()).collect();
        self.row_index = rows.iter().cloned().enumerate().map(|(i, r)| (r, i)).collect();
        self.rows = rows;
        self.data = data;
    }
}

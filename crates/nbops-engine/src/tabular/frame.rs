use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use nbops_core::errors::StorageError;
use nbops_core::models::Record;

use super::Cell;

/// Column-named rows of [`Cell`]s. Every row has exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Frame {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Build a frame from records. Columns are the union of record keys in
    /// first-seen order; absent keys become [`Cell::Null`].
    pub fn from_records(records: &[Record]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for record in records {
            for key in record.keys() {
                if !index.contains_key(key) {
                    index.insert(key.clone(), columns.len());
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                let mut row = vec![Cell::Null; columns.len()];
                for (key, value) in record {
                    if let Some(&i) = index.get(key) {
                        row[i] = Cell::from(value);
                    }
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[i]).collect())
    }

    /// Stack frames vertically. Columns are unioned in first-seen order and
    /// cells missing from a frame are null.
    pub fn concat(frames: impl IntoIterator<Item = Frame>) -> Frame {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let frames: Vec<Frame> = frames.into_iter().collect();
        for frame in &frames {
            for column in &frame.columns {
                if !index.contains_key(column) {
                    index.insert(column.clone(), columns.len());
                    columns.push(column.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(frames.iter().map(Frame::n_rows).sum());
        for frame in frames {
            let positions: Vec<usize> = frame.columns.iter().map(|c| index[c]).collect();
            for row in frame.rows {
                let mut out = vec![Cell::Null; columns.len()];
                for (cell, &pos) in row.into_iter().zip(&positions) {
                    out[pos] = cell;
                }
                rows.push(out);
            }
        }

        Frame { columns, rows }
    }

    /// Parse CSV with a header row. `path` only labels errors.
    pub fn from_csv_reader<R: Read>(reader: R, path: &Path) -> Result<Frame, StorageError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let columns: Vec<String> = rdr
            .headers()
            .map_err(|e| StorageError::csv(path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| StorageError::csv(path, e))?;
            rows.push(record.iter().map(Cell::parse).collect());
        }
        Ok(Frame::new(columns, rows))
    }

    pub fn read_csv(path: &Path) -> Result<Frame, StorageError> {
        let file = std::fs::File::open(path).map_err(|e| StorageError::io(path, e))?;
        Self::from_csv_reader(std::io::BufReader::new(file), path)
    }

    /// Render as CSV bytes. `path` only labels errors.
    pub fn to_csv_bytes(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        if !self.columns.is_empty() {
            wtr.write_record(&self.columns)
                .map_err(|e| StorageError::csv(path, e))?;
        }
        for row in &self.rows {
            if row.is_empty() {
                continue;
            }
            wtr.write_record(row.iter().map(Cell::to_field))
                .map_err(|e| StorageError::csv(path, e))?;
        }
        wtr.into_inner().map_err(|e| StorageError::csv(path, e))
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), StorageError> {
        let bytes = self.to_csv_bytes(path)?;
        std::fs::write(path, bytes).map_err(|e| StorageError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn columns_follow_first_seen_order() {
        let frame = Frame::from_records(&[
            record(json!({"age": 30, "tenure": 5})),
            record(json!({"plan": "basic", "age": 41})),
        ]);
        assert_eq!(frame.columns(), ["age", "tenure", "plan"]);
        assert_eq!(frame.rows()[1], vec![Cell::Integer(41), Cell::Null, Cell::Text("basic".into())]);
    }

    #[test]
    fn csv_bytes_for_single_record() {
        let frame = Frame::from_records(&[record(json!({"age": 30, "tenure": 5}))]);
        let bytes = frame.to_csv_bytes(Path::new("mem.csv")).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "age,tenure\n30,5\n");
    }

    #[test]
    fn mixed_records_survive_csv() {
        let frame = Frame::from_records(&[
            record(json!({"age": 30, "plan": "monthly, promo", "active": true})),
            record(json!({"age": 52.5, "active": false, "notes": null})),
        ]);
        let bytes = frame.to_csv_bytes(Path::new("mem.csv")).unwrap();
        let back = Frame::from_csv_reader(&bytes[..], Path::new("mem.csv")).unwrap();

        assert_eq!(back.columns(), frame.columns());
        assert_eq!(back.column("plan").unwrap()[0], &Cell::Text("monthly, promo".into()));
        assert_eq!(back.column("age").unwrap()[1], &Cell::Number(52.5));
        assert_eq!(back.column("active").unwrap()[1], &Cell::Bool(false));
        assert!(back.column("notes").unwrap()[1].is_null());
    }

    #[test]
    fn integers_beyond_f64_precision_survive_csv() {
        let frame = Frame::from_records(&[record(json!({"customer_id": 9_007_199_254_740_993u64, "age": 30}))]);
        let bytes = frame.to_csv_bytes(Path::new("mem.csv")).unwrap();
        assert_eq!(String::from_utf8(bytes.clone()).unwrap(), "customer_id,age\n9007199254740993,30\n");

        let back = Frame::from_csv_reader(&bytes[..], Path::new("mem.csv")).unwrap();
        assert_eq!(back, frame);
        assert_eq!(back.column("customer_id").unwrap()[0], &Cell::Integer(9_007_199_254_740_993));
    }

    #[test]
    fn concat_unions_columns() {
        let a = Frame::new(vec!["x".into(), "y".into()], vec![vec![Cell::Number(1.0), Cell::Number(2.0)]]);
        let b = Frame::new(vec!["y".into(), "z".into()], vec![vec![Cell::Number(3.0), Cell::Text("k".into())]]);
        let all = Frame::concat(vec![a, b]);

        assert_eq!(all.columns(), ["x", "y", "z"]);
        assert_eq!(all.n_rows(), 2);
        assert_eq!(all.rows()[1], vec![Cell::Null, Cell::Number(3.0), Cell::Text("k".into())]);
    }

    #[test]
    fn short_rows_are_padded() {
        let frame = Frame::from_csv_reader(&b"a,b,c\n1,2\n"[..], Path::new("mem.csv")).unwrap();
        assert_eq!(frame.rows()[0].len(), 3);
        assert!(frame.rows()[0][2].is_null());
    }
}

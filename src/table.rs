use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use mongodb::bson::{Bson, Document};

/// A single scalar value read from the spreadsheet.
///
/// `InvalidDateTime` is the sentinel for a date-typed cell whose serial value
/// could not be represented as a real date/time (the spreadsheet equivalent
/// of a missing temporal value). It is distinct from `Null`, which is an
/// empty cell of any type.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Empty cell.
    Null,
    /// Boolean cell.
    Bool(bool),
    /// Integer cell.
    Int(i64),
    /// Floating-point cell.
    Float(f64),
    /// Text cell (also holds spreadsheet error codes like `#DIV/0!`).
    Text(String),
    /// Date/time cell.
    DateTime(NaiveDateTime),
    /// Date-typed cell holding an unrepresentable value.
    InvalidDateTime,
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Null,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => Cell::DateTime(naive),
                None => Cell::InvalidDateTime,
            },
            Data::DateTimeIso(s) => match parse_iso_datetime(s) {
                Some(naive) => Cell::DateTime(naive),
                None => Cell::Text(s.clone()),
            },
            Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Text(e.to_string()),
        }
    }
}

impl Cell {
    /// Converts the cell to its BSON representation.
    ///
    /// Date/time cells that survive normalization (i.e. cells in columns that
    /// were not inferred as temporal) map to native BSON datetimes; the
    /// invalid-temporal sentinel always maps to null.
    pub fn to_bson(&self) -> Bson {
        match self {
            Cell::Null => Bson::Null,
            Cell::Bool(b) => Bson::Boolean(*b),
            Cell::Int(i) => Bson::Int64(*i),
            Cell::Float(f) => Bson::Double(*f),
            Cell::Text(s) => Bson::String(s.clone()),
            Cell::DateTime(dt) => Bson::DateTime(mongodb::bson::DateTime::from_millis(
                dt.and_utc().timestamp_millis(),
            )),
            Cell::InvalidDateTime => Bson::Null,
        }
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// The in-memory table: an ordered sequence of rows sharing a column set.
///
/// Exists only for the duration of the run. Row order is preserved from the
/// source sheet all the way to the destination collection.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column names, taken from the sheet's header row.
    pub columns: Vec<String>,
    /// Data rows in source order. A row may be shorter than the column set
    /// when the source sheet leaves trailing cells out.
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates a table from a column set and data rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Table { columns, rows }
    }

    /// Total number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of batches a load with the given batch size will perform:
    /// `ceil(len / batch_size)`.
    pub fn num_batches(&self, batch_size: usize) -> usize {
        self.rows.len().div_ceil(batch_size)
    }

    /// Consecutive, non-overlapping batches of `batch_size` rows each; the
    /// last batch holds the remainder.
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = &[Vec<Cell>]> {
        self.rows.chunks(batch_size)
    }
}

/// Serializes one row into the destination document.
///
/// Columns are zipped with cells, so a short row keeps its own column
/// membership rather than being padded out to the full column set.
pub fn row_to_document(columns: &[String], row: &[Cell]) -> Document {
    columns
        .iter()
        .zip(row.iter())
        .map(|(name, cell)| (name.clone(), cell.to_bson()))
        .collect()
}

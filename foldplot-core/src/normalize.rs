//! Record normalization
//!
//! Turns raw tabular alignment rows into canonical [`AlignmentRecord`]s. Two
//! column-naming conventions are understood: the short legacy names
//! (`q`, `q_st`, `q_en`, `r`, `r_st`, `r_en`) and the verbose BED-style names
//! (`#query_name`, `query_start`, ..., `reference_end`). Both carry the identity
//! estimate in `perID_by_events`. The schema is detected once per table and
//! nothing downstream sees the original column names.

use crate::error::{PlotError, PlotResult};
use crate::types::{AlignmentRecord, GenomicPos, Strand};
use std::collections::HashMap;
use std::fmt;

pub const IDENTITY_COLUMN: &str = "perID_by_events";

const LEGACY_COLUMNS: [&str; 6] = ["q", "q_st", "q_en", "r", "r_st", "r_en"];
const VERBOSE_COLUMNS: [&str; 6] = [
    "query_name",
    "query_start",
    "query_end",
    "reference_name",
    "reference_start",
    "reference_end",
];

/// A materialized table of string cells with a header row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Build a table from a row list whose first row is the header
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> PlotResult<Self> {
        if rows.is_empty() {
            return Err(PlotError::schema("table has no header row"));
        }
        let header = rows.remove(0);
        Ok(Self { header, rows })
    }

    /// Build a table from column-name → value mappings, one per row.
    ///
    /// Columns are ordered by first appearance; a key missing from a later row
    /// becomes an empty cell and fails at parse time if the column is needed.
    pub fn from_maps<'a, I>(maps: I) -> Self
    where
        I: IntoIterator<Item = &'a HashMap<String, String>>,
    {
        let maps: Vec<&HashMap<String, String>> = maps.into_iter().collect();
        let mut header: Vec<String> = Vec::new();
        for map in &maps {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                if !header.contains(key) {
                    header.push(key.clone());
                }
            }
        }

        let rows = maps
            .iter()
            .map(|map| {
                header
                    .iter()
                    .map(|col| map.get(col).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { header, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == name)
    }
}

/// Column-naming convention of an input table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Legacy,
    Verbose,
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Legacy => write!(f, "legacy"),
            Schema::Verbose => write!(f, "verbose"),
        }
    }
}

/// Resolved positions of the canonical fields within a table's header
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub schema: Schema,
    query_name: usize,
    q_start: usize,
    q_end: usize,
    ref_name: usize,
    r_start: usize,
    r_end: usize,
    identity: usize,
    strand: Option<usize>,
}

impl ColumnMap {
    fn width(&self) -> usize {
        [
            self.query_name,
            self.q_start,
            self.q_end,
            self.ref_name,
            self.r_start,
            self.r_end,
            self.identity,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// Detect which naming convention a table uses
pub fn detect_schema(table: &RawTable) -> PlotResult<ColumnMap> {
    let has = |name: &str| table.column_index(name).is_some();

    let (schema, names) = if has("query_name") || has("#query_name") {
        (Schema::Verbose, VERBOSE_COLUMNS)
    } else if has("q") {
        (Schema::Legacy, LEGACY_COLUMNS)
    } else {
        return Err(PlotError::schema(format!(
            "unrecognized columns [{}]; expected legacy ({}) or verbose ({}) names",
            table.header.join(", "),
            LEGACY_COLUMNS.join(", "),
            VERBOSE_COLUMNS.join(", ")
        )));
    };

    let lookup = |name: &str| -> Option<usize> {
        if schema == Schema::Verbose && name == "query_name" {
            table
                .column_index("#query_name")
                .or_else(|| table.column_index("query_name"))
        } else {
            table.column_index(name)
        }
    };

    let missing: Vec<&str> = names
        .iter()
        .chain(std::iter::once(&IDENTITY_COLUMN))
        .copied()
        .filter(|name| lookup(*name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(PlotError::schema(format!(
            "{} schema is missing column(s): {}",
            schema,
            missing.join(", ")
        )));
    }

    // Presence of every looked-up column was checked above.
    let idx = |name: &str| lookup(name).unwrap_or_default();
    Ok(ColumnMap {
        schema,
        query_name: idx(names[0]),
        q_start: idx(names[1]),
        q_end: idx(names[2]),
        ref_name: idx(names[3]),
        r_start: idx(names[4]),
        r_end: idx(names[5]),
        identity: idx(IDENTITY_COLUMN),
        strand: match schema {
            Schema::Verbose => table.column_index("strand"),
            Schema::Legacy => None,
        },
    })
}

/// Parse every row of `table` into canonical records.
///
/// Fails on an unknown schema, unparsable cells, `end < start`, identities
/// outside `[0, 100]`, or a table without data rows.
pub fn normalize(table: &RawTable) -> PlotResult<Vec<AlignmentRecord>> {
    let columns = detect_schema(table)?;
    log::debug!(
        "Detected {} schema for {} rows",
        columns.schema,
        table.len()
    );

    if table.is_empty() {
        return Err(PlotError::EmptyDataset);
    }

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| parse_row(i + 1, row, table, &columns))
        .collect()
}

fn parse_row(
    row_no: usize,
    row: &[String],
    table: &RawTable,
    columns: &ColumnMap,
) -> PlotResult<AlignmentRecord> {
    if row.len() < columns.width() {
        return Err(PlotError::schema(format!(
            "row {} has {} fields, expected at least {}",
            row_no,
            row.len(),
            columns.width()
        )));
    }

    let cell = |idx: usize| row[idx].trim();
    let coord = |idx: usize| parse_coord(cell(idx), row_no, &table.header[idx]);

    let query_name = cell(columns.query_name).to_string();
    let ref_name = cell(columns.ref_name).to_string();
    let q_start = coord(columns.q_start)?;
    let q_end = coord(columns.q_end)?;
    let r_start = coord(columns.r_start)?;
    let r_end = coord(columns.r_end)?;

    let identity: f64 = cell(columns.identity).parse().map_err(|_| {
        PlotError::schema(format!(
            "row {}: invalid {} value '{}'",
            row_no,
            IDENTITY_COLUMN,
            cell(columns.identity)
        ))
    })?;

    if q_end < q_start {
        return Err(PlotError::invalid_record(
            row_no,
            format!("query end {} < query start {}", q_end, q_start),
        ));
    }
    if r_end < r_start {
        return Err(PlotError::invalid_record(
            row_no,
            format!("reference end {} < reference start {}", r_end, r_start),
        ));
    }
    if !identity.is_finite() || !(0.0..=100.0).contains(&identity) {
        return Err(PlotError::invalid_record(
            row_no,
            format!("identity {} outside [0, 100]", identity),
        ));
    }

    let mut record = AlignmentRecord::new(query_name, q_start, q_end, ref_name, r_start, r_end, identity);
    if let Some(strand) = columns
        .strand
        .and_then(|idx| row.get(idx))
        .and_then(|s| Strand::parse(s))
    {
        record = record.with_strand(strand);
    }
    Ok(record)
}

// Integer columns sometimes arrive as whole floats ("1500.0") from upstream tools.
fn parse_coord(value: &str, row_no: usize, column: &str) -> PlotResult<GenomicPos> {
    if let Ok(v) = value.parse::<GenomicPos>() {
        return Ok(v);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => Ok(v as GenomicPos),
        _ => Err(PlotError::schema(format!(
            "row {}: invalid coordinate '{}' in column {}",
            row_no,
            value,
            column.trim()
        ))),
    }
}

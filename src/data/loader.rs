use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Int32Type, Int64Type, TimeUnit, TimestampMicrosecondType,
    TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType,
};
use arrow::util::display::array_value_to_string;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::LoadError;
use super::model::{Catalog, ContentType, RawRecord, Record, REQUIRED_COLUMNS};

/// Accepted `date_added` layouts, tried in order.
const DATE_FORMATS: [&str; 3] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d"];

// ---------------------------------------------------------------------------
// Options and report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Abort the load on an unparseable `date_added` instead of leaving the
    /// field empty.
    pub strict_dates: bool,
}

/// What happened while typing the source rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    /// Rows with both director and cast (the canonical view).
    pub complete_rows: usize,
    /// Rows whose `date_added` could not be parsed and was dropped.
    pub invalid_dates: usize,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the required columns
/// * `.json`    – `[{ "title": ..., "type": ..., ... }, ...]`
/// * `.parquet` – one column per field, strings or integers
pub fn load_file(path: &Path, options: LoadOptions) -> Result<(Catalog, LoadReport), LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => {
            let file = File::open(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            read_csv(file, path)?
        }
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let (catalog, report) = build_catalog(rows, options)?;
    log::info!(
        "Loaded {} from {}: {} rows, {} complete, {} dates dropped",
        ext,
        path.display(),
        report.total_rows,
        report.complete_rows,
        report.invalid_dates
    );
    Ok((catalog, report))
}

/// Load a catalog from CSV text arriving on any reader.
pub fn load_csv_reader<R: Read>(
    reader: R,
    options: LoadOptions,
) -> Result<(Catalog, LoadReport), LoadError> {
    let rows = read_csv(reader, Path::new("<stream>"))?;
    build_catalog(rows, options)
}

/// Parse a `date_added` cell. Surrounding whitespace is ignored.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Parse a 4-digit release year.
pub fn parse_year(text: &str) -> Option<i32> {
    let text = text.trim();
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

// ---------------------------------------------------------------------------
// Typing
// ---------------------------------------------------------------------------

fn build_catalog(
    rows: Vec<RawRecord>,
    options: LoadOptions,
) -> Result<(Catalog, LoadReport), LoadError> {
    let mut report = LoadReport {
        total_rows: rows.len(),
        ..LoadReport::default()
    };

    let mut records = Vec::with_capacity(rows.len());
    for (idx, raw) in rows.into_iter().enumerate() {
        records.push(type_record(raw, idx + 1, options, &mut report)?);
    }

    let catalog = Catalog::from_records(records);
    report.complete_rows = catalog.canonical_len();
    Ok((catalog, report))
}

/// `row` counts data rows from 1.
fn type_record(
    raw: RawRecord,
    row: usize,
    options: LoadOptions,
    report: &mut LoadReport,
) -> Result<Record, LoadError> {
    let type_text = non_empty(raw.content_type).unwrap_or_default();
    let content_type = type_text
        .parse::<ContentType>()
        .map_err(|_| invalid(row, "type", &type_text))?;

    let year_text = non_empty(raw.release_year).unwrap_or_default();
    let release_year =
        parse_year(&year_text).ok_or_else(|| invalid(row, "release_year", &year_text))?;

    let date_added = match non_empty(raw.date_added) {
        None => None,
        Some(text) => match parse_date(&text) {
            Some(date) => Some(date),
            None if options.strict_dates => return Err(invalid(row, "date_added", &text)),
            None => {
                log::warn!("Row {row}: unparseable date_added '{text}', leaving it empty");
                report.invalid_dates += 1;
                None
            }
        },
    };

    let title = non_empty(raw.title).unwrap_or_default();
    let mut record = Record::new(title, content_type, release_year, date_added)
        .with_duration(non_empty(raw.duration));
    record.director = non_empty(raw.director);
    record.cast = non_empty(raw.cast);
    record.country = non_empty(raw.country);
    record.rating = non_empty(raw.rating);
    record.listed_in = non_empty(raw.listed_in);
    Ok(record)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn invalid(row: usize, column: &'static str, value: &str) -> LoadError {
    LoadError::InvalidField {
        row,
        column,
        value: value.to_string(),
    }
}

fn check_columns<'a>(
    present: impl IntoIterator<Item = &'a str>,
    source: &Path,
) -> Result<(), LoadError> {
    let present: Vec<&str> = present.into_iter().collect();
    match REQUIRED_COLUMNS.iter().find(|c| !present.contains(*c)) {
        Some(column) => Err(LoadError::MissingColumn {
            path: source.to_path_buf(),
            column: *column,
        }),
        None => Ok(()),
    }
}

/// Cells arrive in `REQUIRED_COLUMNS` order.
fn raw_from_cells(cells: [Option<String>; 10]) -> RawRecord {
    let [
        title,
        content_type,
        director,
        cast,
        country,
        date_added,
        release_year,
        rating,
        duration,
        listed_in,
    ] = cells;
    RawRecord {
        title,
        content_type,
        director,
        cast,
        country,
        date_added,
        release_year,
        rating,
        duration,
        listed_in,
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv<R: Read>(reader: R, source: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    check_columns(reader.headers()?.iter(), source)?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawRecord>() {
        rows.push(result?);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "Dick Johnson Is Dead", "type": "Movie", "release_year": 2020, ... },
///   ...
/// ]
/// ```
fn read_json(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".into()))?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row
                .as_object()
                .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
            check_columns(obj.keys().map(String::as_str), path)?;
            Ok(raw_from_cells(REQUIRED_COLUMNS.map(|c| json_text(obj, c))))
        })
        .collect()
}

fn json_text(obj: &Map<String, JsonValue>, key: &str) -> Option<String> {
    match obj.get(key)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Dates may be stored as text, `Date32`/`Date64` or a timestamp of any unit;
/// the time of day is discarded.
fn read_parquet(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        check_columns(schema.fields().iter().map(|f| f.name().as_str()), path)?;

        let mut columns: Vec<ArrayRef> = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for column in REQUIRED_COLUMNS {
            let idx = schema.index_of(column)?;
            columns.push(batch.column(idx).clone());
        }

        for row in 0..batch.num_rows() {
            let cells: [Option<String>; 10] =
                std::array::from_fn(|i| extract_text(&columns[i], row));
            rows.push(raw_from_cells(cells));
        }
    }
    Ok(rows)
}

/// Render one Arrow cell as text; nulls become `None`.
fn extract_text(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Some(col.as_primitive::<Int32Type>().value(row).to_string()),
        DataType::Int64 => Some(col.as_primitive::<Int64Type>().value(row).to_string()),
        DataType::Date32 => col
            .as_primitive::<Date32Type>()
            .value_as_date(row)
            .map(iso_date),
        DataType::Date64 => col
            .as_primitive::<Date64Type>()
            .value_as_date(row)
            .map(iso_date),
        DataType::Timestamp(unit, _) => match unit {
            TimeUnit::Second => col.as_primitive::<TimestampSecondType>().value_as_date(row),
            TimeUnit::Millisecond => col
                .as_primitive::<TimestampMillisecondType>()
                .value_as_date(row),
            TimeUnit::Microsecond => col
                .as_primitive::<TimestampMicrosecondType>()
                .value_as_date(row),
            TimeUnit::Nanosecond => col
                .as_primitive::<TimestampNanosecondType>()
                .value_as_date(row),
        }
        .map(iso_date),
        _ => array_value_to_string(col.as_ref(), row).ok(),
    }
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

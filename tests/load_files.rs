use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray, TimestampNanosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use catalog_dashboard::data::aggregate::{monthly_pattern, release_trend, top_values};
use catalog_dashboard::data::cache::CatalogCache;
use catalog_dashboard::data::error::LoadError;
use catalog_dashboard::data::explode::MultiField;
use catalog_dashboard::data::filter::{apply, FilterState};
use catalog_dashboard::data::loader::{load_file, LoadOptions};
use catalog_dashboard::data::model::{ContentType, YearMonth};

const CSV: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description
s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,Michael Hilow,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries,A documentary
s2,TV Show,Blood & Water,Ian Smith,\"Ama Qamata, Khosi Ngema\",South Africa,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, TV Dramas, TV Mysteries\",A drama
s3,TV Show,Ganglands,Julien Leclercq,\"Sami Bouajila, Tracy Gotoas\",,\"September 24, 2021\",2021,TV-MA,1 Season,\"Crime TV Shows, International TV Shows\",A thriller
s4,Movie,Untitled,,Someone,India,\"March 2, 2019\",2018,TV-14,110 min,Dramas,Incomplete
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn load(path: &Path) -> catalog_dashboard::data::model::Catalog {
    load_file(path, LoadOptions::default()).unwrap().0
}

#[test]
fn csv_file_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "titles.csv", CSV);

    let (catalog, report) = load_file(&path, LoadOptions::default()).unwrap();
    assert_eq!(report.total_rows, 4);
    assert_eq!(report.complete_rows, 3);
    assert_eq!(catalog.all().len(), 4);

    let canonical = catalog.canonical();
    let state = FilterState {
        types: [ContentType::TvShow].into_iter().collect(),
        year_range: (2021, 2021),
    };
    let shows = apply(&canonical, &state);
    assert_eq!(shows.len(), 2);

    assert_eq!(
        top_values(&shows, MultiField::Genre, 1),
        vec![("International TV Shows".to_string(), 2)]
    );
    assert_eq!(release_trend(&canonical), vec![(2020, 1), (2021, 2)]);
    assert_eq!(monthly_pattern(&canonical)[8], 3);
}

#[test]
fn json_file_with_numeric_year() {
    let dir = TempDir::new().unwrap();
    let json = r#"[
        {"title": "A", "type": "Movie", "director": "D", "cast": "C", "country": null,
         "date_added": "2020-01-15", "release_year": 2019, "rating": "R",
         "duration": "95 min", "listed_in": "Dramas"},
        {"title": "B", "type": "TV Show", "director": null, "cast": "C", "country": "Spain",
         "date_added": null, "release_year": "2018", "rating": null,
         "duration": "3 Seasons", "listed_in": "TV Dramas"}
    ]"#;
    let path = write(&dir, "titles.json", json);

    let catalog = load(&path);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.canonical_len(), 1);
    let first = catalog.canonical()[0];
    assert_eq!(first.release_year, 2019);
    assert_eq!(first.duration_num, Some(95));
    assert_eq!(first.country, None);
}

#[test]
fn json_missing_column_is_named() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.json", r#"[{"title": "A", "type": "Movie"}]"#);

    let err = load_file(&path, LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { column: "director", .. }));
}

#[test]
fn parquet_file_with_nulls() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("titles.parquet");

    let text = |values: [Option<&str>; 2]| -> ArrayRef {
        Arc::new(StringArray::from(values.to_vec()))
    };
    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, true),
        Field::new("type", DataType::Utf8, true),
        Field::new("director", DataType::Utf8, true),
        Field::new("cast", DataType::Utf8, true),
        Field::new("country", DataType::Utf8, true),
        Field::new("date_added", DataType::Utf8, true),
        Field::new("release_year", DataType::Int64, true),
        Field::new("rating", DataType::Utf8, true),
        Field::new("duration", DataType::Utf8, true),
        Field::new("listed_in", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        text([Some("A"), Some("B")]),
        text([Some("Movie"), Some("TV Show")]),
        text([Some("Ann"), Some("Bob")]),
        text([Some("Cat"), None]),
        text([Some("India, Spain"), Some("India")]),
        text([Some("June 1, 2020"), Some("July 4, 2021")]),
        Arc::new(Int64Array::from(vec![2019, 2021])),
        text([Some("TV-14"), Some("TV-MA")]),
        text([Some("101 min"), Some("4 Seasons")]),
        text([Some("Dramas"), Some("TV Comedies")]),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let catalog = load(&path);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.canonical_len(), 1);
    assert_eq!(catalog.all()[1].content_type, ContentType::TvShow);
    assert_eq!(catalog.all()[1].release_year, 2021);
    assert_eq!(
        top_values(&catalog.all(), MultiField::Country, 5),
        vec![("India".to_string(), 2), ("Spain".to_string(), 1)]
    );
}

#[test]
fn parquet_timestamp_dates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timestamps.parquet");

    // 2021-09-25T00:00:00 and 2019-03-02T18:30:00 in nanoseconds since the epoch.
    let added = TimestampNanosecondArray::from(vec![
        Some(1_632_528_000_000_000_000),
        Some(1_551_551_400_000_000_000),
        None,
    ]);
    let text = |value: &str| -> ArrayRef { Arc::new(StringArray::from(vec![value; 3])) };
    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("director", DataType::Utf8, false),
        Field::new("cast", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, false),
        Field::new(
            "date_added",
            DataType::Timestamp(TimeUnit::Nanosecond, None),
            true,
        ),
        Field::new("release_year", DataType::Int64, false),
        Field::new("rating", DataType::Utf8, false),
        Field::new("duration", DataType::Utf8, false),
        Field::new("listed_in", DataType::Utf8, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        text("A"),
        text("Movie"),
        text("Ann"),
        text("Bob"),
        text("India"),
        Arc::new(added),
        Arc::new(Int64Array::from(vec![2019; 3])),
        text("TV-14"),
        text("90 min"),
        text("Dramas"),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let strict = LoadOptions { strict_dates: true };
    let (catalog, report) = load_file(&path, strict).unwrap();
    assert_eq!(report.invalid_dates, 0);

    let records = catalog.all();
    assert_eq!(
        records[0].date_added,
        chrono::NaiveDate::from_ymd_opt(2021, 9, 25)
    );
    assert_eq!(
        records[1].month_added,
        Some(YearMonth { year: 2019, month: 3 })
    );
    assert_eq!(records[2].date_added, None);
    assert_eq!(monthly_pattern(&records)[8], 1);
}

#[test]
fn unreadable_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_file(&dir.path().join("missing.csv"), LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn cache_loads_once_until_reload() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "titles.csv", CSV);
    let cache = CatalogCache::new(LoadOptions::default());

    let first = cache.get_or_load(&path).unwrap();
    let second = cache.get_or_load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.cached_path().as_deref(), Some(path.as_path()));

    let trimmed: String = CSV.lines().take(2).map(|l| format!("{l}\n")).collect();
    fs::write(&path, trimmed).unwrap();
    assert_eq!(cache.get_or_load(&path).unwrap().len(), 4);

    let reloaded = cache.reload(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(!Arc::ptr_eq(&first, &reloaded));

    cache.invalidate();
    assert_eq!(cache.cached_path(), None);
}

#[test]
fn failed_reload_keeps_previous_entry() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "titles.csv", CSV);
    let cache = CatalogCache::new(LoadOptions::default());
    let first = cache.get_or_load(&path).unwrap();

    fs::write(&path, "title,type\nX,Movie\n").unwrap();
    assert!(cache.reload(&path).is_err());
    assert!(Arc::ptr_eq(&first, &cache.get_or_load(&path).unwrap()));
}

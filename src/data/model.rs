use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Columns every catalog source must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "title",
    "type",
    "director",
    "cast",
    "country",
    "date_added",
    "release_year",
    "rating",
    "duration",
    "listed_in",
];

/// Short month labels, index 0 = January.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentType {
    Movie,
    TvShow,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Movie, ContentType::TvShow];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Movie" => Ok(ContentType::Movie),
            "TV Show" | "TVShow" => Ok(ContentType::TvShow),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// YearMonth – the `month_added` bucket
// ---------------------------------------------------------------------------

/// A calendar month bucket. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1 = January … 12 = December.
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// Duration parsing
// ---------------------------------------------------------------------------

/// Split a raw duration such as `"90 min"` or `"2 Seasons"` into the first run
/// of digits and the first run of non-digits.
///
/// The magnitude is `None` when there are no digits (or they overflow).
/// The unit is trimmed and may be empty.
pub fn parse_duration(raw: &str) -> (Option<u32>, String) {
    let digits: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let unit: String = raw
        .chars()
        .skip_while(|c| c.is_ascii_digit())
        .take_while(|c| !c.is_ascii_digit())
        .collect();

    let num = if digits.is_empty() {
        None
    } else {
        digits.parse::<u32>().ok()
    };
    (num, unit.trim().to_string())
}

// ---------------------------------------------------------------------------
// RawRecord – one untyped source row
// ---------------------------------------------------------------------------

/// A source row before typing. Every loader funnels into this shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub release_year: Option<String>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub listed_in: Option<String>,
}

// ---------------------------------------------------------------------------
// Record – one catalog entry
// ---------------------------------------------------------------------------

/// A typed catalog entry plus the fields derived at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub title: String,
    pub content_type: ContentType,
    /// Comma-separated director names.
    pub director: Option<String>,
    /// Comma-separated cast names.
    pub cast: Option<String>,
    /// Comma-separated country names.
    pub country: Option<String>,
    pub date_added: Option<NaiveDate>,
    pub release_year: i32,
    pub rating: Option<String>,
    pub duration: Option<String>,
    /// Comma-separated genre labels.
    pub listed_in: Option<String>,

    pub duration_num: Option<u32>,
    pub duration_unit: String,
    pub month_added: Option<YearMonth>,
}

impl Record {
    /// Build a record and derive `duration_num`, `duration_unit` and
    /// `month_added`.
    pub fn new(
        title: String,
        content_type: ContentType,
        release_year: i32,
        date_added: Option<NaiveDate>,
    ) -> Self {
        Record {
            title,
            content_type,
            director: None,
            cast: None,
            country: None,
            date_added,
            release_year,
            rating: None,
            duration: None,
            listed_in: None,
            duration_num: None,
            duration_unit: String::new(),
            month_added: date_added.map(YearMonth::of),
        }
    }

    pub fn with_duration(mut self, duration: Option<String>) -> Self {
        let (num, unit) = duration
            .as_deref()
            .map(parse_duration)
            .unwrap_or((None, String::new()));
        self.duration = duration;
        self.duration_num = num;
        self.duration_unit = unit;
        self
    }

    /// Whether the record belongs to the canonical analysis view.
    pub fn is_complete(&self) -> bool {
        self.director.is_some() && self.cast.is_some()
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Every loaded record, including those missing director or cast.
    records: Vec<Record>,
    /// Indices into `records` of the canonical analysis view.
    complete: Vec<usize>,
}

impl Catalog {
    pub fn from_records(records: Vec<Record>) -> Self {
        let complete = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_complete())
            .map(|(i, _)| i)
            .collect();
        Catalog { records, complete }
    }

    /// All records, used by the country / year / month explorer.
    pub fn all(&self) -> Vec<&Record> {
        self.records.iter().collect()
    }

    /// The canonical view: records with both director and cast.
    pub fn canonical(&self) -> Vec<&Record> {
        self.complete.iter().map(|&i| &self.records[i]).collect()
    }

    /// Inclusive release-year span of the canonical view.
    pub fn release_year_span(&self) -> Option<(i32, i32)> {
        let years = self.complete.iter().map(|&i| self.records[i].release_year);
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }

    /// Total number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records in the canonical view.
    pub fn canonical_len(&self) -> usize {
        self.complete.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_minutes() {
        assert_eq!(parse_duration("90 min"), (Some(90), "min".to_string()));
    }

    #[test]
    fn duration_seasons() {
        assert_eq!(parse_duration("2 Seasons"), (Some(2), "Seasons".to_string()));
    }

    #[test]
    fn duration_without_digits() {
        let (num, unit) = parse_duration("Unknown");
        assert_eq!(num, None);
        assert_eq!(unit, "Unknown");
    }

    #[test]
    fn content_type_labels() {
        assert_eq!("TV Show".parse::<ContentType>(), Ok(ContentType::TvShow));
        assert_eq!("TVShow".parse::<ContentType>(), Ok(ContentType::TvShow));
        assert_eq!(" Movie ".parse::<ContentType>(), Ok(ContentType::Movie));
        assert!("Podcast".parse::<ContentType>().is_err());
        assert_eq!(ContentType::TvShow.to_string(), "TV Show");
    }

    #[test]
    fn month_added_is_derived() {
        let date = NaiveDate::from_ymd_opt(2021, 9, 25).unwrap();
        let rec = Record::new("A".into(), ContentType::Movie, 2020, Some(date));
        assert_eq!(rec.month_added, Some(YearMonth { year: 2021, month: 9 }));
        assert_eq!(rec.month_added.unwrap().to_string(), "2021-09");
    }

    #[test]
    fn canonical_view_skips_incomplete_records() {
        let mut full = Record::new("Full".into(), ContentType::Movie, 2019, None);
        full.director = Some("A".into());
        full.cast = Some("B".into());
        let mut no_cast = Record::new("NoCast".into(), ContentType::Movie, 2001, None);
        no_cast.director = Some("A".into());

        let catalog = Catalog::from_records(vec![full, no_cast]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.canonical_len(), 1);
        assert_eq!(catalog.canonical()[0].title, "Full");
        assert_eq!(catalog.release_year_span(), Some((2019, 2019)));
    }
}

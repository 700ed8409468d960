//! Grouped counts, rankings, trends and cross-tabulations over a view.
//!
//! Every function here is pure: it reads a slice of record references and
//! returns a freshly built series. Empty input yields empty output.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use chrono::Datelike;

use super::explode::{explode, MultiField};
use super::model::{ContentType, Record, YearMonth};

/// `(label, count)` pairs.
pub type Counts = Vec<(String, usize)>;

// ---------------------------------------------------------------------------
// Categorical distribution
// ---------------------------------------------------------------------------

/// A single-value field used for plain distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalField {
    Type,
    Rating,
}

impl CategoricalField {
    fn value(self, record: &Record) -> Option<&str> {
        match self {
            CategoricalField::Type => Some(record.content_type.label()),
            CategoricalField::Rating => record.rating.as_deref(),
        }
    }
}

/// Count of records per value of `field`, in first-seen order.
/// Records without a value are skipped.
pub fn categorical_distribution(view: &[&Record], field: CategoricalField) -> Counts {
    let mut counts: Counts = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in view {
        let Some(value) = field.value(record) else {
            continue;
        };
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// Count occurrences and keep the `n` most frequent, count descending.
/// Ties are ordered lexically.
pub fn rank<'a>(values: impl IntoIterator<Item = &'a str>, n: usize) -> Counts {
    let mut tally: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *tally.entry(value).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = tally.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

/// Top-`n` values of a multi-value field. Placeholder values count like any
/// other value.
pub fn top_values(view: &[&Record], field: MultiField, n: usize) -> Counts {
    rank(explode(view, field).into_iter().map(|(_, v)| v), n)
}

/// Top-`n` people (directors or cast). Records whose field mentions
/// `placeholder` (case-insensitive) are left out entirely.
pub fn top_people(view: &[&Record], field: MultiField, n: usize, placeholder: &str) -> Counts {
    let named: Vec<&Record> = view
        .iter()
        .copied()
        .filter(|r| !field.raw(r).is_some_and(|raw| mentions(raw, placeholder)))
        .collect();
    top_values(&named, field, n)
}

/// Case-insensitive substring test. An empty placeholder matches nothing.
pub fn mentions(raw: &str, placeholder: &str) -> bool {
    !placeholder.is_empty() && raw.to_lowercase().contains(&placeholder.to_lowercase())
}

// ---------------------------------------------------------------------------
// Time trends
// ---------------------------------------------------------------------------

/// Titles per release year, ascending.
pub fn release_trend(view: &[&Record]) -> Vec<(i32, usize)> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for record in view {
        *by_year.entry(record.release_year).or_insert(0) += 1;
    }
    by_year.into_iter().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Year,
    Month,
}

/// A `date_added` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeBucket {
    Year(i32),
    Month(YearMonth),
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBucket::Year(y) => write!(f, "{y}"),
            TimeBucket::Month(ym) => write!(f, "{ym}"),
        }
    }
}

/// Titles added per bucket, chronological. Undated records are skipped.
pub fn added_trend(view: &[&Record], granularity: Granularity) -> Vec<(TimeBucket, usize)> {
    let mut buckets: BTreeMap<TimeBucket, usize> = BTreeMap::new();
    for record in view {
        let Some(month) = record.month_added else {
            continue;
        };
        let bucket = match granularity {
            Granularity::Year => TimeBucket::Year(month.year),
            Granularity::Month => TimeBucket::Month(month),
        };
        *buckets.entry(bucket).or_insert(0) += 1;
    }
    buckets.into_iter().collect()
}

/// Titles added per calendar month, index 0 = January. Always 12 buckets.
pub fn monthly_pattern(view: &[&Record]) -> [usize; 12] {
    let mut months = [0usize; 12];
    for date in view.iter().filter_map(|r| r.date_added) {
        months[date.month0() as usize] += 1;
    }
    months
}

/// One point of a multi-line genre chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub year: i32,
    pub genre: String,
    pub count: usize,
}

/// Yearly counts of the `k` most frequent genres of the whole view.
///
/// Every release year that has genre data gets one point per top genre,
/// with an explicit zero when the genre is absent that year.
pub fn genre_trends(view: &[&Record], k: usize) -> Vec<TrendPoint> {
    let top = top_values(view, MultiField::Genre, k);

    let mut per_year: BTreeMap<i32, HashMap<&str, usize>> = BTreeMap::new();
    for record in view {
        if record.listed_in.is_none() {
            continue;
        }
        let year = per_year.entry(record.release_year).or_default();
        for genre in MultiField::Genre.values(record) {
            *year.entry(genre).or_insert(0) += 1;
        }
    }

    per_year
        .iter()
        .flat_map(|(&year, counts)| {
            top.iter().map(move |(genre, _)| TrendPoint {
                year,
                genre: genre.clone(),
                count: counts.get(genre.as_str()).copied().unwrap_or(0),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Cross-tabulations
// ---------------------------------------------------------------------------

/// A dense count matrix. `counts[i][j]` pairs `rows[i]` with `columns[j]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    pub fn get(&self, row: &str, column: &str) -> usize {
        let i = self.rows.iter().position(|r| r == row);
        let j = self.columns.iter().position(|c| c == column);
        match (i, j) {
            (Some(i), Some(j)) => self.counts[i][j],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn max(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }
}

/// Co-occurrence counts of `row_field` × `col_field` values within each
/// record, restricted to the `k` row values with the most pairs.
///
/// Records whose row field mentions `placeholder` and records missing either
/// field are left out. Rows and columns are ordered lexically.
pub fn crosstab(
    view: &[&Record],
    row_field: MultiField,
    col_field: MultiField,
    k: usize,
    placeholder: &str,
) -> CrossTab {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    for record in view {
        let (Some(row_raw), Some(_)) = (row_field.raw(record), col_field.raw(record)) else {
            continue;
        };
        if mentions(row_raw, placeholder) {
            continue;
        }
        for a in row_field.values(record) {
            for b in col_field.values(record) {
                pairs.push((a, b));
            }
        }
    }

    let top: BTreeSet<String> = rank(pairs.iter().map(|(a, _)| *a), k)
        .into_iter()
        .map(|(value, _)| value)
        .collect();
    let kept: Vec<(&str, &str)> = pairs
        .into_iter()
        .filter(|(a, _)| top.contains(*a))
        .collect();

    let rows: Vec<String> = top.into_iter().collect();
    let columns: Vec<String> = kept
        .iter()
        .map(|(_, b)| b.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut counts = vec![vec![0usize; columns.len()]; rows.len()];
    for (a, b) in kept {
        let i = rows.binary_search_by(|r| r.as_str().cmp(a));
        let j = columns.binary_search_by(|c| c.as_str().cmp(b));
        if let (Ok(i), Ok(j)) = (i, j) {
            counts[i][j] += 1;
        }
    }

    CrossTab {
        rows,
        columns,
        counts,
    }
}

/// Director × genre co-occurrence for the `k` busiest directors.
pub fn director_genre_crosstab(view: &[&Record], k: usize, placeholder: &str) -> CrossTab {
    crosstab(view, MultiField::Director, MultiField::Genre, k, placeholder)
}

/// Year × month counts of `date_added`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heatmap {
    /// Years present in the view, ascending.
    pub years: Vec<i32>,
    /// One row per year, index 0 = January.
    pub counts: Vec<[usize; 12]>,
}

impl Heatmap {
    pub fn max(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Dense heatmap of titles added per year and month.
pub fn release_heatmap(view: &[&Record]) -> Heatmap {
    let mut by_year: BTreeMap<i32, [usize; 12]> = BTreeMap::new();
    for date in view.iter().filter_map(|r| r.date_added) {
        by_year.entry(date.year()).or_insert([0; 12])[date.month0() as usize] += 1;
    }
    let (years, counts) = by_year.into_iter().unzip();
    Heatmap { years, counts }
}

// ---------------------------------------------------------------------------
// Numeric sequences
// ---------------------------------------------------------------------------

/// Raw `duration_num` values per content type, both types always present.
pub fn duration_by_type(view: &[&Record]) -> Vec<(ContentType, Vec<f64>)> {
    ContentType::ALL
        .into_iter()
        .map(|kind| {
            let values = view
                .iter()
                .filter(|r| r.content_type == kind)
                .filter_map(|r| r.duration_num)
                .map(f64::from)
                .collect();
            (kind, values)
        })
        .collect()
}

/// Raw movie durations grouped by rating, ratings ordered lexically.
pub fn movie_duration_by_rating(view: &[&Record]) -> Vec<(String, Vec<f64>)> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in view {
        if record.content_type != ContentType::Movie {
            continue;
        }
        if let (Some(rating), Some(minutes)) = (record.rating.as_deref(), record.duration_num) {
            groups.entry(rating).or_default().push(f64::from(minutes));
        }
    }
    groups
        .into_iter()
        .map(|(rating, values)| (rating.to_string(), values))
        .collect()
}

/// The view sorted by release year, newest first. Equal years keep view order.
pub fn content_details<'a>(view: &[&'a Record]) -> Vec<&'a Record> {
    let mut rows = view.to_vec();
    rows.sort_by(|a, b| b.release_year.cmp(&a.release_year));
    rows
}

use std::collections::BTreeSet;

use chrono::Datelike;

use super::model::{Catalog, ContentType, Record};

// ---------------------------------------------------------------------------
// Global filter: content type + release-year range
// ---------------------------------------------------------------------------

/// Sidebar selection applied to the canonical view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Selected content types. Empty means nothing passes.
    pub types: BTreeSet<ContentType>,
    /// Inclusive release-year range `(min, max)`.
    pub year_range: (i32, i32),
}

impl FilterState {
    /// Everything selected: all types and the catalog's full year span.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        FilterState {
            types: ContentType::ALL.into_iter().collect(),
            year_range: catalog.release_year_span().unwrap_or((0, 0)),
        }
    }

    /// Whether a single record passes the filter.
    pub fn matches(&self, record: &Record) -> bool {
        let (min, max) = self.year_range;
        self.types.contains(&record.content_type)
            && (min..=max).contains(&record.release_year)
    }
}

/// Return the records of `view` that pass `state`, in their original order.
pub fn apply<'a>(view: &[&'a Record], state: &FilterState) -> Vec<&'a Record> {
    view.iter()
        .copied()
        .filter(|record| state.matches(record))
        .collect()
}

// ---------------------------------------------------------------------------
// Explorer filter: date_added year / month + countries
// ---------------------------------------------------------------------------

/// Selection of the country / year / month explorer.
///
/// `None` means "All". An empty country set means no country restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerFilter {
    pub year: Option<i32>,
    /// 1 = January … 12 = December.
    pub month: Option<u32>,
    pub countries: BTreeSet<String>,
}

impl ExplorerFilter {
    /// Whether a record's `date_added` falls in the selected year and month.
    /// Records without a `date_added` never match.
    pub fn matches_date(&self, record: &Record) -> bool {
        let Some(date) = record.date_added else {
            return false;
        };
        self.year.map_or(true, |y| date.year() == y)
            && self.month.map_or(true, |m| date.month() == m)
    }

    pub fn matches_country(&self, country: &str) -> bool {
        self.countries.is_empty() || self.countries.contains(country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(kind: ContentType, year: i32) -> Record {
        Record::new(format!("{kind} {year}"), kind, year, None)
    }

    #[test]
    fn filtered_view_satisfies_predicate() {
        let records = [
            rec(ContentType::Movie, 2018),
            rec(ContentType::TvShow, 2019),
            rec(ContentType::Movie, 2020),
            rec(ContentType::Movie, 2022),
        ];
        let view: Vec<&Record> = records.iter().collect();
        let state = FilterState {
            types: [ContentType::Movie].into_iter().collect(),
            year_range: (2018, 2020),
        };

        let filtered = apply(&view, &state);
        let titles: Vec<&str> = filtered.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Movie 2018", "Movie 2020"]);
        assert!(filtered.iter().all(|r| view.iter().any(|v| std::ptr::eq(*v, *r))));
    }

    #[test]
    fn empty_type_selection_yields_nothing() {
        let records = [rec(ContentType::Movie, 2020)];
        let view: Vec<&Record> = records.iter().collect();
        let state = FilterState {
            types: BTreeSet::new(),
            year_range: (1900, 2100),
        };
        assert!(apply(&view, &state).is_empty());
    }

    #[test]
    fn default_state_covers_catalog() {
        let mut a = rec(ContentType::Movie, 1999);
        a.director = Some("d".into());
        a.cast = Some("c".into());
        let mut b = rec(ContentType::TvShow, 2021);
        b.director = Some("d".into());
        b.cast = Some("c".into());
        let catalog = Catalog::from_records(vec![a, b]);

        let state = FilterState::for_catalog(&catalog);
        assert_eq!(state.year_range, (1999, 2021));
        assert_eq!(apply(&catalog.canonical(), &state).len(), 2);
    }

    #[test]
    fn explorer_date_match() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 14);
        let record = Record::new("x".into(), ContentType::Movie, 2019, date);
        let undated = Record::new("y".into(), ContentType::Movie, 2019, None);

        let mut filter = ExplorerFilter::default();
        assert!(filter.matches_date(&record));
        assert!(!filter.matches_date(&undated));

        filter.year = Some(2020);
        filter.month = Some(4);
        assert!(!filter.matches_date(&record));
        filter.month = Some(3);
        assert!(filter.matches_date(&record));

        assert!(filter.matches_country("Spain"));
        filter.countries.insert("India".into());
        assert!(!filter.matches_country("Spain"));
        assert!(filter.matches_country("India"));
    }
}

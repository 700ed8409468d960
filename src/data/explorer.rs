//! Country / year / month explorer.
//!
//! Works on the complete record list, independent of the sidebar filters and
//! of the director/cast completeness rule.

use std::collections::BTreeSet;

use chrono::Datelike;

use super::aggregate::{rank, top_values, Counts};
use super::explode::MultiField;
use super::filter::ExplorerFilter;
use super::model::Record;

/// Distinct `date_added` years, ascending.
pub fn available_years(records: &[&Record]) -> Vec<i32> {
    records
        .iter()
        .filter_map(|r| r.date_added.map(|d| d.year()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The `n` most frequent countries, used as selector options.
pub fn top_countries(records: &[&Record], n: usize) -> Vec<String> {
    top_values(records, MultiField::Country, n)
        .into_iter()
        .map(|(country, _)| country)
        .collect()
}

/// Titles per country for the dated records matching `filter`, most
/// frequent first.
pub fn country_counts(records: &[&Record], filter: &ExplorerFilter) -> Counts {
    let countries = records
        .iter()
        .filter(|r| filter.matches_date(r))
        .flat_map(|r| MultiField::Country.values(r))
        .filter(|c| filter.matches_country(c));
    rank(countries, usize::MAX)
}

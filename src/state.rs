use std::path::{Path, PathBuf};
use std::sync::Arc;

use catalog_dashboard::config::DashboardConfig;
use catalog_dashboard::data::aggregate::{
    self, CategoricalField, Counts, CrossTab, Granularity, Heatmap, TimeBucket, TrendPoint,
};
use catalog_dashboard::data::cache::CatalogCache;
use catalog_dashboard::data::error::LoadError;
use catalog_dashboard::data::explode::MultiField;
use catalog_dashboard::data::explorer;
use catalog_dashboard::data::filter::{self, ExplorerFilter, FilterState};
use catalog_dashboard::data::model::{Catalog, ContentType, Record};
use catalog_dashboard::data::stats::BoxSummary;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    MainMetrics,
    Trends,
    ContentAnalysis,
    CastCrew,
    Explorer,
    Details,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::MainMetrics,
        Tab::Trends,
        Tab::ContentAnalysis,
        Tab::CastCrew,
        Tab::Explorer,
        Tab::Details,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::MainMetrics => "Main Metrics",
            Tab::Trends => "Trends & Patterns",
            Tab::ContentAnalysis => "Content Analysis",
            Tab::CastCrew => "Cast & Crew",
            Tab::Explorer => "Country / Year / Month Explorer",
            Tab::Details => "Content Details",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// One row of the content listing.
#[derive(Debug, Clone)]
pub struct DetailRow {
    pub title: String,
    pub content_type: ContentType,
    pub release_year: i32,
    pub duration: String,
    pub rating: String,
}

impl From<&Record> for DetailRow {
    fn from(r: &Record) -> Self {
        DetailRow {
            title: r.title.clone(),
            content_type: r.content_type,
            release_year: r.release_year,
            duration: r.duration.clone().unwrap_or_default(),
            rating: r.rating.clone().unwrap_or_default(),
        }
    }
}

/// Everything the charts show for the current sidebar filters.
#[derive(Debug, Clone, Default)]
pub struct DashboardViews {
    pub visible: usize,
    pub type_distribution: Counts,
    pub rating_distribution: Counts,
    pub durations: Vec<(ContentType, Option<BoxSummary>)>,
    pub top_genres: Counts,
    pub release_trend: Vec<(i32, usize)>,
    pub added_trend: Vec<(TimeBucket, usize)>,
    pub monthly: [usize; 12],
    pub genre_trends: Vec<TrendPoint>,
    pub top_countries: Counts,
    pub rating_durations: Vec<(String, Option<BoxSummary>)>,
    pub heatmap: Heatmap,
    pub top_directors: Counts,
    pub top_actors: Counts,
    pub director_genre: CrossTab,
    pub details: Vec<DetailRow>,
}

impl DashboardViews {
    pub fn compute(view: &[&Record], config: &DashboardConfig, granularity: Granularity) -> Self {
        let placeholder = config.placeholder.as_str();
        DashboardViews {
            visible: view.len(),
            type_distribution: aggregate::categorical_distribution(view, CategoricalField::Type),
            rating_distribution: aggregate::categorical_distribution(
                view,
                CategoricalField::Rating,
            ),
            durations: aggregate::duration_by_type(view)
                .into_iter()
                .map(|(kind, values)| (kind, BoxSummary::from_values(&values)))
                .collect(),
            top_genres: aggregate::top_values(view, MultiField::Genre, config.top_genres),
            release_trend: aggregate::release_trend(view),
            added_trend: aggregate::added_trend(view, granularity),
            monthly: aggregate::monthly_pattern(view),
            genre_trends: aggregate::genre_trends(view, config.trend_genres),
            top_countries: aggregate::top_values(view, MultiField::Country, config.top_countries),
            rating_durations: aggregate::movie_duration_by_rating(view)
                .into_iter()
                .map(|(rating, values)| (rating, BoxSummary::from_values(&values)))
                .collect(),
            heatmap: aggregate::release_heatmap(view),
            top_directors: aggregate::top_people(
                view,
                MultiField::Director,
                config.top_people,
                placeholder,
            ),
            top_actors: aggregate::top_people(view, MultiField::Cast, config.top_people, placeholder),
            director_genre: aggregate::director_genre_crosstab(
                view,
                config.crosstab_directors,
                placeholder,
            ),
            details: aggregate::content_details(view)
                .into_iter()
                .map(DetailRow::from)
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    cache: CatalogCache,

    /// Loaded catalog (None until a file is opened).
    pub catalog: Option<Arc<Catalog>>,

    /// Source of the loaded catalog.
    pub dataset_path: Option<PathBuf>,

    /// Sidebar selection.
    pub filters: FilterState,

    /// Series for the current sidebar selection (cached).
    pub views: DashboardViews,

    /// Bucket size of the "titles added" chart.
    pub added_granularity: Granularity,

    /// Explorer selection and its cached result.
    pub explorer: ExplorerFilter,
    pub explorer_years: Vec<i32>,
    pub explorer_countries: Vec<String>,
    pub explorer_counts: Counts,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            cache: CatalogCache::new(config.load_options()),
            config,
            catalog: None,
            dataset_path: None,
            filters: FilterState {
                types: ContentType::ALL.into_iter().collect(),
                year_range: (0, 0),
            },
            views: DashboardViews::default(),
            added_granularity: Granularity::Year,
            explorer: ExplorerFilter::default(),
            explorer_years: Vec::new(),
            explorer_countries: Vec::new(),
            explorer_counts: Vec::new(),
            tab: Tab::MainMetrics,
            status_message: None,
        }
    }

    /// Load (or fetch from cache) the catalog at `path`.
    pub fn open(&mut self, path: &Path) {
        let result = self.cache.get_or_load(path);
        self.accept(path, result);
    }

    /// Re-read the current catalog from disk.
    pub fn reload(&mut self) {
        let Some(path) = self.dataset_path.clone() else {
            return;
        };
        let result = self.cache.reload(&path);
        self.accept(&path, result);
    }

    fn accept(&mut self, path: &Path, result: Result<Arc<Catalog>, LoadError>) {
        match result {
            Ok(catalog) => {
                log::info!(
                    "Loaded {} titles ({} with director and cast) from {}",
                    catalog.len(),
                    catalog.canonical_len(),
                    path.display()
                );
                self.dataset_path = Some(path.to_path_buf());
                self.set_catalog(catalog);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded catalog, reset filters and explorer defaults.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        self.filters = FilterState::for_catalog(&catalog);

        let all = catalog.all();
        self.explorer_years = explorer::available_years(&all);
        self.explorer_countries =
            explorer::top_countries(&all, self.config.explorer_country_options);
        self.explorer = ExplorerFilter {
            year: self.explorer_years.last().copied(),
            month: None,
            countries: self
                .explorer_countries
                .iter()
                .take(self.config.explorer_default_countries)
                .cloned()
                .collect(),
        };

        self.catalog = Some(catalog);
        self.status_message = None;
        self.refilter();
        self.refresh_explorer();
    }

    /// Recompute the chart series after a sidebar change.
    pub fn refilter(&mut self) {
        if let Some(catalog) = &self.catalog {
            let view = filter::apply(&catalog.canonical(), &self.filters);
            self.views = DashboardViews::compute(&view, &self.config, self.added_granularity);
        }
    }

    /// Recompute the explorer counts after an explorer change.
    pub fn refresh_explorer(&mut self) {
        if let Some(catalog) = &self.catalog {
            self.explorer_counts = explorer::country_counts(&catalog.all(), &self.explorer);
        }
    }

    pub fn toggle_type(&mut self, kind: ContentType) {
        if !self.filters.types.remove(&kind) {
            self.filters.types.insert(kind);
        }
        self.refilter();
    }

    pub fn toggle_explorer_country(&mut self, country: &str) {
        if !self.explorer.countries.remove(country) {
            self.explorer.countries.insert(country.to_string());
        }
        self.refresh_explorer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(name: &str, director: &str, country: &str, genres: &str) -> Record {
        let mut record = Record::new(name.to_string(), ContentType::Movie, 2020, None)
            .with_duration(Some("90 min".to_string()));
        record.director = Some(director.to_string());
        record.cast = Some("Cast".to_string());
        record.country = Some(country.to_string());
        record.listed_in = Some(genres.to_string());
        record
    }

    #[test]
    fn views_follow_config_limits() {
        let catalog = Catalog::from_records(vec![
            title("A", "Ann", "India, Spain", "Dramas, Comedies, Thrillers"),
            title("B", "Bob", "India", "Dramas, Comedies"),
            title("C", "Unknown", "Japan", "Dramas"),
        ]);
        let config = DashboardConfig {
            placeholder: "Unknown".to_string(),
            top_genres: 2,
            top_countries: 1,
            top_people: 5,
            crosstab_directors: 1,
            ..DashboardConfig::default()
        };

        let views = DashboardViews::compute(&catalog.canonical(), &config, Granularity::Year);

        assert_eq!(views.visible, 3);
        assert_eq!(
            views.top_genres,
            vec![("Dramas".to_string(), 3), ("Comedies".to_string(), 2)]
        );
        assert_eq!(views.top_countries, vec![("India".to_string(), 2)]);
        assert_eq!(
            views.top_directors,
            vec![("Ann".to_string(), 1), ("Bob".to_string(), 1)]
        );
        assert_eq!(views.director_genre.rows, vec!["Ann".to_string()]);
        assert_eq!(views.details.len(), 3);
    }
}

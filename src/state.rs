use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::cache::{CacheKey, MemoCache};
use crate::config::DashboardConfig;
use crate::data::filter::{ViewFilters, Views, build_views, suggest_names, unique_names};
use crate::data::loader;
use crate::data::model::{DataSource, NamesDataset};
use crate::data::wonders::one_hit_wonders;
use crate::error::LoadError;
use crate::export::{ExportRow, export_rows};

const FETCH_DATA: &str = "fetch_data";
const ONE_HIT_WONDERS: &str = "one_hit_wonders";
const UNIQUE_NAMES: &str = "unique_names";

// ---------------------------------------------------------------------------
// Tabs / exportable views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    NameTrends,
    YearOverview,
}

/// One of the four result sets, as offered in the Export menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Trend,
    OneHitWonders,
    TopNames,
    Detail,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Trend,
        ViewKind::OneHitWonders,
        ViewKind::TopNames,
        ViewKind::Detail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Trend => "Name trend",
            ViewKind::OneHitWonders => "One-hit wonders",
            ViewKind::TopNames => "Top names",
            ViewKind::Detail => "Detailed name data",
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            ViewKind::Trend => "name_trend",
            ViewKind::OneHitWonders => "one_hit_wonders",
            ViewKind::TopNames => "top_names",
            ViewKind::Detail => "name_detail",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Pipeline: `load` → `one_hit_wonders` → `build_views` → render. The first
/// two steps are memoized in `cache`; views are rebuilt only when the
/// filters change.
pub struct AppState {
    pub config: DashboardConfig,

    pub cache: MemoCache,

    /// Where the current dataset came from (or is about to).
    pub source: DataSource,

    /// Loaded dataset (None until the first successful load).
    pub dataset: Option<Arc<NamesDataset>>,

    /// Records of names seen in exactly one year.
    pub one_hit_wonders: Option<Arc<NamesDataset>>,

    /// Sorted distinct names, for suggestions.
    pub unique_names: Option<Arc<Vec<String>>>,

    /// Current side-panel selections.
    pub filters: ViewFilters,

    /// Rows for the charts and tables (cached).
    pub views: Views,

    /// Filters `views` was built with.
    views_for: Option<ViewFilters>,

    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Load waiting to run on a later frame.
    pub pending_load: Option<DataSource>,

    /// Set once the "Downloading…" frame has been painted.
    load_armed: bool,
}

impl AppState {
    /// Fresh state with a remote load already queued.
    pub fn new(config: DashboardConfig) -> Self {
        let source = DataSource::Remote(config.source_url.clone());
        let filters = ViewFilters {
            name_query: String::new(),
            year: config.default_year,
            gender: Default::default(),
            top_n: config.default_top_n(),
        };
        Self {
            config,
            cache: MemoCache::new(),
            source: source.clone(),
            dataset: None,
            one_hit_wonders: None,
            unique_names: None,
            filters,
            views: Views::default(),
            views_for: None,
            active_tab: Tab::default(),
            status_message: None,
            pending_load: Some(source),
            load_armed: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Queue a load; it runs after the next frame has been painted.
    pub fn request_load(&mut self, source: DataSource) {
        self.pending_load = Some(source);
        self.load_armed = false;
    }

    /// Forget every loaded archive and download again. Derived results are
    /// keyed by dataset content and stay valid if the data did not change.
    pub fn reload_remote(&mut self) {
        let dropped = self.cache.invalidate(FETCH_DATA);
        log::info!("Invalidated {dropped} cached datasets");
        self.request_load(DataSource::Remote(self.config.source_url.clone()));
    }

    /// Called once per frame. The first call after [`request_load`] only
    /// arms the load so the notice gets painted; the second one blocks.
    /// Returns `true` when a repaint is needed.
    ///
    /// [`request_load`]: Self::request_load
    pub fn run_pending_load(&mut self) -> bool {
        if self.pending_load.is_none() {
            return false;
        }
        if !self.load_armed {
            self.load_armed = true;
            return true;
        }
        if let Some(source) = self.pending_load.take() {
            self.load_armed = false;
            if let Err(e) = self.load(source) {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
        true
    }

    /// Load (or fetch from cache) the dataset for `source` and derive
    /// everything downstream of it.
    pub fn load(&mut self, source: DataSource) -> Result<(), LoadError> {
        let config = &self.config;
        let dataset = self
            .cache
            .get_or_try_insert_with(CacheKey::new(FETCH_DATA, &source), || {
                loader::load(&source, config)
            })?;
        self.source = source;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Ingest a dataset: derive the one-hit-wonder subset and name list,
    /// then rebuild the views. Derived results of earlier datasets are
    /// dropped; loaded archives stay cached until a reload.
    pub fn set_dataset(&mut self, dataset: Arc<NamesDataset>) {
        let wonders_key = CacheKey::new(ONE_HIT_WONDERS, &*dataset);
        let names_key = CacheKey::new(UNIQUE_NAMES, &*dataset);
        let wonders = self
            .cache
            .get_or_insert_with(wonders_key, || one_hit_wonders(&dataset));
        let names = self
            .cache
            .get_or_insert_with(names_key, || unique_names(&dataset));
        let stale = self.cache.retain_only(&wonders_key) + self.cache.retain_only(&names_key);
        if stale > 0 {
            log::debug!("Dropped {stale} derived results of earlier datasets");
        }

        log::debug!(
            "Dataset {:016x}: {} records, {} names",
            dataset.fingerprint(),
            dataset.len(),
            names.len()
        );
        self.dataset = Some(dataset);
        self.one_hit_wonders = Some(wonders);
        self.unique_names = Some(names);
        self.status_message = None;
        self.views_for = None;
        self.refresh_views();
    }

    /// Recompute the views if the filters changed since the last build.
    pub fn refresh_views(&mut self) {
        if self.views_for.as_ref() == Some(&self.filters) {
            return;
        }
        let (Some(dataset), Some(wonders)) = (&self.dataset, &self.one_hit_wonders) else {
            return;
        };
        self.views = build_views(dataset, wonders, &self.filters, self.config.detail_limit);
        self.views_for = Some(self.filters.clone());
    }

    /// Whether the trend chart has anything to draw.
    pub fn has_trend(&self) -> bool {
        !self.views.trend.is_empty()
    }

    /// Names close to the current query, offered while the query itself
    /// has no trend rows. Views are brought up to date first.
    pub fn name_suggestions(&mut self, limit: usize) -> Vec<String> {
        self.refresh_views();
        if self.filters.name_query.is_empty() || self.has_trend() {
            return Vec::new();
        }
        let Some(names) = &self.unique_names else {
            return Vec::new();
        };
        suggest_names(names, &self.filters.name_query, limit)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn rows_for(&self, kind: ViewKind) -> Vec<ExportRow> {
        match kind {
            ViewKind::Trend => self.views.trend.iter().map(ExportRow::from).collect(),
            ViewKind::OneHitWonders => self
                .views
                .one_hit_for_year
                .iter()
                .map(ExportRow::from)
                .collect(),
            ViewKind::TopNames => self.views.top_names.iter().map(ExportRow::from).collect(),
            ViewKind::Detail => self.views.detail.iter().map(ExportRow::from).collect(),
        }
    }

    /// Write one view to disk. Returns the number of rows written.
    pub fn export_view(&self, kind: ViewKind, path: &Path) -> Result<usize> {
        let rows = self.rows_for(kind);
        export_rows(path, &rows)?;
        Ok(rows.len())
    }
}

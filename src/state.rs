use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{
    average_by_group, insights, salary_distribution, summary_stats, GroupDistribution, GroupMean,
    Insights, SummaryStats,
};
use crate::data::cache::DatasetCache;
use crate::data::error::{EmptyView, LoadError};
use crate::data::filter::{default_criteria, filter, Criteria};
use crate::data::model::{Category, Field, SalaryDataset};

// ---------------------------------------------------------------------------
// Derived numbers for one view
// ---------------------------------------------------------------------------

/// Everything the central panel shows for a non-empty view.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub stats: SummaryStats,
    pub by_title: Vec<GroupMean>,
    pub by_experience: Vec<GroupDistribution>,
    pub by_remote: Vec<GroupDistribution>,
    pub insights: Insights,
}

impl DashboardSummary {
    pub fn compute(view: &SalaryDataset) -> Result<Self, EmptyView> {
        Ok(Self {
            stats: summary_stats(view)?,
            by_title: average_by_group(view, Field::JobTitle)?,
            by_experience: salary_distribution(view, Field::ExperienceLevel)?,
            by_remote: salary_distribution(view, Field::RemoteRatio)?,
            insights: insights(view)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    cache: DatasetCache,

    /// Path of the dataset on screen.
    pub source: Option<PathBuf>,

    /// Loaded dataset (shared with the cache).
    pub dataset: Option<Arc<SalaryDataset>>,

    /// Per-field filter selections.
    pub criteria: Criteria,

    /// Records passing the current criteria (cached).
    pub view: SalaryDataset,

    /// Aggregates of `view`; `None` when the view is empty.
    pub summary: Option<DashboardSummary>,

    /// One colour map per field, built from the full dataset.
    pub colors: BTreeMap<Field, ColorMap>,

    /// How many job titles the default selection holds.
    pub top_titles: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(top_titles: usize) -> Self {
        Self {
            cache: DatasetCache::new(),
            source: None,
            dataset: None,
            criteria: Criteria::default(),
            view: SalaryDataset::default(),
            summary: None,
            colors: BTreeMap::new(),
            top_titles,
            status_message: None,
        }
    }

    /// Load `path` through the cache and show it with the default filters.
    pub fn open(&mut self, path: &Path) -> Result<(), LoadError> {
        let dataset = self.cache.get_or_load(path)?;
        log::info!(
            "Showing {} ({} records, extra columns {:?})",
            path.display(),
            dataset.len(),
            dataset.extra_columns()
        );
        self.source = Some(path.to_path_buf());
        self.set_dataset(dataset);
        Ok(())
    }

    /// Ingest a dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: Arc<SalaryDataset>) {
        self.colors = Field::ALL
            .iter()
            .map(|&field| (field, ColorMap::new(&dataset.distinct_values(field))))
            .collect();
        self.criteria = default_criteria(&dataset, self.top_titles);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `view` and `summary` after a criteria change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.view = filter(ds, &self.criteria);
        self.summary = DashboardSummary::compute(&self.view).ok();
    }

    /// Back to the opening selection.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = default_criteria(ds, self.top_titles);
            self.refilter();
        }
    }

    /// Toggle a single value in a field's filter.
    pub fn toggle_filter_value(&mut self, field: Field, value: &Category) {
        self.criteria.toggle(field, value);
        self.refilter();
    }

    /// Select all values of a field.
    pub fn select_all(&mut self, field: Field) {
        if let Some(ds) = &self.dataset {
            self.criteria.select_all(ds, field);
            self.refilter();
        }
    }

    /// Deselect all values of a field.
    pub fn select_none(&mut self, field: Field) {
        self.criteria.select_none(field);
        self.refilter();
    }

    /// Select only the most common job titles.
    pub fn select_top_titles(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria
                .set(Field::JobTitle, ds.top_categories(Field::JobTitle, self.top_titles));
            self.refilter();
        }
    }

    pub fn color_for(&self, field: Field, value: &Category) -> eframe::egui::Color32 {
        self.colors
            .get(&field)
            .map(|map| map.color_for(value))
            .unwrap_or(eframe::egui::Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
,job_title,experience_level,remote_ratio,salary_in_usd
0,Engineer,SE,100,150000
1,Engineer,EN,0,80000
2,Analyst,SE,50,95000
3,Analyst,EN,100,N/A
4,Scientist,MI,0,170000
";

    fn opened(top_titles: usize) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tech_jobs.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut state = AppState::new(top_titles);
        state.open(&path).unwrap();
        (dir, state)
    }

    #[test]
    fn opening_applies_default_selection() {
        let (_dir, state) = opened(2);

        // Engineer (2) and Analyst (1 after cleanup, seen before Scientist)
        let titles = state.criteria.selected(Field::JobTitle).unwrap();
        assert_eq!(titles.len(), 2);
        assert!(!titles.contains(&Category::text("Scientist")));

        assert_eq!(state.view.len(), 3);
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.stats.count, 3);
        assert_eq!(summary.stats.max_salary, 150_000);
        assert_eq!(summary.by_title[0].key, Category::text("Engineer"));
    }

    #[test]
    fn empty_selection_clears_summary() {
        let (_dir, mut state) = opened(10);
        assert!(state.summary.is_some());

        state.select_none(Field::ExperienceLevel);
        assert!(state.view.is_empty());
        assert!(state.summary.is_none());

        state.toggle_filter_value(Field::ExperienceLevel, &Category::text("MI"));
        assert_eq!(state.view.len(), 1);
        assert_eq!(state.summary.as_ref().map(|s| s.stats.mean_salary), Some(170_000));

        state.reset_filters();
        assert_eq!(state.view.len(), 4);
    }

    #[test]
    fn failed_open_keeps_current_dataset() {
        let (dir, mut state) = opened(10);
        let before = state.view.len();

        assert!(state.open(&dir.path().join("missing.csv")).is_err());
        assert_eq!(state.view.len(), before);
        assert!(state.dataset.is_some());
    }
}

use std::collections::{BTreeMap, BTreeSet};

use super::model::{Category, Field, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Criteria: which values are selected per field
// ---------------------------------------------------------------------------

/// Per-field selection state: maps field → set of selected values.
///
/// Unlike a "no constraint" default, a field that is absent or has an empty
/// set selects nothing, so `Criteria::default()` matches no record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    selected: BTreeMap<Field, BTreeSet<Category>>,
}

impl Criteria {
    /// Criteria with every distinct value of every field selected.
    pub fn select_everything(dataset: &SalaryDataset) -> Self {
        let mut criteria = Criteria::default();
        for field in Field::ALL {
            criteria.select_all(dataset, field);
        }
        criteria
    }

    pub fn selected(&self, field: Field) -> Option<&BTreeSet<Category>> {
        self.selected.get(&field)
    }

    pub fn is_selected(&self, field: Field, value: &Category) -> bool {
        self.selected
            .get(&field)
            .is_some_and(|set| set.contains(value))
    }

    /// Replace the selection for `field`.
    pub fn set(&mut self, field: Field, values: impl IntoIterator<Item = Category>) {
        self.selected.insert(field, values.into_iter().collect());
    }

    /// Toggle a single value in a field's selection.
    pub fn toggle(&mut self, field: Field, value: &Category) {
        let selected = self.selected.entry(field).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
    }

    pub fn select_all(&mut self, dataset: &SalaryDataset, field: Field) {
        self.set(field, dataset.distinct_values(field));
    }

    pub fn select_none(&mut self, field: Field) {
        self.selected.insert(field, BTreeSet::new());
    }

    /// Whether `record` passes every field's selection.
    ///
    /// A missing value never passes.
    pub fn matches(&self, record: &SalaryRecord) -> bool {
        Field::ALL.iter().all(|&field| match record.category(field) {
            Some(value) => self.is_selected(field, &value),
            None => false,
        })
    }
}

/// The dashboard's opening selection: the `top_titles` most common job
/// titles, every experience level and every remote ratio.
pub fn default_criteria(dataset: &SalaryDataset, top_titles: usize) -> Criteria {
    let mut criteria = Criteria::select_everything(dataset);
    criteria.set(
        Field::JobTitle,
        dataset.top_categories(Field::JobTitle, top_titles),
    );
    criteria
}

/// Records of `dataset` passing `criteria`, in their original order.
///
/// The result is a fresh dataset; the input is never modified.
pub fn filter(dataset: &SalaryDataset, criteria: &Criteria) -> SalaryDataset {
    let records: Vec<SalaryRecord> = dataset
        .records()
        .iter()
        .filter(|rec| criteria.matches(rec))
        .cloned()
        .collect();

    log::debug!("Filter kept {} of {} records", records.len(), dataset.len());
    SalaryDataset::from_records(records, dataset.extra_columns().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{dataset, record};

    fn sample() -> SalaryDataset {
        dataset(vec![
            record("Engineer", "Senior", 100, 150_000.0),
            record("Engineer", "Junior", 0, 80_000.0),
            record("Analyst", "Senior", 50, 95_000.0),
            record("Analyst", "Junior", 100, 60_000.0),
            record("Scientist", "Senior", 0, 170_000.0),
        ])
    }

    #[test]
    fn empty_criteria_select_nothing() {
        let ds = sample();
        assert!(filter(&ds, &Criteria::default()).is_empty());

        let mut criteria = Criteria::select_everything(&ds);
        criteria.select_none(Field::RemoteRatio);
        assert!(filter(&ds, &criteria).is_empty());
    }

    #[test]
    fn everything_selected_keeps_everything() {
        let ds = sample();
        let view = filter(&ds, &Criteria::select_everything(&ds));
        assert_eq!(view.records(), ds.records());
    }

    #[test]
    fn filter_is_an_order_preserving_subsequence() {
        let ds = sample();
        let mut criteria = Criteria::select_everything(&ds);
        criteria.set(Field::ExperienceLevel, [Category::text("Senior")]);
        criteria.set(Field::RemoteRatio, [Category::Integer(0), Category::Integer(100)]);

        let view = filter(&ds, &criteria);

        assert!(view.records().iter().all(|r| criteria.matches(r)));
        let titles: Vec<&str> = view
            .records()
            .iter()
            .filter_map(|r| r.job_title.as_deref())
            .collect();
        assert_eq!(titles, vec!["Engineer", "Scientist"]);
        // base dataset untouched
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn senior_only_example() {
        let ds = dataset(vec![
            record("Engineer", "Senior", 100, 150_000.0),
            record("Engineer", "Junior", 0, 80_000.0),
        ]);
        let mut criteria = Criteria::select_everything(&ds);
        criteria.set(Field::ExperienceLevel, [Category::text("Senior")]);

        let view = filter(&ds, &criteria);
        assert_eq!(view.records(), &ds.records()[..1]);
    }

    #[test]
    fn unknown_value_yields_empty_view() {
        let ds = sample();
        let mut criteria = Criteria::select_everything(&ds);
        criteria.set(Field::RemoteRatio, [Category::Integer(999)]);
        assert!(filter(&ds, &criteria).is_empty());
    }

    #[test]
    fn missing_values_never_pass() {
        let mut no_title = record("Engineer", "Senior", 0, 1.0);
        no_title.job_title = None;
        let ds = dataset(vec![no_title, record("Engineer", "Senior", 0, 2.0)]);

        let view = filter(&ds, &Criteria::select_everything(&ds));
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].salary_in_usd, 2.0);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut criteria = Criteria::default();
        let value = Category::text("Engineer");
        criteria.toggle(Field::JobTitle, &value);
        assert!(criteria.is_selected(Field::JobTitle, &value));
        criteria.toggle(Field::JobTitle, &value);
        assert!(!criteria.is_selected(Field::JobTitle, &value));
    }

    #[test]
    fn default_criteria_seed_top_titles() {
        let ds = sample();
        let criteria = default_criteria(&ds, 2);
        let titles = criteria.selected(Field::JobTitle).unwrap();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&Category::text("Engineer")));
        assert!(titles.contains(&Category::text("Analyst")));
        assert_eq!(
            criteria.selected(Field::RemoteRatio).map(|s| s.len()),
            Some(3)
        );
    }
}

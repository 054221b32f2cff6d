use std::collections::HashMap;

use super::error::EmptyView;
use super::model::{Category, Field, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Headline numbers for a view. Salaries are truncated for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean_salary: u64,
    pub max_salary: u64,
}

pub fn summary_stats(dataset: &SalaryDataset) -> Result<SummaryStats, EmptyView> {
    if dataset.is_empty() {
        return Err(EmptyView);
    }
    let records = dataset.records();
    let total: f64 = records.iter().map(|r| r.salary_in_usd).sum();
    let max = records
        .iter()
        .map(|r| r.salary_in_usd)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(SummaryStats {
        count: records.len(),
        mean_salary: (total / records.len() as f64) as u64,
        max_salary: max as u64,
    })
}

// ---------------------------------------------------------------------------
// Group-by mean
// ---------------------------------------------------------------------------

/// Mean salary of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: Category,
    pub mean_salary: f64,
    /// Number of records in the group.
    pub count: usize,
}

/// Salaries grouped by `field`, groups in first-encountered order.
/// Records with a missing `field` value belong to no group.
fn group_salaries(dataset: &SalaryDataset, field: Field) -> Vec<(Category, Vec<f64>)> {
    let mut groups: Vec<(Category, Vec<f64>)> = Vec::new();
    let mut index: HashMap<Category, usize> = HashMap::new();

    for rec in dataset.records() {
        let Some(key) = rec.category(field) else {
            continue;
        };
        match index.get(&key) {
            Some(&i) => groups[i].1.push(rec.salary_in_usd),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![rec.salary_in_usd]));
            }
        }
    }
    groups
}

/// Mean salary per value of `group_field`, highest mean first.
///
/// Equal means keep first-encountered order.
pub fn average_by_group(
    dataset: &SalaryDataset,
    group_field: Field,
) -> Result<Vec<GroupMean>, EmptyView> {
    if dataset.is_empty() {
        return Err(EmptyView);
    }

    let mut means: Vec<GroupMean> = group_salaries(dataset, group_field)
        .into_iter()
        .map(|(key, salaries)| GroupMean {
            key,
            mean_salary: salaries.iter().sum::<f64>() / salaries.len() as f64,
            count: salaries.len(),
        })
        .collect();

    means.sort_by(|a, b| b.mean_salary.total_cmp(&a.mean_salary));
    Ok(means)
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// Best-paying experience level and remote ratio in a view.
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub top_experience: Option<GroupMean>,
    pub top_remote: Option<GroupMean>,
}

pub fn insights(dataset: &SalaryDataset) -> Result<Insights, EmptyView> {
    let top = |field| -> Result<Option<GroupMean>, EmptyView> {
        Ok(average_by_group(dataset, field)?.into_iter().next())
    };
    Ok(Insights {
        top_experience: top(Field::ExperienceLevel)?,
        top_remote: top(Field::RemoteRatio)?,
    })
}

// ---------------------------------------------------------------------------
// Distribution (box plots)
// ---------------------------------------------------------------------------

/// Five-number summary of a group's salaries, Tukey style: whiskers reach the
/// furthest point within 1.5 × IQR of the quartiles.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDistribution {
    pub key: Category,
    pub count: usize,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

/// Salary distribution per value of `field`, groups ascending by key.
pub fn salary_distribution(
    dataset: &SalaryDataset,
    field: Field,
) -> Result<Vec<GroupDistribution>, EmptyView> {
    if dataset.is_empty() {
        return Err(EmptyView);
    }

    let mut out: Vec<GroupDistribution> = group_salaries(dataset, field)
        .into_iter()
        .map(|(key, mut salaries)| {
            salaries.sort_by(f64::total_cmp);
            let q1 = quantile(&salaries, 0.25);
            let median = quantile(&salaries, 0.5);
            let q3 = quantile(&salaries, 0.75);
            let iqr = q3 - q1;
            let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

            // salaries is sorted and non-empty, so both finds succeed
            let lower_whisker = salaries
                .iter()
                .copied()
                .find(|v| *v >= lo_fence)
                .unwrap_or(q1);
            let upper_whisker = salaries
                .iter()
                .rev()
                .copied()
                .find(|v| *v <= hi_fence)
                .unwrap_or(q3);

            GroupDistribution {
                key,
                count: salaries.len(),
                lower_whisker,
                q1,
                median,
                q3,
                upper_whisker,
            }
        })
        .collect();

    out.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(out)
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ---------------------------------------------------------------------------
// Table ordering
// ---------------------------------------------------------------------------

/// Records ordered by salary, highest first; equal salaries keep data order.
pub fn sorted_by_salary_desc(dataset: &SalaryDataset) -> Vec<&SalaryRecord> {
    let mut rows: Vec<&SalaryRecord> = dataset.records().iter().collect();
    rows.sort_by(|a, b| b.salary_in_usd.total_cmp(&a.salary_in_usd));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, Criteria};
    use crate::data::model::tests::{dataset, record};

    fn sample() -> SalaryDataset {
        dataset(vec![
            record("Engineer", "SE", 100, 150_000.0),
            record("Engineer", "EN", 0, 80_000.0),
            record("Analyst", "SE", 50, 95_000.0),
            record("Analyst", "EN", 100, 60_000.0),
            record("Scientist", "MI", 0, 170_000.5),
        ])
    }

    #[test]
    fn summary_of_senior_example() {
        let ds = dataset(vec![
            record("Engineer", "Senior", 100, 150_000.0),
            record("Engineer", "Junior", 0, 80_000.0),
        ]);
        let mut criteria = Criteria::select_everything(&ds);
        criteria.set(Field::ExperienceLevel, [Category::text("Senior")]);

        let stats = summary_stats(&filter(&ds, &criteria)).unwrap();
        assert_eq!(
            stats,
            SummaryStats {
                count: 1,
                mean_salary: 150_000,
                max_salary: 150_000,
            }
        );
    }

    #[test]
    fn summary_truncates_and_bounds() {
        let ds = sample();
        let stats = summary_stats(&ds).unwrap();
        assert_eq!(stats.count, ds.len());
        // (150000 + 80000 + 95000 + 60000 + 170000.5) / 5 = 111000.1
        assert_eq!(stats.mean_salary, 111_000);
        assert_eq!(stats.max_salary, 170_000);
        assert!(stats.max_salary >= stats.mean_salary);
    }

    #[test]
    fn aggregations_reject_empty_views() {
        let empty = SalaryDataset::default();
        assert_eq!(summary_stats(&empty), Err(EmptyView));
        assert_eq!(average_by_group(&empty, Field::JobTitle), Err(EmptyView));
        assert_eq!(insights(&empty), Err(EmptyView));
        assert_eq!(salary_distribution(&empty, Field::RemoteRatio), Err(EmptyView));
    }

    #[test]
    fn average_by_group_sorted_descending() {
        let means = average_by_group(&sample(), Field::JobTitle).unwrap();
        let keys: Vec<String> = means.iter().map(|g| g.key.to_string()).collect();
        assert_eq!(keys, vec!["Scientist", "Engineer", "Analyst"]);
        assert_eq!(means[1].mean_salary, 115_000.0);
        assert_eq!(means[2].mean_salary, 77_500.0);
    }

    #[test]
    fn average_by_group_partitions_records() {
        let ds = sample();
        for field in Field::ALL {
            let means = average_by_group(&ds, field).unwrap();
            assert_eq!(means.iter().map(|g| g.count).sum::<usize>(), ds.len());
        }
    }

    #[test]
    fn equal_means_keep_first_seen_order() {
        let ds = dataset(vec![
            record("B", "SE", 0, 100.0),
            record("A", "SE", 0, 100.0),
            record("C", "SE", 0, 200.0),
        ]);
        let keys: Vec<String> = average_by_group(&ds, Field::JobTitle)
            .unwrap()
            .iter()
            .map(|g| g.key.to_string())
            .collect();
        assert_eq!(keys, vec!["C", "B", "A"]);
    }

    #[test]
    fn insights_pick_the_top_groups() {
        let found = insights(&sample()).unwrap();
        let exp = found.top_experience.unwrap();
        assert_eq!(exp.key, Category::text("MI"));
        assert_eq!(exp.mean_salary, 170_000.5);

        let remote = found.top_remote.unwrap();
        // 0 → (80000 + 170000.5) / 2, 100 → 105000, 50 → 95000
        assert_eq!(remote.key, Category::Integer(0));
    }

    #[test]
    fn distribution_quartiles_and_whiskers() {
        let mut records: Vec<SalaryRecord> = [10.0, 20.0, 30.0, 40.0, 50.0]
            .into_iter()
            .map(|s| record("Engineer", "SE", 0, s))
            .collect();
        records.push(record("Engineer", "SE", 0, 1_000.0));
        records.push(record("Engineer", "EN", 100, 7.0));
        let ds = dataset(records);

        let dist = salary_distribution(&ds, Field::ExperienceLevel).unwrap();
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].key, Category::text("EN"));
        assert_eq!(dist[0].median, 7.0);

        let se = &dist[1];
        assert_eq!(se.count, 6);
        // sorted: 10 20 30 40 50 1000
        assert_eq!(se.q1, 22.5);
        assert_eq!(se.median, 35.0);
        assert_eq!(se.q3, 47.5);
        assert_eq!(se.lower_whisker, 10.0);
        // fence = 47.5 + 1.5 * 25 = 85, so 1000 is an outlier
        assert_eq!(se.upper_whisker, 50.0);
    }

    #[test]
    fn table_order_is_salary_descending() {
        let ds = sample();
        let salaries: Vec<f64> = sorted_by_salary_desc(&ds)
            .iter()
            .map(|r| r.salary_in_usd)
            .collect();
        assert_eq!(salaries, vec![170_000.5, 150_000.0, 95_000.0, 80_000.0, 60_000.0]);
    }
}

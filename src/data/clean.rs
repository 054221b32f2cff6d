//! Load-time cleanup: applied exactly once, between reading a [`RawTable`] and
//! handing out a [`SalaryDataset`].
//!
//! 1. Artifact index columns (`Unnamed: 0`, an empty header) are dropped.
//! 2. Rows without a `salary_in_usd` value are dropped.
//! 3. `salary_in_usd` is coerced to a number; rows that fail are dropped.
//!
//! Dropping is silent. A malformed salary is not an anomaly worth reporting,
//! it simply means the row is not part of the dataset.

use std::collections::BTreeMap;
use std::path::Path;

use super::error::LoadError;
use super::loader::RawTable;
use super::model::{
    MetadataValue, SalaryDataset, SalaryRecord, EXPERIENCE_LEVEL, JOB_TITLE, REMOTE_RATIO,
    REQUIRED_COLUMNS, SALARY_IN_USD,
};

/// Header names left behind by writing a DataFrame together with its index.
const INDEX_ARTIFACTS: [&str; 3] = ["", "Unnamed: 0", "__index_level_0__"];

pub fn into_dataset(path: &Path, table: RawTable) -> Result<SalaryDataset, LoadError> {
    let RawTable { headers, rows } = table;

    let position = |name: &str| headers.iter().position(|h| h == name);

    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|col| position(*col).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }

    // All four are present, checked above.
    let [title_idx, level_idx, remote_idx, salary_idx] =
        [JOB_TITLE, EXPERIENCE_LEVEL, REMOTE_RATIO, SALARY_IN_USD].map(|c| position(c).unwrap_or(0));

    let extra_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !INDEX_ARTIFACTS.contains(&h.as_str()))
        .filter(|(_, h)| !REQUIRED_COLUMNS.contains(&h.as_str()))
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let records: Vec<SalaryRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let salary = coerce_salary(row.get(salary_idx)?)?;
            let cell = |i: usize| row.get(i).unwrap_or(&MetadataValue::Null);

            let extra: BTreeMap<String, MetadataValue> = extra_columns
                .iter()
                .map(|(i, name)| (name.clone(), cell(*i).clone()))
                .collect();

            Some(SalaryRecord {
                job_title: cell(title_idx).as_text(),
                experience_level: cell(level_idx).as_text(),
                remote_ratio: cell(remote_idx).as_i64(),
                salary_in_usd: salary,
                extra,
            })
        })
        .collect();

    Ok(SalaryDataset::from_records(
        records,
        extra_columns.into_iter().map(|(_, name)| name).collect(),
    ))
}

/// `None` for anything that is not a finite, non-negative number.
fn coerce_salary(value: &MetadataValue) -> Option<f64> {
    value
        .as_f64()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: Vec<Vec<MetadataValue>>) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    fn s(v: &str) -> MetadataValue {
        MetadataValue::String(v.to_string())
    }

    #[test]
    fn unnamed_index_column_is_dropped() {
        let t = table(
            &["Unnamed: 0", "job_title", "experience_level", "remote_ratio", "salary_in_usd", "company_size"],
            vec![vec![
                MetadataValue::Integer(0),
                s("Engineer"),
                s("SE"),
                MetadataValue::Integer(100),
                MetadataValue::Integer(150_000),
                s("L"),
            ]],
        );

        let ds = into_dataset(Path::new("jobs.csv"), t).unwrap();
        assert_eq!(ds.extra_columns(), ["company_size"]);
        assert!(!ds.records()[0].extra.contains_key("Unnamed: 0"));
    }

    #[test]
    fn salary_coercion_drops_bad_rows() {
        let headers = ["job_title", "experience_level", "remote_ratio", "salary_in_usd"];
        let row = |salary: MetadataValue| vec![s("Engineer"), s("SE"), MetadataValue::Integer(0), salary];
        let t = table(
            &headers,
            vec![
                row(MetadataValue::Null),
                row(s("N/A")),
                row(s("120000")),
                row(MetadataValue::Float(f64::NAN)),
                row(MetadataValue::Float(f64::INFINITY)),
                row(MetadataValue::Integer(-5)),
                row(MetadataValue::Bool(true)),
                row(MetadataValue::Float(99_999.9)),
            ],
        );

        let ds = into_dataset(Path::new("jobs.csv"), t).unwrap();
        let salaries: Vec<f64> = ds.records().iter().map(|r| r.salary_in_usd).collect();
        assert_eq!(salaries, vec![120_000.0, 99_999.9]);
        assert!(ds.records().iter().all(|r| r.salary_in_usd.is_finite() && r.salary_in_usd >= 0.0));
    }

    #[test]
    fn missing_categories_stay_missing() {
        let t = table(
            &["job_title", "experience_level", "remote_ratio", "salary_in_usd"],
            vec![vec![
                MetadataValue::Null,
                s("SE"),
                s("hybrid"),
                MetadataValue::Integer(1),
            ]],
        );

        let ds = into_dataset(Path::new("jobs.csv"), t).unwrap();
        let rec = &ds.records()[0];
        assert_eq!(rec.job_title, None);
        assert_eq!(rec.experience_level.as_deref(), Some("SE"));
        assert_eq!(rec.remote_ratio, None);
    }

    #[test]
    fn no_required_columns_fails() {
        let t = table(&["a", "b"], vec![vec![s("x"), s("y")]]);
        match into_dataset(Path::new("jobs.csv"), t) {
            Err(LoadError::MissingColumns { missing, .. }) => assert_eq!(missing.len(), 4),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

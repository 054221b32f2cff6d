use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

// ---------------------------------------------------------------------------
// MetadataValue – a single passthrough cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
///
/// Only used for raw loader output and for the extra columns a record carries
/// through unchanged; the four interpreted columns are typed on [`SalaryRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl MetadataValue {
    /// Numeric coercion in the spirit of `pd.to_numeric(errors="coerce")`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            MetadataValue::String(s) => s.trim().parse::<f64>().ok(),
            MetadataValue::Bool(_) | MetadataValue::Null => None,
        }
    }

    /// Integer view used for `remote_ratio`; integral floats are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(i) => Some(*i),
            MetadataValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            MetadataValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| MetadataValue::Float(s.parse::<f64>().ok()?).as_i64())
            }
            _ => None,
        }
    }

    /// Text view used for the string categories; `Null` stays missing.
    pub fn as_text(&self) -> Option<String> {
        match self {
            MetadataValue::Null => None,
            MetadataValue::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, ""),
        }
    }
}

// ---------------------------------------------------------------------------
// Field / Category – the filterable columns and their values
// ---------------------------------------------------------------------------

/// The categorical columns the dashboard filters and groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    JobTitle,
    ExperienceLevel,
    RemoteRatio,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::JobTitle, Field::ExperienceLevel, Field::RemoteRatio];

    /// Column name in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Field::JobTitle => JOB_TITLE,
            Field::ExperienceLevel => EXPERIENCE_LEVEL,
            Field::RemoteRatio => REMOTE_RATIO,
        }
    }

    /// Human readable label for widgets and chart axes.
    pub fn label(self) -> &'static str {
        match self {
            Field::JobTitle => "Job Title",
            Field::ExperienceLevel => "Experience Level",
            Field::RemoteRatio => "Remote Ratio",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A value of one of the categorical [`Field`]s.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Text(String),
    Integer(i64),
}

impl Category {
    #[cfg(test)]
    pub fn text(s: impl Into<String>) -> Self {
        Category::Text(s.into())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Text(s) => write!(f, "{s}"),
            Category::Integer(i) => write!(f, "{i}"),
        }
    }
}

pub const JOB_TITLE: &str = "job_title";
pub const EXPERIENCE_LEVEL: &str = "experience_level";
pub const REMOTE_RATIO: &str = "remote_ratio";
pub const SALARY_IN_USD: &str = "salary_in_usd";

/// Columns that must be present in every source.
pub const REQUIRED_COLUMNS: [&str; 4] = [JOB_TITLE, EXPERIENCE_LEVEL, REMOTE_RATIO, SALARY_IN_USD];

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One job-salary observation.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    pub job_title: Option<String>,
    pub experience_level: Option<String>,
    pub remote_ratio: Option<i64>,
    /// Always finite and non-negative.
    pub salary_in_usd: f64,
    /// Uninterpreted columns: column_name → value.
    pub extra: BTreeMap<String, MetadataValue>,
}

impl SalaryRecord {
    /// Value of a categorical field, `None` when the cell was missing.
    pub fn category(&self, field: Field) -> Option<Category> {
        match field {
            Field::JobTitle => self.job_title.clone().map(Category::Text),
            Field::ExperienceLevel => self.experience_level.clone().map(Category::Text),
            Field::RemoteRatio => self.remote_ratio.map(Category::Integer),
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – an immutable, ordered collection of records
// ---------------------------------------------------------------------------

/// A loaded dataset (or a filtered view of one) with pre-computed indices.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    records: Vec<SalaryRecord>,
    /// Names of the passthrough columns, in source order.
    extra_columns: Vec<String>,
    /// For each categorical field the sorted set of non-missing values.
    unique_values: BTreeMap<Field, BTreeSet<Category>>,
}

impl SalaryDataset {
    /// Build the category index from the records.
    pub fn from_records(records: Vec<SalaryRecord>, extra_columns: Vec<String>) -> Self {
        let mut unique_values: BTreeMap<Field, BTreeSet<Category>> =
            Field::ALL.iter().map(|f| (*f, BTreeSet::new())).collect();

        for rec in &records {
            for field in Field::ALL {
                if let Some(value) = rec.category(field) {
                    unique_values.entry(field).or_default().insert(value);
                }
            }
        }

        SalaryDataset {
            records,
            extra_columns,
            unique_values,
        }
    }

    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every distinct non-missing value of `field`, ascending.
    pub fn distinct_values(&self, field: Field) -> Vec<Category> {
        self.unique_values
            .get(&field)
            .map(|vals| vals.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The `k` most frequent values of `field`, most frequent first.
    ///
    /// Equal counts keep the order in which values first appear in the data.
    pub fn top_categories(&self, field: Field, k: usize) -> Vec<Category> {
        let mut counts: Vec<(Category, usize)> = Vec::new();
        let mut index: HashMap<Category, usize> = HashMap::new();

        for rec in &self.records {
            let Some(value) = rec.category(field) else {
                continue;
            };
            match index.get(&value) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(value.clone(), counts.len());
                    counts.push((value, 1));
                }
            }
        }

        // sort_by is stable, so ties stay in first-encountered order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.into_iter().take(k).map(|(value, _)| value).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(title: &str, level: &str, remote: i64, salary: f64) -> SalaryRecord {
        SalaryRecord {
            job_title: Some(title.to_string()),
            experience_level: Some(level.to_string()),
            remote_ratio: Some(remote),
            salary_in_usd: salary,
            extra: BTreeMap::new(),
        }
    }

    pub(crate) fn dataset(records: Vec<SalaryRecord>) -> SalaryDataset {
        SalaryDataset::from_records(records, Vec::new())
    }

    #[test]
    fn distinct_values_are_sorted_and_skip_missing() {
        let mut no_level = record("Analyst", "MI", 50, 70_000.0);
        no_level.experience_level = None;
        let ds = dataset(vec![
            record("Engineer", "SE", 100, 150_000.0),
            record("Analyst", "EN", 0, 60_000.0),
            no_level,
            record("Engineer", "SE", 100, 140_000.0),
        ]);

        assert_eq!(
            ds.distinct_values(Field::JobTitle),
            vec![Category::text("Analyst"), Category::text("Engineer")]
        );
        assert_eq!(
            ds.distinct_values(Field::ExperienceLevel),
            vec![Category::text("EN"), Category::text("SE")]
        );
        assert_eq!(
            ds.distinct_values(Field::RemoteRatio),
            vec![Category::Integer(0), Category::Integer(50), Category::Integer(100)]
        );
    }

    #[test]
    fn top_categories_orders_by_frequency_then_first_seen() {
        let ds = dataset(vec![
            record("Scientist", "SE", 0, 1.0),
            record("Engineer", "SE", 0, 1.0),
            record("Analyst", "SE", 0, 1.0),
            record("Engineer", "SE", 0, 1.0),
            record("Analyst", "SE", 0, 1.0),
            record("Manager", "SE", 0, 1.0),
        ]);

        assert_eq!(
            ds.top_categories(Field::JobTitle, 3),
            vec![
                Category::text("Engineer"),
                Category::text("Analyst"),
                Category::text("Scientist"),
            ]
        );
    }

    #[test]
    fn top_categories_returns_all_when_fewer_than_k() {
        let ds = dataset(vec![
            record("Engineer", "SE", 0, 1.0),
            record("Analyst", "MI", 0, 1.0),
        ]);
        assert_eq!(ds.top_categories(Field::ExperienceLevel, 10).len(), 2);
        assert!(dataset(Vec::new()).top_categories(Field::JobTitle, 10).is_empty());
    }

    #[test]
    fn metadata_coercions() {
        assert_eq!(MetadataValue::String(" 120000 ".into()).as_f64(), Some(120_000.0));
        assert_eq!(MetadataValue::String("N/A".into()).as_f64(), None);
        assert_eq!(MetadataValue::Float(50.0).as_i64(), Some(50));
        assert_eq!(MetadataValue::Float(50.5).as_i64(), None);
        assert_eq!(MetadataValue::String("100.0".into()).as_i64(), Some(100));
        assert_eq!(MetadataValue::Integer(3).as_text().as_deref(), Some("3"));
        assert_eq!(MetadataValue::Null.as_text(), None);
    }
}

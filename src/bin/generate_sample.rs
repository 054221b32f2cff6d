//! Writes a synthetic tech-jobs dataset to `data/tech_jobs.csv` (with a
//! pandas-style unnamed index column and a few unusable salaries) and the same
//! rows to `data/tech_jobs.parquet`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const N_ROWS: usize = 1_200;

/// (title, relative frequency, base salary in USD)
const TITLES: &[(&str, u32, f64)] = &[
    ("Data Engineer", 22, 140_000.0),
    ("Data Scientist", 20, 145_000.0),
    ("Data Analyst", 16, 100_000.0),
    ("Machine Learning Engineer", 12, 165_000.0),
    ("Software Engineer", 10, 150_000.0),
    ("Analytics Engineer", 6, 135_000.0),
    ("Research Scientist", 5, 170_000.0),
    ("Data Architect", 4, 160_000.0),
    ("Applied Scientist", 4, 180_000.0),
    ("BI Developer", 3, 95_000.0),
    ("Data Manager", 3, 125_000.0),
    ("MLOps Engineer", 2, 150_000.0),
    ("Head of Data", 1, 210_000.0),
    ("Data Quality Analyst", 1, 85_000.0),
];

/// (code, multiplier on the base salary)
const LEVELS: &[(&str, f64)] = &[("EN", 0.65), ("MI", 0.85), ("SE", 1.1), ("EX", 1.45)];
const REMOTE: &[(i64, f64)] = &[(0, 1.0), (50, 0.92), (100, 1.03)];
const COUNTRIES: &[&str] = &["US", "GB", "CA", "DE", "IN", "ES", "FR"];
const SIZES: &[&str] = &["S", "M", "L"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Row {
    work_year: i64,
    experience_level: &'static str,
    job_title: &'static str,
    /// `None` for rows whose salary is written as an unusable cell.
    salary_in_usd: Option<f64>,
    employee_residence: &'static str,
    remote_ratio: i64,
    company_size: &'static str,
}

fn weighted_title(rng: &mut SimpleRng) -> &'static (&'static str, u32, f64) {
    let total: u32 = TITLES.iter().map(|t| t.1).sum();
    let mut roll = (rng.next_u64() % total as u64) as u32;
    for title in TITLES {
        if roll < title.1 {
            return title;
        }
        roll -= title.1;
    }
    &TITLES[0]
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    (0..N_ROWS)
        .map(|i| {
            let &(job_title, _, base) = weighted_title(rng);
            let &(experience_level, level_mult) = rng.pick(LEVELS);
            let &(remote_ratio, remote_mult) = rng.pick(REMOTE);
            let salary = (base * level_mult * remote_mult * rng.gauss(1.0, 0.18)).max(15_000.0);

            Row {
                work_year: 2020 + (rng.next_u64() % 4) as i64,
                experience_level,
                job_title,
                salary_in_usd: (i % 97 != 13).then_some(salary.round()),
                employee_residence: *rng.pick(COUNTRIES),
                remote_ratio,
                company_size: *rng.pick(SIZES),
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "",
        "work_year",
        "experience_level",
        "job_title",
        "salary_in_usd",
        "employee_residence",
        "remote_ratio",
        "company_size",
    ])?;

    for (i, row) in rows.iter().enumerate() {
        let salary = match row.salary_in_usd {
            Some(v) => format!("{v:.0}"),
            // alternate between the two shapes of bad cell seen in scraped data
            None if i % 2 == 0 => "N/A".to_string(),
            None => String::new(),
        };
        writer.write_record([
            i.to_string(),
            row.work_year.to_string(),
            row.experience_level.to_string(),
            row.job_title.to_string(),
            salary,
            row.employee_residence.to_string(),
            row.remote_ratio.to_string(),
            row.company_size.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let strings = |f: fn(&Row) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("work_year", DataType::Int64, false),
        Field::new("experience_level", DataType::Utf8, false),
        Field::new("job_title", DataType::Utf8, false),
        Field::new("salary_in_usd", DataType::Float64, true),
        Field::new("employee_residence", DataType::Utf8, false),
        Field::new("remote_ratio", DataType::Int64, false),
        Field::new("company_size", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.work_year))),
            strings(|r| r.experience_level),
            strings(|r| r.job_title),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.salary_in_usd).collect::<Vec<_>>(),
            )),
            strings(|r| r.employee_residence),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.remote_ratio))),
            strings(|r| r.company_size),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    let dir = Path::new("data");
    std::fs::create_dir_all(dir).context("creating data directory")?;

    let csv_path = dir.join("tech_jobs.csv");
    write_csv(&csv_path, &rows)?;
    let parquet_path = dir.join("tech_jobs.parquet");
    write_parquet(&parquet_path, &rows)?;

    let unusable = rows.iter().filter(|r| r.salary_in_usd.is_none()).count();
    println!(
        "Wrote {} rows ({unusable} without a usable salary) to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}

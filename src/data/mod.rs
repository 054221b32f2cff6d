/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop index column / bad salaries → SalaryDataset
///   └──────────┘
///        │                       (memoized per path by `cache`)
///        ▼
///   ┌──────────┐
///   │  filter   │  Criteria → new SalaryDataset (the view)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  summary stats, group means, quartiles
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

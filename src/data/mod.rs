/// Data layer: loading, derivation, filtering and aggregation.
///
/// Architecture:
/// ```text
///  nobel.csv / .json / .parquet  (remote or local)
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  fetch raw bytes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows, derive decade / age / usa flag → AwardDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  single-entry memo, Arc<AwardDataset>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year / category / age / sex predicates → View
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  top countries, decade trend, counts, histogram
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;

/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///     train.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + derive columns → RentalTable (cached once)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RentalTable  │  Vec<RentalRecord>, year/season index
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply year/season/day-type criteria → visible indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  grouped means + correlation matrix for the charts
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;

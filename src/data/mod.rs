/// Data layer: core types, loading, numeric coercion, statistics and slicing.
///
/// Architecture:
/// ```text
///        .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  comma-split file → Table (all Cell::Text)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐        ┌──────────┐
///   │  shape    │        │  coerce   │  text → Number in one column
///   └──────────┘        └──────────┘
///        │                    │
///        ▼                    ▼
///   ┌──────────┐        ┌──────────┐
///   │  stats    │        │  slice    │  row filter + column projection
///   └──────────┘        └──────────┘
///
///   numeric: strict / loose recognisers used by everything above
/// ```

pub mod coerce;
pub mod loader;
pub mod model;
pub mod numeric;
pub mod shape;
pub mod slice;
pub mod stats;

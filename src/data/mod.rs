/// Data layer: core types, loading, derivation, and view filtering.
///
/// Architecture:
/// ```text
///   names.zip (SSA, HTTP or local)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  yobYYYY.txt → NameRecord (+ year) → NamesDataset
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  filter   │◀──│ wonders  │  pairs seen in exactly one year
///   └──────────┘   └──────────┘
///        │
///        ▼
///      Views     trend / one-hit / top-N / detail rows
/// ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod wonders;

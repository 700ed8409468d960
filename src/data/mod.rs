//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Catalog   (cache: load once per path)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Catalog  │  all records + canonical (director & cast) view
//!   └──────────┘
//!        │                               │
//!        ▼                               ▼
//!   ┌──────────┐                   ┌──────────┐
//!   │  filter   │ type / year       │ explorer  │ date_added year / month / country
//!   └──────────┘                   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  counts, rankings, trends, cross-tabs  (explode, stats)
//!   └───────────┘
//! ```
pub mod aggregate;
pub mod cache;
pub mod error;
pub mod explode;
pub mod explorer;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;

//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file once → Arc<SurveyTable>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  country + age window → filtered SurveyTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────────┐
//!   │ aggregate/stats │  counts, cross-tabs, age buckets, describe
//!   └────────────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;

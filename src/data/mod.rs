//! Data layer: core types, loading, cleaning, caching, and query views.
//!
//! Architecture:
//! ```text
//!   data.csv
//!      │
//!      ▼
//!  ┌────────┐
//!  │ loader  │  read ≤ N rows, merge crash date+time → CollisionTable (raw)
//!  └────────┘
//!      │
//!      ▼
//!  ┌───────────┐
//!  │ normalize  │  lowercase columns, drop null/zero coords, rename date/time
//!  └───────────┘
//!      │
//!      ▼
//!  ┌────────┐
//!  │ cache   │  memoize per row limit → Arc<CollisionTable>
//!  └────────┘
//!      │
//!      ▼
//!  ┌────────┐
//!  │ views   │  pure filters/aggregates per user control
//!  └────────┘
//! ```

pub mod cache;
pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod views;

//! School-uniform inventory domain module.
//!
//! This crate contains the rules every dashboard view depends on, implemented
//! purely as deterministic functions over in-memory snapshots (no IO, no
//! HTTP, no storage):
//!
//! - [`totals`]: roll a type → variant → sizes tree up into quantity totals
//! - [`status`]: classify stock records as in / low / out of stock
//! - [`filter`]: narrow a tree by type, variant search text and status
//! - [`summary`]: dashboard counters and reorder candidates
//!
//! Raw JSON enters through [`ingest`], the only place values are coerced.

pub mod filter;
pub mod ingest;
pub mod record;
pub mod status;
pub mod summary;
pub mod totals;

pub use filter::{FilterCriteria, SchoolCriteria, StatusFilter, filter_inventory, filter_schools};
pub use record::{InventoryByType, ProductType, School, StockRecord, Variant};
pub use status::{
    StatusDetail, StockReport, StockStatus, classify, classify_inventory, classify_school,
    classify_type, classify_value, classify_variant,
};
pub use summary::{
    DashboardSummary, ReorderLine, SchoolSummary, reorder_candidates, summarize, summarize_all,
};
pub use totals::{Totals, TypeTotals, aggregate, aggregate_value};

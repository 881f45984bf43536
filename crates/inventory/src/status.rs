//! Stock-health classification.
//!
//! Per record: `out_of_stock` when `quantity == 0`, else `low_stock` when
//! `quantity <= reorder`, else `in_stock`. Collections roll up by precedence
//! (out > low > in), never by count. A collection with no records is
//! `unknown`, which is not the same thing as fully stocked.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use uniformops_core::DomainResult;

use crate::ingest;
use crate::record::{InventoryByType, ProductType, School, StockRecord, Variant};

/// Derived stock status (never stored).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    Unknown,
}

impl StockStatus {
    /// Classify a single record.
    pub fn of(record: &StockRecord) -> Self {
        if record.quantity == 0 {
            StockStatus::OutOfStock
        } else if record.quantity <= record.reorder {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::Unknown => "unknown",
        }
    }

    /// `true` for the statuses that warrant restocking.
    pub fn needs_reorder(self) -> bool {
        matches!(self, StockStatus::LowStock | StockStatus::OutOfStock)
    }

    fn rank(self) -> u8 {
        match self {
            StockStatus::Unknown => 0,
            StockStatus::InStock => 1,
            StockStatus::LowStock => 2,
            StockStatus::OutOfStock => 3,
        }
    }

    /// Combine child statuses by precedence; `unknown` when there are none.
    pub fn roll_up(statuses: impl IntoIterator<Item = StockStatus>) -> StockStatus {
        statuses
            .into_iter()
            .fold(StockStatus::Unknown, |acc, s| if s.rank() > acc.rank() { s } else { acc })
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a classification breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDetail {
    pub name: String,
    pub status: StockStatus,
    pub quantity: u64,
}

/// Rolled-up status plus the ordered per-child breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReport {
    #[serde(rename = "type")]
    pub status: StockStatus,
    pub details: Vec<StatusDetail>,
}

impl StockReport {
    fn unknown() -> Self {
        Self {
            status: StockStatus::Unknown,
            details: Vec::new(),
        }
    }

    fn from_details(details: Vec<StatusDetail>) -> Self {
        Self {
            status: StockStatus::roll_up(details.iter().map(|d| d.status)),
            details,
        }
    }
}

/// Classify a collection of records. Details are named by size.
pub fn classify(records: &[StockRecord]) -> StockReport {
    if records.is_empty() {
        return StockReport::unknown();
    }

    StockReport::from_details(
        records
            .iter()
            .map(|r| StatusDetail {
                name: r.size.clone(),
                status: StockStatus::of(r),
                quantity: r.quantity,
            })
            .collect(),
    )
}

/// Classify a raw JSON value expected to be a list of records.
///
/// Non-list input is `unknown` with no details; a list holding a malformed
/// record is an `InvalidRecord` error.
pub fn classify_value(value: &Value) -> DomainResult<StockReport> {
    if !value.is_array() {
        return Ok(StockReport::unknown());
    }
    let records = ingest::records_from_value(value, "records")?;
    Ok(classify(&records))
}

pub fn classify_variant(variant: &Variant) -> StockReport {
    classify(&variant.sizes)
}

/// Classify a type; details are per variant (name, rolled-up status, total quantity).
pub fn classify_type(product_type: &ProductType) -> StockReport {
    StockReport::from_details(
        product_type
            .variants
            .iter()
            .map(|v| StatusDetail {
                name: v.name.clone(),
                status: classify_variant(v).status,
                quantity: v.sizes.iter().fold(0u64, |acc, r| acc.saturating_add(r.quantity)),
            })
            .collect(),
    )
}

/// Classify a whole tree; details are per type.
pub fn classify_inventory(inventory: &InventoryByType) -> StockReport {
    StockReport::from_details(
        inventory
            .types()
            .iter()
            .map(|t| StatusDetail {
                name: t.name.clone(),
                status: classify_type(t).status,
                quantity: t.records().fold(0u64, |acc, r| acc.saturating_add(r.quantity)),
            })
            .collect(),
    )
}

/// Classify everything a school stocks; details are per type.
pub fn classify_school(school: &School) -> StockReport {
    classify_inventory(&school.inventory)
}

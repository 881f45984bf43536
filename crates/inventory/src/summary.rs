//! Dashboard summary cards and reorder candidates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use uniformops_core::SchoolId;

use crate::record::School;
use crate::status::{StockStatus, classify_school};

/// Stock-health counters for one school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolSummary {
    pub school_id: SchoolId,
    pub name: String,
    pub total_units: u64,
    pub total_allocated: u64,
    /// Number of size records.
    pub sku_count: u64,
    /// Records with `0 < quantity <= reorder`.
    pub low_stock_count: u64,
    /// Records with `quantity == 0`.
    pub out_of_stock_count: u64,
    pub status: StockStatus,
}

/// Counters across a set of schools, plus the per-school breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub generated_at: DateTime<Utc>,
    pub school_count: u64,
    pub total_units: u64,
    pub total_allocated: u64,
    pub sku_count: u64,
    pub low_stock_count: u64,
    pub out_of_stock_count: u64,
    pub status: StockStatus,
    pub schools: Vec<SchoolSummary>,
}

/// One record that needs restocking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderLine {
    #[serde(rename = "type")]
    pub product_type: String,
    pub variant: String,
    pub size: String,
    pub quantity: u64,
    pub allocated: u64,
    pub reorder: u64,
    pub status: StockStatus,
    /// Units needed to get back to the reorder threshold.
    pub shortfall: u64,
}

pub fn summarize(school: &School) -> SchoolSummary {
    let mut summary = SchoolSummary {
        school_id: school.id,
        name: school.name.clone(),
        total_units: 0,
        total_allocated: 0,
        sku_count: 0,
        low_stock_count: 0,
        out_of_stock_count: 0,
        status: classify_school(school).status,
    };

    for (_, _, record) in school.inventory.records() {
        summary.total_units = summary.total_units.saturating_add(record.quantity);
        summary.total_allocated = summary.total_allocated.saturating_add(record.allocated);
        summary.sku_count += 1;
        match StockStatus::of(record) {
            StockStatus::LowStock => summary.low_stock_count += 1,
            StockStatus::OutOfStock => summary.out_of_stock_count += 1,
            _ => {}
        }
    }

    summary
}

/// Summarize every school. `generated_at` is supplied by the caller so the
/// result stays a pure function of its inputs.
pub fn summarize_all(schools: &[School], generated_at: DateTime<Utc>) -> DashboardSummary {
    let per_school: Vec<SchoolSummary> = schools.iter().map(summarize).collect();

    let mut out = DashboardSummary {
        generated_at,
        school_count: per_school.len() as u64,
        total_units: 0,
        total_allocated: 0,
        sku_count: 0,
        low_stock_count: 0,
        out_of_stock_count: 0,
        status: StockStatus::roll_up(per_school.iter().map(|s| s.status)),
        schools: Vec::new(),
    };

    for s in &per_school {
        out.total_units = out.total_units.saturating_add(s.total_units);
        out.total_allocated = out.total_allocated.saturating_add(s.total_allocated);
        out.sku_count += s.sku_count;
        out.low_stock_count += s.low_stock_count;
        out.out_of_stock_count += s.out_of_stock_count;
    }
    out.schools = per_school;

    out
}

/// Records at or below their reorder threshold, in tree order.
pub fn reorder_candidates(school: &School) -> Vec<ReorderLine> {
    school
        .inventory
        .records()
        .filter_map(|(t, v, r)| {
            let status = StockStatus::of(r);
            status.needs_reorder().then(|| ReorderLine {
                product_type: t.name.clone(),
                variant: v.name.clone(),
                size: r.size.clone(),
                quantity: r.quantity,
                allocated: r.allocated,
                reorder: r.reorder,
                status,
                shortfall: r.reorder.saturating_sub(r.quantity),
            })
        })
        .collect()
}

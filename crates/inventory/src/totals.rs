//! Quantity roll-ups: per-type and per-variant totals.

use serde::Serialize;
use serde::ser::SerializeMap;
use serde_json::Value;

use uniformops_core::DomainResult;

use crate::ingest;
use crate::record::{InventoryByType, ProductType};

/// Totals for one uniform type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTotals {
    pub name: String,
    /// Sum of every quantity under the type.
    pub total: u64,
    /// Variant name → sum of its sizes' quantities, in input order.
    pub variants: Vec<(String, u64)>,
}

impl TypeTotals {
    pub fn variant(&self, name: &str) -> Option<u64> {
        self.variants.iter().find(|(n, _)| n == name).map(|(_, q)| *q)
    }
}

/// Aggregator output, one entry per type in input order.
///
/// Serializes as `{"Shirts": {"total": 5, "variants": {"White": 5}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    types: Vec<TypeTotals>,
}

impl Totals {
    pub fn types(&self) -> &[TypeTotals] {
        &self.types
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeTotals> {
        self.types.iter().find(|t| t.name == type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Sum across all types.
    pub fn grand_total(&self) -> u64 {
        self.types.iter().fold(0u64, |acc, t| acc.saturating_add(t.total))
    }
}

/// Roll an inventory tree up into totals.
///
/// Pure and infallible: records are validated at ingestion. A variant with no
/// sizes is reported with `0` and contributes nothing to its type's total.
pub fn aggregate(inventory: &InventoryByType) -> Totals {
    Totals {
        types: inventory.types().iter().map(type_totals).collect(),
    }
}

/// Validate a raw JSON tree and aggregate it.
///
/// Fails with `InvalidShape` / `InvalidRecord` instead of guessing.
pub fn aggregate_value(value: &Value) -> DomainResult<Totals> {
    let inventory = ingest::inventory_from_value(value)?;
    Ok(aggregate(&inventory))
}

fn type_totals(product_type: &ProductType) -> TypeTotals {
    let variants: Vec<(String, u64)> = product_type
        .variants
        .iter()
        .map(|v| {
            let sum = v.sizes.iter().fold(0u64, |acc, r| acc.saturating_add(r.quantity));
            (v.name.clone(), sum)
        })
        .collect();

    let total = variants.iter().fold(0u64, |acc, (_, q)| acc.saturating_add(*q));

    TypeTotals {
        name: product_type.name.clone(),
        total,
        variants,
    }
}

struct VariantTotalsRef<'a>(&'a [(String, u64)]);

impl Serialize for VariantTotalsRef<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, qty) in self.0 {
            map.serialize_entry(name, qty)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct TypeTotalsBody<'a> {
    total: u64,
    variants: VariantTotalsRef<'a>,
}

impl Serialize for Totals {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.types.len()))?;
        for t in &self.types {
            map.serialize_entry(
                &t.name,
                &TypeTotalsBody {
                    total: t.total,
                    variants: VariantTotalsRef(&t.variants),
                },
            )?;
        }
        map.end()
    }
}

//! Filter engine: narrow an inventory tree by user-selected criteria.
//!
//! Every criterion is optional; absent, or the sentinel `"all"`, means no
//! constraint on that dimension. Status filtering works per record, not on
//! the rolled-up variant status: a variant keeps exactly the sizes that match
//! and disappears when none do. Types with no surviving variant disappear
//! too. The input is never modified.

use serde::{Deserialize, Serialize};

use crate::record::{InventoryByType, ProductType, School, StockRecord, Variant};

const ALL: &str = "all";

/// Record-level status constraint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    /// `quantity <= reorder` (includes out-of-stock records).
    LowStock,
    /// `quantity == 0`.
    OutOfStock,
}

impl StatusFilter {
    /// Interpret a criteria value; anything unrecognised is "no constraint".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low_stock" => Some(StatusFilter::LowStock),
            "out_of_stock" => Some(StatusFilter::OutOfStock),
            _ => None,
        }
    }

    pub fn matches(self, record: &StockRecord) -> bool {
        match self {
            StatusFilter::LowStock => record.quantity <= record.reorder,
            StatusFilter::OutOfStock => record.quantity == 0,
        }
    }
}

/// Criteria for [`filter_inventory`].
///
/// Deserializes from `{"type": .., "variantSearch": .., "status": ..}` (JSON
/// bodies and query strings alike).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Exact match on the top-level type name.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Case-insensitive substring match on the variant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_search: Option<String>,
    /// `low_stock` or `out_of_stock`; any other value is ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_variant_search(mut self, search: impl Into<String>) -> Self {
        self.variant_search = Some(search.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    fn type_constraint(&self) -> Option<&str> {
        constraint(self.product_type.as_deref())
    }

    /// Lower-cased search needle; empty text constrains nothing.
    fn search_constraint(&self) -> Option<String> {
        constraint(self.variant_search.as_deref())
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn status_constraint(&self) -> Option<StatusFilter> {
        self.status.as_deref().and_then(StatusFilter::parse)
    }

    /// `true` when no dimension is constrained.
    pub fn is_noop(&self) -> bool {
        self.type_constraint().is_none()
            && self.search_constraint().is_none()
            && self.status_constraint().is_none()
    }
}

fn constraint(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != ALL)
}

/// Apply criteria to an inventory tree, returning a new tree.
///
/// A type or variant is present in the output iff at least one of its size
/// records survives. Surviving keys keep their input order.
pub fn filter_inventory(inventory: &InventoryByType, criteria: &FilterCriteria) -> InventoryByType {
    let type_name = criteria.type_constraint();
    let needle = criteria.search_constraint();
    let status = criteria.status_constraint();

    let types = inventory
        .types()
        .iter()
        .filter(|t| type_name.is_none_or(|name| t.name == name))
        .filter_map(|t| {
            let variants: Vec<Variant> = t
                .variants
                .iter()
                .filter(|v| {
                    needle
                        .as_deref()
                        .is_none_or(|n| v.name.to_lowercase().contains(n))
                })
                .filter_map(|v| {
                    let sizes: Vec<StockRecord> = v
                        .sizes
                        .iter()
                        .filter(|r| status.is_none_or(|s| s.matches(r)))
                        .cloned()
                        .collect();
                    (!sizes.is_empty()).then(|| Variant::new(v.name.clone(), sizes))
                })
                .collect();

            (!variants.is_empty()).then(|| ProductType {
                name: t.name.clone(),
                variants,
            })
        })
        .collect();

    InventoryByType::from_types(types)
}

/// School-level criteria for the dashboard: which schools, then which stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolCriteria {
    /// School id or exact school name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    /// Case-insensitive school category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub inventory: FilterCriteria,
}

impl SchoolCriteria {
    fn matches(&self, school: &School) -> bool {
        let by_school = constraint(self.school.as_deref())
            .is_none_or(|s| school.name == s || school.id.to_string() == s);

        let by_category = constraint(self.category.as_deref()).is_none_or(|c| {
            school
                .category
                .as_deref()
                .is_some_and(|own| own.eq_ignore_ascii_case(c))
        });

        by_school && by_category
    }
}

/// Narrow a school list, then filter each surviving school's inventory.
///
/// When an inventory constraint is active, schools left with an empty tree
/// are dropped as well.
pub fn filter_schools(schools: &[School], criteria: &SchoolCriteria) -> Vec<School> {
    let inventory_noop = criteria.inventory.is_noop();

    schools
        .iter()
        .filter(|s| criteria.matches(s))
        .filter_map(|s| {
            let inventory = if inventory_noop {
                s.inventory.clone()
            } else {
                filter_inventory(&s.inventory, &criteria.inventory)
            };
            if !inventory_noop && inventory.is_empty() {
                return None;
            }
            Some(School {
                inventory,
                ..s.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uniformops_core::SchoolId;

    fn worked_example() -> InventoryByType {
        serde_json::from_value(json!({
            "Shirts": {"White": [
                {"size": "S", "quantity": 5, "reorder": 10, "allocated": 0},
                {"size": "M", "quantity": 0, "reorder": 10, "allocated": 0}
            ]}
        }))
        .unwrap()
    }

    fn catalogue() -> InventoryByType {
        InventoryByType::new()
            .with_variant(
                "Shirts",
                Variant::new(
                    "White Long Sleeve Premium",
                    vec![
                        StockRecord::new("S", 30, 10),
                        StockRecord::new("M", 10, 10),
                        StockRecord::new("L", 0, 5),
                    ],
                ),
            )
            .with_variant(
                "Shirts",
                Variant::new("Blue Short Sleeve", vec![StockRecord::new("M", 25, 10)]),
            )
            .with_variant(
                "Trousers",
                Variant::new("Grey Long", vec![StockRecord::new("28", 2, 4)]),
            )
    }

    #[test]
    fn worked_example_out_of_stock() {
        let out = filter_inventory(&worked_example(), &FilterCriteria::new().with_status("out_of_stock"));
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"Shirts": {"White": [
                {"size": "M", "quantity": 0, "reorder": 10, "allocated": 0}
            ]}})
        );
    }

    #[test]
    fn low_stock_includes_threshold_and_zero() {
        let out = filter_inventory(&catalogue(), &FilterCriteria::new().with_status("low_stock"));
        let white = out.get("Shirts").unwrap().variant("White Long Sleeve Premium").unwrap();
        let sizes: Vec<_> = white.sizes.iter().map(|r| r.size.as_str()).collect();
        assert_eq!(sizes, vec!["M", "L"]);

        assert!(out.get("Shirts").unwrap().variant("Blue Short Sleeve").is_none());
        assert_eq!(out.get("Trousers").unwrap().variants[0].sizes.len(), 1);
    }

    #[test]
    fn type_filter_is_exact() {
        let out = filter_inventory(&catalogue(), &FilterCriteria::new().with_type("Trousers"));
        assert_eq!(out.len(), 1);
        assert_eq!(out.types()[0].name, "Trousers");

        let none = filter_inventory(&catalogue(), &FilterCriteria::new().with_type("trousers"));
        assert!(none.is_empty());
    }

    #[test]
    fn variant_search_is_case_insensitive_substring() {
        let out = filter_inventory(&catalogue(), &FilterCriteria::new().with_variant_search("LONG"));
        assert_eq!(out.len(), 2);
        assert_eq!(out.get("Shirts").unwrap().variants.len(), 1);
        assert_eq!(out.get("Shirts").unwrap().variants[0].name, "White Long Sleeve Premium");
        assert!(out.get("Trousers").is_some());
    }

    #[test]
    fn criteria_combine() {
        let criteria = FilterCriteria::new()
            .with_type("Shirts")
            .with_variant_search("white")
            .with_status("out_of_stock");
        let out = filter_inventory(&catalogue(), &criteria);
        let white = out.get("Shirts").unwrap().variant("White Long Sleeve Premium").unwrap();
        assert_eq!(white.sizes, vec![StockRecord::new("L", 0, 5)]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn all_sentinel_and_unknown_status_are_no_constraint() {
        let criteria = FilterCriteria::new()
            .with_type("all")
            .with_variant_search("")
            .with_status("all");
        assert!(criteria.is_noop());
        assert_eq!(filter_inventory(&catalogue(), &criteria), catalogue());

        let odd = FilterCriteria::new().with_status("in_stock");
        assert!(odd.is_noop());
        assert_eq!(filter_inventory(&catalogue(), &odd), catalogue());
    }

    #[test]
    fn empty_variants_are_dropped_even_without_constraints() {
        let inv = catalogue().with_variant("Ties", Variant::new("Red", vec![]));
        let out = filter_inventory(&inv, &FilterCriteria::new());
        assert!(out.get("Ties").is_none());
        assert_eq!(out, catalogue());
    }

    #[test]
    fn input_is_untouched() {
        let inv = catalogue();
        let before = inv.clone();
        let _ = filter_inventory(&inv, &FilterCriteria::new().with_status("out_of_stock"));
        assert_eq!(inv, before);
    }

    #[test]
    fn criteria_deserialize_from_camel_case() {
        let c: FilterCriteria =
            serde_json::from_value(json!({"type": "Shirts", "variantSearch": "blue", "status": "low_stock"}))
                .unwrap();
        assert_eq!(c.product_type.as_deref(), Some("Shirts"));
        assert_eq!(c.variant_search.as_deref(), Some("blue"));
        assert_eq!(c.status_constraint(), Some(StatusFilter::LowStock));

        let empty: FilterCriteria = serde_json::from_value(json!({})).unwrap();
        assert!(empty.is_noop());
    }

    #[test]
    fn school_criteria_select_by_name_id_and_category() {
        let a = School::new(SchoolId::new(), "Hillcrest Primary", catalogue()).with_category("Primary");
        let b = School::new(SchoolId::new(), "Northgate High", worked_example()).with_category("Secondary");
        let schools = vec![a.clone(), b.clone()];

        let by_name = SchoolCriteria {
            school: Some("Northgate High".into()),
            ..Default::default()
        };
        assert_eq!(filter_schools(&schools, &by_name), vec![b.clone()]);

        let by_id = SchoolCriteria {
            school: Some(a.id.to_string()),
            ..Default::default()
        };
        assert_eq!(filter_schools(&schools, &by_id), vec![a.clone()]);

        let by_category = SchoolCriteria {
            category: Some("secondary".into()),
            ..Default::default()
        };
        assert_eq!(filter_schools(&schools, &by_category), vec![b]);

        let all = SchoolCriteria {
            school: Some("all".into()),
            category: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(filter_schools(&schools, &all).len(), 2);
    }

    #[test]
    fn schools_without_matching_stock_are_dropped() {
        let healthy = School::new(
            SchoolId::new(),
            "Riverside",
            InventoryByType::new().with_variant("Ties", Variant::new("Red", vec![StockRecord::new("OS", 50, 5)])),
        );
        let short = School::new(SchoolId::new(), "Northgate", worked_example());

        let criteria = SchoolCriteria {
            inventory: FilterCriteria::new().with_status("out_of_stock"),
            ..Default::default()
        };
        let out = filter_schools(&[healthy, short], &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Northgate");
        assert_eq!(out[0].inventory.records().count(), 1);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const TYPES: [&str; 3] = ["Shirts", "Trousers", "Ties"];
        const VARIANTS: [&str; 4] = ["White Long", "Blue Short", "Grey Long", "Red"];

        fn arb_inventory() -> impl Strategy<Value = InventoryByType> {
            let sizes = prop::collection::vec((0u64..20, 0u64..20), 1..5);
            let variant = (0usize..VARIANTS.len(), sizes);
            let entry = (0usize..TYPES.len(), variant);
            prop::collection::vec(entry, 0..10).prop_map(|entries| {
                let mut inv = InventoryByType::new();
                for (t, (v, sizes)) in entries {
                    let records = sizes
                        .into_iter()
                        .enumerate()
                        .map(|(i, (q, r))| StockRecord::new(format!("s{i}"), q, r))
                        .collect();
                    inv.insert_variant(TYPES[t], Variant::new(VARIANTS[v], records));
                }
                inv
            })
        }

        fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
            let ty = prop::option::of(prop::sample::select(vec!["all", "Shirts", "Trousers", "Hats"]));
            let search = prop::option::of(prop::sample::select(vec!["", "all", "long", "RED", "zzz"]));
            let status = prop::option::of(prop::sample::select(vec![
                "all", "low_stock", "out_of_stock", "in_stock",
            ]));
            (ty, search, status).prop_map(|(t, s, st)| FilterCriteria {
                product_type: t.map(String::from),
                variant_search: s.map(String::from),
                status: st.map(String::from),
            })
        }

        proptest! {
            /// Property: filtering twice with the same criteria changes nothing.
            #[test]
            fn filter_is_idempotent(inv in arb_inventory(), c in arb_criteria()) {
                let once = filter_inventory(&inv, &c);
                prop_assert_eq!(filter_inventory(&once, &c), once);
            }

            /// Property: no-op criteria are the identity on trees without empty variants.
            #[test]
            fn noop_criteria_is_identity(inv in arb_inventory()) {
                let c = FilterCriteria::new().with_status("all").with_type("all").with_variant_search("");
                prop_assert_eq!(filter_inventory(&inv, &c), inv);
            }

            /// Property: every surviving record satisfies the status constraint.
            #[test]
            fn survivors_match_status(inv in arb_inventory(), c in arb_criteria()) {
                let out = filter_inventory(&inv, &c);
                if let Some(s) = c.status_constraint() {
                    for (_, _, r) in out.records() {
                        prop_assert!(s.matches(r));
                    }
                }
                for t in out.types() {
                    prop_assert!(!t.variants.is_empty());
                    for v in &t.variants {
                        prop_assert!(!v.sizes.is_empty());
                    }
                }
            }
        }
    }
}

//! Inventory data model: stock records nested as type → variant → sizes.
//!
//! Order matters to the dashboard (display order of types and variants), so
//! the tree is stored as ordered vectors rather than hash maps. On the wire
//! it is a JSON object of objects of arrays:
//!
//! ```json
//! { "Shirts": { "White Long Sleeve": [ { "size": "S", "quantity": 5, "allocated": 0, "reorder": 10 } ] } }
//! ```

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use uniformops_core::{Entity, SchoolId};

use crate::ingest;

/// One size entry of a product variant.
///
/// `quantity` and `allocated` are independent counters. Nothing in this crate
/// nets one against the other or mutates either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StockRecord {
    pub size: String,
    /// On-hand count.
    pub quantity: u64,
    /// Units reserved against open orders (informational).
    pub allocated: u64,
    /// Threshold at or below which restocking is recommended.
    pub reorder: u64,
}

impl StockRecord {
    pub fn new(size: impl Into<String>, quantity: u64, reorder: u64) -> Self {
        Self {
            size: size.into(),
            quantity,
            allocated: 0,
            reorder,
        }
    }

    pub fn with_allocated(mut self, allocated: u64) -> Self {
        self.allocated = allocated;
        self
    }
}

impl<'de> Deserialize<'de> for StockRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        ingest::record_from_value(&value, "record").map_err(serde::de::Error::custom)
    }
}

/// Named product style within a type (e.g. "White Long Sleeve Premium").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variant {
    pub name: String,
    pub sizes: Vec<StockRecord>,
}

impl Variant {
    pub fn new(name: impl Into<String>, sizes: Vec<StockRecord>) -> Self {
        Self {
            name: name.into(),
            sizes,
        }
    }

    pub fn size(&self, size: &str) -> Option<&StockRecord> {
        self.sizes.iter().find(|r| r.size == size)
    }
}

/// Uniform type (e.g. "Shirts") and its variants, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductType {
    pub name: String,
    pub variants: Vec<Variant>,
}

impl ProductType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Iterate every stock record under this type, in tree order.
    pub fn records(&self) -> impl Iterator<Item = &StockRecord> {
        self.variants.iter().flat_map(|v| v.sizes.iter())
    }
}

/// Ordered mapping: type name → variant name → sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InventoryByType {
    types: Vec<ProductType>,
}

impl InventoryByType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_types(types: Vec<ProductType>) -> Self {
        Self { types }
    }

    /// Builder: insert a variant under `type_name`.
    ///
    /// The type is appended if absent. A variant with the same name is
    /// replaced in place, keeping its position.
    pub fn with_variant(mut self, type_name: impl Into<String>, variant: Variant) -> Self {
        self.insert_variant(type_name, variant);
        self
    }

    pub fn insert_variant(&mut self, type_name: impl Into<String>, variant: Variant) {
        let type_name = type_name.into();
        let idx = match self.types.iter().position(|t| t.name == type_name) {
            Some(idx) => idx,
            None => {
                self.types.push(ProductType::new(type_name));
                self.types.len() - 1
            }
        };

        let product_type = &mut self.types[idx];
        match product_type.variants.iter_mut().find(|v| v.name == variant.name) {
            Some(existing) => *existing = variant,
            None => product_type.variants.push(variant),
        }
    }

    pub fn types(&self) -> &[ProductType] {
        &self.types
    }

    pub fn into_types(self) -> Vec<ProductType> {
        self.types
    }

    pub fn get(&self, type_name: &str) -> Option<&ProductType> {
        self.types.iter().find(|t| t.name == type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Iterate `(type, variant, record)` triples in tree order.
    pub fn records(&self) -> impl Iterator<Item = (&ProductType, &Variant, &StockRecord)> {
        self.types.iter().flat_map(|t| {
            t.variants
                .iter()
                .flat_map(move |v| v.sizes.iter().map(move |r| (t, v, r)))
        })
    }
}

struct VariantsRef<'a>(&'a [Variant]);

impl Serialize for VariantsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for variant in self.0 {
            map.serialize_entry(&variant.name, &variant.sizes)?;
        }
        map.end()
    }
}

impl Serialize for InventoryByType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.types.len()))?;
        for product_type in &self.types {
            map.serialize_entry(&product_type.name, &VariantsRef(&product_type.variants))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for InventoryByType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        ingest::inventory_from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// A school and the inventory tree it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    /// Free-form grouping shown on the dashboard (e.g. "Primary", "Secondary").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub inventory: InventoryByType,
}

impl School {
    pub fn new(id: SchoolId, name: impl Into<String>, inventory: InventoryByType) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
            inventory,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl Entity for School {
    type Id = SchoolId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl<'de> Deserialize<'de> for School {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        ingest::school_from_value(&value, "school").map_err(serde::de::Error::custom)
    }
}

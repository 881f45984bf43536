//! Ingestion boundary: raw JSON documents → validated inventory types.
//!
//! Documents fetched from the remote store are loosely typed (optional
//! fields, quantities stored as strings). All coercion happens here, once;
//! everything downstream works on [`StockRecord`]s whose counters are known
//! to be non-negative integers.
//!
//! Policy: fail fast. A missing or non-coercible `quantity` is an
//! [`DomainError::InvalidRecord`]; it is never defaulted to zero.
//! `allocated` and `reorder` default to `0` when absent or `null`.

use serde_json::{Map, Value};

use uniformops_core::{DomainError, DomainResult, SchoolId};

use crate::record::{InventoryByType, ProductType, School, StockRecord, Variant};

/// Parse an inventory tree (`{type: {variant: [record, ..]}}`).
pub fn inventory_from_value(value: &Value) -> DomainResult<InventoryByType> {
    inventory_at(value, "inventory")
}

/// Parse one school document (`{id, name, category?, inventory}`).
pub fn school_from_value(value: &Value, path: &str) -> DomainResult<School> {
    let obj = expect_object(value, path)?;

    let id_path = format!("{path}.id");
    let id: SchoolId = obj
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| DomainError::invalid_id(format!("{id_path}: expected string")))?
        .parse()?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| DomainError::validation(format!("{path}.name: expected non-empty string")))?
        .to_string();

    let category = match obj.get("category") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(DomainError::invalid_shape(format!(
                "{path}.category: expected string, found {}",
                kind(other)
            )));
        }
    };

    let inventory = match obj.get("inventory") {
        None | Some(Value::Null) => InventoryByType::new(),
        Some(v) => inventory_at(v, &format!("{path}.inventory"))?,
    };

    Ok(School {
        id,
        name,
        category,
        inventory,
    })
}

/// Parse a list of school documents.
pub fn schools_from_value(value: &Value) -> DomainResult<Vec<School>> {
    let items = value.as_array().ok_or_else(|| {
        DomainError::invalid_shape(format!("schools: expected array, found {}", kind(value)))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, v)| school_from_value(v, &format!("schools[{i}]")))
        .collect()
}

/// Parse a list of stock records (the sizes of one variant).
pub fn records_from_value(value: &Value, path: &str) -> DomainResult<Vec<StockRecord>> {
    let items = value.as_array().ok_or_else(|| {
        DomainError::invalid_shape(format!("{path}: expected array, found {}", kind(value)))
    })?;

    let mut records: Vec<StockRecord> = Vec::with_capacity(items.len());
    for (i, raw) in items.iter().enumerate() {
        let record = record_from_value(raw, &format!("{path}[{i}]"))?;
        if records.iter().any(|r| r.size == record.size) {
            return Err(DomainError::invalid_record(format!(
                "{path}[{i}]: duplicate size {:?}",
                record.size
            )));
        }
        records.push(record);
    }
    Ok(records)
}

/// Parse a single stock record.
pub fn record_from_value(value: &Value, path: &str) -> DomainResult<StockRecord> {
    let obj = value.as_object().ok_or_else(|| {
        DomainError::invalid_record(format!("{path}: expected object, found {}", kind(value)))
    })?;

    // Waist sizes are often stored as numbers.
    let size = match obj.get("size") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            return Err(DomainError::invalid_record(format!(
                "{path}.size: expected non-empty string or number"
            )));
        }
    };

    let quantity = match obj.get("quantity") {
        None | Some(Value::Null) => {
            return Err(DomainError::invalid_record(format!("{path}.quantity: missing")));
        }
        Some(v) => coerce_count(v, &format!("{path}.quantity"))?,
    };

    Ok(StockRecord {
        size,
        quantity,
        allocated: optional_count(obj, "allocated", path)?,
        reorder: optional_count(obj, "reorder", path)?,
    })
}

fn inventory_at(value: &Value, path: &str) -> DomainResult<InventoryByType> {
    let types = expect_object(value, path)?;

    let mut out = Vec::with_capacity(types.len());
    for (type_name, variants) in types {
        let type_path = format!("{path}.{type_name}");
        let variants = expect_object(variants, &type_path)?;

        let mut product_type = ProductType::new(type_name.clone());
        for (variant_name, sizes) in variants {
            let sizes = records_from_value(sizes, &format!("{type_path}.{variant_name}"))?;
            product_type.variants.push(Variant::new(variant_name.clone(), sizes));
        }
        out.push(product_type);
    }

    Ok(InventoryByType::from_types(out))
}

fn expect_object<'a>(value: &'a Value, path: &str) -> DomainResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        DomainError::invalid_shape(format!("{path}: expected object, found {}", kind(value)))
    })
}

fn optional_count(obj: &Map<String, Value>, field: &str, path: &str) -> DomainResult<u64> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(v) => coerce_count(v, &format!("{path}.{field}")),
    }
}

/// Coerce a JSON value into a non-negative integer count.
///
/// Accepts integers, integral floats (`4.0`) and numeric strings (`" 12 "`).
fn coerce_count(value: &Value, path: &str) -> DomainResult<u64> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Ok(u);
            }
            match n.as_f64() {
                Some(f) => float_to_count(f, path),
                None => Err(DomainError::invalid_record(format!("{path}: not a number"))),
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(u) = trimmed.parse::<u64>() {
                return Ok(u);
            }
            match trimmed.parse::<f64>() {
                Ok(f) => float_to_count(f, path),
                Err(_) => Err(DomainError::invalid_record(format!(
                    "{path}: {s:?} is not a number"
                ))),
            }
        }
        other => Err(DomainError::invalid_record(format!(
            "{path}: expected number, found {}",
            kind(other)
        ))),
    }
}

fn float_to_count(f: f64, path: &str) -> DomainResult<u64> {
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(DomainError::invalid_record(format!("{path}: {f} is not a whole number")));
    }
    if f < 0.0 {
        return Err(DomainError::invalid_record(format!("{path}: {f} is negative")));
    }
    if f > u64::MAX as f64 {
        return Err(DomainError::invalid_record(format!("{path}: {f} is out of range")));
    }
    Ok(f as u64)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

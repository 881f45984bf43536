use serde::Serialize;
use serde::ser::SerializeMap;

use uniformops_core::SchoolId;
use uniformops_inventory::{School, StockReport, StockStatus, classify_school, classify_type};

// -------------------------
// Response DTOs
// -------------------------

/// Row of the school picker.
#[derive(Debug, Clone, Serialize)]
pub struct SchoolListing {
    pub id: SchoolId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub status: StockStatus,
}

impl From<&School> for SchoolListing {
    fn from(school: &School) -> Self {
        Self {
            id: school.id,
            name: school.name.clone(),
            category: school.category.clone(),
            status: classify_school(school).status,
        }
    }
}

/// School-level status plus one report per type (details per variant).
#[derive(Debug, Clone, Serialize)]
pub struct SchoolStatus {
    pub school_id: SchoolId,
    pub overall: StockReport,
    pub by_type: TypeReports,
}

/// Type name → report, serialized as an object in display order.
#[derive(Debug, Clone)]
pub struct TypeReports(pub Vec<(String, StockReport)>);

impl Serialize for TypeReports {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, report) in &self.0 {
            map.serialize_entry(name, report)?;
        }
        map.end()
    }
}

impl From<&School> for SchoolStatus {
    fn from(school: &School) -> Self {
        Self {
            school_id: school.id,
            overall: classify_school(school),
            by_type: TypeReports(
                school
                    .inventory
                    .types()
                    .iter()
                    .map(|t| (t.name.clone(), classify_type(t)))
                    .collect(),
            ),
        }
    }
}

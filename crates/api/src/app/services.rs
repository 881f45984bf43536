//! Service layer behind the routes: fetch a snapshot, run the pure
//! inventory computations over it.

use std::sync::Arc;

use chrono::Utc;

use uniformops_core::SchoolId;
use uniformops_infra::{SchoolRepository, StoreError};
use uniformops_inventory::{
    DashboardSummary, FilterCriteria, InventoryByType, ReorderLine, School, SchoolCriteria, Totals,
    aggregate, filter_inventory, filter_schools, reorder_candidates, summarize_all,
};

/// Shared application services (injected into handlers via `Extension`).
pub struct AppServices {
    store: Arc<dyn SchoolRepository>,
}

impl AppServices {
    pub fn new(store: Arc<dyn SchoolRepository>) -> Self {
        Self { store }
    }

    pub async fn schools(&self) -> Result<Vec<School>, StoreError> {
        self.store.list_schools().await
    }

    pub async fn school(&self, id: SchoolId) -> Result<Option<School>, StoreError> {
        self.store.get_school(id).await
    }

    pub async fn filtered_inventory(
        &self,
        id: SchoolId,
        criteria: &FilterCriteria,
    ) -> Result<Option<InventoryByType>, StoreError> {
        let school = self.store.get_school(id).await?;
        Ok(school.map(|s| filter_inventory(&s.inventory, criteria)))
    }

    pub async fn totals(
        &self,
        id: SchoolId,
        criteria: &FilterCriteria,
    ) -> Result<Option<Totals>, StoreError> {
        // Unfiltered totals keep empty variants (reported as 0).
        if criteria.is_noop() {
            let school = self.store.get_school(id).await?;
            return Ok(school.map(|s| aggregate(&s.inventory)));
        }
        let inventory = self.filtered_inventory(id, criteria).await?;
        Ok(inventory.map(|inv| aggregate(&inv)))
    }

    pub async fn reorder(&self, id: SchoolId) -> Result<Option<Vec<ReorderLine>>, StoreError> {
        let school = self.store.get_school(id).await?;
        Ok(school.as_ref().map(reorder_candidates))
    }

    pub async fn dashboard_summary(
        &self,
        criteria: &SchoolCriteria,
    ) -> Result<DashboardSummary, StoreError> {
        let schools = self.store.list_schools().await?;
        let selected = filter_schools(&schools, criteria);
        tracing::debug!(
            total = schools.len(),
            selected = selected.len(),
            "computing dashboard summary"
        );
        Ok(summarize_all(&selected, Utc::now()))
    }
}

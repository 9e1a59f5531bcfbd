use crate::cache::SearchCache;
use crate::dto::challan_dto::{
    ChallanQuery, CreateChallanRequest, LastSearchResponse, SetStatusRequest, UpdateChallanRequest,
};
use crate::dto::vehicle_dto::EmailQuery;
use crate::models::Challan;
use crate::services::{ChallanLifecycleService, ChallanLookupService, ChallanStats};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::normalize_vehicle_number;

pub struct ChallanController {
    lookup: ChallanLookupService,
    lifecycle: ChallanLifecycleService,
    search_cache: SearchCache,
}

impl ChallanController {
    pub fn new(state: &AppState) -> Self {
        Self {
            lookup: state.lookup.clone(),
            lifecycle: state.lifecycle.clone(),
            search_cache: state.search_cache.clone(),
        }
    }

    /// Consulta con control de propiedad; recuerda la búsqueda de la cuenta
    pub async fn list(&self, query: ChallanQuery) -> AppResult<Vec<Challan>> {
        let request = query.into_lookup();
        let challans = self.lookup.lookup(&request).await?;

        if let (Some(vehicle_number), Some(account_id)) =
            (request.vehicle_number.as_deref(), request.account_id.as_deref())
        {
            let normalized = normalize_vehicle_number(vehicle_number);
            if !normalized.is_empty() {
                self.search_cache.remember(account_id, &normalized).await;
            }
        }

        Ok(challans)
    }

    pub async fn stats(&self, query: ChallanQuery) -> AppResult<ChallanStats> {
        let challans = self.lookup.lookup(&query.into_lookup()).await?;
        Ok(ChallanStats::from_records(&challans))
    }

    pub async fn get(&self, id: &str) -> AppResult<Challan> {
        self.lifecycle
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Challan"))
    }

    pub async fn create(&self, request: CreateChallanRequest) -> AppResult<Challan> {
        self.lifecycle.create_record(request.into_new_challan()?).await
    }

    pub async fn update(&self, id: &str, request: UpdateChallanRequest) -> AppResult<Challan> {
        self.lifecycle.update(id, request.into_update()?).await
    }

    pub async fn set_status(&self, id: &str, request: SetStatusRequest) -> AppResult<Challan> {
        self.lifecycle.set_status(id, &request.status).await
    }

    pub async fn pay(&self, id: &str) -> AppResult<Challan> {
        self.lifecycle.mark_paid(id).await
    }

    pub async fn seed(&self) -> AppResult<()> {
        self.lifecycle.seed_demo_data().await
    }

    pub async fn last_search(&self, query: EmailQuery) -> AppResult<LastSearchResponse> {
        let email = query
            .email()
            .ok_or_else(|| AppError::BadRequest("Email required".to_string()))?;

        self.search_cache
            .recall(email)
            .await
            .map(|vehicle_number| LastSearchResponse { vehicle_number })
            .ok_or_else(|| not_found_error("Recent search"))
    }

    pub async fn clear_last_search(&self, query: EmailQuery) -> AppResult<()> {
        let email = query
            .email()
            .ok_or_else(|| AppError::BadRequest("Email required".to_string()))?;

        self.search_cache.clear(email).await;
        Ok(())
    }
}

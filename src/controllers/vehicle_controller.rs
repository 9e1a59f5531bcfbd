use crate::dto::vehicle_dto::{EmailQuery, OwnershipStatusResponse, RegisterVehicleRequest};
use crate::models::Vehicle;
use crate::services::{ChallanLookupService, Registration, VehicleRegistryService};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    registry: VehicleRegistryService,
    lookup: ChallanLookupService,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            registry: state.registry.clone(),
            lookup: state.lookup.clone(),
        }
    }

    pub async fn register(&self, request: RegisterVehicleRequest) -> AppResult<Registration> {
        let (vehicle_number, email) = request
            .fields()
            .ok_or_else(|| AppError::BadRequest("Missing fields".to_string()))?;

        self.registry.register(vehicle_number, email).await
    }

    pub async fn my_vehicles(&self, query: EmailQuery) -> AppResult<Vec<Vehicle>> {
        let email = query
            .email()
            .ok_or_else(|| AppError::BadRequest("Email required".to_string()))?;

        self.registry.list_by_owner(email).await
    }

    pub async fn ownership_status(
        &self,
        vehicle_number: &str,
        query: EmailQuery,
    ) -> AppResult<OwnershipStatusResponse> {
        let status = self.lookup.ownership_status(vehicle_number, query.email()).await?;
        Ok(OwnershipStatusResponse { status })
    }
}

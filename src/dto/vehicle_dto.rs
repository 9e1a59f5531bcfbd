use serde::{Deserialize, Serialize};

use crate::models::{OwnershipStatus, Vehicle};

// Request para registrar un vehículo
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVehicleRequest {
    pub vehicle_number: Option<String>,
    pub email: Option<String>,
}

impl RegisterVehicleRequest {
    /// Ambos campos presentes y no vacíos
    pub fn fields(&self) -> Option<(&str, &str)> {
        let vehicle_number = self.vehicle_number.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let email = self.email.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((vehicle_number, email))
    }
}

// Response de re-registro idempotente
#[derive(Debug, Serialize)]
pub struct RegisterVehicleResponse {
    pub message: String,
    pub vehicle: Vehicle,
}

// Query `?email=`
#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct OwnershipStatusResponse {
    pub status: OwnershipStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_fields_require_both_values() {
        let request = RegisterVehicleRequest {
            vehicle_number: Some("MH12AB1234".to_string()),
            email: Some("  ".to_string()),
        };
        assert!(request.fields().is_none());

        let request = RegisterVehicleRequest {
            vehicle_number: Some("MH12AB1234".to_string()),
            email: Some("a@x.com".to_string()),
        };
        assert_eq!(request.fields(), Some(("MH12AB1234", "a@x.com")));
    }
}

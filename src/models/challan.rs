//! Modelo de Challan
//!
//! Registro de una infracción de tráfico. La relación con `Vehicle` es
//! blanda: `license_plate` se compara normalizada y puede apuntar a una
//! matrícula no registrada.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::validation::normalize_vehicle_number;

/// Estado del challan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChallanStatus {
    #[default]
    Pending,
    Paid,
}

impl ChallanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallanStatus::Pending => "Pending",
            ChallanStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for ChallanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error al parsear un estado fuera de `Pending` | `Paid`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid status (expected Pending or Paid)")]
pub struct UnknownStatus(pub String);

impl FromStr for ChallanStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ChallanStatus::Pending),
            "Paid" => Ok(ChallanStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Challan principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challan {
    pub id: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "type", alias = "violationType")]
    pub violation_type: String,
    pub location: String,
    pub license_plate: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: ChallanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Challan {
    /// Matrícula normalizada para comparar en lecturas
    pub fn normalized_plate(&self) -> String {
        normalize_vehicle_number(&self.license_plate)
    }

    /// Aplicar una actualización parcial; el `id` nunca cambia
    pub fn apply(&mut self, update: &ChallanUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }

        let details = &update.details;
        if let Some(date) = &details.date {
            self.date = date.clone();
        }
        if let Some(time) = &details.time {
            self.time = time.clone();
        }
        if let Some(violation_type) = &details.violation_type {
            self.violation_type = violation_type.clone();
        }
        if let Some(location) = &details.location {
            self.location = location.clone();
        }
        if let Some(license_plate) = &details.license_plate {
            self.license_plate = license_plate.clone();
        }
        if let Some(amount) = details.amount {
            self.amount = amount;
        }
        if let Some(due_date) = &details.due_date {
            self.due_date = Some(due_date.clone());
        }
        if let Some(description) = &details.description {
            self.description = Some(description.clone());
        }
    }
}

/// Campos editables de un challan (todo excepto `id` y `status`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChallanDetailsPatch {
    pub date: Option<String>,
    pub time: Option<String>,
    pub violation_type: Option<String>,
    pub location: Option<String>,
    pub license_plate: Option<String>,
    pub amount: Option<Decimal>,
    pub due_date: Option<String>,
    pub description: Option<String>,
}

impl ChallanDetailsPatch {
    pub fn is_empty(&self) -> bool {
        *self == ChallanDetailsPatch::default()
    }
}

/// Actualización cerrada sobre un challan existente
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChallanUpdate {
    pub status: Option<ChallanStatus>,
    pub details: ChallanDetailsPatch,
}

impl ChallanUpdate {
    pub fn status(status: ChallanStatus) -> Self {
        Self {
            status: Some(status),
            details: ChallanDetailsPatch::default(),
        }
    }

    pub fn details(details: ChallanDetailsPatch) -> Self {
        Self { status: None, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Challan {
        Challan {
            id: "CHLN001".to_string(),
            date: "2024-10-15".to_string(),
            time: "14:30".to_string(),
            violation_type: "Speeding".to_string(),
            location: "Mumbai-Pune Expressway".to_string(),
            license_plate: "mh 12 ab 1234".to_string(),
            amount: Decimal::from(1000),
            status: ChallanStatus::Pending,
            due_date: None,
            description: None,
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Paid".parse::<ChallanStatus>(), Ok(ChallanStatus::Paid));
        assert_eq!("Pending".parse::<ChallanStatus>(), Ok(ChallanStatus::Pending));
        assert!("paid".parse::<ChallanStatus>().is_err());
        assert!("Invalid".parse::<ChallanStatus>().is_err());
    }

    #[test]
    fn test_wire_format_uses_type_and_number_amount() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "Speeding");
        assert_eq!(value["licensePlate"], "mh 12 ab 1234");
        assert_eq!(value["amount"], json!(1000.0));
        assert_eq!(value["status"], "Pending");
        assert!(value.get("dueDate").is_none());
    }

    #[test]
    fn test_deserialize_accepts_violation_type_alias() {
        let challan: Challan = serde_json::from_value(json!({
            "id": "CHLN009",
            "date": "2024-12-01",
            "time": "10:00",
            "violationType": "Helmet Violation",
            "location": "Shivaji Nagar",
            "licensePlate": "MH14XY9876",
            "amount": 500,
            "status": "Paid"
        }))
        .unwrap();

        assert_eq!(challan.violation_type, "Helmet Violation");
        assert_eq!(challan.amount, Decimal::from(500));
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut challan = sample();
        let update = ChallanUpdate {
            status: Some(ChallanStatus::Paid),
            details: ChallanDetailsPatch {
                amount: Some(Decimal::from(42)),
                ..Default::default()
            },
        };
        challan.apply(&update);

        assert_eq!(challan.id, "CHLN001");
        assert_eq!(challan.amount, Decimal::from(42));
        assert_eq!(challan.status, ChallanStatus::Paid);
        assert_eq!(challan.location, "Mumbai-Pune Expressway");
    }

    #[test]
    fn test_normalized_plate() {
        assert_eq!(sample().normalized_plate(), "MH12AB1234");
    }
}

//! Servicios de negocio
//!
//! Registro de vehículos, consulta con control de propiedad, ciclo de vida
//! de los challans y estadísticas agregadas.

pub mod challan_lifecycle_service;
pub mod challan_lookup_service;
pub mod challan_stats_service;
pub mod vehicle_registry_service;

pub use challan_lifecycle_service::{ChallanLifecycleService, NewChallan};
pub use challan_lookup_service::{ChallanLookupService, LookupRequest};
pub use challan_stats_service::ChallanStats;
pub use vehicle_registry_service::{Registration, VehicleRegistryService};

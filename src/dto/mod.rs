//! DTOs de la API
//!
//! Requests y responses de los endpoints de vehículos y challans.

pub mod challan_dto;
pub mod vehicle_dto;

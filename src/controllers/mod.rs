//! Controladores
//!
//! Traducen DTOs a llamadas de servicio.

pub mod challan_controller;
pub mod vehicle_controller;

pub use challan_controller::ChallanController;
pub use vehicle_controller::VehicleController;

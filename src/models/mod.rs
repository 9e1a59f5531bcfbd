//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio: vehículos registrados y
//! challans (infracciones de tráfico).

pub mod challan;
pub mod vehicle;

pub use challan::{Challan, ChallanDetailsPatch, ChallanStatus, ChallanUpdate};
pub use vehicle::{OwnershipStatus, Vehicle};

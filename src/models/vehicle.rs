//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su enum de estado.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Rented,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Maintenance => "maintenance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(VehicleStatus::Available),
            "rented" => Some(VehicleStatus::Rented),
            "maintenance" => Some(VehicleStatus::Maintenance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub size: Option<String>,
    pub plate: String,
    pub status: String,
    pub is_active: bool,
}

impl Vehicle {
    /// Nombre para mostrar: "Toyota Hilux (ABC-123)"
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.plate)
    }
}

//! Modelo de Driver (conductor)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del conductor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    Available,
    Busy,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Available => "available",
            DriverStatus::Busy => "busy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(DriverStatus::Available),
            "busy" => Some(DriverStatus::Busy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub license: Option<String>,
    pub status: String,
    pub is_active: bool,
}

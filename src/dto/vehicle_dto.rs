use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(length(max = 50))]
    pub size: Option<String>,

    #[validate(length(min = 4, max = 20))]
    pub plate: String,

    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(length(max = 50))]
    pub size: Option<String>,

    #[validate(length(min = 4, max = 20))]
    pub plate: Option<String>,

    pub status: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub size: Option<String>,
    pub plate: String,
    pub status: String,
    pub is_active: bool,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            size: vehicle.size,
            plate: vehicle.plate,
            status: vehicle.status,
            is_active: vehicle.is_active,
        }
    }
}

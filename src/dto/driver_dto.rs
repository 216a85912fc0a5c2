use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::driver::Driver;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 50))]
    pub license: Option<String>,

    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(length(max = 50))]
    pub license: Option<String>,

    pub status: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub license: Option<String>,
    pub status: String,
    pub is_active: bool,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            name: driver.name,
            phone: driver.phone,
            license: driver.license,
            status: driver.status,
            is_active: driver.is_active,
        }
    }
}

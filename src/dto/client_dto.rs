use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::client::Client;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ClientResponse {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            phone: client.phone,
            is_active: client.is_active,
        }
    }
}

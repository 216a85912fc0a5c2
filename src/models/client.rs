//! Modelo de Client
//!
//! Entidad de catálogo referenciada por los alquileres. Nunca se elimina
//! físicamente una vez referenciada: se desactiva con is_active.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub is_active: bool,
}

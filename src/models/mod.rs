//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod category;
pub mod client;
pub mod driver;
pub mod payment;
pub mod rental;
pub mod vehicle;

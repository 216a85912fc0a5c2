//! Backend de gestión de alquiler de vehículos
//!
//! API para contratos de alquiler, ledger de pagos con cobros parciales
//! y devoluciones, catálogos de clientes/vehículos/conductores y el
//! barrido de auto-completado de reservas.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

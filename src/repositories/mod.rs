//! Repositorios de acceso a datos
//!
//! Una capa por entidad sobre el pool de PostgreSQL. Cada operación es
//! una escritura de una sola fila, salvo las que recalculan agregados o
//! eliminan en cascada, que van en transacción.

pub mod category_repository;
pub mod client_repository;
pub mod driver_repository;
pub mod payment_repository;
pub mod rental_repository;
pub mod vehicle_repository;

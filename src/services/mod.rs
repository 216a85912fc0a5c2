//! Núcleo de reconciliación de reservas
//!
//! Funciones puras sobre tipos de valor explícitos (ledger de pagos,
//! conflictos de horario, tarifas) más la regla de auto-completado, que
//! es el único componente con efecto externo.

pub mod completion_service;
pub mod conflict_service;
pub mod ledger_service;
pub mod rate_service;

//! Controllers del sistema
//!
//! Cada controller valida la entrada, invoca el núcleo de
//! reconciliación y delega la persistencia en su repositorio.

pub mod category_controller;
pub mod client_controller;
pub mod driver_controller;
pub mod payment_controller;
pub mod rental_controller;
pub mod report_controller;
pub mod vehicle_controller;

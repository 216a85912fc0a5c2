pub mod category_routes;
pub mod client_routes;
pub mod driver_routes;
pub mod payment_routes;
pub mod rental_routes;
pub mod report_routes;
pub mod vehicle_routes;

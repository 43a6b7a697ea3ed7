pub mod auth_routes;
pub mod garage_routes;
pub mod public_routes;

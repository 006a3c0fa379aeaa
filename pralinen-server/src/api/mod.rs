//! HTTP API handlers for pralinen-server

pub mod auth;
pub mod health;
pub mod params;
pub mod persons;
pub mod pralines;
pub mod rate;
pub mod years;

pub use auth::{admin_auth_middleware, AdminGate, BearerTokenGate};
pub use health::health_routes;
pub use persons::admin_person_routes;
pub use pralines::admin_praline_routes;
pub use rate::rate_routes;
pub use years::{admin_year_routes, public_year_routes};

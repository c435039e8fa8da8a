//! HTTP adapter for the survey surface.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::survey_routes;

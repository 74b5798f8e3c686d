//! Domain layer: models, repository ports, and errors.

pub mod errors;
pub mod models;
pub mod ports;

pub mod config;
pub mod error;
pub mod form;
pub mod microservice;
pub mod team;

pub use config::ConsoleConfig;
pub use error::{CatalogError, Result};
pub use form::{FormGroup, Validator};
pub use microservice::Microservice;
pub use team::Team;

pub mod client;
pub mod microservice;
pub mod response;
pub mod team;

pub use client::ApiClient;
pub use microservice::{HttpMicroserviceApi, MicroserviceApi};
pub use response::{EntityResponse, QueryRequest};
pub use team::{HttpTeamApi, TeamApi};

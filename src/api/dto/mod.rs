//! Data Transfer Objects for REST request/response serialization.
//!
//! Request DTOs accept both the canonical mixed-case field names
//! (`numSensor`) and the lowercase variants older clients send; the
//! mapping is declared here, never probed ad hoc.

pub mod area_dto;
pub mod auth_dto;
pub mod beacon_dto;
pub mod common_dto;

pub use area_dto::*;
pub use auth_dto::*;
pub use beacon_dto::*;
pub use common_dto::*;

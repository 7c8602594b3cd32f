//! # beacon-registry
//!
//! Registry REST service for a network of fixed positioning sensors
//! ("beacons") grouped into named physical areas. The service owns the
//! transactional data-consistency core: area/beacon referential
//! integrity, derived-identifier generation, atomic bulk provisioning,
//! and credential issuance with signed bearer tokens. Dashboards and the
//! mobile ranging app are thin external collaborators.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── AreaService / BeaconService / AuthService (service/)
//!     ├── Domain rules: codigo, codSensor, pinned z (domain/)
//!     │
//!     └── PostgreSQL pool + migrations (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;

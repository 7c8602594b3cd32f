//! Domain model: areas, beacons, users, and the derivation rules that
//! tie them together.

pub mod area;
pub mod beacon;
pub mod user;

pub use area::{Area, derive_codigo};
pub use beacon::{Beacon, PINNED_Z, derive_cod_sensor};
pub use user::User;

//! Area records and the derived `codigo` rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A named physical zone owning zero or more beacons.
///
/// `numero` is unique across all areas, active or not. `codigo` is always
/// a pure function of (`ubicacion`, `numero`), see [`derive_codigo`],
/// and is never accepted verbatim from a client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Area {
    /// Opaque unique identifier, assigned at creation.
    pub id: Uuid,
    /// Positive integer, unique across all areas.
    pub numero: i32,
    /// Display name.
    pub nombre: String,
    /// Derived code, e.g. `CIT-01`.
    pub codigo: String,
    /// Optional free-form description.
    pub descripcion: Option<String>,
    /// Location label from an open set (`CIT`, `Biblioteca`, ...).
    pub ubicacion: String,
    /// Hex color string for the dashboard.
    pub color: String,
    /// Whether the area is active. Toggling is independent of deletion.
    pub activo: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Derives an area's `codigo` from its location and number.
///
/// The code is the first three characters of `ubicacion` uppercased,
/// a dash, and `numero` zero-padded to two digits: `("CIT", 1)` →
/// `"CIT-01"`. Stable unless `ubicacion` or `numero` change.
#[must_use]
pub fn derive_codigo(numero: i32, ubicacion: &str) -> String {
    let prefix: String = ubicacion.chars().take(3).collect::<String>().to_uppercase();
    format!("{prefix}-{numero:02}")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn codigo_pads_single_digit_numbers() {
        assert_eq!(derive_codigo(1, "CIT"), "CIT-01");
        assert_eq!(derive_codigo(7, "CIT"), "CIT-07");
    }

    #[test]
    fn codigo_keeps_two_digit_numbers() {
        assert_eq!(derive_codigo(12, "CIT"), "CIT-12");
    }

    #[test]
    fn codigo_truncates_and_uppercases_location() {
        assert_eq!(derive_codigo(3, "Biblioteca"), "BIB-03");
        assert_eq!(derive_codigo(5, "cafeteria"), "CAF-05");
    }

    #[test]
    fn codigo_handles_short_locations() {
        assert_eq!(derive_codigo(2, "ab"), "AB-02");
    }
}

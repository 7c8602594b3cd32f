//! Beacon records, the derived `codSensor` rule, and the pinned mounting
//! height.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Mounting height written to every beacon on create and update,
/// regardless of any client-supplied value.
///
/// Observed behavior of the deployed fleet: all sensors sit at 1.65 m.
/// Whether this is a deliberate business rule or a fossilized caller
/// default is unresolved; the behavior is preserved as-is rather than
/// silently "fixed". See DESIGN.md.
pub const PINNED_Z: f64 = 1.65;

/// A positioning sensor belonging to exactly one area.
///
/// JSON uses the historical mixed-case field names (`numSensor`,
/// `codSensor`, `idenSensor`, `areaId`) while the database columns are
/// all-lowercase; both boundaries are normalized here to one canonical
/// snake_case shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Beacon {
    /// Opaque unique identifier.
    pub id: Uuid,
    /// Per-area sequence label, e.g. `"1"`.
    #[serde(rename = "numSensor")]
    #[sqlx(rename = "numsensor")]
    pub num_sensor: String,
    /// Derived code `{areaCode}-{numSensor}`. Never client-settable.
    #[serde(rename = "codSensor")]
    #[sqlx(rename = "codsensor")]
    pub cod_sensor: String,
    /// External-facing identifier.
    #[serde(rename = "idenSensor")]
    #[sqlx(rename = "idensensor")]
    pub iden_sensor: String,
    /// X coordinate in `unidades`.
    pub x: Option<f64>,
    /// Y coordinate in `unidades`.
    pub y: Option<f64>,
    /// Mounting height. Always [`PINNED_Z`] after persistence.
    pub z: f64,
    /// Measurement unit label.
    pub unidades: Option<String>,
    /// Owning area's id. Legacy rows may carry only `nivel`.
    #[serde(rename = "areaId")]
    #[sqlx(rename = "areaid")]
    pub area_id: Option<Uuid>,
    /// Legacy numeric mirror of the owning area's `numero`.
    pub nivel: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Derives a beacon's `codSensor` from the owning area's code.
///
/// When the area lookup resolved, the code is `{codigo}-{numSensor}`;
/// when it did not, the area code degrades to `NIVEL-{nivel}`, giving
/// `NIVEL-{nivel}-{numSensor}`.
#[must_use]
pub fn derive_cod_sensor(area_code: Option<&str>, nivel: i32, num_sensor: &str) -> String {
    match area_code {
        Some(code) => format!("{code}-{num_sensor}"),
        None => format!("NIVEL-{nivel}-{num_sensor}"),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn cod_sensor_uses_resolved_area_code() {
        assert_eq!(derive_cod_sensor(Some("CIT-02"), 2, "5"), "CIT-02-5");
    }

    #[test]
    fn cod_sensor_falls_back_to_nivel() {
        assert_eq!(derive_cod_sensor(None, 6, "12"), "NIVEL-6-12");
    }

    #[test]
    fn pinned_height_is_one_sixty_five() {
        assert!((PINNED_Z - 1.65).abs() < f64::EPSILON);
    }
}

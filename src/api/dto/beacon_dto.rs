//! Request DTOs for beacon endpoints.
//!
//! A client may send `z`, but the stored value is always the pinned
//! constant; the field is accepted only so older payloads do not break.
//! Lowercase aliases (`numsensor`, `idensensor`, `areaid`) cover clients
//! that echo database column names back.

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// `POST /api/beacons` request body, and the per-item shape of
/// [`BulkCreateBeaconsRequest`].
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBeaconRequest {
    /// Per-area sequence label. Required.
    #[serde(rename = "numSensor", alias = "numsensor", default)]
    pub num_sensor: Option<String>,
    /// External-facing identifier. Required.
    #[serde(rename = "idenSensor", alias = "idensensor", default)]
    pub iden_sensor: Option<String>,
    /// X coordinate.
    #[serde(default)]
    pub x: Option<f64>,
    /// Y coordinate.
    #[serde(default)]
    pub y: Option<f64>,
    /// Ignored on write; the stored height is always pinned.
    #[serde(default)]
    pub z: Option<f64>,
    /// Measurement unit label.
    #[serde(default)]
    pub unidades: Option<String>,
    /// Legacy numeric area reference (the area's `numero`).
    #[serde(default)]
    pub nivel: Option<i32>,
    /// Owning area's id. Either this or `nivel` must be present.
    #[serde(rename = "areaId", alias = "areaid", default)]
    pub area_id: Option<Uuid>,
}

/// `POST /api/beacons/bulk` request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkCreateBeaconsRequest {
    /// Items to provision. The whole batch succeeds or fails as a unit.
    pub beacons: Vec<CreateBeaconRequest>,
}

/// `PATCH /api/beacons/{id}` request body. Omitted fields keep their
/// stored values; `z` is re-pinned on every call regardless.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBeaconRequest {
    /// New sequence label. Triggers `codSensor` regeneration.
    #[serde(rename = "numSensor", alias = "numsensor", default)]
    pub num_sensor: Option<String>,
    /// New external identifier.
    #[serde(rename = "idenSensor", alias = "idensensor", default)]
    pub iden_sensor: Option<String>,
    /// New X coordinate.
    #[serde(default)]
    pub x: Option<f64>,
    /// New Y coordinate.
    #[serde(default)]
    pub y: Option<f64>,
    /// Ignored on write; the stored height is always pinned.
    #[serde(default)]
    pub z: Option<f64>,
    /// New unit label.
    #[serde(default)]
    pub unidades: Option<String>,
    /// New legacy area reference. Triggers `codSensor` regeneration.
    #[serde(default)]
    pub nivel: Option<i32>,
    /// New owning area id. Triggers `codSensor` regeneration.
    #[serde(rename = "areaId", alias = "areaid", default)]
    pub area_id: Option<Uuid>,
}

/// Query parameters for `GET /api/beacons`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BeaconFilters {
    /// Exact `nivel` match.
    #[serde(default)]
    pub nivel: Option<i32>,
    /// Case-insensitive substring match on `codSensor`.
    #[serde(rename = "codSensor", alias = "codsensor", default)]
    pub cod_sensor: Option<String>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_lowercase_aliases() {
        let raw = r#"{"numsensor":"1","idensensor":"I1","nivel":2,"areaid":null}"#;
        let Ok(req) = serde_json::from_str::<CreateBeaconRequest>(raw) else {
            panic!("alias payload must deserialize");
        };
        assert_eq!(req.num_sensor.as_deref(), Some("1"));
        assert_eq!(req.iden_sensor.as_deref(), Some("I1"));
        assert_eq!(req.nivel, Some(2));
    }

    #[test]
    fn create_request_accepts_canonical_names() {
        let raw = r#"{"numSensor":"7","idenSensor":"BEACON-7","nivel":3,"x":1.5,"z":99.0}"#;
        let Ok(req) = serde_json::from_str::<CreateBeaconRequest>(raw) else {
            panic!("canonical payload must deserialize");
        };
        assert_eq!(req.num_sensor.as_deref(), Some("7"));
        assert_eq!(req.x, Some(1.5));
        assert_eq!(req.z, Some(99.0));
    }
}

//! Beacon registry: CRUD, derived-field generation, and atomic bulk
//! provisioning.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::api::dto::{BeaconFilters, CreateBeaconRequest, UpdateBeaconRequest};
use crate::domain::{Beacon, PINNED_Z, derive_cod_sensor};
use crate::error::{RegistryError, map_foreign_key_violation};

const BEACON_COLUMNS: &str = "id, numsensor, codsensor, idensensor, x, y, z, unidades, areaid, \
                              nivel, created_at, updated_at";

const UNKNOWN_AREA: &str = "areaId does not reference a known area";

const INSERT_BEACON: &str = "INSERT INTO beacons \
     (numsensor, codsensor, idensensor, x, y, z, unidades, areaid, nivel) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
     RETURNING id, numsensor, codsensor, idensensor, x, y, z, unidades, areaid, nivel, \
               created_at, updated_at";

/// Owns beacon CRUD, `codSensor` derivation, and all-or-nothing bulk
/// creation. Depends on the `areas` table only for code lookups.
#[derive(Debug, Clone)]
pub struct BeaconService {
    pool: PgPool,
    recognized_levels: Vec<i32>,
}

impl BeaconService {
    /// Creates a new service over the shared pool.
    ///
    /// `recognized_levels` is the set of area numbers a beacon's `nivel`
    /// may reference (configured, defaults to the deployed floors).
    #[must_use]
    pub fn new(pool: PgPool, recognized_levels: Vec<i32>) -> Self {
        Self {
            pool,
            recognized_levels,
        }
    }

    /// Returns beacons matching the filters, newest first.
    ///
    /// `nivel` is an exact match; `cod_sensor` a case-insensitive
    /// substring match.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Database`] on storage failure.
    pub async fn list(&self, filters: &BeaconFilters) -> Result<Vec<Beacon>, RegistryError> {
        let beacons = match (filters.nivel, filters.cod_sensor.as_deref()) {
            (Some(nivel), Some(cod)) => {
                sqlx::query_as::<_, Beacon>(&format!(
                    "SELECT {BEACON_COLUMNS} FROM beacons \
                     WHERE nivel = $1 AND codsensor ILIKE $2 ORDER BY created_at DESC"
                ))
                .bind(nivel)
                .bind(format!("%{cod}%"))
                .fetch_all(&self.pool)
                .await
            }
            (Some(nivel), None) => {
                sqlx::query_as::<_, Beacon>(&format!(
                    "SELECT {BEACON_COLUMNS} FROM beacons WHERE nivel = $1 \
                     ORDER BY created_at DESC"
                ))
                .bind(nivel)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(cod)) => {
                sqlx::query_as::<_, Beacon>(&format!(
                    "SELECT {BEACON_COLUMNS} FROM beacons WHERE codsensor ILIKE $1 \
                     ORDER BY created_at DESC"
                ))
                .bind(format!("%{cod}%"))
                .fetch_all(&self.pool)
                .await
            }
            (None, None) => {
                sqlx::query_as::<_, Beacon>(&format!(
                    "SELECT {BEACON_COLUMNS} FROM beacons ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }?;
        Ok(beacons)
    }

    /// Returns a single beacon.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no beacon has the given id.
    pub async fn get(&self, id: Uuid) -> Result<Beacon, RegistryError> {
        sqlx::query_as::<_, Beacon>(&format!(
            "SELECT {BEACON_COLUMNS} FROM beacons WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RegistryError::NotFound("beacon"))
    }

    /// Creates a single beacon.
    ///
    /// The owning area's `codigo` is resolved by `nivel` (or by `areaId`,
    /// which also fills `nivel` from the area); a missed `nivel` lookup
    /// degrades to the `NIVEL-{n}` fallback code instead of failing the
    /// request. A supplied `areaId` must resolve either way. The stored
    /// `z` is always [`PINNED_Z`], whatever the client sent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] on missing required fields,
    /// an unrecognized `nivel`, or an `areaId` naming no area.
    pub async fn create(&self, req: CreateBeaconRequest) -> Result<Beacon, RegistryError> {
        let item = validate_new_beacon(&req, &self.recognized_levels, None)?;

        // A dangling areaId is the client's mistake, not something for
        // the FK constraint to turn into a 500. Checked even when nivel
        // is also present.
        let resolved_area = match item.area_id {
            Some(area_id) => match self.area_by_id(area_id).await? {
                Some(found) => Some(found),
                None => return Err(RegistryError::Validation(UNKNOWN_AREA.to_string())),
            },
            None => None,
        };

        let (nivel, area_code) = match (item.nivel, resolved_area) {
            (Some(nivel), _) => (nivel, self.area_code_by_numero(nivel).await),
            (None, Some((numero, codigo))) => (numero, Some(codigo)),
            (None, None) => {
                return Err(RegistryError::Validation(
                    "nivel or areaId is required".to_string(),
                ));
            }
        };

        let cod_sensor = derive_cod_sensor(area_code.as_deref(), nivel, &item.num_sensor);

        let beacon = sqlx::query_as::<_, Beacon>(INSERT_BEACON)
            .bind(&item.num_sensor)
            .bind(&cod_sensor)
            .bind(&item.iden_sensor)
            .bind(item.x)
            .bind(item.y)
            .bind(PINNED_Z)
            .bind(&item.unidades)
            .bind(item.area_id)
            .bind(nivel)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_foreign_key_violation(e, UNKNOWN_AREA))?;

        tracing::info!(beacon_id = %beacon.id, cod_sensor = %beacon.cod_sensor, "beacon created");
        Ok(beacon)
    }

    /// Creates a batch of beacons atomically.
    ///
    /// Every item is validated up front without touching storage; the
    /// first invalid item fails the whole call (its position is named in
    /// the error) and nothing is written. The inserts then run inside a
    /// single transaction with the area→code map fetched once; any
    /// failure rolls the entire batch back.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] for the first invalid item,
    /// or [`RegistryError::Database`] if an insert fails (after rollback).
    pub async fn bulk_create(
        &self,
        items: Vec<CreateBeaconRequest>,
    ) -> Result<Vec<Beacon>, RegistryError> {
        if items.is_empty() {
            return Err(RegistryError::Validation(
                "beacons array must not be empty".to_string(),
            ));
        }

        let validated = items
            .iter()
            .enumerate()
            .map(|(i, item)| validate_new_beacon(item, &self.recognized_levels, Some(i + 1)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.pool.begin().await?;

        // One map fetch for the whole batch. Early returns below drop the
        // transaction, which rolls it back.
        let areas: Vec<(Uuid, i32, String)> =
            sqlx::query_as("SELECT id, numero, codigo FROM areas")
                .fetch_all(&mut *tx)
                .await?;
        let code_by_numero: HashMap<i32, String> = areas
            .iter()
            .map(|(_, numero, codigo)| (*numero, codigo.clone()))
            .collect();
        let area_by_id: HashMap<Uuid, (i32, String)> = areas
            .into_iter()
            .map(|(id, numero, codigo)| (id, (numero, codigo)))
            .collect();

        let mut created = Vec::with_capacity(validated.len());
        for (i, item) in validated.into_iter().enumerate() {
            let (nivel, area_code) =
                resolve_item_area(&item, i + 1, &code_by_numero, &area_by_id)?;

            let cod_sensor = derive_cod_sensor(area_code.as_deref(), nivel, &item.num_sensor);

            let beacon = sqlx::query_as::<_, Beacon>(INSERT_BEACON)
                .bind(&item.num_sensor)
                .bind(&cod_sensor)
                .bind(&item.iden_sensor)
                .bind(item.x)
                .bind(item.y)
                .bind(PINNED_Z)
                .bind(&item.unidades)
                .bind(item.area_id)
                .bind(nivel)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    map_foreign_key_violation(e, &format!("beacon {}: {UNKNOWN_AREA}", i + 1))
                })?;

            created.push(beacon);
        }

        tx.commit().await?;

        tracing::info!(count = created.len(), "bulk beacon batch committed");
        Ok(created)
    }

    /// Applies a partial update. Omitted fields keep their stored values;
    /// `codSensor` is regenerated when `numSensor` or the area reference
    /// changes; `z` is re-pinned on every call. Moving a beacon by
    /// `areaId` alone adopts that area's `numero` as the new `nivel` and
    /// derives the code from it, the same mirroring create does.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the beacon does not exist
    /// and [`RegistryError::Validation`] for an unrecognized `nivel` or
    /// an `areaId` naming no area.
    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateBeaconRequest,
    ) -> Result<Beacon, RegistryError> {
        if let Some(nivel) = req.nivel
            && !self.recognized_levels.contains(&nivel)
        {
            return Err(RegistryError::Validation(unrecognized_level_message(
                nivel,
                &self.recognized_levels,
            )));
        }

        let current = self.get(id).await?;

        let resolved_area = match req.area_id {
            Some(area_id) => match self.area_by_id(area_id).await? {
                Some(found) => Some(found),
                None => return Err(RegistryError::Validation(UNKNOWN_AREA.to_string())),
            },
            None => None,
        };

        let nivel = effective_nivel(&req, resolved_area.as_ref(), current.nivel);

        let regen = req.num_sensor.is_some() || req.nivel.is_some() || req.area_id.is_some();
        let area_code = if regen {
            // An explicit nivel wins the code lookup; otherwise a newly
            // supplied areaId provides its own code directly.
            match (req.nivel, &resolved_area) {
                (None, Some((_, codigo))) => Some(codigo.clone()),
                _ => self.area_code_by_numero(nivel).await,
            }
        } else {
            None
        };

        let patch = merge_update(&current, &req, nivel, area_code.as_deref());

        let beacon = sqlx::query_as::<_, Beacon>(&format!(
            "UPDATE beacons SET numsensor = $1, codsensor = $2, idensensor = $3, \
             x = $4, y = $5, z = $6, unidades = $7, areaid = $8, nivel = $9, \
             updated_at = now() WHERE id = $10 RETURNING {BEACON_COLUMNS}"
        ))
        .bind(&patch.num_sensor)
        .bind(&patch.cod_sensor)
        .bind(&patch.iden_sensor)
        .bind(patch.x)
        .bind(patch.y)
        .bind(patch.z)
        .bind(&patch.unidades)
        .bind(patch.area_id)
        .bind(patch.nivel)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, UNKNOWN_AREA))?;

        Ok(beacon)
    }

    /// Deletes a beacon and returns the deleted record. No cascading
    /// effect on areas.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no beacon has the given id.
    pub async fn delete(&self, id: Uuid) -> Result<Beacon, RegistryError> {
        let deleted = sqlx::query_as::<_, Beacon>(&format!(
            "DELETE FROM beacons WHERE id = $1 RETURNING {BEACON_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RegistryError::NotFound("beacon"))?;

        tracing::info!(beacon_id = %deleted.id, "beacon deleted");
        Ok(deleted)
    }

    /// Looks up an area's `codigo` by its `numero`, degrading to `None`
    /// (the `NIVEL-{n}` fallback) on both a miss and a lookup failure.
    async fn area_code_by_numero(&self, numero: i32) -> Option<String> {
        match sqlx::query_scalar::<_, String>("SELECT codigo FROM areas WHERE numero = $1")
            .bind(numero)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(code) => code,
            Err(e) => {
                tracing::warn!(error = %e, numero, "area code lookup failed, using fallback");
                None
            }
        }
    }

    /// Looks up an area's (`numero`, `codigo`) by id.
    async fn area_by_id(&self, id: Uuid) -> Result<Option<(i32, String)>, RegistryError> {
        let row = sqlx::query_as::<_, (i32, String)>(
            "SELECT numero, codigo FROM areas WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

/// A create-request item that passed pre-storage validation.
#[derive(Debug, Clone)]
struct ValidatedBeacon {
    num_sensor: String,
    iden_sensor: String,
    x: Option<f64>,
    y: Option<f64>,
    unidades: Option<String>,
    nivel: Option<i32>,
    area_id: Option<Uuid>,
}

/// Final column values for a beacon update.
#[derive(Debug)]
struct BeaconPatch {
    num_sensor: String,
    cod_sensor: String,
    iden_sensor: String,
    x: Option<f64>,
    y: Option<f64>,
    z: f64,
    unidades: Option<String>,
    area_id: Option<Uuid>,
    nivel: i32,
}

/// Validates one create-request item without touching storage.
///
/// `item` is the 1-based position inside a bulk batch; error messages
/// name it so the caller can tell which element failed. The client's `z`
/// is dropped here; the stored height is always the pinned constant.
fn validate_new_beacon(
    req: &CreateBeaconRequest,
    recognized_levels: &[i32],
    item: Option<usize>,
) -> Result<ValidatedBeacon, RegistryError> {
    let fail = |msg: String| {
        Err(RegistryError::Validation(match item {
            Some(n) => format!("beacon {n}: {msg}"),
            None => msg,
        }))
    };

    let num_sensor = match req.num_sensor.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => return fail("numSensor is required".to_string()),
    };
    let iden_sensor = match req.iden_sensor.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => return fail("idenSensor is required".to_string()),
    };

    if req.nivel.is_none() && req.area_id.is_none() {
        return fail("nivel or areaId is required".to_string());
    }
    if let Some(nivel) = req.nivel
        && !recognized_levels.contains(&nivel)
    {
        return fail(unrecognized_level_message(nivel, recognized_levels));
    }

    Ok(ValidatedBeacon {
        num_sensor,
        iden_sensor,
        x: req.x,
        y: req.y,
        unidades: req.unidades.clone(),
        nivel: req.nivel,
        area_id: req.area_id,
    })
}

/// Resolves one batch item's (`nivel`, area code) against the prefetched
/// maps. A supplied `areaId` must name a known area even when `nivel` is
/// also present; `nivel` stays authoritative for the code.
fn resolve_item_area(
    item: &ValidatedBeacon,
    position: usize,
    code_by_numero: &HashMap<i32, String>,
    area_by_id: &HashMap<Uuid, (i32, String)>,
) -> Result<(i32, Option<String>), RegistryError> {
    let resolved = match item.area_id {
        Some(area_id) => match area_by_id.get(&area_id) {
            Some(found) => Some(found),
            None => {
                return Err(RegistryError::Validation(format!(
                    "beacon {position}: {UNKNOWN_AREA}"
                )));
            }
        },
        None => None,
    };

    match (item.nivel, resolved) {
        (Some(nivel), _) => Ok((nivel, code_by_numero.get(&nivel).cloned())),
        (None, Some((numero, codigo))) => Ok((*numero, Some(codigo.clone()))),
        (None, None) => Err(RegistryError::Validation(format!(
            "beacon {position}: nivel or areaId is required"
        ))),
    }
}

/// Picks the `nivel` an update stores: an explicit value wins, then a
/// resolved `areaId` mirrors its area's `numero`, then the stored value
/// stays.
fn effective_nivel(
    req: &UpdateBeaconRequest,
    resolved_area: Option<&(i32, String)>,
    current: i32,
) -> i32 {
    req.nivel
        .or(resolved_area.map(|(numero, _)| *numero))
        .unwrap_or(current)
}

fn unrecognized_level_message(nivel: i32, recognized: &[i32]) -> String {
    let allowed = recognized
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("nivel {nivel} is not a recognized area number (allowed: {allowed})")
}

/// Merges a partial update over the current row.
///
/// `nivel` is the effective value the caller resolved (an explicit
/// `nivel`, a new area's `numero`, or the stored one) and `area_code` its
/// code; both are only consulted when the update touches `numSensor` or
/// the area reference. `z` comes out pinned no matter what the request
/// carried.
fn merge_update(
    current: &Beacon,
    req: &UpdateBeaconRequest,
    nivel: i32,
    area_code: Option<&str>,
) -> BeaconPatch {
    let num_sensor = req
        .num_sensor
        .clone()
        .unwrap_or_else(|| current.num_sensor.clone());
    let area_id = req.area_id.or(current.area_id);

    let regen = req.num_sensor.is_some() || req.nivel.is_some() || req.area_id.is_some();
    let cod_sensor = if regen {
        derive_cod_sensor(area_code, nivel, &num_sensor)
    } else {
        current.cod_sensor.clone()
    };

    BeaconPatch {
        num_sensor,
        cod_sensor,
        iden_sensor: req
            .iden_sensor
            .clone()
            .unwrap_or_else(|| current.iden_sensor.clone()),
        x: req.x.or(current.x),
        y: req.y.or(current.y),
        z: PINNED_Z,
        unidades: req.unidades.clone().or_else(|| current.unidades.clone()),
        area_id,
        nivel,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Utc;

    const LEVELS: [i32; 5] = [1, 2, 3, 6, 7];

    fn create_req(num: &str, iden: &str, nivel: Option<i32>) -> CreateBeaconRequest {
        CreateBeaconRequest {
            num_sensor: Some(num.to_string()),
            iden_sensor: Some(iden.to_string()),
            x: None,
            y: None,
            z: None,
            unidades: None,
            nivel,
            area_id: None,
        }
    }

    fn stored_beacon() -> Beacon {
        Beacon {
            id: Uuid::new_v4(),
            num_sensor: "1".to_string(),
            cod_sensor: "CIT-02-1".to_string(),
            iden_sensor: "I1".to_string(),
            x: Some(1.0),
            y: Some(2.0),
            z: PINNED_Z,
            unidades: Some("m".to_string()),
            area_id: None,
            nivel: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn validation_rejects_empty_num_sensor() {
        let req = create_req("", "I2", Some(2));
        let Err(RegistryError::Validation(msg)) = validate_new_beacon(&req, &LEVELS, None) else {
            panic!("empty numSensor must fail");
        };
        assert!(msg.contains("numSensor"));
    }

    #[test]
    fn validation_rejects_missing_area_reference() {
        let req = create_req("1", "I1", None);
        let Err(RegistryError::Validation(msg)) = validate_new_beacon(&req, &LEVELS, None) else {
            panic!("missing area reference must fail");
        };
        assert!(msg.contains("nivel or areaId"));
    }

    #[test]
    fn validation_rejects_unrecognized_nivel() {
        let req = create_req("1", "I1", Some(4));
        let Err(RegistryError::Validation(msg)) = validate_new_beacon(&req, &LEVELS, None) else {
            panic!("nivel 4 must fail");
        };
        assert!(msg.contains("nivel 4"));
    }

    #[test]
    fn bulk_validation_names_the_failing_item() {
        let items = vec![create_req("1", "I1", Some(2)), create_req("", "I2", Some(2))];
        let results: Vec<_> = items
            .iter()
            .enumerate()
            .map(|(i, item)| validate_new_beacon(item, &LEVELS, Some(i + 1)))
            .collect();
        assert!(results.first().is_some_and(Result::is_ok));
        let Some(Err(RegistryError::Validation(msg))) = results.get(1) else {
            panic!("second item must fail validation");
        };
        assert!(msg.starts_with("beacon 2:"));
    }

    #[test]
    fn validation_drops_client_supplied_z() {
        let mut req = create_req("1", "I1", Some(2));
        req.z = Some(99.0);
        let Ok(_) = validate_new_beacon(&req, &LEVELS, None) else {
            panic!("valid item must pass");
        };
        // ValidatedBeacon has no z field at all; the insert binds PINNED_Z.
    }

    #[test]
    fn partial_update_keeps_untouched_fields_and_repins_z() {
        let current = stored_beacon();
        let req = UpdateBeaconRequest {
            x: Some(5.0),
            ..UpdateBeaconRequest::default()
        };
        let patch = merge_update(&current, &req, current.nivel, None);
        assert_eq!(patch.x, Some(5.0));
        assert_eq!(patch.y, Some(2.0));
        assert_eq!(patch.num_sensor, "1");
        assert_eq!(patch.cod_sensor, "CIT-02-1");
        assert_eq!(patch.iden_sensor, "I1");
        assert!((patch.z - PINNED_Z).abs() < f64::EPSILON);
    }

    #[test]
    fn update_regenerates_cod_sensor_when_num_sensor_changes() {
        let current = stored_beacon();
        let req = UpdateBeaconRequest {
            num_sensor: Some("9".to_string()),
            ..UpdateBeaconRequest::default()
        };
        let patch = merge_update(&current, &req, current.nivel, Some("CIT-02"));
        assert_eq!(patch.cod_sensor, "CIT-02-9");
    }

    #[test]
    fn update_regenerates_cod_sensor_when_nivel_changes() {
        let current = stored_beacon();
        let req = UpdateBeaconRequest {
            nivel: Some(6),
            ..UpdateBeaconRequest::default()
        };
        // Lookup missed: falls back to the NIVEL code.
        let patch = merge_update(&current, &req, 6, None);
        assert_eq!(patch.cod_sensor, "NIVEL-6-1");
        assert_eq!(patch.nivel, 6);
    }

    #[test]
    fn area_id_only_update_adopts_the_new_area() {
        let current = stored_beacon();
        let new_area = Uuid::new_v4();
        let req = UpdateBeaconRequest {
            area_id: Some(new_area),
            ..UpdateBeaconRequest::default()
        };
        let resolved = (6, "LAB-06".to_string());
        let nivel = effective_nivel(&req, Some(&resolved), current.nivel);
        assert_eq!(nivel, 6);
        let patch = merge_update(&current, &req, nivel, Some("LAB-06"));
        assert_eq!(patch.nivel, 6);
        assert_eq!(patch.cod_sensor, "LAB-06-1");
        assert_eq!(patch.area_id, Some(new_area));
    }

    #[test]
    fn explicit_nivel_wins_over_area_mirror() {
        let req = UpdateBeaconRequest {
            nivel: Some(3),
            area_id: Some(Uuid::new_v4()),
            ..UpdateBeaconRequest::default()
        };
        let resolved = (6, "LAB-06".to_string());
        assert_eq!(effective_nivel(&req, Some(&resolved), 2), 3);
        assert_eq!(effective_nivel(&UpdateBeaconRequest::default(), None, 2), 2);
    }

    #[test]
    fn batch_item_rejects_unknown_area_id_even_with_nivel() {
        let mut code_by_numero = HashMap::new();
        code_by_numero.insert(2, "CIT-02".to_string());
        let area_by_id: HashMap<Uuid, (i32, String)> = HashMap::new();

        let mut req = create_req("1", "I1", Some(2));
        req.area_id = Some(Uuid::new_v4());
        let Ok(item) = validate_new_beacon(&req, &LEVELS, Some(3)) else {
            panic!("item must pass field validation");
        };
        let Err(RegistryError::Validation(msg)) =
            resolve_item_area(&item, 3, &code_by_numero, &area_by_id)
        else {
            panic!("dangling areaId must fail validation");
        };
        assert!(msg.starts_with("beacon 3:"));
        assert!(msg.contains("areaId"));
    }

    #[test]
    fn batch_item_with_nivel_uses_its_area_code() {
        let mut code_by_numero = HashMap::new();
        code_by_numero.insert(2, "CIT-02".to_string());
        let area_by_id: HashMap<Uuid, (i32, String)> = HashMap::new();

        let req = create_req("5", "I5", Some(2));
        let Ok(item) = validate_new_beacon(&req, &LEVELS, None) else {
            panic!("item must pass field validation");
        };
        let Ok((nivel, code)) = resolve_item_area(&item, 1, &code_by_numero, &area_by_id) else {
            panic!("nivel-only item must resolve");
        };
        assert_eq!(nivel, 2);
        assert_eq!(code.as_deref(), Some("CIT-02"));
    }

    #[test]
    fn update_ignores_client_z() {
        let current = stored_beacon();
        let req = UpdateBeaconRequest {
            z: Some(42.0),
            ..UpdateBeaconRequest::default()
        };
        let patch = merge_update(&current, &req, current.nivel, None);
        assert!((patch.z - PINNED_Z).abs() < f64::EPSILON);
    }
}

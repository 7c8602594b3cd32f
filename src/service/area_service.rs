//! Area registry: CRUD plus the uniqueness and dependency invariants.

use sqlx::PgPool;
use uuid::Uuid;

use crate::api::dto::{CreateAreaRequest, UpdateAreaRequest};
use crate::domain::{Area, derive_codigo};
use crate::error::{RegistryError, map_unique_violation};

const AREA_COLUMNS: &str =
    "id, numero, nombre, codigo, descripcion, ubicacion, color, activo, created_at, updated_at";

const NUMERO_TAKEN: &str = "an area with that numero already exists";

/// Owns area CRUD and the `numero` uniqueness / beacon dependency
/// invariants.
#[derive(Debug, Clone)]
pub struct AreaService {
    pool: PgPool,
}

impl AreaService {
    /// Creates a new service over the shared pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns all areas ordered by `numero`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Database`] on storage failure.
    pub async fn list(&self) -> Result<Vec<Area>, RegistryError> {
        let areas = sqlx::query_as::<_, Area>(&format!(
            "SELECT {AREA_COLUMNS} FROM areas ORDER BY numero"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(areas)
    }

    /// Returns a single area.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no area has the given id.
    pub async fn get(&self, id: Uuid) -> Result<Area, RegistryError> {
        sqlx::query_as::<_, Area>(&format!("SELECT {AREA_COLUMNS} FROM areas WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RegistryError::NotFound("area"))
    }

    /// Creates a new area, deriving `codigo` from (`ubicacion`, `numero`).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] on missing fields and
    /// [`RegistryError::Conflict`] when the `numero` is already taken by
    /// any area, active or not.
    pub async fn create(&self, req: CreateAreaRequest) -> Result<Area, RegistryError> {
        validate_create(&req)?;

        // Friendly pre-check; the UNIQUE constraint still backstops
        // concurrent writers.
        let taken: Option<Uuid> = sqlx::query_scalar("SELECT id FROM areas WHERE numero = $1")
            .bind(req.numero)
            .fetch_optional(&self.pool)
            .await?;
        if taken.is_some() {
            return Err(RegistryError::Conflict(NUMERO_TAKEN.to_string()));
        }

        let codigo = derive_codigo(req.numero, &req.ubicacion);

        let area = sqlx::query_as::<_, Area>(&format!(
            "INSERT INTO areas (numero, nombre, codigo, descripcion, ubicacion, color, activo) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {AREA_COLUMNS}"
        ))
        .bind(req.numero)
        .bind(&req.nombre)
        .bind(&codigo)
        .bind(&req.descripcion)
        .bind(&req.ubicacion)
        .bind(&req.color)
        .bind(req.activo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, NUMERO_TAKEN))?;

        tracing::info!(area_id = %area.id, numero = area.numero, codigo = %area.codigo, "area created");
        Ok(area)
    }

    /// Applies a partial update, re-deriving `codigo` when `numero` or
    /// `ubicacion` change.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the area does not exist and
    /// [`RegistryError::Conflict`] when another area already holds the
    /// target `numero`.
    pub async fn update(&self, id: Uuid, req: UpdateAreaRequest) -> Result<Area, RegistryError> {
        let current = self.get(id).await?;

        if let Some(numero) = req.numero {
            if numero <= 0 {
                return Err(RegistryError::Validation(
                    "numero must be a positive integer".to_string(),
                ));
            }
            if numero != current.numero {
                let taken: Option<Uuid> =
                    sqlx::query_scalar("SELECT id FROM areas WHERE numero = $1 AND id <> $2")
                        .bind(numero)
                        .bind(id)
                        .fetch_optional(&self.pool)
                        .await?;
                if taken.is_some() {
                    return Err(RegistryError::Conflict(NUMERO_TAKEN.to_string()));
                }
            }
        }

        let patch = merge_update(&current, &req);

        let area = sqlx::query_as::<_, Area>(&format!(
            "UPDATE areas SET numero = $1, nombre = $2, codigo = $3, descripcion = $4, \
             ubicacion = $5, color = $6, activo = $7, updated_at = now() \
             WHERE id = $8 RETURNING {AREA_COLUMNS}"
        ))
        .bind(patch.numero)
        .bind(&patch.nombre)
        .bind(&patch.codigo)
        .bind(&patch.descripcion)
        .bind(&patch.ubicacion)
        .bind(&patch.color)
        .bind(patch.activo)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, NUMERO_TAKEN))?;

        Ok(area)
    }

    /// Deletes an area unless beacons still reference it (by `areaId` or
    /// by legacy `nivel`).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the area does not exist and
    /// [`RegistryError::HasDependents`] when referencing beacons remain,
    /// in which case nothing is deleted.
    pub async fn delete(&self, id: Uuid) -> Result<Area, RegistryError> {
        let current = self.get(id).await?;

        let dependents: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM beacons WHERE nivel = $1 OR areaid = $2",
        )
        .bind(current.numero)
        .bind(current.id)
        .fetch_one(&self.pool)
        .await?;
        if dependents > 0 {
            return Err(RegistryError::HasDependents);
        }

        let deleted = sqlx::query_as::<_, Area>(&format!(
            "DELETE FROM areas WHERE id = $1 RETURNING {AREA_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RegistryError::NotFound("area"))?;

        tracing::info!(area_id = %deleted.id, numero = deleted.numero, "area deleted");
        Ok(deleted)
    }
}

/// Final column values for an area update.
#[derive(Debug)]
struct AreaPatch {
    numero: i32,
    nombre: String,
    codigo: String,
    descripcion: Option<String>,
    ubicacion: String,
    color: String,
    activo: bool,
}

fn validate_create(req: &CreateAreaRequest) -> Result<(), RegistryError> {
    if req.numero <= 0 {
        return Err(RegistryError::Validation(
            "numero must be a positive integer".to_string(),
        ));
    }
    for (value, field) in [
        (&req.nombre, "nombre"),
        (&req.ubicacion, "ubicacion"),
        (&req.color, "color"),
    ] {
        if value.trim().is_empty() {
            return Err(RegistryError::Validation(format!(
                "missing required field: {field}"
            )));
        }
    }
    Ok(())
}

/// Merges a partial update over the current row. `codigo` is re-derived
/// whenever `numero` or `ubicacion` is supplied; clients cannot set it
/// directly.
fn merge_update(current: &Area, req: &UpdateAreaRequest) -> AreaPatch {
    let numero = req.numero.unwrap_or(current.numero);
    let ubicacion = req
        .ubicacion
        .clone()
        .unwrap_or_else(|| current.ubicacion.clone());

    let codigo = if req.numero.is_some() || req.ubicacion.is_some() {
        derive_codigo(numero, &ubicacion)
    } else {
        current.codigo.clone()
    };

    AreaPatch {
        numero,
        nombre: req.nombre.clone().unwrap_or_else(|| current.nombre.clone()),
        codigo,
        descripcion: req
            .descripcion
            .clone()
            .or_else(|| current.descripcion.clone()),
        ubicacion,
        color: req.color.clone().unwrap_or_else(|| current.color.clone()),
        activo: req.activo.unwrap_or(current.activo),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn area(numero: i32, ubicacion: &str) -> Area {
        Area {
            id: Uuid::new_v4(),
            numero,
            nombre: "Planta baja".to_string(),
            codigo: derive_codigo(numero, ubicacion),
            descripcion: None,
            ubicacion: ubicacion.to_string(),
            color: "#3B82F6".to_string(),
            activo: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn create_rejects_non_positive_numero() {
        let req = CreateAreaRequest {
            numero: 0,
            nombre: "x".to_string(),
            descripcion: None,
            ubicacion: "CIT".to_string(),
            color: "#fff".to_string(),
            activo: true,
        };
        assert!(matches!(
            validate_create(&req),
            Err(RegistryError::Validation(_))
        ));
    }

    #[test]
    fn create_rejects_blank_required_fields() {
        let req = CreateAreaRequest {
            numero: 1,
            nombre: "  ".to_string(),
            descripcion: None,
            ubicacion: "CIT".to_string(),
            color: "#fff".to_string(),
            activo: true,
        };
        let Err(RegistryError::Validation(msg)) = validate_create(&req) else {
            panic!("blank nombre must fail validation");
        };
        assert!(msg.contains("nombre"));
    }

    #[test]
    fn merge_recomputes_codigo_when_numero_changes() {
        let current = area(1, "CIT");
        let req = UpdateAreaRequest {
            numero: Some(9),
            ..UpdateAreaRequest::default()
        };
        let patch = merge_update(&current, &req);
        assert_eq!(patch.codigo, "CIT-09");
        assert_eq!(patch.nombre, current.nombre);
    }

    #[test]
    fn merge_recomputes_codigo_when_ubicacion_changes() {
        let current = area(4, "CIT");
        let req = UpdateAreaRequest {
            ubicacion: Some("Biblioteca".to_string()),
            ..UpdateAreaRequest::default()
        };
        let patch = merge_update(&current, &req);
        assert_eq!(patch.codigo, "BIB-04");
    }

    #[test]
    fn merge_keeps_codigo_for_unrelated_updates() {
        let current = area(2, "CIT");
        let req = UpdateAreaRequest {
            color: Some("#10B981".to_string()),
            activo: Some(false),
            ..UpdateAreaRequest::default()
        };
        let patch = merge_update(&current, &req);
        assert_eq!(patch.codigo, "CIT-02");
        assert_eq!(patch.color, "#10B981");
        assert!(!patch.activo);
    }
}

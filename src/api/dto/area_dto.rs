//! Request DTOs for area endpoints.
//!
//! Note the absence of a `codigo` field: the code is derived server-side
//! from (`ubicacion`, `numero`) and a client cannot set it.

use serde::Deserialize;
use utoipa::ToSchema;

/// `POST /api/areas` request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAreaRequest {
    /// Unique area number. Must be positive.
    pub numero: i32,
    /// Display name.
    pub nombre: String,
    /// Optional free-form description.
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Location label, e.g. `"CIT"`.
    pub ubicacion: String,
    /// Hex color string.
    pub color: String,
    /// Whether the area starts active. Defaults to `true`.
    #[serde(default = "default_activo")]
    pub activo: bool,
}

/// `PUT /api/areas/{id}` request body. Omitted fields keep their stored
/// values.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAreaRequest {
    /// New area number, if changing.
    #[serde(default)]
    pub numero: Option<i32>,
    /// New display name.
    #[serde(default)]
    pub nombre: Option<String>,
    /// New description.
    #[serde(default)]
    pub descripcion: Option<String>,
    /// New location label. Changing it re-derives `codigo`.
    #[serde(default)]
    pub ubicacion: Option<String>,
    /// New hex color string.
    #[serde(default)]
    pub color: Option<String>,
    /// New active flag. The dashboard toggles this optimistically and
    /// reverts on failure; the server just applies the update.
    #[serde(default)]
    pub activo: Option<bool>,
}

const fn default_activo() -> bool {
    true
}

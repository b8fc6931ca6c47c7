use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database. JSON keys keep the names the front end reads.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    #[serde(rename = "UsuarioID")]
    pub usuario_id: i64,
    #[serde(rename = "Nombre")]
    pub nombre: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Telefono")]
    pub telefono: Option<String>,
    #[serde(rename = "FechaRegistro", with = "time::serde::rfc3339")]
    pub fecha_registro: OffsetDateTime,
    #[serde(rename = "Activo")]
    pub activo: bool,
}

/// Validated input for an insert; storage assigns id, timestamp and flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub nombre: String,
    pub email: String,
    pub telefono: Option<String>,
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request body for user creation. Non-string values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub telefono: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub success: bool,
    #[serde(rename = "usuarioID")]
    pub usuario_id: i64,
    pub mensaje: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DeletedUserResponse {
    pub success: bool,
    pub mensaje: &'static str,
}

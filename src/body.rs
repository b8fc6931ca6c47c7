use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::ApiError;

/// Buffers the whole request body and decodes it as a JSON object.
///
/// Unlike `axum::Json` the content type is not inspected, and an empty body
/// yields `T::default()` so that missing fields are reported by validation
/// rather than as a decode failure.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            warn!(error = %e, "failed to read request body");
            ApiError::Decode
        })?;
        decode(&bytes).map(JsonBody)
    }
}

pub fn decode<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        warn!(error = %e, "malformed json body");
        ApiError::Decode
    })?;
    if !value.is_object() {
        warn!("json body is not an object");
        return Err(ApiError::Decode);
    }
    serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "json body does not match expected shape");
        ApiError::Decode
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default)]
        a: Option<String>,
    }

    #[test]
    fn empty_body_is_the_empty_record() {
        assert_eq!(decode::<Probe>(b"").unwrap(), Probe::default());
        assert_eq!(decode::<Probe>(b" \r\n").unwrap(), Probe::default());
    }

    #[test]
    fn object_is_decoded() {
        let probe = decode::<Probe>(br#"{"a":"x","extra":1}"#).unwrap();
        assert_eq!(probe.a.as_deref(), Some("x"));
    }

    #[test]
    fn malformed_or_non_object_is_a_decode_error() {
        for body in ["{nope", r#"["x"]"#, r#""a""#, "42", "null"] {
            assert!(
                matches!(decode::<Probe>(body.as_bytes()), Err(ApiError::Decode)),
                "body {body:?}"
            );
        }
    }
}

use http::StatusCode;
use serde::{Deserialize, Deserializer};

/// Deserialize an HTTP status code from its integer form
///
/// Any value `http` accepts (100-999) passes; the range check is left to
/// [`StatusCode::from_u16`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(|e| serde::de::Error::custom(format!("invalid status code {code}: {e}")))
}

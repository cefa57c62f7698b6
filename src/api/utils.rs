use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::av_dto::AvMessageDto;
use crate::error::{Error, Result};

pub fn parse_payload(body: &[u8], context: &str) -> Result<Value> {
    let payload = serde_json::from_slice::<Value>(body).map_err(|e| Error::decode(context, e))?;
    if !payload.is_object() {
        return Err(Error::decode(context, "unexpected API response format: not an object"));
    }
    Ok(payload)
}

/// Moves the object stored under `key` out of `payload` and deserializes it.
///
/// A missing key is reported as an API error when the payload carries one of
/// Alpha Vantage's message fields instead of data.
pub fn take_envelope<T>(payload: &mut Value, key: &str, context: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    match payload.get_mut(key).map(Value::take) {
        Some(data) => serde_json::from_value(data).map_err(|e| Error::decode(context, e)),
        None => Err(missing_envelope(payload, key, context)),
    }
}

fn missing_envelope(payload: &Value, key: &str, context: &str) -> Error {
    let message = serde_json::from_value::<AvMessageDto>(payload.clone()).unwrap_or_default();
    debug!("response has no '{}' key", key);
    match message.message() {
        Some(msg) => Error::Api(msg.to_string()),
        None => Error::decode(context, format!("missing '{}' in the response", key)),
    }
}

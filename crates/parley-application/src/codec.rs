use parley_core::ApiError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) fn encode<T: Serialize>(payload: &T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(payload)?)
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    Ok(serde_json::from_value(value)?)
}

// Request Validator: the body must be a JSON object carrying both keys.

use serde_json::Value;

use crate::error::ApiError;
use crate::models::AgentProxyRequest;

pub fn validate(body: &[u8]) -> Result<AgentProxyRequest, ApiError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| ApiError::missing_fields())?;

    let mut object = match payload {
        Value::Object(map) => map,
        _ => return Err(ApiError::missing_fields()),
    };

    match (object.remove("query"), object.remove("constraint")) {
        (Some(query), Some(constraint)) => Ok(AgentProxyRequest { query, constraint }),
        _ => Err(ApiError::missing_fields()),
    }
}

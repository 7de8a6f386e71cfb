//! Success envelopes shared by the JSON routes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::ok(message, Value::Object(Map::new()))
    }

    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        self.with_status(StatusCode::OK)
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub message: String,
    pub user: Value,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Serializes a stored record for the wire. `ObjectId`s leave serde as
/// `{"$oid": "..."}`; clients get the bare hex string instead.
pub fn record_json<T: Serialize>(record: &T) -> Value {
    let value = serde_json::to_value(record).unwrap_or(Value::Null);
    flatten_oids(value)
}

pub fn records_json<T: Serialize>(records: &[T]) -> Value {
    Value::Array(records.iter().map(record_json).collect())
}

fn flatten_oids(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::String(hex)) = map.get("$oid") {
                    return Value::String(hex.clone());
                }
            }
            Value::Object(map.into_iter().map(|(k, v)| (k, flatten_oids(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(flatten_oids).collect()),
        other => other,
    }
}

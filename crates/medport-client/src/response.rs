//! Normalized responses
//!
//! Success responses are parsed once and handed to every waiter of a
//! de-duplicated call, so the body is fully buffered and cheap to clone.

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::Result;

#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// Parsed JSON body (content-type indicated JSON)
    Json(serde_json::Value),
    /// Anything else, raw bytes
    Raw(Bytes),
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Parsed JSON body, if the response carried one.
    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    /// Raw body bytes, if the response was not JSON.
    pub fn bytes(&self) -> Option<&Bytes> {
        match &self.body {
            ResponseBody::Raw(bytes) => Some(bytes),
            ResponseBody::Json(_) => None,
        }
    }

    /// Deserialize the JSON body into a concrete type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.body {
            ResponseBody::Json(value) => serde_json::from_value(value.clone())
                .map_err(|e| ClientError::Deserialize(e.to_string())),
            ResponseBody::Raw(_) => Err(ClientError::Deserialize(
                "Response body is not JSON".to_string(),
            )),
        }
    }
}

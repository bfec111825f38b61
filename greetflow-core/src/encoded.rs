//! Payload encoding for greetflow.
//!
//! Every payload crossing the service boundary (workflow input and result,
//! activity input and result) is JSON.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Trait for data converters/serializers
pub trait DataConverter: Send + Sync {
    /// Encode a value to bytes
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, EncodingError>;
    /// Decode bytes to a value
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, EncodingError>;
}

/// Default JSON data converter
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDataConverter;

impl JsonDataConverter {
    pub fn new() -> Self {
        Self
    }

    /// Decode an optional payload; a missing or empty payload decodes as JSON `null`.
    pub fn decode_optional<T: DeserializeOwned>(
        &self,
        data: Option<&[u8]>,
    ) -> Result<T, EncodingError> {
        match data {
            Some(bytes) if !bytes.is_empty() => self.decode(bytes),
            _ => self.decode(b"null"),
        }
    }
}

impl DataConverter for JsonDataConverter {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, EncodingError> {
        serde_json::to_vec(value).map_err(|e| EncodingError::Serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, EncodingError> {
        serde_json::from_slice(data).map_err(|e| EncodingError::Deserialization(e.to_string()))
    }
}

/// Encoding errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

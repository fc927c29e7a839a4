//! Response envelope for machine-readable outputs.

use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Standard envelope wrapped around every JSON and NDJSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(meta: EnvelopeMeta, data: T) -> Self {
        Self { meta, data }
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub generated_at: UtcDateTime,
    /// Identifier of the provider that answered, e.g. `yahoo`.
    pub source: String,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        source: impl Into<String>,
        latency_ms: u64,
    ) -> Result<Self, ValidationError> {
        let request_id = request_id.into();
        if request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        Ok(Self {
            request_id,
            generated_at: UtcDateTime::now(),
            source: source.into(),
            latency_ms,
            warnings: Vec::new(),
        })
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

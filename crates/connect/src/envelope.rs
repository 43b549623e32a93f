//! Tolerant response envelopes.
//!
//! List endpoints answer `{ message, count, data: [...] }`; single
//! resources come back either bare or wrapped in a `data` field depending
//! on the endpoint. Both shapes parse; a missing `data` array is an empty
//! list, not an error.

use serde::Deserialize;

/// List envelope: `{ message, count, data: [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// A single resource, either `{ ..., data: {...} }` or the bare object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Enveloped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Enveloped<T> {
    pub fn into_inner(self) -> T {
        match self {
            Enveloped::Wrapped { data } => data,
            Enveloped::Bare(value) => value,
        }
    }
}

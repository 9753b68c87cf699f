// src/source/models.rs
use serde::Deserialize;

/// The input document. Only the `text` field is read; any other fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PriceDocument {
    #[serde(default)]
    pub text: Option<String>,
}


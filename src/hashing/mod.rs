//! Huella del modelo cargado: JSON canónico + SHA-256.
use serde::Serialize;
use sha2::{Digest, Sha256};

pub mod canonical_json;
pub use canonical_json::to_canonical_json;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Huella estable de cualquier valor serializable (independiente del orden de claves).
pub fn fingerprint<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_value(value)?;
    Ok(hash_str(&to_canonical_json(&json)))
}

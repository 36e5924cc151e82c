//! Protocolo de respuesta del wrapper Python: `{"ok": ...}` o
//! `{"error": {"kind": ..., "message": ...}}`.
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::EngineError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Reply<T> {
    Ok(T),
    Error(Failure),
}

#[derive(Debug, Deserialize)]
struct Failure {
    kind: FailureKind,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum FailureKind {
    InvalidSmiles,
    Fragment,
    Render,
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, EngineError> {
    let reply: Reply<T> = serde_json::from_str(raw).map_err(|e| EngineError::Protocol(e.to_string()))?;
    match reply {
        Reply::Ok(value) => Ok(value),
        Reply::Error(Failure { kind: FailureKind::InvalidSmiles, message }) => Err(EngineError::InvalidSmiles(message)),
        Reply::Error(Failure { kind: FailureKind::Fragment, message }) => Err(EngineError::Fragment(message)),
        Reply::Error(Failure { kind: FailureKind::Render, message }) => Err(EngineError::Render(message)),
    }
}

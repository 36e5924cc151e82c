use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// SMILES canónico tal como lo devuelve el toolkit químico.
///
/// Nunca se construye a partir de entrada de usuario directamente: sólo el
/// toolkit (RDKit o fixture) sabe canonicalizar. Esta capa únicamente
/// garantiza que el texto no esté vacío.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalSmiles(String);

impl CanonicalSmiles {
    pub fn new(smiles: impl Into<String>) -> Result<Self, DomainError> {
        let smiles = smiles.into();
        let trimmed = smiles.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError("canonical SMILES cannot be empty".to_string()));
        }
        if trimmed.len() != smiles.len() {
            return Ok(Self(trimmed.to_string()));
        }
        Ok(Self(smiles))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for CanonicalSmiles {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<CanonicalSmiles> for String {
    fn from(value: CanonicalSmiles) -> Self { value.0 }
}

impl AsRef<str> for CanonicalSmiles {
    fn as_ref(&self) -> &str { &self.0 }
}

impl fmt::Display for CanonicalSmiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Resumen de una molécula parseada por el toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoleculeSummary {
    pub canonical: CanonicalSmiles,
    pub carbon_count: u32,
}

impl MoleculeSummary {
    /// Las predicciones de YSI sólo tienen sentido para compuestos orgánicos.
    pub fn has_carbon(&self) -> bool { self.carbon_count > 0 }
}

//! Contrato del toolkit químico.
use async_trait::async_trait;
use thiserror::Error;
use ysi_domain::{CanonicalSmiles, FragmentCounts, MoleculeSummary, Rgb};
use ysi_engine::EngineError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolkitError {
    #[error("invalid smiles: {0}")]
    InvalidSmiles(String),
    #[error("fragment decomposition failed: {0}")]
    Decomposition(String),
    #[error("rendering failed: {0}")]
    Render(String),
    #[error("toolkit unavailable: {0}")]
    Unavailable(String),
    #[error("toolkit internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for ToolkitError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidSmiles(m) => ToolkitError::InvalidSmiles(m),
            EngineError::Fragment(m) => ToolkitError::Decomposition(m),
            EngineError::Render(m) => ToolkitError::Render(m),
            EngineError::Unavailable | EngineError::Init(_) => ToolkitError::Unavailable(e.to_string()),
            EngineError::Python(_) | EngineError::Protocol(_) => ToolkitError::Internal(e.to_string()),
        }
    }
}

#[async_trait]
pub trait ChemToolkit: Send + Sync {
    fn get_name(&self) -> &str;
    fn get_version(&self) -> &str;

    /// Parsea y re-serializa `smiles` en forma canónica.
    async fn describe(&self, smiles: &str) -> Result<MoleculeSummary, ToolkitError>;

    /// Fragmentos centrados en carbono, en orden de aparición.
    async fn fragments(&self, smiles: &CanonicalSmiles) -> Result<FragmentCounts, ToolkitError>;

    /// SVG de la molécula; cada átomo se resalta con el color de su fragmento.
    async fn draw_molecule(&self, smiles: &CanonicalSmiles, size: (u32, u32), colors: &[(String, Rgb)]) -> Result<String, ToolkitError>;

    async fn draw_fragment(&self, fragment: &str, color: Rgb) -> Result<String, ToolkitError>;
}

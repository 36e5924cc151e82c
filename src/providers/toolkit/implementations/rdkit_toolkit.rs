use async_trait::async_trait;
use std::sync::Arc;
use ysi_domain::{CanonicalSmiles, FragmentCounts, MoleculeSummary, Rgb};
use ysi_engine::ChemEngine;

use crate::providers::toolkit::trait_toolkit::{ChemToolkit, ToolkitError};

const FRAGMENT_SIZE: (u32, u32) = (100, 100);

/// Toolkit respaldado por RDKit a través de `ysi-engine`.
///
/// Cada llamada retiene el GIL, así que se ejecuta en el pool bloqueante de
/// tokio.
pub struct RdkitToolkit {
    engine: Arc<ChemEngine>,
}

impl RdkitToolkit {
    pub fn init() -> Result<Self, ToolkitError> {
        let engine = ChemEngine::init()?;
        Ok(Self { engine: Arc::new(engine) })
    }

    async fn run<T, F>(&self, call: F) -> Result<T, ToolkitError>
        where T: Send + 'static,
              F: FnOnce(&ChemEngine) -> Result<T, ysi_engine::EngineError> + Send + 'static
    {
        let engine = Arc::clone(&self.engine);
        let joined = tokio::task::spawn_blocking(move || call(&engine)).await
                                                                       .map_err(|e| ToolkitError::Internal(e.to_string()))?;
        joined.map_err(ToolkitError::from)
    }
}

#[async_trait]
impl ChemToolkit for RdkitToolkit {
    fn get_name(&self) -> &str { "rdkit" }

    fn get_version(&self) -> &str { env!("CARGO_PKG_VERSION") }

    async fn describe(&self, smiles: &str) -> Result<MoleculeSummary, ToolkitError> {
        let input = smiles.to_string();
        let info = self.run(move |engine| engine.describe(&input)).await?;
        let canonical = CanonicalSmiles::new(info.smiles).map_err(|e| ToolkitError::InvalidSmiles(e.to_string()))?;
        Ok(MoleculeSummary { canonical, carbon_count: info.carbon_count })
    }

    async fn fragments(&self, smiles: &CanonicalSmiles) -> Result<FragmentCounts, ToolkitError> {
        let input = smiles.to_string();
        let pairs = self.run(move |engine| engine.fragments(&input)).await?;
        Ok(pairs.into_iter().collect())
    }

    async fn draw_molecule(&self, smiles: &CanonicalSmiles, size: (u32, u32), colors: &[(String, Rgb)]) -> Result<String, ToolkitError> {
        let input = smiles.to_string();
        let colors: Vec<(String, [f64; 3])> = colors.iter().map(|(f, Rgb(r, g, b))| (f.clone(), [*r, *g, *b])).collect();
        self.run(move |engine| engine.draw_molecule(&input, size.0, size.1, &colors)).await
    }

    async fn draw_fragment(&self, fragment: &str, color: Rgb) -> Result<String, ToolkitError> {
        let input = fragment.to_string();
        let Rgb(r, g, b) = color;
        self.run(move |engine| engine.draw_fragment(&input, FRAGMENT_SIZE.0, FRAGMENT_SIZE.1, [r, g, b])).await
    }
}

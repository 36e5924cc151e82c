//! Frontera con el toolkit químico externo.
//!
//! El parseo/canonicalización de SMILES, la descomposición en fragmentos y
//! el dibujo de estructuras se delegan por completo a una implementación de
//! `ChemToolkit`: RDKit en producción, un fixture precalculado en pruebas.
use std::sync::Arc;

use crate::config::{AppConfig, ToolkitBackend};
use crate::errors::CoreError;

pub mod implementations;
pub mod trait_toolkit;

pub use implementations::fixture_toolkit::FixtureToolkit;
pub use implementations::rdkit_toolkit::RdkitToolkit;
pub use trait_toolkit::{ChemToolkit, ToolkitError};

/// Construye el toolkit configurado.
pub fn toolkit_from_config(config: &AppConfig) -> Result<Arc<dyn ChemToolkit>, CoreError> {
    let toolkit: Arc<dyn ChemToolkit> = match config.toolkit {
        ToolkitBackend::Rdkit => Arc::new(RdkitToolkit::init()?),
        ToolkitBackend::Fixture => Arc::new(FixtureToolkit::from_path(&config.fixture_path)?),
    };
    tracing::info!(toolkit = toolkit.get_name(), version = toolkit.get_version(), "chemistry toolkit ready");
    Ok(toolkit)
}

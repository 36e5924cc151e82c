use thiserror::Error;
use ysi_model::ModelError;

use crate::providers::toolkit::ToolkitError;

/// Errores de arranque: configuración, carga del modelo y del toolkit.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error cargando el modelo: {0}")]
    Model(#[from] ModelError),
    #[error("Error del toolkit químico: {0}")]
    Toolkit(#[from] ToolkitError),
}

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

#[cfg(feature = "python")]
pub mod core;
pub mod reply;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Error initializing Python/RDKit: {0}")]
    Init(String),
    #[error("RDKit bridge not compiled in (enable the `python` feature)")]
    Unavailable,
    #[error("invalid smiles: {0}")]
    InvalidSmiles(String),
    #[error("fragment decomposition failed: {0}")]
    Fragment(String),
    #[error("rendering failed: {0}")]
    Render(String),
    #[error("python error: {0}")]
    Python(String),
    #[error("malformed bridge reply: {0}")]
    Protocol(String),
}

/// Molécula tal como la describe RDKit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoleculeInfo {
    pub smiles: String,
    pub carbon_count: u32,
}

pub struct ChemEngine {
    _private: (),
}

impl ChemEngine {
    /// Carga el módulo Python de RDKit una sola vez por proceso.
    pub fn init() -> Result<Self, EngineError> {
        #[cfg(feature = "python")]
        {
            core::init_python().map_err(|e| EngineError::Init(e.to_string()))?;
            Ok(Self { _private: () })
        }
        #[cfg(not(feature = "python"))]
        {
            Err(EngineError::Unavailable)
        }
    }

    pub fn describe(&self, smiles: &str) -> Result<MoleculeInfo, EngineError> {
        self.call("describe", json!({ "smiles": smiles }))
    }

    /// Fragmentos centrados en carbono, en orden de aparición.
    pub fn fragments(&self, smiles: &str) -> Result<Vec<(String, u32)>, EngineError> {
        self.call("fragments", json!({ "smiles": smiles }))
    }

    pub fn draw_molecule(&self, smiles: &str, width: u32, height: u32, colors: &[(String, [f64; 3])]) -> Result<String, EngineError> {
        self.call("draw_molecule",
                  json!({ "smiles": smiles, "width": width, "height": height, "colors": colors }))
    }

    pub fn draw_fragment(&self, fragment: &str, width: u32, height: u32, color: [f64; 3]) -> Result<String, EngineError> {
        self.call("draw_fragment",
                  json!({ "fragment": fragment, "width": width, "height": height, "color": color }))
    }

    fn call<T: serde::de::DeserializeOwned>(&self, function: &str, payload: serde_json::Value) -> Result<T, EngineError> {
        #[cfg(feature = "python")]
        {
            let raw = core::invoke(function, &payload.to_string())?;
            reply::decode(&raw)
        }
        #[cfg(not(feature = "python"))]
        {
            let _ = (function, payload);
            Err(EngineError::Unavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "python"))]
    #[test]
    fn test_init_without_python_feature() {
        assert!(matches!(ChemEngine::init(), Err(EngineError::Unavailable)));
    }

    #[cfg(feature = "python")]
    #[test]
    fn test_rdkit_decomposes_ethanol() {
        let engine = ChemEngine::init().expect("python + rdkit");
        let info = engine.describe("OCC").unwrap();
        assert_eq!(info.smiles, "CCO");
        assert_eq!(info.carbon_count, 2);
        let frags = engine.fragments(&info.smiles).unwrap();
        assert_eq!(frags, vec![("[CH3](-C)".to_string(), 1), ("[CH2](-C)(-O)".to_string(), 1)]);
    }

    #[cfg(feature = "python")]
    #[test]
    fn test_rdkit_aromatic_and_radical_fragments() {
        let engine = ChemEngine::init().expect("python + rdkit");
        let frags = engine.fragments("Cc1ccccc1").unwrap();
        assert_eq!(frags,
                   vec![("[CH3](-c)".to_string(), 1), ("[c](-C)(:c)(:c)".to_string(), 1), ("[cH](:c)(:c)".to_string(), 5)]);
        assert!(matches!(engine.fragments("[CH3]"), Err(EngineError::Fragment(_))));
        assert!(matches!(engine.describe("X"), Err(EngineError::InvalidSmiles(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(EngineError::InvalidSmiles("X".into()).to_string(), "invalid smiles: X");
        assert_eq!(EngineError::Fragment("radical".into()).to_string(),
                   "fragment decomposition failed: radical");
    }
}

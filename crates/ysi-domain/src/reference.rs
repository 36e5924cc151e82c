use serde::{Deserialize, Serialize};

use crate::FragmentContribution;

/// Fila del conjunto de datos experimental (YSI medido).
///
/// Los nombres de columna siguen el CSV publicado (`SMILES`, `Species`,
/// `YSI`, `YSI_err`, `Type`, `CAS`, `Ref`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCompound {
    #[serde(skip)]
    pub index: usize,
    #[serde(rename = "SMILES")]
    pub smiles: String,
    #[serde(rename = "Species")]
    pub species: String,
    #[serde(rename = "YSI")]
    pub ysi: f64,
    #[serde(rename = "YSI_err", default)]
    pub ysi_err: Option<f64>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "CAS", default)]
    pub cas: Option<String>,
    #[serde(rename = "Ref", default)]
    pub reference: Option<String>,
}

/// Fragmento consultado junto con los compuestos de referencia que lo contienen.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentMatches {
    pub fragment: String,
    pub row: FragmentContribution,
    pub matches: Vec<ReferenceCompound>,
}

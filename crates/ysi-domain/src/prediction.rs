use serde::{Deserialize, Serialize};

use crate::{CanonicalSmiles, Rgb};

/// Valor experimental de un compuesto presente en el conjunto de referencia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentalValue {
    pub mean: f64,
    pub std: Option<f64>,
    pub name: String,
}

/// Desglose de un fragmento dentro de una predicción.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentRow {
    pub fragment: String,
    pub count: u32,
    pub train_count: u32,
    /// `None` cuando el fragmento no figura en la tabla de contribuciones.
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub color: Rgb,
}

impl FragmentRow {
    pub fn is_trained(&self) -> bool { self.train_count > 0 }
}

/// Resultado de una predicción de contribución de grupo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub smiles: CanonicalSmiles,
    pub mean: f64,
    pub std: f64,
    pub outlier: bool,
    pub fragments: Vec<FragmentRow>,
    pub experimental: Option<ExperimentalValue>,
}

impl Prediction {
    pub fn trained_fragments(&self) -> impl Iterator<Item = &FragmentRow> { self.fragments.iter().filter(|f| f.is_trained()) }

    pub fn missing_fragments(&self) -> impl Iterator<Item = &FragmentRow> { self.fragments.iter().filter(|f| !f.is_trained()) }

    /// SMILES con el nombre del compuesto entre paréntesis si hay valor experimental.
    pub fn named_smiles(&self) -> String {
        match &self.experimental {
            Some(exp) if !exp.name.is_empty() => format!("{} ({})", self.smiles, exp.name),
            _ => self.smiles.to_string(),
        }
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::ModelError;

/// Media y desviación estándar posteriores de un término del modelo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub mean: f64,
    pub std: f64,
}

/// Tabla de contribuciones precalculada (regresión sobre el conjunto de
/// referencia). Se carga desde JSON:
///
/// ```json
/// { "intercept": {"mean": 0.0, "std": 0.5}, "noise_std": 2.0,
///   "unseen_std": 10.0, "fragments": {"[CH3](-C)": {"mean": -1.5, "std": 0.8}} }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionTable {
    pub intercept: Estimate,
    /// Ruido residual del ajuste.
    pub noise_std: f64,
    /// Desviación asignada a fragmentos que no figuran en la tabla.
    pub unseen_std: f64,
    pub fragments: IndexMap<String, Estimate>,
}

impl ContributionTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let table: ContributionTable = serde_json::from_reader(reader)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    fn validate(&self) -> Result<(), ModelError> {
        let check_std = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ModelError::Invalid(format!("{name}: std must be a finite, non-negative number (got {value})")))
            }
        };
        check_std("intercept", self.intercept.std)?;
        check_std("noise_std", self.noise_std)?;
        check_std("unseen_std", self.unseen_std)?;
        if !self.intercept.mean.is_finite() {
            return Err(ModelError::Invalid("intercept: mean must be finite".into()));
        }
        for (fragment, estimate) in &self.fragments {
            if fragment.trim().is_empty() {
                return Err(ModelError::Invalid("empty fragment descriptor".into()));
            }
            if !estimate.mean.is_finite() {
                return Err(ModelError::Invalid(format!("{fragment}: mean must be finite")));
            }
            check_std(fragment, estimate.std)?;
        }
        Ok(())
    }
}

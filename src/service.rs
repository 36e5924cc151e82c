//! Orquestación de cada petición: validar/canonicalizar → predecir y/o dibujar.
//!
//! Aquí se traduce cada fallo del toolkit o del modelo a un `ApiError` fijo;
//! la causa interna sólo va al log.
use std::sync::Arc;
use tracing::{error, warn};
use ysi_domain::{FragmentMatches, MoleculeSummary, Prediction, Rgb};
use ysi_model::{ModelError, YsiModel};

use crate::errors::ApiError;
use crate::providers::toolkit::{ChemToolkit, ToolkitError};

pub const MOLECULE_SVG_SIZE: (u32, u32) = (150, 150);

/// Predicción más la depicción coloreada por fragmento.
#[derive(Debug)]
pub struct ResultView {
    pub prediction: Prediction,
    pub mol_svg: String,
}

#[derive(Debug)]
pub struct FragmentView {
    pub matches: FragmentMatches,
    pub frag_svg: String,
}

#[derive(Clone)]
pub struct YsiService {
    toolkit: Arc<dyn ChemToolkit>,
    model: Arc<YsiModel>,
}

impl YsiService {
    pub fn new(toolkit: Arc<dyn ChemToolkit>, model: Arc<YsiModel>) -> Self { Self { toolkit, model } }

    pub async fn canonicalize(&self, raw: &str) -> Result<MoleculeSummary, ApiError> {
        let invalid = || ApiError::InvalidSmiles { input: raw.to_string() };
        if raw.trim().is_empty() {
            return Err(invalid());
        }
        self.toolkit.describe(raw).await.map_err(|e| {
                                            warn!(input = raw, error = %e, "canonicalization failed");
                                            invalid()
                                        })
    }

    pub async fn predict(&self, raw: &str) -> Result<Prediction, ApiError> {
        let summary = self.canonicalize(raw).await?;
        let smiles = summary.canonical.to_string();
        if !summary.has_carbon() {
            return Err(ApiError::MissingCarbon { smiles });
        }
        let fragments = self.toolkit
                            .fragments(&summary.canonical)
                            .await
                            .map_err(|e| toolkit_failure(&smiles, e))?;
        self.model.predict(&summary.canonical, &fragments).map_err(|e| {
                                                               error!(smiles = %smiles, error = %e, "prediction failed");
                                                               ApiError::PredictionFailed { smiles: smiles.clone() }
                                                           })
    }

    pub async fn result(&self, raw: &str) -> Result<ResultView, ApiError> {
        let prediction = self.predict(raw).await?;
        let colors: Vec<(String, Rgb)> = prediction.fragments.iter().map(|row| (row.fragment.clone(), row.color)).collect();
        let mol_svg = self.toolkit
                          .draw_molecule(&prediction.smiles, MOLECULE_SVG_SIZE, &colors)
                          .await
                          .map_err(|e| match e {
                              ToolkitError::Render(cause) => {
                                  warn!(smiles = %prediction.smiles, error = %cause, "molecule rendering failed");
                                  ApiError::RenderFailed { input: prediction.smiles.to_string() }
                              }
                              other => toolkit_failure(prediction.smiles.as_str(), other),
                          })?;
        Ok(ResultView { prediction, mol_svg })
    }

    pub async fn fragment(&self, fragment: &str) -> Result<FragmentView, ApiError> {
        let matches = self.model.fragment_matches(fragment).map_err(|e| match e {
                                                               ModelError::FragmentNotFound(f) => ApiError::FragmentNotFound { fragment: f },
                                                               other => {
                                                                   error!(fragment, error = %other, "fragment lookup failed");
                                                                   ApiError::PredictionFailed { smiles: fragment.to_string() }
                                                               }
                                                           })?;
        let frag_svg = self.toolkit.draw_fragment(fragment, Rgb::FRAGMENT_HIGHLIGHT).await.map_err(|e| {
                                                                                               warn!(fragment, error = %e, "fragment rendering failed");
                                                                                               ApiError::RenderFailed { input: fragment.to_string() }
                                                                                           })?;
        Ok(FragmentView { matches, frag_svg })
    }
}

fn toolkit_failure(smiles: &str, e: ToolkitError) -> ApiError {
    if matches!(e, ToolkitError::Decomposition(_) | ToolkitError::InvalidSmiles(_)) {
        warn!(smiles, error = %e, "fragment decomposition failed");
        ApiError::FragmentDecomposition { smiles: smiles.to_string() }
    } else {
        error!(smiles, error = %e, "toolkit failure during prediction");
        ApiError::PredictionFailed { smiles: smiles.to_string() }
    }
}

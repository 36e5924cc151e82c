//! Construcción del modelo al arrancar: cada compuesto de referencia se
//! canonicaliza y fragmenta con el mismo toolkit que atenderá las peticiones,
//! de modo que las claves coincidan con las de las consultas.
use serde_json::json;
use std::path::Path;
use tracing::{info, warn};
use ysi_domain::ReferenceCompound;
use ysi_model::{dataset, ContributionTable, DecomposedCompound, YsiModel};

use crate::errors::CoreError;
use crate::hashing;
use crate::providers::toolkit::ChemToolkit;

/// Modelo listo junto con su huella.
pub struct LoadedModel {
    pub model: YsiModel,
    pub fingerprint: String,
    /// Filas del CSV que el toolkit no pudo procesar.
    pub skipped: usize,
}

pub async fn build_model(toolkit: &dyn ChemToolkit, table: ContributionTable, rows: Vec<ReferenceCompound>) -> Result<LoadedModel, CoreError> {
    let fingerprint = hashing::fingerprint(&json!({ "contributions": &table, "reference": &rows }))
        .map_err(|e| CoreError::Internal(format!("could not fingerprint model: {e}")))?;

    let total = rows.len();
    let mut decomposed = Vec::with_capacity(total);
    for compound in rows {
        let summary = match toolkit.describe(&compound.smiles).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(row = compound.index, smiles = %compound.smiles, error = %e, "skipping reference compound");
                continue;
            }
        };
        match toolkit.fragments(&summary.canonical).await {
            Ok(fragments) => decomposed.push(DecomposedCompound { compound, canonical: summary.canonical, fragments }),
            Err(e) => warn!(row = compound.index, smiles = %compound.smiles, error = %e, "skipping reference compound"),
        }
    }

    let skipped = total - decomposed.len();
    let model = YsiModel::new(table, decomposed);
    info!(fragments = model.fragment_count(),
          reference_compounds = model.reference_count(),
          skipped,
          fingerprint = %fingerprint,
          "group-contribution model loaded");
    Ok(LoadedModel { model, fingerprint, skipped })
}

pub async fn load_model(toolkit: &dyn ChemToolkit, contributions: impl AsRef<Path>, reference: impl AsRef<Path>) -> Result<LoadedModel, CoreError> {
    let table = ContributionTable::from_path(contributions.as_ref())?;
    let rows = dataset::load_reference(reference.as_ref())?;
    build_model(toolkit, table, rows).await
}

use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashMap;

use ysi_domain::{CanonicalSmiles, ExperimentalValue, FragmentContribution, FragmentCounts, FragmentMatches, FragmentRow, Prediction,
                 ReferenceCompound};

use crate::contributions::ContributionTable;
use crate::palette::fragment_palette;
use crate::ModelError;

/// Compuesto de referencia ya canonicalizado y fragmentado por el toolkit.
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedCompound {
    pub compound: ReferenceCompound,
    pub canonical: CanonicalSmiles,
    pub fragments: FragmentCounts,
}

/// Modelo inmutable: tabla de contribuciones + conjunto de referencia.
#[derive(Debug, Clone)]
pub struct YsiModel {
    table: ContributionTable,
    contributions: IndexMap<String, FragmentContribution>,
    references: Vec<DecomposedCompound>,
    by_smiles: HashMap<CanonicalSmiles, usize>,
}

impl YsiModel {
    pub fn new(table: ContributionTable, references: Vec<DecomposedCompound>) -> Self {
        let contributions = table.fragments
                                 .iter()
                                 .map(|(fragment, estimate)| {
                                     let train_count = references.iter().filter(|r| r.fragments.contains(fragment)).count() as u32;
                                     (fragment.clone(), FragmentContribution { mean: estimate.mean, std: estimate.std, train_count })
                                 })
                                 .collect();
        let mut by_smiles = HashMap::with_capacity(references.len());
        for (position, reference) in references.iter().enumerate() {
            // ante duplicados gana la primera fila del CSV
            by_smiles.entry(reference.canonical.clone()).or_insert(position);
        }
        Self { table, contributions, references, by_smiles }
    }

    pub fn fragment_count(&self) -> usize { self.contributions.len() }

    pub fn reference_count(&self) -> usize { self.references.len() }

    pub fn contribution(&self, fragment: &str) -> Option<FragmentContribution> { self.contributions.get(fragment).copied() }

    pub fn experimental(&self, smiles: &CanonicalSmiles) -> Option<&ReferenceCompound> {
        self.by_smiles.get(smiles).map(|&position| &self.references[position].compound)
    }

    /// Predicción por contribución de grupo.
    ///
    /// `mean = intercept + Σ nᵢ·μᵢ` y `var = ruido² + σ_intercept² + Σ nᵢ²·σᵢ²`;
    /// los fragmentos ausentes de la tabla aportan `μ = 0` y `σ = unseen_std`.
    /// La molécula es outlier si alguno de sus fragmentos no aparece en el
    /// conjunto de referencia.
    pub fn predict(&self, smiles: &CanonicalSmiles, fragments: &FragmentCounts) -> Result<Prediction, ModelError> {
        if fragments.is_empty() {
            return Err(ModelError::NoFragments(smiles.to_string()));
        }
        let palette = fragment_palette(fragments.len());
        let mut mean = self.table.intercept.mean;
        let mut variance = self.table.noise_std.powi(2) + self.table.intercept.std.powi(2);
        let mut rows = Vec::with_capacity(fragments.len());

        for ((fragment, count), color) in fragments.iter().zip(palette) {
            let n = f64::from(count);
            let contribution = self.contribution(fragment);
            match contribution {
                Some(c) => {
                    mean += n * c.mean;
                    variance += (n * c.std).powi(2);
                }
                None => variance += (n * self.table.unseen_std).powi(2),
            }
            rows.push(FragmentRow { fragment: fragment.to_string(),
                                    count,
                                    train_count: contribution.map_or(0, |c| c.train_count),
                                    mean: contribution.map(|c| c.mean),
                                    std: contribution.map(|c| c.std),
                                    color });
        }

        let outlier = rows.iter().any(|row| !row.is_trained());
        let experimental = self.experimental(smiles).map(|r| ExperimentalValue { mean: r.ysi,
                                                                                  std: r.ysi_err,
                                                                                  name: r.species.clone() });
        Ok(Prediction { smiles: smiles.clone(),
                        mean,
                        std: variance.sqrt(),
                        outlier,
                        fragments: rows,
                        experimental })
    }

    /// Fila de contribución y compuestos de referencia que contienen `fragment`
    /// (coincidencia exacta).
    pub fn fragment_matches(&self, fragment: &str) -> Result<FragmentMatches, ModelError> {
        let row = self.contribution(fragment).ok_or_else(|| ModelError::FragmentNotFound(fragment.to_string()))?;
        let matches = self.references
                          .par_iter()
                          .filter(|r| r.fragments.contains(fragment))
                          .map(|r| r.compound.clone())
                          .collect();
        Ok(FragmentMatches { fragment: fragment.to_string(), row, matches })
    }
}

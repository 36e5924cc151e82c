//! Cuerpos JSON de cada ruta.
//!
//! Las tablas (`frag_df`, `matches`) van orientadas por columna:
//! `{columna: {clave_fila: valor}}`.
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use ysi_domain::{FragmentContribution, FragmentMatches, FragmentRow, Prediction, ReferenceCompound, Rgb};

use super::quote::quote;

const STATUS_OK: &str = "ok";

/// Redondeo a un decimal sobre el valor binario exacto, con empates al par.
///
/// Sólo los múltiplos impares de 0.25 caen exactamente a mitad de camino;
/// para el resto el formateo con precisión ya da el decimal más cercano.
fn round1(value: f64) -> f64 {
    let quarter = value * 4.0;
    if value.is_finite() && quarter.fract() == 0.0 && (value * 2.0).fract() != 0.0 {
        return (value * 10.0).round_ties_even() / 10.0;
    }
    format!("{value:.1}").parse::<f64>().unwrap_or(value)
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub mean: f64,
    pub std: f64,
    pub outlier: bool,
    pub exp_mean: Option<f64>,
    pub exp_std: Option<f64>,
    pub exp_name: Option<String>,
    pub status: &'static str,
}

impl PredictionResponse {
    pub fn from_prediction(prediction: &Prediction) -> Self {
        let exp = prediction.experimental.as_ref();
        Self { mean: prediction.mean,
               std: prediction.std,
               outlier: prediction.outlier,
               exp_mean: exp.map(|e| e.mean),
               exp_std: exp.and_then(|e| e.std),
               exp_name: exp.map(|e| e.name.clone()),
               status: STATUS_OK }
    }

    /// Media y desviación redondeadas a un decimal, para mostrar.
    pub fn rounded(prediction: &Prediction) -> Self {
        let mut out = Self::from_prediction(prediction);
        out.mean = round1(out.mean);
        out.std = round1(out.std);
        out
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FragFrame {
    pub count: IndexMap<String, u32>,
    pub train_count: IndexMap<String, u32>,
    pub mean: IndexMap<String, Option<f64>>,
    pub std: IndexMap<String, Option<f64>>,
    pub color: IndexMap<String, Rgb>,
    pub frag_link: IndexMap<String, String>,
}

impl<'a> FromIterator<&'a FragmentRow> for FragFrame {
    fn from_iter<T: IntoIterator<Item = &'a FragmentRow>>(rows: T) -> Self {
        let mut frame = FragFrame::default();
        for row in rows {
            let key = row.fragment.clone();
            frame.count.insert(key.clone(), row.count);
            frame.train_count.insert(key.clone(), row.train_count);
            frame.mean.insert(key.clone(), row.mean);
            frame.std.insert(key.clone(), row.std);
            frame.color.insert(key.clone(), row.color);
            frame.frag_link.insert(key, quote(&row.fragment));
        }
        frame
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultResponse {
    #[serde(flatten)]
    pub prediction: PredictionResponse,
    pub mol_svg: String,
    pub frag_df: FragFrame,
    pub frag_missing_df: FragFrame,
    pub named_smiles: String,
}

impl ResultResponse {
    pub fn new(prediction: &Prediction, mol_svg: String) -> Self {
        Self { prediction: PredictionResponse::rounded(prediction),
               mol_svg,
               frag_df: prediction.trained_fragments().collect(),
               frag_missing_df: prediction.missing_fragments().collect(),
               named_smiles: prediction.named_smiles() }
    }
}

/// Compuestos de referencia que contienen un fragmento, por índice de fila.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchesFrame {
    #[serde(rename = "SMILES")]
    pub smiles: IndexMap<String, String>,
    #[serde(rename = "Species")]
    pub species: IndexMap<String, String>,
    #[serde(rename = "YSI")]
    pub ysi: IndexMap<String, f64>,
    /// Número, o `""` si falta.
    #[serde(rename = "YSI_err")]
    pub ysi_err: IndexMap<String, Value>,
    #[serde(rename = "Type")]
    pub kind: IndexMap<String, String>,
    #[serde(rename = "CAS")]
    pub cas: IndexMap<String, String>,
    #[serde(rename = "Ref")]
    pub reference: IndexMap<String, String>,
    pub smiles_link: IndexMap<String, String>,
}

impl<'a> FromIterator<&'a ReferenceCompound> for MatchesFrame {
    fn from_iter<T: IntoIterator<Item = &'a ReferenceCompound>>(compounds: T) -> Self {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        let mut frame = MatchesFrame::default();
        for compound in compounds {
            let key = compound.index.to_string();
            frame.smiles.insert(key.clone(), compound.smiles.clone());
            frame.species.insert(key.clone(), compound.species.clone());
            frame.ysi.insert(key.clone(), compound.ysi);
            frame.ysi_err.insert(key.clone(), compound.ysi_err.map_or_else(|| Value::String(String::new()), Value::from));
            frame.kind.insert(key.clone(), text(&compound.kind));
            frame.cas.insert(key.clone(), text(&compound.cas));
            frame.reference.insert(key.clone(), text(&compound.reference));
            frame.smiles_link.insert(key, quote(&compound.smiles));
        }
        frame
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FragResponse {
    pub frag_str: String,
    pub frag_svg: String,
    pub fragrow: FragmentContribution,
    pub matches: MatchesFrame,
    pub status: &'static str,
}

impl FragResponse {
    pub fn new(matches: &FragmentMatches, frag_svg: String) -> Self {
        Self { frag_str: matches.fragment.clone(),
               frag_svg,
               fragrow: matches.row,
               matches: matches.matches.iter().collect(),
               status: STATUS_OK }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolkitInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub fragments: usize,
    pub reference_compounds: usize,
    pub fingerprint: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    pub title: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub toolkit: ToolkitInfo,
    pub model: ModelInfo,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use ysi_domain::{CanonicalSmiles, ExperimentalValue};

    fn row(fragment: &str, train_count: u32, mean: Option<f64>) -> FragmentRow {
        FragmentRow { fragment: fragment.into(),
                      count: 2,
                      train_count,
                      mean,
                      std: mean.map(|_| 1.0),
                      color: Rgb(0.5, 0.5, 0.5) }
    }

    fn prediction() -> Prediction {
        Prediction { smiles: CanonicalSmiles::new("CB").unwrap(),
                     mean: 12.345,
                     std: 10.26,
                     outlier: true,
                     fragments: vec![row("[CH3](-C)", 3, Some(-1.5)), row("[CH3](-B)", 0, None)],
                     experimental: Some(ExperimentalValue { mean: 7.0, std: None, name: "methylborane".into() }) }
    }

    #[test]
    fn test_round1_uses_the_binary_value() {
        assert_eq!(round1(2.25), 2.2);
        assert_eq!(round1(2.75), 2.8);
        assert_eq!(round1(-3.25), -3.2);
        // 0.15 y 2.35 no son exactos en binario: quedan debajo y encima de la mitad
        assert_eq!(round1(0.15), 0.1);
        assert_eq!(round1(2.35), 2.4);
        assert_eq!(round1(-3.5), -3.5);
        assert_eq!(round1(2.4698), 2.5);
    }

    #[test]
    fn test_prediction_body() {
        let body = serde_json::to_value(PredictionResponse::from_prediction(&prediction())).unwrap();
        assert_eq!(body,
                   json!({ "mean": 12.345, "std": 10.26, "outlier": true,
                           "exp_mean": 7.0, "exp_std": null, "exp_name": "methylborane", "status": "ok" }));
    }

    #[test]
    fn test_result_splits_frames_and_rounds() {
        let body = serde_json::to_value(ResultResponse::new(&prediction(), "<svg/>".into())).unwrap();
        assert_eq!(body["mean"], json!(12.3));
        assert_eq!(body["std"], json!(10.3));
        assert_eq!(body["named_smiles"], json!("CB (methylborane)"));
        assert_eq!(body["frag_df"]["count"], json!({ "[CH3](-C)": 2 }));
        assert_eq!(body["frag_df"]["frag_link"]["[CH3](-C)"], json!("%5BCH3%5D%28-C%29"));
        assert_eq!(body["frag_missing_df"]["mean"], json!({ "[CH3](-B)": null }));
        assert_eq!(body["frag_missing_df"]["color"]["[CH3](-B)"], json!([0.5, 0.5, 0.5]));
    }

    #[test]
    fn test_matches_fill_missing_text_with_empty_string() {
        let compound = ReferenceCompound { index: 4,
                                           smiles: "CCO".into(),
                                           species: "ethanol".into(),
                                           ysi: 5.0,
                                           ysi_err: None,
                                           kind: Some("alcohol".into()),
                                           cas: None,
                                           reference: None };
        let frame: MatchesFrame = [&compound].into_iter().collect();
        let body = serde_json::to_value(frame).unwrap();
        assert_eq!(body["SMILES"], json!({ "4": "CCO" }));
        assert_eq!(body["YSI_err"], json!({ "4": "" }));
        assert_eq!(body["CAS"], json!({ "4": "" }));
        assert_eq!(body["Type"], json!({ "4": "alcohol" }));
        assert_eq!(body["smiles_link"], json!({ "4": "CCO" }));
    }
}

use chrono::{DateTime, Utc};
use poem::web::{Data, Json, Query};
use poem::{handler, Request};
use serde::Deserialize;

use super::quote::unquote;
use super::responses::{FragResponse, InfoResponse, ModelInfo, PredictionResponse, ResultResponse, ToolkitInfo};
use crate::errors::ApiError;
use crate::loader::LoadedModel;
use crate::providers::toolkit::ChemToolkit;
use crate::service::YsiService;

/// Datos fijos de la instancia, calculados al arrancar.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub toolkit: ToolkitInfo,
    pub model: ModelInfo,
    pub started_at: DateTime<Utc>,
}

impl ServiceInfo {
    pub fn new(toolkit: &dyn ChemToolkit, loaded: &LoadedModel) -> Self {
        Self { toolkit: ToolkitInfo { name: toolkit.get_name().to_string(), version: toolkit.get_version().to_string() },
               model: ModelInfo { fragments: loaded.model.fragment_count(),
                                  reference_compounds: loaded.model.reference_count(),
                                  fingerprint: loaded.fingerprint.clone() },
               started_at: Utc::now() }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: YsiService,
    pub info: ServiceInfo,
}

#[derive(Debug, Deserialize)]
pub struct SmilesQuery {
    pub smiles: Option<String>,
}

/// Resto de la ruta tras `prefix`, decodificado una sola vez.
///
/// Se lee de la URI cruda porque los SMILES pueden contener `/`.
fn path_tail(req: &Request, prefix: &str) -> String { unquote(req.uri().path().strip_prefix(prefix).unwrap_or_default()) }

#[handler]
pub async fn index(Data(state): Data<&AppState>) -> Json<InfoResponse> {
    let info = &state.info;
    Json(InfoResponse { title: "YSI Estimator",
                        description: "Group-contribution estimates of the Yield Sooting Index from SMILES",
                        version: "1.0",
                        toolkit: info.toolkit.clone(),
                        model: info.model.clone(),
                        started_at: info.started_at })
}

#[handler]
pub async fn canonicalize(req: &Request, Data(state): Data<&AppState>) -> poem::Result<Json<String>> {
    let smiles = path_tail(req, "/canonicalize/");
    let summary = state.service.canonicalize(&smiles).await?;
    Ok(Json(summary.canonical.to_string()))
}

#[handler]
pub async fn predict_path(req: &Request, Data(state): Data<&AppState>) -> poem::Result<Json<PredictionResponse>> {
    let smiles = path_tail(req, "/predict/");
    let prediction = state.service.predict(&smiles).await?;
    Ok(Json(PredictionResponse::from_prediction(&prediction)))
}

#[handler]
pub async fn predict_query(Query(params): Query<SmilesQuery>, Data(state): Data<&AppState>) -> poem::Result<Json<PredictionResponse>> {
    let smiles = params.smiles.ok_or(ApiError::MissingQuery("smiles"))?;
    let prediction = state.service.predict(&smiles).await?;
    Ok(Json(PredictionResponse::from_prediction(&prediction)))
}

#[handler]
pub async fn result(req: &Request, Data(state): Data<&AppState>) -> poem::Result<Json<ResultResponse>> {
    let smiles = path_tail(req, "/result/");
    let view = state.service.result(&smiles).await?;
    Ok(Json(ResultResponse::new(&view.prediction, view.mol_svg)))
}

#[handler]
pub async fn frag(req: &Request, Data(state): Data<&AppState>) -> poem::Result<Json<FragResponse>> {
    let fragment = path_tail(req, "/frag/");
    let view = state.service.fragment(&fragment).await?;
    Ok(Json(FragResponse::new(&view.matches, view.frag_svg)))
}

use poem::middleware::{Cors, Tracing};
use poem::{get, Endpoint, EndpointExt, Route};

use super::handlers::{self, AppState};
use super::middleware::RequestId;

/// Aplicación completa con CORS abierto (cualquier origen, método y cabecera).
pub fn build_app(state: AppState) -> impl Endpoint {
    Route::new().at("/", get(handlers::index))
                .at("/canonicalize/*smiles", get(handlers::canonicalize))
                .at("/predict", get(handlers::predict_query))
                .at("/predict/*smiles", get(handlers::predict_path))
                .at("/result/*smiles", get(handlers::result))
                .at("/frag/*frag_str", get(handlers::frag))
                .with(Cors::new())
                .with(Tracing)
                .with(RequestId)
                .data(state)
}

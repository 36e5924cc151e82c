//! Errores visibles por el cliente HTTP.
//!
//! Todos se devuelven como 400 con cuerpo `{"detail": "<mensaje>"}`. Los
//! mensajes son fijos por variante: nunca incluyen el texto de un error
//! interno (ése se registra con `tracing` antes de convertirse).
use poem::http::StatusCode;
use poem::error::ResponseError;
use poem::Response;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid smiles: {input}")]
    InvalidSmiles { input: String },
    #[error("Missing query parameter: {0}")]
    MissingQuery(&'static str),
    #[error("Error: \"{smiles}\" SMILES string invalid. Please enter a valid SMILES without quotes.")]
    FragmentDecomposition { smiles: String },
    #[error("Error: Input SMILES \"{smiles}\" must contain a carbon atom.")]
    MissingCarbon { smiles: String },
    #[error("Error: Prediction failed for input {smiles}")]
    PredictionFailed { smiles: String },
    #[error("Fragment \"{fragment}\" not found")]
    FragmentNotFound { fragment: String },
    #[error("Error: Could not render \"{input}\"")]
    RenderFailed { input: String },
}

impl ApiError {
    pub fn detail(&self) -> String { self.to_string() }
}

impl ResponseError for ApiError {
    fn status(&self) -> StatusCode { StatusCode::BAD_REQUEST }

    fn as_response(&self) -> Response
        where Self: std::error::Error + Send + Sync + 'static
    {
        Response::builder().status(self.status())
                           .content_type("application/json; charset=utf-8")
                           .body(json!({ "detail": self.detail() }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::InvalidSmiles { input: "X".into() }.to_string(), "Invalid smiles: X");
        assert_eq!(ApiError::MissingCarbon { smiles: "O".into() }.to_string(),
                   "Error: Input SMILES \"O\" must contain a carbon atom.");
        assert_eq!(ApiError::FragmentDecomposition { smiles: "[CH3]".into() }.to_string(),
                   "Error: \"[CH3]\" SMILES string invalid. Please enter a valid SMILES without quotes.");
        assert_eq!(ApiError::FragmentNotFound { fragment: "[CH3](-B)".into() }.to_string(),
                   "Fragment \"[CH3](-B)\" not found");
    }

    #[test]
    fn test_every_variant_is_bad_request() {
        let errors = [ApiError::InvalidSmiles { input: "X".into() },
                      ApiError::MissingQuery("smiles"),
                      ApiError::PredictionFailed { smiles: "CCO".into() },
                      ApiError::RenderFailed { input: "CCO".into() }];
        for err in errors {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.as_response().status(), StatusCode::BAD_REQUEST);
        }
    }
}

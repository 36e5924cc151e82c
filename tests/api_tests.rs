use std::path::PathBuf;
use std::sync::Arc;

use poem::http::StatusCode;
use poem::test::TestClient;
use poem::Endpoint;
use serde_json::{json, Value};

use ysi_estimator::api::{build_app, AppState, ServiceInfo};
use ysi_estimator::loader::load_model;
use ysi_estimator::providers::toolkit::{ChemToolkit, FixtureToolkit};
use ysi_estimator::service::YsiService;

fn data(file: &str) -> PathBuf { PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(file) }

// Aplicación completa sobre el fixture y los datos del repositorio.
async fn client() -> TestClient<impl Endpoint> {
    let toolkit: Arc<dyn ChemToolkit> = Arc::new(FixtureToolkit::from_path(data("toolkit_fixture.json")).expect("fixture"));
    let loaded = load_model(toolkit.as_ref(), data("contributions.json"), data("ysi_reference.csv")).await
                                                                                                     .expect("model");
    let info = ServiceInfo::new(toolkit.as_ref(), &loaded);
    let service = YsiService::new(toolkit, Arc::new(loaded.model));
    TestClient::new(build_app(AppState { service, info }))
}

async fn get_json(cli: &TestClient<impl Endpoint>, uri: &str) -> (StatusCode, Value) {
    let resp = cli.get(uri).send().await;
    let status = resp.0.status();
    let body = resp.0.into_body().into_json::<Value>().await.expect("json body");
    (status, body)
}

fn assert_close(value: &Value, expected: f64) {
    let actual = value.as_f64().expect("number");
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[tokio::test]
async fn test_predict_ethanol() {
    let cli = client().await;
    let resp = cli.get("/predict/CCO").send().await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let obj = json.value().object();
    obj.get("status").assert_string("ok");
    obj.get("outlier").assert_bool(false);
    obj.get("exp_name").assert_string("ethanol");
    obj.get("exp_mean").assert_f64(-3.1);
    obj.get("mean").assert_f64(-3.5);
}

#[tokio::test]
async fn test_predict_std_adds_variances() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/predict/CCO").await;
    assert_eq!(status, StatusCode::OK);
    // ruido² + σ_intercept² + σ(CH3)² + σ(CH2-O)²
    assert_close(&body["std"], (4.0_f64 + 0.25 + 0.64 + 1.21).sqrt());
}

#[tokio::test]
async fn test_non_canonical_input_matches_reference() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/predict/OCC").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exp_name"], json!("ethanol"));
}

#[tokio::test]
async fn test_unknown_fragment_is_outlier() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/predict/CB").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outlier"], json!(true));
    assert_eq!(body["exp_mean"], Value::Null);
    assert_close(&body["mean"], 0.0);
    assert_close(&body["std"], (4.0_f64 + 0.25 + 100.0).sqrt());
}

#[tokio::test]
async fn test_untrained_fragment_is_outlier() {
    let cli = client().await;
    let (_, body) = get_json(&cli, "/predict/COC").await;
    assert_eq!(body["outlier"], json!(true));
    assert_close(&body["mean"], -2.0);
}

#[tokio::test]
async fn test_predict_invalid_smiles() {
    let cli = client().await;
    let resp = cli.get("/predict/X").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({ "detail": "Invalid smiles: X" })).await;
}

#[tokio::test]
async fn test_predict_query_encoded_and_raw() {
    let cli = client().await;
    for uri in ["/predict?smiles=C%2FC%3DC%5CCCCC", "/predict?smiles=C/C=C%5CCCCC", "/predict?smiles=C/C=C\\CCCC"] {
        let (status, body) = get_json(&cli, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["status"], json!("ok"));
    }
    let resp = cli.get("/predict").query("smiles", &"CCCC/C=C\\C").send().await;
    resp.assert_status_is_ok();
}

#[tokio::test]
async fn test_predict_path_keeps_slashes() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/predict/C/C=C%5CCCCC").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outlier"], json!(false));
}

#[tokio::test]
async fn test_predict_query_missing() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/predict").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Missing query parameter: smiles" }));
}

#[tokio::test]
async fn test_zero_carbon_molecules() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/predict/O").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], json!("Error: Input SMILES \"O\" must contain a carbon atom."));
    // "Cl" contiene una "C" mayúscula pero ningún carbono
    let (_, body) = get_json(&cli, "/predict/%5BNa%2B%5D.%5BCl-%5D").await;
    assert_eq!(body["detail"], json!("Error: Input SMILES \"[Na+].[Cl-]\" must contain a carbon atom."));
}

#[tokio::test]
async fn test_decomposition_failure() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/predict/%5BCH3%5D").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"],
               json!("Error: \"[CH3]\" SMILES string invalid. Please enter a valid SMILES without quotes."));
}

#[tokio::test]
async fn test_result_ethanol() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/result/CCO").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["mol_svg"].as_str().expect("svg").contains("<svg"));
    assert_eq!(body["named_smiles"], json!("CCO (ethanol)"));
    assert_eq!(body["status"], json!("ok"));
    assert_close(&body["mean"], -3.5);
    assert_close(&body["std"], 2.5);
    assert_eq!(body["frag_df"]["count"], json!({ "[CH3](-C)": 1, "[CH2](-C)(-O)": 1 }));
    assert_eq!(body["frag_df"]["frag_link"]["[CH2](-C)(-O)"], json!("%5BCH2%5D%28-C%29%28-O%29"));
    assert_eq!(body["frag_missing_df"]["count"], json!({}));
}

#[tokio::test]
async fn test_result_without_reference_match() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/result/CB").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["named_smiles"], json!("CB"));
    assert_eq!(body["frag_missing_df"]["mean"], json!({ "[CH3](-B)": null }));
    assert_eq!(body["frag_missing_df"]["train_count"], json!({ "[CH3](-B)": 0 }));
}

#[tokio::test]
async fn test_result_errors_match_predict() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/result/X").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], json!("Invalid smiles: X"));
}

#[tokio::test]
async fn test_frag_known() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/frag/%5BCH2%5D(-C)(-O)").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["frag_str"], json!("[CH2](-C)(-O)"));
    assert!(body["frag_svg"].as_str().expect("svg").starts_with("<svg"));
    assert_eq!(body["fragrow"], json!({ "mean": -2.0, "std": 1.1, "train_count": 3 }));
    // ethanol, 1-butanol y diethyl ether, por índice de fila del CSV
    assert_eq!(body["matches"]["Species"], json!({ "2": "ethanol", "3": "1-butanol", "9": "diethyl ether" }));
    assert_eq!(body["matches"]["CAS"]["9"], json!(""));
    assert_eq!(body["matches"]["smiles_link"]["2"], json!("OCC"));
}

#[tokio::test]
async fn test_frag_missing_ysi_err_is_empty_string() {
    let cli = client().await;
    let (_, body) = get_json(&cli, "/frag/%5Bc%5D(-O)(:c)(:c)").await;
    assert_eq!(body["matches"]["Species"], json!({ "12": "m-cresol" }));
    assert_eq!(body["matches"]["YSI_err"], json!({ "12": "" }));
    assert_eq!(body["matches"]["Ref"], json!({ "12": "" }));
}

#[tokio::test]
async fn test_frag_untrained_has_no_matches() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/frag/%5BCH3%5D(-O)").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fragrow"]["train_count"], json!(0));
    assert_eq!(body["matches"]["SMILES"], json!({}));
}

#[tokio::test]
async fn test_frag_unknown() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/frag/%5BCH3%5D(-B)").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], json!("Fragment \"[CH3](-B)\" not found"));
}

#[tokio::test]
async fn test_canonicalize() {
    let cli = client().await;
    let resp = cli.get("/canonicalize/C1%3DCC%3DCC%3DC1").send().await;
    resp.assert_status_is_ok();
    resp.assert_json("c1ccccc1").await;
    let (status, body) = get_json(&cli, "/canonicalize/X").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], json!("Invalid smiles: X"));
}

#[tokio::test]
async fn test_index_reports_model() {
    let cli = client().await;
    let (status, body) = get_json(&cli, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], json!("YSI Estimator"));
    assert_eq!(body["toolkit"], json!({ "name": "fixture", "version": "2024.09" }));
    assert_eq!(body["model"]["fragments"], json!(15));
    assert_eq!(body["model"]["reference_compounds"], json!(15));
    assert_eq!(body["model"]["fingerprint"].as_str().expect("fingerprint").len(), 64);
}

#[tokio::test]
async fn test_cors_headers() {
    let cli = client().await;
    let resp = cli.get("/predict/CCO").header("Origin", "http://example.org").send().await;
    resp.assert_status_is_ok();
    resp.assert_header_exist("access-control-allow-origin");
}

#[tokio::test]
async fn test_request_id() {
    let cli = client().await;
    let resp = cli.get("/predict/CCO").send().await;
    resp.assert_header_exist("x-request-id");
    let resp = cli.get("/predict/X").header("x-request-id", "abc-123").send().await;
    resp.assert_header("x-request-id", "abc-123");
}

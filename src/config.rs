//! Configuración central de la aplicación.
//! Carga variables de entorno (.env una sola vez) y las valida en un
//! `AppConfig` inmutable que `main` reparte al resto de componentes.
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::CoreError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolkitBackend {
    Rdkit,
    Fixture,
}

impl FromStr for ToolkitBackend {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rdkit" => Ok(Self::Rdkit),
            "fixture" => Ok(Self::Fixture),
            other => Err(CoreError::Config(format!("YSI_TOOLKIT must be `rdkit` or `fixture`, got `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(CoreError::Config(format!("YSI_LOG_FORMAT must be `compact` or `json`, got `{other}`"))),
        }
    }
}

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Tabla de contribuciones por fragmento (JSON).
    pub contributions_path: PathBuf,
    /// Conjunto de referencia con YSI experimentales (CSV).
    pub reference_path: PathBuf,
    pub toolkit: ToolkitBackend,
    pub fixture_path: PathBuf,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de `lookup`; útil en pruebas.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let bind = lookup("YSI_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse::<SocketAddr>()
                            .map_err(|e| CoreError::Config(format!("YSI_BIND_ADDR `{bind}` is not a socket address: {e}")))?;
        let data_dir = PathBuf::from(lookup("YSI_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));
        let path_or = |key: &str, file: &str| lookup(key).map(PathBuf::from).unwrap_or_else(|| data_dir.join(file));
        let toolkit = match lookup("YSI_TOOLKIT") {
            Some(value) => value.parse::<ToolkitBackend>()?,
            None => ToolkitBackend::Rdkit,
        };
        let log_format = match lookup("YSI_LOG_FORMAT") {
            Some(value) => value.parse::<LogFormat>()?,
            None => LogFormat::Compact,
        };
        Ok(Self { bind_addr,
                  contributions_path: path_or("YSI_CONTRIBUTIONS", "contributions.json"),
                  reference_path: path_or("YSI_REFERENCE", "ysi_reference.csv"),
                  toolkit,
                  fixture_path: path_or("YSI_TOOLKIT_FIXTURE", "toolkit_fixture.json"),
                  log_format })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, CoreError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.contributions_path, PathBuf::from("data/contributions.json"));
        assert_eq!(cfg.reference_path, PathBuf::from("data/ysi_reference.csv"));
        assert_eq!(cfg.toolkit, ToolkitBackend::Rdkit);
        assert_eq!(cfg.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_data_dir_and_overrides() {
        let cfg = config(&[("YSI_DATA_DIR", "/srv/ysi"),
                           ("YSI_REFERENCE", "/tmp/ref.csv"),
                           ("YSI_TOOLKIT", "Fixture"),
                           ("YSI_LOG_FORMAT", "json")]).unwrap();
        assert_eq!(cfg.contributions_path, PathBuf::from("/srv/ysi/contributions.json"));
        assert_eq!(cfg.reference_path, PathBuf::from("/tmp/ref.csv"));
        assert_eq!(cfg.fixture_path, PathBuf::from("/srv/ysi/toolkit_fixture.json"));
        assert_eq!(cfg.toolkit, ToolkitBackend::Fixture);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(config(&[("YSI_BIND_ADDR", "localhost")]), Err(CoreError::Config(_))));
        assert!(matches!(config(&[("YSI_TOOLKIT", "openbabel")]), Err(CoreError::Config(_))));
        assert!(matches!(config(&[("YSI_LOG_FORMAT", "xml")]), Err(CoreError::Config(_))));
    }
}

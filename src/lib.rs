//! YSI Estimator
//!
//! Servicio web que estima el Yield Sooting Index de una molécula (SMILES)
//! por contribución de grupo:
//! - `providers::toolkit` delega la química (RDKit o fixture).
//! - `loader` construye el modelo a partir de la tabla y el conjunto de referencia.
//! - `service` orquesta cada petición y traduce errores.
//! - `api` expone las rutas HTTP con poem.
//! - `config`, `logging` y `hashing` cubren el arranque.

pub mod api;
pub mod config;
pub mod errors;
pub mod hashing;
pub mod loader;
pub mod logging;
pub mod providers;
pub mod service;

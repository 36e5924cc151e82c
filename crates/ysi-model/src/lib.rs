//! Modelo de contribución de grupo para el Yield Sooting Index.
//!
//! - `contributions`: tabla precalculada de contribuciones por fragmento.
//! - `dataset`: conjunto de referencia con YSI experimentales.
//! - `model`: predicción y búsqueda de fragmentos sobre ambos.
//! - `palette`: colores por fragmento para las ilustraciones.

pub mod contributions;
pub mod dataset;
pub mod error;
pub mod model;
pub mod palette;

pub use contributions::{ContributionTable, Estimate};
pub use error::ModelError;
pub use model::{DecomposedCompound, YsiModel};

//! Fragmentos de contribución de grupo.
//!
//! Un fragmento es un descriptor textual (patrón SMARTS centrado en un átomo
//! de carbono, p. ej. `[CH2](-C)(-O)`) producido por el toolkit. Esta capa no
//! interpreta el descriptor: sólo lo cuenta, lo compara y lo colorea.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Conteo de fragmentos de una molécula en orden de primera aparición.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentCounts(IndexMap<String, u32>);

impl FragmentCounts {
    pub fn new() -> Self { Self::default() }

    /// Suma `count` ocurrencias de `fragment`; conserva la posición original
    /// si ya existía.
    pub fn add(&mut self, fragment: impl Into<String>, count: u32) {
        *self.0.entry(fragment.into()).or_insert(0) += count;
    }

    pub fn get(&self, fragment: &str) -> Option<u32> { self.0.get(fragment).copied() }

    pub fn contains(&self, fragment: &str) -> bool { self.0.contains_key(fragment) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> { self.0.iter().map(|(k, v)| (k.as_str(), *v)) }
}

impl<S: Into<String>> FromIterator<(S, u32)> for FragmentCounts {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        let mut counts = FragmentCounts::new();
        for (fragment, count) in iter {
            counts.add(fragment, count);
        }
        counts
    }
}

/// Color RGB con componentes en [0, 1]; se serializa como `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub f64, pub f64, pub f64);

impl Rgb {
    /// Color con el que se resalta el átomo central en la vista de fragmento.
    pub const FRAGMENT_HIGHLIGHT: Rgb = Rgb(0.9677975592919913, 0.44127456009157356, 0.5358103155058701);

    pub fn to_hex(self) -> String {
        let to_byte = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        format!("#{:02x}{:02x}{:02x}", to_byte(self.0), to_byte(self.1), to_byte(self.2))
    }
}

/// Fila de la tabla de contribuciones precalculada.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FragmentContribution {
    pub mean: f64,
    pub std: f64,
    /// Compuestos de referencia que contienen el fragmento.
    pub train_count: u32,
}

//! Toolkit que sirve respuestas precalculadas de RDKit desde un archivo JSON.
//!
//! Sirve para pruebas y demos sin Python: sólo conoce las moléculas listadas
//! (por SMILES canónico o alias exactos) y cualquier otra entrada se trata
//! como SMILES inválido. Los SVG generados son marcadores, no depicciones.
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use ysi_domain::{CanonicalSmiles, FragmentCounts, MoleculeSummary, Rgb};

use crate::errors::CoreError;
use crate::providers::toolkit::trait_toolkit::{ChemToolkit, ToolkitError};

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureMolecule {
    pub canonical: CanonicalSmiles,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub carbon_count: u32,
    #[serde(default)]
    pub fragments: FragmentCounts,
    /// Si está presente, la descomposición falla con este mensaje.
    #[serde(default)]
    pub fragment_error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    name: String,
    version: String,
    molecules: Vec<FixtureMolecule>,
}

pub struct FixtureToolkit {
    name: String,
    version: String,
    molecules: Vec<FixtureMolecule>,
    index: HashMap<String, usize>,
}

impl FixtureToolkit {
    pub fn new(name: impl Into<String>, version: impl Into<String>, molecules: Vec<FixtureMolecule>) -> Self {
        let mut index = HashMap::new();
        for (position, molecule) in molecules.iter().enumerate() {
            index.entry(molecule.canonical.to_string()).or_insert(position);
            for alias in &molecule.aliases {
                index.entry(alias.clone()).or_insert(position);
            }
        }
        Self { name: name.into(), version: version.into(), molecules, index }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CoreError> {
        let file: FixtureFile =
            serde_json::from_reader(reader).map_err(|e| CoreError::Config(format!("invalid toolkit fixture: {e}")))?;
        Ok(Self::new(file.name, file.version, file.molecules))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    fn lookup(&self, smiles: &str) -> Option<&FixtureMolecule> { self.index.get(smiles).map(|&i| &self.molecules[i]) }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn placeholder_svg(label: &str, (width, height): (u32, u32), colors: &[Rgb]) -> String {
    let mut svg = format!("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
                           viewBox=\"0 0 {width} {height}\"><rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");
    for (i, color) in colors.iter().enumerate() {
        svg.push_str(&format!("<circle cx=\"{}\" cy=\"12\" r=\"6\" fill=\"{}\"/>", 12 + 16 * i, color.to_hex()));
    }
    svg.push_str(&format!("<text x=\"50%\" y=\"50%\" text-anchor=\"middle\" font-size=\"12\">{}</text></svg>",
                          escape_xml(label)));
    svg
}

#[async_trait]
impl ChemToolkit for FixtureToolkit {
    fn get_name(&self) -> &str { &self.name }

    fn get_version(&self) -> &str { &self.version }

    async fn describe(&self, smiles: &str) -> Result<MoleculeSummary, ToolkitError> {
        let molecule = self.lookup(smiles)
                           .ok_or_else(|| ToolkitError::InvalidSmiles(format!("unknown SMILES {smiles:?}")))?;
        Ok(MoleculeSummary { canonical: molecule.canonical.clone(),
                             carbon_count: molecule.carbon_count })
    }

    async fn fragments(&self, smiles: &CanonicalSmiles) -> Result<FragmentCounts, ToolkitError> {
        let molecule = self.lookup(smiles.as_str())
                           .ok_or_else(|| ToolkitError::InvalidSmiles(format!("unknown SMILES {smiles:?}")))?;
        match &molecule.fragment_error {
            Some(message) => Err(ToolkitError::Decomposition(message.clone())),
            None => Ok(molecule.fragments.clone()),
        }
    }

    async fn draw_molecule(&self, smiles: &CanonicalSmiles, size: (u32, u32), colors: &[(String, Rgb)]) -> Result<String, ToolkitError> {
        if self.lookup(smiles.as_str()).is_none() {
            return Err(ToolkitError::InvalidSmiles(format!("unknown SMILES {smiles:?}")));
        }
        let palette: Vec<Rgb> = colors.iter().map(|(_, c)| *c).collect();
        Ok(placeholder_svg(smiles.as_str(), size, &palette))
    }

    async fn draw_fragment(&self, fragment: &str, color: Rgb) -> Result<String, ToolkitError> {
        if fragment.trim().is_empty() {
            return Err(ToolkitError::Render("empty fragment".into()));
        }
        Ok(placeholder_svg(fragment, (100, 100), &[color]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "name": "fixture", "version": "test",
        "molecules": [
            { "canonical": "CCO", "aliases": ["OCC"], "carbon_count": 2,
              "fragments": { "[CH3](-C)": 1, "[CH2](-C)(-O)": 1 } },
            { "canonical": "[CH3]", "carbon_count": 1,
              "fragment_error": "radical carbon at atom 0" }
        ]
    }"#;

    fn toolkit() -> FixtureToolkit { FixtureToolkit::from_reader(FIXTURE.as_bytes()).unwrap() }

    #[tokio::test]
    async fn test_describe_resolves_aliases() {
        let summary = toolkit().describe("OCC").await.unwrap();
        assert_eq!(summary.canonical.as_str(), "CCO");
        assert_eq!(summary.carbon_count, 2);
    }

    #[tokio::test]
    async fn test_unknown_smiles_is_invalid() {
        assert!(matches!(toolkit().describe("X").await, Err(ToolkitError::InvalidSmiles(_))));
    }

    #[tokio::test]
    async fn test_fragment_error() {
        let tk = toolkit();
        let radical = tk.describe("[CH3]").await.unwrap().canonical;
        assert_eq!(tk.fragments(&radical).await,
                   Err(ToolkitError::Decomposition("radical carbon at atom 0".into())));
    }

    #[tokio::test]
    async fn test_svg_escapes_label() {
        let svg = toolkit().draw_fragment("[CH2](-C)(-O)", Rgb::FRAGMENT_HIGHLIGHT).await.unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("[CH2](-C)(-O)"));
        let svg = placeholder_svg("a<b&\"c\"", (10, 10), &[]);
        assert!(svg.contains("a&lt;b&amp;&quot;c&quot;"));
    }

    #[test]
    fn test_malformed_fixture() {
        assert!(matches!(FixtureToolkit::from_reader("[]".as_bytes()), Err(CoreError::Config(_))));
    }
}

// ysi-domain library entry point
pub mod error;
pub mod fragment;
pub mod prediction;
pub mod reference;
pub mod smiles;
pub use error::DomainError;
pub use fragment::{FragmentContribution, FragmentCounts, Rgb};
pub use prediction::{ExperimentalValue, FragmentRow, Prediction};
pub use reference::{FragmentMatches, ReferenceCompound};
pub use smiles::{CanonicalSmiles, MoleculeSummary};

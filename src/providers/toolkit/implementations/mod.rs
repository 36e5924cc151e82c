pub mod fixture_toolkit;
pub mod rdkit_toolkit;

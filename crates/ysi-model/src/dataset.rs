use std::fs::File;
use std::io::Read;
use std::path::Path;

use ysi_domain::ReferenceCompound;

use crate::ModelError;

/// Lee el CSV de compuestos de referencia; `index` es la posición de la fila
/// (base 0) y se usa como clave en las tablas de coincidencias.
pub fn read_reference<R: Read>(reader: R) -> Result<Vec<ReferenceCompound>, ModelError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<ReferenceCompound>().enumerate() {
        let mut compound = record?;
        if compound.smiles.is_empty() {
            return Err(ModelError::Invalid(format!("row {index}: empty SMILES")));
        }
        compound.index = index;
        rows.push(compound);
    }
    Ok(rows)
}

pub fn load_reference(path: impl AsRef<Path>) -> Result<Vec<ReferenceCompound>, ModelError> {
    let file = File::open(path.as_ref())?;
    read_reference(file)
}

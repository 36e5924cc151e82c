use pyo3::ffi::c_str;
use pyo3::prelude::*;
use pyo3::types::PyModule;
use std::ffi::CString;
use std::sync::OnceLock;

use crate::EngineError;

static RDKIT_MODULE: OnceLock<Py<PyModule>> = OnceLock::new();

pub fn init_python() -> PyResult<()> {
    if RDKIT_MODULE.get().is_some() {
        return Ok(());
    }
    Python::attach(|py| {
        let code = CString::new(include_str!("../python/rdkit_wrapper.py"))?;
        let module = PyModule::from_code(py, code.as_c_str(), c_str!("rdkit_wrapper.py"), c_str!("rdkit_wrapper"))?;
        // Guardamos el módulo en el OnceLock como Py<PyModule>
        RDKIT_MODULE.set(module.unbind()).ok();
        Ok(())
    })
}

fn get_module(py: Python<'_>) -> PyResult<Py<PyModule>> {
    RDKIT_MODULE.get().map(|module| module.clone_ref(py)).ok_or_else(|| {
        PyErr::new::<pyo3::exceptions::PyRuntimeError, _>("init_python() must be called before invoking the bridge")
    })
}

/// Llama a `function` del wrapper con un payload JSON y devuelve la respuesta JSON cruda.
pub fn invoke(function: &str, payload: &str) -> Result<String, EngineError> {
    Python::attach(|py| -> PyResult<String> {
        let rdkit_py = get_module(py)?;
        let rdkit = rdkit_py.bind(py);
        rdkit.getattr(function)?.call1((payload,))?.extract()
    }).map_err(|e| EngineError::Python(e.to_string()))
}

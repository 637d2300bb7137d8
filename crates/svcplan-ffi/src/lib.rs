//! # Service Plan FFI
//!
//! Python 綁定層（PyO3）

use pyo3::prelude::*;

pub mod python;

/// Python 模組註冊
#[pymodule]
fn svcplan_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyServicePlanner>()?;
    m.add_function(wrap_pyfunction!(python::load_table, m)?)?;
    Ok(())
}

//! Python 綁定實現

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use svcplan::{PlannerConfig, RawTable, ServicePlanner, TableLoader};

fn to_py_err(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python 服務組合規劃器
///
/// 表格以「列的清單」傳入，第一列為表頭，儲存格一律為字串。
#[pyclass(name = "ServicePlanner")]
pub struct PyServicePlanner {
    inner: ServicePlanner,
}

#[pymethods]
impl PyServicePlanner {
    #[new]
    #[pyo3(signature = (default_time_budget=None, currency_prefix=None))]
    fn new(default_time_budget: Option<f64>, currency_prefix: Option<String>) -> Self {
        let mut config = PlannerConfig::new();
        if let Some(hours) = default_time_budget.and_then(Decimal::from_f64) {
            if hours > Decimal::ZERO {
                config = config.with_default_time_budget(hours);
            }
        }
        if let Some(prefix) = currency_prefix {
            config = config.with_currency_prefix(prefix);
        }

        Self {
            inner: ServicePlanner::new(config),
        }
    }

    /// 執行規劃，回傳 JSON 報告；不可行或欄位缺失時拋出 ValueError
    #[pyo3(signature = (plan, actual=None, time_budget=None))]
    fn optimize(
        &self,
        plan: Vec<Vec<String>>,
        actual: Option<Vec<Vec<String>>>,
        time_budget: Option<f64>,
    ) -> PyResult<String> {
        let plan = RawTable::from_rows(plan);
        let actual = actual.map(RawTable::from_rows);
        let time_budget = time_budget.and_then(Decimal::from_f64);

        let report = self
            .inner
            .plan(&plan, actual.as_ref(), time_budget)
            .map_err(to_py_err)?;

        serde_json::to_string(&report).map_err(to_py_err)
    }

    /// 預設可用工時
    #[getter]
    fn default_time_budget(&self) -> String {
        self.inner.config().default_time_budget.to_string()
    }
}

/// 載入 CSV / Excel 檔案，回傳包含表頭的列清單
#[pyfunction]
#[pyo3(signature = (path, delimiter=","))]
pub fn load_table(path: &str, delimiter: &str) -> PyResult<Vec<Vec<String>>> {
    let delimiter = match delimiter.as_bytes() {
        [byte] => *byte,
        _ => return Err(PyValueError::new_err("分隔符號必須是單一字元")),
    };

    let table = TableLoader::new()
        .with_csv_delimiter(delimiter)
        .load(path)
        .map_err(to_py_err)?;

    let mut rows = Vec::with_capacity(table.len() + 1);
    rows.push(table.headers);
    rows.extend(table.rows);
    Ok(rows)
}

//! 表頭正規化與欄位對應

use svcplan_core::{PlanError, RawTable, TableKind};

/// 服務名稱欄位
pub const COL_SERVICE: &str = "servico";
/// 單位耗時欄位
pub const COL_TIME: &str = "tempo";
/// 單位成本欄位
pub const COL_COST: &str = "custo";
/// 單位售價欄位
pub const COL_PRICE: &str = "venda";
/// 最低數量欄位
pub const COL_MIN: &str = "minimo";
/// 最高數量欄位
pub const COL_MAX: &str = "maximo";
/// 實際數量欄位
pub const COL_QUANTITY: &str = "quantidade";

/// 計劃範本必要欄位（依序）
pub const PLAN_REQUIRED: [&str; 6] = [
    COL_SERVICE,
    COL_TIME,
    COL_COST,
    COL_PRICE,
    COL_MIN,
    COL_MAX,
];

/// 正規化表頭：去除空白、轉小寫、去除重音
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().chars().map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

/// 找出正規化後名稱相符的欄位索引（取第一個）
pub fn find_column(table: &RawTable, name: &str) -> Option<usize> {
    table
        .headers
        .iter()
        .position(|h| normalize_header(h) == name)
}

/// 計劃範本的欄位索引
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanColumns {
    pub service: usize,
    pub time: usize,
    pub cost: usize,
    pub price: usize,
    pub min: usize,
    pub max: usize,
}

impl PlanColumns {
    /// 解析計劃範本欄位，缺少任何必要欄位時回報完整缺失清單
    pub fn resolve(table: &RawTable) -> svcplan_core::Result<Self> {
        let indices: Vec<Option<usize>> = PLAN_REQUIRED
            .iter()
            .map(|name| find_column(table, name))
            .collect();

        let missing: Vec<String> = PLAN_REQUIRED
            .iter()
            .zip(&indices)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(PlanError::MissingColumns {
                table: TableKind::Plan,
                missing,
            });
        }

        let idx: Vec<usize> = indices.into_iter().flatten().collect();
        Ok(Self {
            service: idx[0],
            time: idx[1],
            cost: idx[2],
            price: idx[3],
            min: idx[4],
            max: idx[5],
        })
    }
}

/// 實際結果的欄位索引
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActualColumns {
    pub service: usize,
    pub quantity: usize,
}

impl ActualColumns {
    /// 解析實際結果欄位
    ///
    /// 沒有 `quantidade` 欄位時回傳 `Ok(None)`（視為無實際資料）；
    /// 有數量但沒有服務名稱欄位則無法合併，回報錯誤。
    pub fn resolve(table: &RawTable) -> svcplan_core::Result<Option<Self>> {
        let Some(quantity) = find_column(table, COL_QUANTITY) else {
            return Ok(None);
        };

        let Some(service) = find_column(table, COL_SERVICE) else {
            return Err(PlanError::MissingColumns {
                table: TableKind::Actual,
                missing: vec![COL_SERVICE.to_string()],
            });
        };

        Ok(Some(Self { service, quantity }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table(headers: &[&str]) -> RawTable {
        RawTable::new(headers.iter().map(|h| h.to_string()).collect(), Vec::new())
    }

    #[rstest]
    #[case(" Servico ", "servico")]
    #[case("SERVIÇO", "servico")]
    #[case("Mínimo", "minimo")]
    #[case("máximo\t", "maximo")]
    #[case("Quantidade", "quantidade")]
    fn test_normalize_header(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_header(raw), expected);
    }

    #[test]
    fn test_resolve_plan_columns_any_order() {
        let t = table(&[
            "Maximo", "VENDA", " servico", "tempo", "Custo", "minimo", "extra",
        ]);
        let cols = PlanColumns::resolve(&t).unwrap();

        assert_eq!(cols.service, 2);
        assert_eq!(cols.time, 3);
        assert_eq!(cols.cost, 4);
        assert_eq!(cols.price, 1);
        assert_eq!(cols.min, 5);
        assert_eq!(cols.max, 0);
    }

    #[test]
    fn test_missing_plan_columns_reported_together() {
        let t = table(&["servico", "tempo", "venda"]);
        let err = PlanColumns::resolve(&t).unwrap_err();

        assert_eq!(
            err,
            PlanError::MissingColumns {
                table: TableKind::Plan,
                missing: vec!["custo".into(), "minimo".into(), "maximo".into()],
            }
        );
    }

    #[test]
    fn test_actual_without_quantity_column() {
        let t = table(&["servico", "obs"]);
        assert_eq!(ActualColumns::resolve(&t).unwrap(), None);
    }

    #[test]
    fn test_actual_quantity_without_service_column() {
        let t = table(&["quantidade"]);
        let err = ActualColumns::resolve(&t).unwrap_err();
        assert!(matches!(
            err,
            PlanError::MissingColumns { table: TableKind::Actual, .. }
        ));
    }
}

//! 計劃範本與實際結果整合

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use svcplan_core::{PlanError, PlannerConfig, RawTable, ServiceRecord, ServiceTable};

use crate::columns::{ActualColumns, PlanColumns};
use crate::numeric::NumericCleaner;

/// 資料整合器
///
/// 計劃範本決定有哪些服務；實際結果只補上 `actual_quantity`。
#[derive(Debug, Clone)]
pub struct Consolidator {
    config: PlannerConfig,
    cleaner: NumericCleaner,
}

impl Consolidator {
    /// 創建新的整合器
    pub fn new(config: PlannerConfig) -> Self {
        let cleaner = NumericCleaner::new(config.currency_prefix.clone());
        Self { config, cleaner }
    }

    /// 整合計劃範本與（選填的）實際結果
    pub fn consolidate(
        &self,
        plan: &RawTable,
        actual: Option<&RawTable>,
    ) -> svcplan_core::Result<ServiceTable> {
        tracing::debug!(
            "開始整合資料：計劃 {} 列，實際 {} 列",
            plan.len(),
            actual.map_or(0, RawTable::len)
        );

        let columns = PlanColumns::resolve(plan)?;
        let mut services = self.read_plan(plan, &columns)?;

        let actual_quantities = match actual {
            Some(table) => self.read_actuals(table)?,
            None => HashMap::new(),
        };

        let plan_names: HashSet<&str> = services.iter().map(|s| s.service_name.as_str()).collect();
        let dropped = actual_quantities
            .keys()
            .filter(|name| !plan_names.contains(name.as_str()))
            .count();
        if dropped > 0 {
            tracing::debug!("實際結果中有 {} 個服務不在計劃範本內，已忽略", dropped);
        }

        for service in &mut services {
            service.actual_quantity = actual_quantities
                .get(&service.service_name)
                .copied()
                .unwrap_or(Decimal::ZERO);
        }

        tracing::debug!("整合完成：{} 個服務", services.len());
        Ok(ServiceTable::new(services))
    }

    /// 讀取計劃範本的每一列
    fn read_plan(
        &self,
        plan: &RawTable,
        columns: &PlanColumns,
    ) -> svcplan_core::Result<Vec<ServiceRecord>> {
        let mut services = Vec::with_capacity(plan.len());
        let mut seen = HashSet::new();
        let mut coerced = 0usize;

        for row in 0..plan.len() {
            if plan.is_blank_row(row) {
                continue;
            }

            let name = plan.cell(row, columns.service).trim();
            if name.is_empty() {
                // 第 1 列為表頭
                return Err(PlanError::MissingServiceName { row: row + 2 });
            }
            if !seen.insert(name.to_string()) {
                return Err(PlanError::DuplicateService(name.to_string()));
            }

            let mut number = |col: usize| {
                let raw = plan.cell(row, col);
                self.cleaner.try_parse(raw).unwrap_or_else(|| {
                    if !raw.trim().is_empty() {
                        coerced += 1;
                    }
                    Decimal::ZERO
                })
            };

            let time = number(columns.time);
            let cost = number(columns.cost);
            let price = number(columns.price);
            let min = number(columns.min);
            let max = number(columns.max);

            let unit_time = if time.is_zero() {
                self.config.min_unit_time
            } else {
                time
            };

            let record = ServiceRecord::new(name, unit_time, cost, price)?;
            services.push(record.with_bounds(min, max));
        }

        if coerced > 0 {
            tracing::warn!("計劃範本中有 {} 個無法解析的數值儲存格，已視為 0", coerced);
        }

        Ok(services)
    }

    /// 讀取實際數量，同名服務的數量相加
    fn read_actuals(&self, actual: &RawTable) -> svcplan_core::Result<HashMap<String, Decimal>> {
        let mut quantities: HashMap<String, Decimal> = HashMap::new();

        let Some(columns) = ActualColumns::resolve(actual)? else {
            tracing::debug!("實際結果沒有數量欄位，實際數量全部為 0");
            return Ok(quantities);
        };

        for row in 0..actual.len() {
            let name = actual.cell(row, columns.service).trim();
            if name.is_empty() {
                continue;
            }

            let quantity = self.cleaner.parse(actual.cell(row, columns.quantity));
            let overflow = || PlanError::Calculation(format!("{name} 的實際數量合計溢位"));
            let total = quantities.entry(name.to_string()).or_insert(Decimal::ZERO);
            *total = total.checked_add(quantity).ok_or_else(overflow)?;
        }

        Ok(quantities)
    }
}

impl Default for Consolidator {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const PLAN_HEADER: [&str; 6] = ["Servico", "Tempo", "Custo", "Venda", "Minimo", "Maximo"];

    fn plan_table(rows: &[[&str; 6]]) -> RawTable {
        let headers = PLAN_HEADER.iter().map(|h| h.to_string()).collect();
        let mut table = RawTable::new(headers, Vec::new());
        for row in rows {
            table = table.with_row(row.iter().copied());
        }
        table
    }

    fn actual_table(rows: &[[&str; 2]]) -> RawTable {
        let headers = vec!["servico".to_string(), " QUANTIDADE ".to_string()];
        let mut table = RawTable::new(headers, Vec::new());
        for row in rows {
            table = table.with_row(row.iter().copied());
        }
        table
    }

    #[test]
    fn test_consolidate_plan_only() {
        let plan = plan_table(&[
            ["Corte", "0,5", "R$ 10,00", "R$ 40,00", "2", "20"],
            ["Escova", "1", "15", "60", "0", "10"],
        ]);

        let table = Consolidator::default().consolidate(&plan, None).unwrap();

        assert_eq!(table.len(), 2);
        let corte = table.get("Corte").unwrap();
        assert_eq!(corte.unit_time(), dec!(0.5));
        assert_eq!(corte.unit_profit(), dec!(30));
        assert_eq!(corte.profit_per_hour(), dec!(60));
        assert_eq!(corte.min_quantity, dec!(2));
        assert_eq!(corte.max_quantity, dec!(20));
        assert_eq!(corte.actual_quantity, Decimal::ZERO);
        assert!(!table.has_actuals());
    }

    #[test]
    fn test_zero_time_guard() {
        let plan = plan_table(&[["Consulta", "0", "0", "100", "0", "5"]]);

        let table = Consolidator::default().consolidate(&plan, None).unwrap();
        let consulta = table.get("Consulta").unwrap();

        assert_eq!(consulta.unit_time(), dec!(0.01));
        assert_eq!(consulta.profit_per_hour(), dec!(10000));
    }

    #[test]
    fn test_malformed_cells_become_zero() {
        let plan = plan_table(&[["Corte", "1", "abc", "", "x", "10"]]);

        let table = Consolidator::default().consolidate(&plan, None).unwrap();
        let corte = table.get("Corte").unwrap();

        assert_eq!(corte.unit_cost(), Decimal::ZERO);
        assert_eq!(corte.unit_price(), Decimal::ZERO);
        assert_eq!(corte.min_quantity, Decimal::ZERO);
    }

    #[test]
    fn test_merge_actuals_plan_is_authoritative() {
        let plan = plan_table(&[
            ["Corte", "1", "5", "15", "0", "100"],
            ["Escova", "1", "5", "15", "0", "100"],
        ]);
        let actual = actual_table(&[["Corte", "30"], ["Manicure", "12"]]);

        let table = Consolidator::default()
            .consolidate(&plan, Some(&actual))
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Corte").unwrap().actual_quantity, dec!(30));
        assert_eq!(table.get("Escova").unwrap().actual_quantity, Decimal::ZERO);
        assert!(table.get("Manicure").is_none());
        assert!(table.has_actuals());
    }

    #[test]
    fn test_duplicate_actual_rows_are_summed() {
        let plan = plan_table(&[["Corte", "1", "5", "15", "0", "100"]]);
        let actual = actual_table(&[["Corte", "10"], [" Corte ", "5,5"]]);

        let table = Consolidator::default()
            .consolidate(&plan, Some(&actual))
            .unwrap();

        assert_eq!(table.get("Corte").unwrap().actual_quantity, dec!(15.5));
    }

    #[test]
    fn test_actual_without_quantity_column_is_ignored() {
        let plan = plan_table(&[["Corte", "1", "5", "15", "0", "100"]]);
        let actual = RawTable::new(vec!["servico".to_string()], Vec::new()).with_row(["Corte"]);

        let table = Consolidator::default()
            .consolidate(&plan, Some(&actual))
            .unwrap();

        assert_eq!(table.get("Corte").unwrap().actual_quantity, Decimal::ZERO);
    }

    #[test]
    fn test_duplicate_plan_service_rejected() {
        let plan = plan_table(&[
            ["Corte", "1", "5", "15", "0", "100"],
            ["Corte ", "2", "5", "15", "0", "100"],
        ]);

        let err = Consolidator::default()
            .consolidate(&plan, None)
            .unwrap_err();
        assert_eq!(err, PlanError::DuplicateService("Corte".to_string()));
    }

    #[test]
    fn test_blank_rows_skipped_and_missing_name_rejected() {
        let plan = plan_table(&[
            ["Corte", "1", "5", "15", "0", "100"],
            ["", "", "", "", "", ""],
            ["", "1", "5", "15", "0", "100"],
        ]);

        let err = Consolidator::default()
            .consolidate(&plan, None)
            .unwrap_err();
        assert_eq!(err, PlanError::MissingServiceName { row: 4 });
    }

    #[test]
    fn test_missing_columns() {
        let plan = RawTable::new(vec!["servico".to_string(), "tempo".to_string()], Vec::new());

        let err = Consolidator::default()
            .consolidate(&plan, None)
            .unwrap_err();
        assert!(matches!(err, PlanError::MissingColumns { .. }));
    }

    #[test]
    fn test_thousands_separator_in_price() {
        let plan = plan_table(&[["Pacote", "10", "R$ 1.000,00", "1.234,56", "0", "3"]]);

        let table = Consolidator::default().consolidate(&plan, None).unwrap();
        let pacote = table.get("Pacote").unwrap();

        assert_eq!(pacote.unit_price(), dec!(1234.56));
        assert_eq!(pacote.unit_profit(), dec!(234.56));
    }
}

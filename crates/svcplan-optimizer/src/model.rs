//! 線性規劃模型
//!
//! 最大化 Σ(單位利潤 × 數量)
//! 限制：Σ(單位耗時 × 數量) ≤ 可用工時，且 最低 ≤ 數量 ≤ 最高

use minilp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use svcplan_core::{PlanError, ServiceTable};

/// 求解結果（連續解）
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSolution {
    /// 各服務數量，順序與輸入表相同
    pub quantities: Vec<f64>,
    /// 目標函數值（總利潤）
    pub objective: f64,
}

/// 工時分配的線性規劃模型
#[derive(Debug, Clone)]
pub struct AllocationModel {
    profits: Vec<f64>,
    hours: Vec<f64>,
    bounds: Vec<(f64, f64)>,
    time_budget: f64,
}

impl AllocationModel {
    /// 由服務表建立模型
    pub fn build(table: &ServiceTable, time_budget: Decimal) -> svcplan_core::Result<Self> {
        let mut profits = Vec::with_capacity(table.len());
        let mut hours = Vec::with_capacity(table.len());
        let mut bounds = Vec::with_capacity(table.len());

        for service in table {
            if !service.has_valid_bounds() {
                return Err(PlanError::InvalidBounds {
                    service: service.service_name.clone(),
                    min: service.min_quantity,
                    max: service.max_quantity,
                });
            }

            profits.push(to_f64(service.unit_profit())?);
            hours.push(to_f64(service.unit_time())?);
            bounds.push((to_f64(service.min_quantity)?, to_f64(service.max_quantity)?));
        }

        Ok(Self {
            profits,
            hours,
            bounds,
            time_budget: to_f64(time_budget)?,
        })
    }

    /// 變數數量
    pub fn len(&self) -> usize {
        self.profits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profits.is_empty()
    }

    /// 求解模型
    pub fn solve(&self) -> svcplan_core::Result<AllocationSolution> {
        if self.is_empty() {
            return Ok(AllocationSolution {
                quantities: Vec::new(),
                objective: 0.0,
            });
        }

        let mut problem = Problem::new(OptimizationDirection::Maximize);

        let vars: Vec<_> = self
            .profits
            .iter()
            .zip(&self.bounds)
            .map(|(&profit, &bounds)| problem.add_var(profit, bounds))
            .collect();

        let mut time_used = LinearExpr::empty();
        for (&var, &hours) in vars.iter().zip(&self.hours) {
            time_used.add(var, hours);
        }
        problem.add_constraint(time_used, ComparisonOp::Le, self.time_budget);

        let solution = problem
            .solve()
            .map_err(|e| PlanError::Solver(e.to_string()))?;

        let quantities: Vec<f64> = vars.iter().map(|&var| solution[var]).collect();
        tracing::debug!("求解完成：目標值 {:.4}", solution.objective());

        Ok(AllocationSolution {
            quantities,
            objective: solution.objective(),
        })
    }

    /// 檢查某組數量（順序與輸入表相同）是否滿足所有限制，允許容差
    pub fn is_feasible(&self, quantities: &[f64], tolerance: f64) -> bool {
        if quantities.len() != self.len() {
            return false;
        }

        let within_bounds = self
            .bounds
            .iter()
            .zip(quantities)
            .all(|(&(min, max), &x)| x >= min - tolerance && x <= max + tolerance);

        let used: f64 = self
            .hours
            .iter()
            .zip(quantities)
            .map(|(hours, x)| hours * x)
            .sum();

        within_bounds && used <= self.time_budget + tolerance
    }
}

fn to_f64(value: Decimal) -> svcplan_core::Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| PlanError::Calculation(format!("無法將 {value} 轉換為浮點數")))
}

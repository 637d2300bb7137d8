//! # Service Plan Optimizer
//!
//! 工時分配最佳化（線性規劃、可行性檢查、指標推導）

pub mod metrics;
pub mod model;
pub mod summary;

// Re-export 主要類型
pub use metrics::MetricsCalculator;
pub use model::{AllocationModel, AllocationSolution};
pub use summary::PlanSummary;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use svcplan_core::{PlanError, ServiceOutcome, ServiceTable};

/// 優化結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// 各服務結果（依每小時利潤由高到低）
    pub services: Vec<ServiceOutcome>,

    /// 可用工時
    pub time_budget: Decimal,

    /// 最低數量所需工時
    pub required_minimum_time: Decimal,

    /// 取整前的目標函數值
    pub lp_objective: f64,

    /// 是否含有實際資料
    pub has_actuals: bool,
}

impl OptimizationResult {
    /// 彙總總覽指標
    pub fn summary(&self) -> svcplan_core::Result<PlanSummary> {
        PlanSummary::from_outcomes(
            &self.services,
            self.time_budget,
            self.required_minimum_time,
            self.has_actuals,
        )
    }

    /// 依名稱查找服務結果
    pub fn get(&self, service_name: &str) -> Option<&ServiceOutcome> {
        self.services
            .iter()
            .find(|o| o.service_name() == service_name)
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// 工時分配優化器
pub struct AllocationOptimizer;

impl AllocationOptimizer {
    /// 求出利潤最大的服務組合
    ///
    /// 最低數量所需工時超過可用工時時，在呼叫求解器前回傳 [`PlanError::Infeasible`]。
    pub fn optimize(
        table: &ServiceTable,
        time_budget: Decimal,
    ) -> svcplan_core::Result<OptimizationResult> {
        let service_count = table.len();
        tracing::info!("開始最佳化：{service_count} 個服務，可用工時 {time_budget}");

        let start_time = std::time::Instant::now();

        // Step 1: 可行性預檢
        let required_minimum_time = table.required_minimum_time()?;
        if required_minimum_time > time_budget {
            let shortfall_hours = required_minimum_time - time_budget;
            tracing::warn!(
                "最低數量需要 {} 小時，超過可用 {} 小時",
                required_minimum_time,
                time_budget
            );
            return Err(PlanError::Infeasible {
                required_hours: required_minimum_time,
                available_hours: time_budget,
                shortfall_hours,
            });
        }

        // Step 2: 建立並求解線性規劃
        tracing::debug!("Step 2: 求解線性規劃");
        let model = AllocationModel::build(table, time_budget)?;
        let solution = model.solve().map_err(|e| {
            tracing::warn!("求解失敗: {}", e);
            e
        })?;

        // Step 3: 推導指標
        tracing::debug!("Step 3: 推導計劃與實際指標");
        let has_actuals = table.has_actuals();
        let mut services = table
            .iter()
            .cloned()
            .zip(solution.quantities.iter().copied())
            .map(|(record, lp)| MetricsCalculator::derive(record, lp, has_actuals))
            .collect::<svcplan_core::Result<Vec<_>>>()?;

        // Step 4: 依每小時利潤排序（穩定排序，同值保持原順序）
        services.sort_by_key(|o| Reverse(o.record.profit_per_hour()));

        tracing::info!(
            "最佳化完成：目標值 {:.2}，耗時 {} ms",
            solution.objective,
            start_time.elapsed().as_millis()
        );

        Ok(OptimizationResult {
            services,
            time_budget,
            required_minimum_time,
            lp_objective: solution.objective,
            has_actuals,
        })
    }
}

//! # Service Plan
//!
//! 服務組合規劃：在有限工時下分配各服務的生產數量以最大化利潤，
//! 並與實際結果比較。
//!
//! 每次請求獨立建立工作表，不保存任何跨請求狀態。

pub mod logging;

pub use svcplan_calc::{Consolidator, NumericCleaner};
pub use svcplan_core::{
    PlanError, PlannerConfig, RawTable, ServiceOutcome, ServiceRecord, ServiceTable, TableKind,
};
pub use svcplan_io::{CsvLoader, ExcelLoader, LoadError, TableLoader};
pub use svcplan_optimizer::{AllocationModel, AllocationOptimizer, OptimizationResult, PlanSummary};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 頂層錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// 規劃報告（交給呈現層）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    /// 各服務結果（依每小時利潤由高到低）
    pub services: Vec<ServiceOutcome>,

    /// 合計指標
    pub summary: PlanSummary,
}

/// 服務組合規劃器
#[derive(Debug, Clone, Default)]
pub struct ServicePlanner {
    config: PlannerConfig,
    consolidator: Consolidator,
}

impl ServicePlanner {
    /// 創建新的規劃器
    pub fn new(config: PlannerConfig) -> Self {
        let consolidator = Consolidator::new(config.clone());
        Self {
            config,
            consolidator,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 整合 → 最佳化 → 彙總
    ///
    /// `time_budget` 未提供或無效時使用配置中的預設值。
    pub fn plan(
        &self,
        plan: &RawTable,
        actual: Option<&RawTable>,
        time_budget: Option<Decimal>,
    ) -> svcplan_core::Result<PlanReport> {
        let time_budget = self.config.resolve_time_budget(time_budget);
        tracing::debug!("規劃請求：可用工時 {}", time_budget);

        let table = self.consolidator.consolidate(plan, actual)?;
        let result = AllocationOptimizer::optimize(&table, time_budget)?;
        let summary = result.summary()?;

        Ok(PlanReport {
            services: result.services,
            summary,
        })
    }

    /// 從檔案載入後規劃
    pub fn plan_files(
        &self,
        loader: &TableLoader,
        plan_path: &Path,
        actual_path: Option<&Path>,
        time_budget: Option<Decimal>,
    ) -> Result<PlanReport, PlannerError> {
        let plan = loader.load(plan_path)?;
        let actual = actual_path.map(|p| loader.load(p)).transpose()?;

        Ok(self.plan(&plan, actual.as_ref(), time_budget)?)
    }
}

//! # Service Plan Consolidation
//!
//! 將計劃範本與實際結果整合為每個服務一列的工作表

pub mod columns;
pub mod consolidate;
pub mod numeric;

// Re-export 主要類型
pub use consolidate::Consolidator;
pub use numeric::NumericCleaner;

use svcplan_core::{RawTable, ServiceTable};

/// 以預設配置整合資料
pub fn consolidate(
    plan: &RawTable,
    actual: Option<&RawTable>,
) -> svcplan_core::Result<ServiceTable> {
    Consolidator::default().consolidate(plan, actual)
}

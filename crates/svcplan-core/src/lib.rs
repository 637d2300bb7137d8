//! # Service Plan Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod outcome;
pub mod service;
pub mod table;

// Re-export 主要類型
pub use config::PlannerConfig;
pub use outcome::ServiceOutcome;
pub use service::{ServiceRecord, ServiceTable};
pub use table::{RawTable, TableKind};

use rust_decimal::Decimal;

/// 服務規劃錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// 範本缺少必要欄位（SchemaError）
    #[error("{table}缺少必要欄位: {}；請確認表頭包含這些欄位", .missing.join(", "))]
    MissingColumns {
        table: TableKind,
        missing: Vec<String>,
    },

    #[error("服務名稱重複: {0}；每個服務在計劃範本中只能出現一次")]
    DuplicateService(String),

    #[error("第 {row} 列缺少服務名稱")]
    MissingServiceName { row: usize },

    /// 最低數量所需工時超過可用工時
    #[error(
        "不可行：最低數量需要 {required_hours} 小時，但只有 {available_hours} 小時可用，尚缺 {shortfall_hours} 小時。請增加可用工時或降低最低數量"
    )]
    Infeasible {
        required_hours: Decimal,
        available_hours: Decimal,
        shortfall_hours: Decimal,
    },

    #[error("服務 {service} 的數量上下限無效：最小 {min} 大於最大 {max}")]
    InvalidBounds {
        service: String,
        min: Decimal,
        max: Decimal,
    },

    #[error("求解器錯誤: {0}")]
    Solver(String),

    #[error("計算錯誤: {0}")]
    Calculation(String),
}

impl PlanError {
    /// 是否為可由使用者調整輸入解決的錯誤
    pub fn is_actionable(&self) -> bool {
        !matches!(self, PlanError::Solver(_) | PlanError::Calculation(_))
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

//! 規劃配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 預設可用工時（小時）
pub const DEFAULT_TIME_BUDGET: Decimal = Decimal::from_parts(360, 0, 0, false, 0);

/// 預設最小單位耗時（0.01 小時），避免除以零
pub const DEFAULT_MIN_UNIT_TIME: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// 服務規劃配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 未提供或無效時使用的可用工時
    pub default_time_budget: Decimal,

    /// 單位耗時為零時的替代值
    pub min_unit_time: Decimal,

    /// 數值欄位中要去除的貨幣前綴
    pub currency_prefix: String,
}

impl PlannerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            default_time_budget: DEFAULT_TIME_BUDGET,
            min_unit_time: DEFAULT_MIN_UNIT_TIME,
            currency_prefix: "R$".to_string(),
        }
    }

    /// 建構器模式：設置預設可用工時
    pub fn with_default_time_budget(mut self, hours: Decimal) -> Self {
        self.default_time_budget = hours;
        self
    }

    /// 建構器模式：設置最小單位耗時
    pub fn with_min_unit_time(mut self, hours: Decimal) -> Self {
        self.min_unit_time = hours;
        self
    }

    /// 建構器模式：設置貨幣前綴
    pub fn with_currency_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.currency_prefix = prefix.into();
        self
    }

    /// 決定本次計算的可用工時
    ///
    /// 未提供、零或負數時回退到預設值。
    pub fn resolve_time_budget(&self, requested: Option<Decimal>) -> Decimal {
        match requested {
            Some(hours) if hours > Decimal::ZERO => hours,
            _ => self.default_time_budget,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

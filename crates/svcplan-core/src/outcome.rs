//! 單一服務的最佳化結果

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ServiceRecord;

/// 服務最佳化結果（服務記錄加上計劃與實際指標）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOutcome {
    /// 原始服務記錄
    #[serde(flatten)]
    pub record: ServiceRecord,

    /// 求解器回傳的連續解（四捨五入前）
    pub lp_quantity: f64,

    /// 建議數量（取整後）
    pub suggested_quantity: Decimal,

    /// 計劃利潤
    pub planned_profit: Decimal,
    /// 計劃營收
    pub planned_revenue: Decimal,
    /// 計劃工時
    pub planned_time: Decimal,

    /// 實際利潤
    pub actual_profit: Decimal,
    /// 實際營收
    pub actual_revenue: Decimal,
    /// 實際工時
    pub actual_time: Decimal,

    /// 數量偏差（實際 - 建議）
    pub quantity_deviation: Decimal,
    /// 利潤偏差（實際 - 計劃）
    pub profit_deviation: Decimal,
}

impl ServiceOutcome {
    pub fn service_name(&self) -> &str {
        &self.record.service_name
    }

    /// 達成率：實際數量 / max(建議數量, 1)
    pub fn attainment(&self) -> Decimal {
        let target = self.suggested_quantity.max(Decimal::ONE);
        self.record
            .actual_quantity
            .checked_div(target)
            .unwrap_or(Decimal::ZERO)
    }

    /// 實際成本（實際數量 × 單位成本）
    pub fn actual_cost(&self) -> Decimal {
        self.record
            .actual_quantity
            .checked_mul(self.record.unit_cost())
            .unwrap_or(Decimal::MAX)
    }

    /// 是否低於建議數量
    pub fn is_behind_plan(&self) -> bool {
        self.quantity_deviation < Decimal::ZERO
    }
}

//! 計劃總覽指標

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use svcplan_core::{PlanError, ServiceOutcome};

/// 計劃與實際的合計指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// 可用工時
    pub time_budget: Decimal,
    /// 最低數量所需工時
    pub required_minimum_time: Decimal,

    pub planned_profit: Decimal,
    pub planned_revenue: Decimal,
    pub planned_time: Decimal,

    /// 未分配工時（可用 - 計劃，取整可能使其略為負值）
    pub idle_time: Decimal,

    /// 每計劃工時利潤，計劃工時為 0 時為 None
    pub profit_per_planned_hour: Option<Decimal>,

    pub actual_profit: Decimal,
    pub actual_revenue: Decimal,
    pub actual_time: Decimal,

    /// 總利潤偏差（實際 - 計劃）
    pub profit_deviation: Decimal,

    /// 是否有實際資料
    pub has_actuals: bool,
}

impl PlanSummary {
    /// 由各服務結果彙總
    pub fn from_outcomes(
        outcomes: &[ServiceOutcome],
        time_budget: Decimal,
        required_minimum_time: Decimal,
        has_actuals: bool,
    ) -> svcplan_core::Result<Self> {
        let planned_profit = total(outcomes, |o| o.planned_profit)?;
        let planned_revenue = total(outcomes, |o| o.planned_revenue)?;
        let planned_time = total(outcomes, |o| o.planned_time)?;
        let actual_profit = total(outcomes, |o| o.actual_profit)?;
        let actual_revenue = total(outcomes, |o| o.actual_revenue)?;
        let actual_time = total(outcomes, |o| o.actual_time)?;
        let profit_deviation = total(outcomes, |o| o.profit_deviation)?;

        let idle_time = time_budget
            .checked_sub(planned_time)
            .ok_or_else(|| PlanError::Calculation("未分配工時計算溢位".to_string()))?;

        let profit_per_planned_hour = if planned_time.is_zero() {
            None
        } else {
            planned_profit.checked_div(planned_time)
        };

        Ok(Self {
            time_budget,
            required_minimum_time,
            planned_profit,
            planned_revenue,
            planned_time,
            idle_time,
            profit_per_planned_hour,
            actual_profit,
            actual_revenue,
            actual_time,
            profit_deviation,
            has_actuals,
        })
    }

    /// 計劃工時佔可用工時的比例
    pub fn utilization(&self) -> Option<Decimal> {
        if self.time_budget.is_zero() {
            return None;
        }
        self.planned_time.checked_div(self.time_budget)
    }
}

fn total<F>(outcomes: &[ServiceOutcome], field: F) -> svcplan_core::Result<Decimal>
where
    F: Fn(&ServiceOutcome) -> Decimal,
{
    outcomes.iter().try_fold(Decimal::ZERO, |acc, o| {
        acc.checked_add(field(o))
            .ok_or_else(|| PlanError::Calculation("合計溢位".to_string()))
    })
}

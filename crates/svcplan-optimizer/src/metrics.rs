//! 計劃與實際指標推導

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use svcplan_core::{PlanError, ServiceOutcome, ServiceRecord};

/// 指標計算器
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// 將連續解取整為建議數量（四捨六入五成雙）
    pub fn round_quantity(lp_quantity: f64) -> svcplan_core::Result<Decimal> {
        let value = Decimal::from_f64(lp_quantity).ok_or_else(|| {
            PlanError::Calculation(format!("求解結果 {lp_quantity} 無法轉換為數量"))
        })?;

        let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        // 避免 -0 出現在輸出中
        if rounded.is_zero() {
            Ok(Decimal::ZERO)
        } else {
            Ok(rounded)
        }
    }

    /// 推導單一服務的計劃／實際指標
    ///
    /// `include_actuals` 為 false 時，實際指標與偏差全部為 0。
    pub fn derive(
        record: ServiceRecord,
        lp_quantity: f64,
        include_actuals: bool,
    ) -> svcplan_core::Result<ServiceOutcome> {
        let suggested = Self::round_quantity(lp_quantity)?;
        let name = record.service_name.as_str();

        let planned_profit = mul(suggested, record.unit_profit(), name)?;
        let planned_revenue = mul(suggested, record.unit_price(), name)?;
        let planned_time = mul(suggested, record.unit_time(), name)?;

        let (actual_profit, actual_revenue, actual_time, quantity_deviation, profit_deviation) =
            if include_actuals {
                let actual = record.actual_quantity;
                let actual_profit = mul(actual, record.unit_profit(), name)?;
                (
                    actual_profit,
                    mul(actual, record.unit_price(), name)?,
                    mul(actual, record.unit_time(), name)?,
                    sub(actual, suggested, name)?,
                    sub(actual_profit, planned_profit, name)?,
                )
            } else {
                (
                    Decimal::ZERO,
                    Decimal::ZERO,
                    Decimal::ZERO,
                    Decimal::ZERO,
                    Decimal::ZERO,
                )
            };

        Ok(ServiceOutcome {
            record,
            lp_quantity,
            suggested_quantity: suggested,
            planned_profit,
            planned_revenue,
            planned_time,
            actual_profit,
            actual_revenue,
            actual_time,
            quantity_deviation,
            profit_deviation,
        })
    }
}

fn mul(a: Decimal, b: Decimal, service: &str) -> svcplan_core::Result<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| PlanError::Calculation(format!("{service} 的指標計算溢位")))
}

fn sub(a: Decimal, b: Decimal, service: &str) -> svcplan_core::Result<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| PlanError::Calculation(format!("{service} 的偏差計算溢位")))
}

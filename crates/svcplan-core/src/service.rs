//! 服務記錄模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PlanError, Result};

/// 服務記錄（每個服務名稱一列）
///
/// 耗時與價格只能經由 [`ServiceRecord::new`] 設定，`unit_profit` 與
/// `profit_per_hour` 由其計算，因此以唯讀方法公開。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// 服務名稱（唯一鍵）
    pub service_name: String,

    /// 每單位耗時（小時）
    unit_time: Decimal,

    /// 每單位成本
    unit_cost: Decimal,

    /// 每單位售價
    unit_price: Decimal,

    /// 每單位利潤（售價 - 成本，可為負）
    unit_profit: Decimal,

    /// 每小時利潤（僅用於排序顯示）
    profit_per_hour: Decimal,

    /// 最低數量
    pub min_quantity: Decimal,

    /// 最高數量
    pub max_quantity: Decimal,

    /// 實際數量（無實際資料時為 0）
    pub actual_quantity: Decimal,
}

impl ServiceRecord {
    /// 創建新的服務記錄並計算衍生欄位
    ///
    /// `unit_time` 必須非零；零耗時的保護值由整合層套用。
    pub fn new(
        service_name: impl Into<String>,
        unit_time: Decimal,
        unit_cost: Decimal,
        unit_price: Decimal,
    ) -> Result<Self> {
        let service_name = service_name.into();

        let unit_profit = unit_price
            .checked_sub(unit_cost)
            .ok_or_else(|| calc_error(&service_name, "單位利潤溢位"))?;

        let profit_per_hour = unit_profit
            .checked_div(unit_time)
            .ok_or_else(|| calc_error(&service_name, "每小時利潤無法計算"))?;

        Ok(Self {
            service_name,
            unit_time,
            unit_cost,
            unit_price,
            unit_profit,
            profit_per_hour,
            min_quantity: Decimal::ZERO,
            max_quantity: Decimal::ZERO,
            actual_quantity: Decimal::ZERO,
        })
    }

    /// 建構器模式：設置數量上下限
    pub fn with_bounds(mut self, min_quantity: Decimal, max_quantity: Decimal) -> Self {
        self.min_quantity = min_quantity;
        self.max_quantity = max_quantity;
        self
    }

    /// 建構器模式：設置實際數量
    pub fn with_actual_quantity(mut self, quantity: Decimal) -> Self {
        self.actual_quantity = quantity;
        self
    }

    /// 每單位耗時（小時）
    pub fn unit_time(&self) -> Decimal {
        self.unit_time
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// 每單位利潤（售價 - 成本，可為負）
    pub fn unit_profit(&self) -> Decimal {
        self.unit_profit
    }

    /// 每小時利潤
    pub fn profit_per_hour(&self) -> Decimal {
        self.profit_per_hour
    }

    /// 最低數量所需工時
    pub fn minimum_time(&self) -> Result<Decimal> {
        self.min_quantity
            .checked_mul(self.unit_time)
            .ok_or_else(|| calc_error(&self.service_name, "最低工時溢位"))
    }

    /// 檢查上下限是否有效
    pub fn has_valid_bounds(&self) -> bool {
        self.min_quantity <= self.max_quantity
    }
}

fn calc_error(service_name: &str, detail: &str) -> PlanError {
    PlanError::Calculation(format!("{service_name} 的{detail}"))
}

/// 整合後的服務表（每個計劃服務一列）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceTable {
    pub services: Vec<ServiceRecord>,
}

impl ServiceTable {
    pub fn new(services: Vec<ServiceRecord>) -> Self {
        Self { services }
    }

    /// 依名稱查找服務
    pub fn get(&self, service_name: &str) -> Option<&ServiceRecord> {
        self.services.iter().find(|s| s.service_name == service_name)
    }

    /// 是否含有任何非零的實際數量
    pub fn has_actuals(&self) -> bool {
        self.services.iter().any(|s| !s.actual_quantity.is_zero())
    }

    /// 所有最低數量合計所需工時
    pub fn required_minimum_time(&self) -> Result<Decimal> {
        self.services.iter().try_fold(Decimal::ZERO, |acc, s| {
            acc.checked_add(s.minimum_time()?)
                .ok_or_else(|| PlanError::Calculation("最低工時合計溢位".to_string()))
        })
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServiceRecord> {
        self.services.iter()
    }
}

impl<'a> IntoIterator for &'a ServiceTable {
    type Item = &'a ServiceRecord;
    type IntoIter = std::slice::Iter<'a, ServiceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.services.iter()
    }
}

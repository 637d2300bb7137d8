//! 數值儲存格清理（寬鬆解析策略）
//!
//! 無法解析或空白的儲存格一律視為 0，不會讓整列失敗。

use rust_decimal::Decimal;
use std::str::FromStr;

/// 數值清理器
#[derive(Debug, Clone)]
pub struct NumericCleaner {
    currency_prefix: String,
}

impl NumericCleaner {
    /// 創建新的清理器
    pub fn new(currency_prefix: impl Into<String>) -> Self {
        Self {
            currency_prefix: currency_prefix.into(),
        }
    }

    /// 解析數值儲存格，失敗時回傳 `None`
    pub fn try_parse(&self, raw: &str) -> Option<Decimal> {
        let stripped = if self.currency_prefix.is_empty() {
            raw.to_string()
        } else {
            raw.replace(self.currency_prefix.as_str(), "")
        };

        let compact: String = stripped.chars().filter(|c| !c.is_whitespace()).collect();
        // `Decimal::from_str` 會接受 `_` 分隔，此處不允許
        if compact.is_empty() || compact.contains('_') {
            return None;
        }

        let normalized = normalize_separators(&compact);
        Decimal::from_str(&normalized)
            .or_else(|_| Decimal::from_scientific(&normalized))
            .ok()
    }

    /// 解析數值儲存格，失敗時為 0
    pub fn parse(&self, raw: &str) -> Decimal {
        self.try_parse(raw).unwrap_or(Decimal::ZERO)
    }
}

impl Default for NumericCleaner {
    fn default() -> Self {
        Self::new("R$")
    }
}

/// 將千分位與小數點統一為 `.` 小數格式
///
/// - 同時出現 `.` 與 `,`：最後出現者為小數點，另一個為千分位
/// - 只有 `,`：出現一次為小數點，多次為千分位
/// - 只有 `.`：出現多次為千分位
fn normalize_separators(s: &str) -> String {
    let last_dot = s.rfind('.');
    let last_comma = s.rfind(',');

    match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            if comma > dot {
                s.replace('.', "").replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
        (None, Some(_)) => {
            if s.matches(',').count() > 1 {
                s.replace(',', "")
            } else {
                s.replace(',', ".")
            }
        }
        (Some(_), None) if s.matches('.').count() > 1 => s.replace('.', ""),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("1.234,56", dec!(1234.56))]
    #[case("1,234.56", dec!(1234.56))]
    #[case("R$ 45,90", dec!(45.90))]
    #[case("R$1.000", dec!(1.000))]
    #[case("1.000.000", dec!(1000000))]
    #[case("1,000,000", dec!(1000000))]
    #[case("  12 ", dec!(12))]
    #[case("-3,5", dec!(-3.5))]
    #[case("0,5", dec!(0.5))]
    #[case("2.5", dec!(2.5))]
    #[case("1e3", dec!(1000))]
    #[case("R$\u{a0}10,00", dec!(10.00))]
    fn test_parse_valid(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(NumericCleaner::default().parse(raw), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("abc")]
    #[case("R$")]
    #[case("12abc")]
    #[case("nan")]
    #[case("inf")]
    #[case("1_000")]
    #[case("R$ 1_234,50")]
    fn test_malformed_becomes_zero(#[case] raw: &str) {
        let cleaner = NumericCleaner::default();
        assert_eq!(cleaner.try_parse(raw), None);
        assert_eq!(cleaner.parse(raw), Decimal::ZERO);
    }

    #[test]
    fn test_custom_currency_prefix() {
        let cleaner = NumericCleaner::new("US$");
        assert_eq!(cleaner.parse("US$ 7,25"), dec!(7.25));
        // 其他前綴不會被去除
        assert_eq!(cleaner.parse("R$ 7,25"), Decimal::ZERO);
    }
}

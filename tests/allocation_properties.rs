//! 分配結果的性質測試

use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use svcplan::{AllocationModel, AllocationOptimizer, PlanError, ServiceRecord, ServiceTable};

const EPS: f64 = 1e-6;

fn service_strategy() -> impl Strategy<Value = ServiceRecord> {
    (10i64..500, 0i64..100, 0i64..200, 0i64..10, 0i64..50).prop_map(
        |(time_cents, cost, price, min, span)| {
            ServiceRecord::new(
                "S",
                Decimal::new(time_cents, 2),
                Decimal::from(cost),
                Decimal::from(price),
            )
            .unwrap()
            .with_bounds(Decimal::from(min), Decimal::from(min + span))
        },
    )
}

fn table_strategy() -> impl Strategy<Value = ServiceTable> {
    prop::collection::vec(service_strategy(), 1..6).prop_map(|mut services| {
        for (i, s) in services.iter_mut().enumerate() {
            s.service_name = format!("S{i}");
        }
        ServiceTable::new(services)
    })
}

fn f(value: Decimal) -> f64 {
    value.to_f64().unwrap()
}

/// 連續背包問題的貪婪解（所有耗時為正時即為最佳解）
fn greedy_objective(table: &ServiceTable, budget: f64) -> f64 {
    let mut remaining = budget;
    let mut objective = 0.0;
    let mut candidates = Vec::new();

    for s in table {
        let (t, p) = (f(s.unit_time()), f(s.unit_profit()));
        let (min, max) = (f(s.min_quantity), f(s.max_quantity));
        remaining -= t * min;
        objective += p * min;
        if p > 0.0 {
            candidates.push((p, t, max - min));
        }
    }

    candidates.sort_by(|a, b| (b.0 / b.1).total_cmp(&(a.0 / a.1)));
    for (p, t, span) in candidates {
        let take = span.min(remaining / t);
        if take <= 0.0 {
            break;
        }
        objective += p * take;
        remaining -= t * take;
    }

    objective
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn budget_growth_never_breaks_feasibility(
        table in table_strategy(),
        extra in 0u32..200,
        growth in 0u32..200,
    ) {
        let required = table.required_minimum_time().unwrap();
        let small = required + Decimal::from(extra);
        let large = small + Decimal::from(growth);

        let first = AllocationOptimizer::optimize(&table, small).unwrap();
        let second = AllocationOptimizer::optimize(&table, large).unwrap();

        let tolerance = EPS * (1.0 + first.lp_objective.abs());
        prop_assert!(second.lp_objective >= first.lp_objective - tolerance);
    }

    #[test]
    fn bounds_and_time_respected(table in table_strategy(), extra in 0u32..300) {
        let budget = table.required_minimum_time().unwrap() + Decimal::from(extra);
        let result = AllocationOptimizer::optimize(&table, budget).unwrap();
        let model = AllocationModel::build(&table, budget).unwrap();

        // 結果已依每小時利潤排序，還原為輸入表順序
        let lp_quantities: Vec<f64> = table
            .iter()
            .map(|s| result.get(&s.service_name).unwrap().lp_quantity)
            .collect();
        let tolerance = EPS * (1.0 + f(budget));
        prop_assert!(model.is_feasible(&lp_quantities, tolerance));

        let mut rounded_hours = 0.0;
        let mut rounding_allowance = 0.0;
        for o in &result.services {
            prop_assert!((f(o.suggested_quantity) - o.lp_quantity).abs() <= 0.5 + EPS);
            rounded_hours += f(o.planned_time);
            rounding_allowance += 0.5 * f(o.record.unit_time());
        }
        prop_assert!(rounded_hours <= f(budget) + rounding_allowance + tolerance);
    }

    #[test]
    fn solution_is_optimal(table in table_strategy(), extra in 0u32..300) {
        let budget = table.required_minimum_time().unwrap() + Decimal::from(extra);
        let result = AllocationOptimizer::optimize(&table, budget).unwrap();

        let best = greedy_objective(&table, f(budget));
        prop_assert!((result.lp_objective - best).abs() <= EPS * (1.0 + best.abs()));
    }

    #[test]
    fn shortfall_reported_exactly(table in table_strategy(), deficit in 1u32..50) {
        let required = table.required_minimum_time().unwrap();
        prop_assume!(required > Decimal::ZERO);

        let budget = required - Decimal::from(deficit);
        match AllocationOptimizer::optimize(&table, budget) {
            Err(PlanError::Infeasible { shortfall_hours, .. }) => {
                prop_assert_eq!(shortfall_hours, Decimal::from(deficit));
            }
            other => prop_assert!(false, "預期不可行，實際為 {:?}", other),
        }
    }

    #[test]
    fn optimize_is_idempotent(table in table_strategy(), extra in 0u32..300) {
        let budget = table.required_minimum_time().unwrap() + Decimal::from(extra);

        let first = AllocationOptimizer::optimize(&table, budget).unwrap();
        let second = AllocationOptimizer::optimize(&table, budget).unwrap();

        prop_assert_eq!(first, second);
    }
}

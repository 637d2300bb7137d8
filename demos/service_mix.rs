//! 服務組合規劃示例
//!
//! 用法：
//!   cargo run --example service_mix
//!   cargo run --example service_mix -- template.csv [realizado.csv] [horas]

use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use svcplan::{logging, PlanReport, RawTable, ServicePlanner, TableLoader};

fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let planner = ServicePlanner::default();

    let report = match args.first() {
        Some(plan_path) => {
            let actual_path = args.get(1).map(PathBuf::from);
            let hours = args.get(2).map(|h| Decimal::from_str(h)).transpose()?;
            planner.plan_files(
                &TableLoader::new(),
                &PathBuf::from(plan_path),
                actual_path.as_deref(),
                hours,
            )?
        }
        None => {
            println!("=== 服務組合規劃示例（內建資料）===\n");
            let (plan, actual) = sample_tables();
            planner.plan(&plan, Some(&actual), Some(Decimal::from(160)))?
        }
    };

    print_report(&report);
    Ok(())
}

fn sample_tables() -> (RawTable, RawTable) {
    let plan = RawTable::new(
        ["Serviço", "Tempo", "Custo", "Venda", "Mínimo", "Máximo"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
        Vec::new(),
    )
    .with_row(["Coloração", "3", "R$ 50,00", "R$ 200,00", "0", "20"])
    .with_row(["Corte", "0,5", "R$ 10,00", "R$ 40,00", "0", "100"])
    .with_row(["Escova", "1", "15", "50", "10", "80"])
    .with_row(["Hidratação", "1,5", "20", "60", "0", "30"]);

    let actual = RawTable::new(
        vec!["Serviço".to_string(), "Quantidade".to_string()],
        Vec::new(),
    )
    .with_row(["Corte", "85"])
    .with_row(["Coloração", "14"])
    .with_row(["Escova", "40"]);

    (plan, actual)
}

fn print_report(report: &PlanReport) {
    let s = &report.summary;

    println!(
        "{:<14} {:>10} {:>10} {:>12} {:>12} {:>12}",
        "服務", "建議數量", "實際數量", "計劃利潤", "實際利潤", "利潤偏差"
    );
    for o in &report.services {
        let marker = if s.has_actuals && o.is_behind_plan() {
            " ▼"
        } else {
            ""
        };
        println!(
            "{:<14} {:>10} {:>10} {:>12} {:>12} {:>12}{}",
            o.service_name(),
            o.suggested_quantity,
            o.record.actual_quantity,
            o.planned_profit,
            o.actual_profit,
            o.profit_deviation,
            marker
        );
    }

    println!(
        "\n計劃利潤: {}  計劃營收: {}",
        s.planned_profit, s.planned_revenue
    );
    println!(
        "計劃工時: {} / {} 小時（未分配 {}）",
        s.planned_time, s.time_budget, s.idle_time
    );
    if let Some(utilization) = s.utilization() {
        let percent = (utilization * Decimal::ONE_HUNDRED).round_dp(1);
        println!("工時使用率: {}%", percent);
    }
    if let Some(per_hour) = s.profit_per_planned_hour {
        println!("每小時價值: {}", per_hour.round_dp(2));
    }
    if s.has_actuals {
        println!(
            "實際利潤: {}  實際工時: {}  總偏差: {}",
            s.actual_profit, s.actual_time, s.profit_deviation
        );
    }
}

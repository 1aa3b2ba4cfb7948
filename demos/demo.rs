// demos/demo.rs
use chrono::NaiveDate;
use stock_math::analytics::newsvendor::{expected_lost_sales, expected_revenue, ExpectedRevenueMethod};
use stock_math::math_utils::Timer;
use stock_math::mc::demand_loss::{estimate_demand_loss_with, DemandLossConfig};
use stock_math::mc::mixture::{inventory_option_value, DemandScenario, InventoryOptionParams};
use stock_math::models::volatility::{combined_volatility, Currency, SupplyRoute};
use stock_math::models::{DemandModel, RevenueTerms, SeasonalityProfile, VolumeDiscount};
use stock_math::output;
use stock_math::solvers::quantity_search::{optimize_quantity, sweep_quantities};
use stock_math::{estimate_demand_loss, evaluate_scenario, optimal_order_quantity};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Running stock-math Inventory Demo\n");

    let mean_per_week = 100.0;
    let std_dev_per_week = 20.0;
    let weeks = 4.0;
    let purchase = 5.0;
    let margin = 10.0;
    let rush_prob = 0.3;
    let rush_save = 3.0;
    let rate = 0.05;

    // --- Newsvendor ---
    let q_star = optimal_order_quantity(margin, purchase, mean_per_week, std_dev_per_week, weeks);
    println!("--- Newsvendor ---");
    println!("Critical ratio: {:.4}", margin / (margin + purchase));
    println!("Optimal order quantity: {:.2}", q_star);

    // --- Demand loss ---
    let demand = DemandModel::new(mean_per_week, std_dev_per_week, weeks);
    let mut timer = Timer::new();
    timer.start();
    let mc_loss = estimate_demand_loss(q_star, mean_per_week, std_dev_per_week, weeks, 100_000);
    let elapsed_loss = timer.elapsed_ms();
    let closed_loss = expected_lost_sales(q_star, &demand);
    let adaptive = DemandLossConfig::adaptive(&demand);
    let adaptive_loss = estimate_demand_loss_with(q_star, &demand, &adaptive);

    println!("\n--- Demand Loss at q* ---");
    println!("Monte Carlo (100k draws): {:.4} ({:.2} ms)", mc_loss, elapsed_loss);
    println!("Adaptive ({} draws): {:.4}", adaptive.iterations, adaptive_loss);
    println!("Normal loss function: {:.4}", closed_loss);

    // --- Expected revenue ---
    let terms = RevenueTerms {
        purchase,
        margin,
        rush_prob,
        rush_save,
    };
    let closed_rev = expected_revenue(q_star, &demand, &terms, ExpectedRevenueMethod::Closed, &adaptive);
    let mc_rev = expected_revenue(q_star, &demand, &terms, ExpectedRevenueMethod::MonteCarlo, &adaptive);
    println!("\n--- Expected Revenue at q* ---");
    println!("Closed form: {:.2}", closed_rev);
    println!("Monte Carlo: {:.2}", mc_rev);

    // --- Scenario valuation ---
    let t = weeks / 52.0;
    let strike = q_star * purchase * (1.0 + rate * t);
    timer.start();
    let scenario_value = evaluate_scenario(
        q_star,
        demand.aggregated_mean(),
        demand.aggregated_std_dev(),
        terms.full_price(),
        terms.rush_unit_revenue(),
        rush_prob,
        10_000,
        42,
        strike,
        t,
        rate,
    );
    let elapsed_scenario = timer.elapsed_ms();
    println!("\n--- Scenario Option Value ---");
    println!("Strike (financed purchase): {:.2}", strike);
    println!("Option value: {:.4} ({:.2} ms)", scenario_value, elapsed_scenario);

    // --- Seasonality and risk ---
    let factors = [0.8, 0.8, 0.9, 1.0, 1.0, 1.1, 1.1, 1.0, 1.0, 1.1, 1.3, 1.6];
    let start = NaiveDate::from_ymd_opt(2026, 11, 2).expect("valid date");
    let profile = SeasonalityProfile::starting_at(factors, start).expect("valid seasonality");
    let seasonal = demand.seasonally_adjusted(&profile);
    let risk = combined_volatility(&demand, q_star, rush_prob, Currency::from("usd"), SupplyRoute::from("china"));
    println!("\n--- Seasonality and Risk ---");
    println!("Season starts in month {}", profile.start_month());
    println!("Seasonal weekly demand: {:.2}", seasonal.mean_per_period);
    println!(
        "Seasonal order quantity: {:.2}",
        optimal_order_quantity(margin, purchase, seasonal.mean_per_period, seasonal.std_dev_per_period, weeks)
    );
    println!("Combined volatility (USD, China): {:.4}", risk);

    // --- Scenario mixture ---
    let scenarios = [
        DemandScenario::new(0.25, 0.7, 1.1),
        DemandScenario::new(0.5, 1.0, 1.0),
        DemandScenario::new(0.25, 1.3, 1.2),
    ];
    let base = InventoryOptionParams {
        q: q_star,
        base_mean_per_week: mean_per_week,
        base_std_dev_per_week: std_dev_per_week,
        weeks,
        purchase,
        margin,
        rush_prob,
        rush_save,
        rate,
        holding_cost: 0.05,
        volume_discounts: vec![VolumeDiscount::new(400.0, 5.0)],
        trials: Some(2000),
        seed: Some(42),
    };
    if let Err(e) = base.validate() {
        println!("Invalid mixture parameters: {}", e);
        return;
    }
    let value_at = |q: f64| {
        let params = InventoryOptionParams { q, ..base.clone() };
        inventory_option_value(&params, &scenarios)
    };

    timer.start();
    let grid: Vec<f64> = (0..=20).map(|i| 300.0 + 10.0 * i as f64).collect();
    let sweep = sweep_quantities(&grid, value_at);
    let elapsed_sweep = timer.elapsed_ms();

    let search = optimize_quantity(300, 500, 10.0, |q| value_at(q as f64));

    println!("\n--- Scenario Mixture ---");
    println!("Mixture value at q*: {:.4}", value_at(q_star));
    println!("Sweep of {} quantities: {:.2} ms", grid.len(), elapsed_sweep);
    if let Some(best) = search {
        println!(
            "Best quantity: {} (value {:.4}, {} evaluations)",
            best.best_q, best.best_value, best.evaluations
        );
    }

    // --- Output to CSV ---
    if let Err(e) = std::fs::create_dir_all("results") {
        eprintln!("Error creating results directory: {}", e);
        return;
    }

    let sweep_csv_filename = "results/sweep.csv";
    match output::write_sweep_to_csv(sweep_csv_filename, &sweep) {
        Ok(_) => println!("\nSweep data written to {}", sweep_csv_filename),
        Err(e) => eprintln!("Error writing sweep data: {}", e),
    }

    let summary_data = vec![
        ("q_star", format!("{:.4}", q_star)),
        ("mc_demand_loss", format!("{:.6}", mc_loss)),
        ("closed_demand_loss", format!("{:.6}", closed_loss)),
        ("expected_revenue", format!("{:.4}", closed_rev)),
        ("scenario_value", format!("{:.6}", scenario_value)),
        ("combined_volatility", format!("{:.6}", risk)),
    ];
    let summary_csv_filename = "results/summary.csv";
    match output::write_summary_to_csv(summary_csv_filename, &summary_data) {
        Ok(_) => println!("Summary data written to {}", summary_csv_filename),
        Err(e) => eprintln!("Error writing summary data: {}", e),
    }
}

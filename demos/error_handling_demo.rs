// demos/error_handling_demo.rs
use stock_math::error::StockError;
use stock_math::mc::demand_loss::DemandLossConfig;
use stock_math::mc::scenario::{try_evaluate_scenario, ScenarioParams, SimulationConfig};
use stock_math::models::{CostStructure, DemandModel, SeasonalityProfile};
use stock_math::{estimate_demand_loss, optimal_order_quantity, try_inverse_normal_cdf};

fn main() {
    println!("Error Handling Demo for stock-math");
    println!("==================================\n");

    // Test 1: Invalid demand model
    println!("1. Testing negative demand standard deviation...");

    let invalid_demand = DemandModel::new(100.0, -20.0, 4.0);
    match invalid_demand.validate() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Degenerate cost structure
    println!("\n2. Testing zero margin and zero price...");

    let costs = CostStructure::new(0.0, 0.0);
    match costs.validate() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Probability outside [0, 1]
    println!("\n3. Testing inverse CDF outside the unit interval...");

    match try_inverse_normal_cdf(1.2) {
        Ok(z) => println!("   Unexpected: got z = {}", z),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Invalid simulation configuration
    println!("\n4. Testing a scenario with zero trials...");

    let params = ScenarioParams {
        q: 400.0,
        mean: 400.0,
        std_dev: 40.0,
        full_price: 15.0,
        rush_unit_revenue: 12.0,
        rush_prob: 0.3,
        strike: 4_000.0,
        maturity: 4.0 / 52.0,
        rate: 0.05,
    };
    match try_evaluate_scenario(&params, &SimulationConfig { trials: 0, seed: 42 }) {
        Ok(v) => println!("   Unexpected: got value {}", v),
        Err(StockError::InvalidConfiguration { field, reason }) => {
            println!("   ✓ Caught configuration error in '{}': {}", field, reason)
        }
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    match (DemandLossConfig { iterations: -5, seed: 42 }).validate() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Invalid seasonality
    println!("\n5. Testing an out-of-range start month...");

    match SeasonalityProfile::new([1.0; 12], 12) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 6: Scalar entry points return sentinels instead of errors
    println!("\n6. Testing sentinel values of the scalar functions...");

    println!(
        "   Demand loss with 0 iterations: {}",
        estimate_demand_loss(300.0, 100.0, 20.0, 4.0, 0)
    );
    println!(
        "   Order quantity with zero margin: {}",
        optimal_order_quantity(0.0, 5.0, 100.0, 20.0, 4.0)
    );
    println!(
        "   Order quantity with free goods (μ + 5σ): {}",
        optimal_order_quantity(10.0, 0.0, 100.0, 20.0, 4.0)
    );

    // Test 7: Valid input passes
    println!("\n7. Testing valid parameters...");

    match try_evaluate_scenario(&params, &SimulationConfig::default()) {
        Ok(v) => println!("   ✓ Scenario value: {:.4}", v),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    println!("\n✓ Error handling demo completed successfully!");
}

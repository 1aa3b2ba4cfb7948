// scripts/benchmark.rs
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::Command;

use stock_math::analytics::newsvendor::expected_lost_sales;
use stock_math::math_utils::Timer;
use stock_math::mc::demand_loss::{estimate_demand_loss_with, DemandLossConfig};
use stock_math::mc::mixture::{inventory_option_value, DemandScenario, InventoryOptionParams};
use stock_math::mc::scenario::{evaluate_scenario_with, ScenarioParams, SimulationConfig};
use stock_math::models::DemandModel;
use stock_math::solvers::quantity_search::sweep_quantities;
use stock_math::{black_scholes_call, inverse_normal_cdf};

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    trials: usize,
    time_ms: f64,
    throughput_per_sec: f64,
    value: f64,
    reference_value: Option<f64>,
    relative_error: Option<f64>,
}

impl BenchmarkResult {
    fn timed(name: String, trials: usize, time_ms: f64, value: f64, reference: Option<f64>) -> Self {
        BenchmarkResult {
            name,
            trials,
            time_ms,
            throughput_per_sec: trials as f64 / (time_ms / 1000.0),
            value,
            reference_value: reference,
            relative_error: reference.map(|r| (value - r).abs() / r.abs()),
        }
    }
}

fn run_kernel_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let calls = 1_000_000;
    let mut timer = Timer::new();

    timer.start();
    let mut acc = 0.0;
    for i in 0..calls {
        acc += inverse_normal_cdf((i as f64 + 0.5) / calls as f64);
    }
    results.push(BenchmarkResult::timed(
        "Inverse normal CDF".to_string(),
        calls,
        timer.elapsed_ms(),
        acc / calls as f64,
        None,
    ));

    timer.start();
    let mut acc = 0.0;
    for i in 0..calls {
        acc += black_scholes_call(100.0, 80.0 + 40.0 * i as f64 / calls as f64, 1.0, 0.2, 0.05);
    }
    results.push(BenchmarkResult::timed(
        "Black-Scholes call".to_string(),
        calls,
        timer.elapsed_ms(),
        acc / calls as f64,
        None,
    ));

    results
}

fn run_monte_carlo_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let demand = DemandModel::new(100.0, 20.0, 4.0);
    let q = 417.0;
    let closed_loss = expected_lost_sales(q, &demand);

    for &iterations in &[10_000, 100_000, 1_000_000] {
        println!("Running benchmarks with {} trials...", iterations);

        let mut timer = Timer::new();
        timer.start();
        let loss = estimate_demand_loss_with(
            q,
            &demand,
            &DemandLossConfig {
                iterations,
                seed: 42,
            },
        );
        results.push(BenchmarkResult::timed(
            format!("Demand loss ({}k trials)", iterations / 1000),
            iterations as usize,
            timer.elapsed_ms(),
            loss,
            Some(closed_loss),
        ));

        let params = ScenarioParams {
            q,
            mean: demand.aggregated_mean(),
            std_dev: demand.aggregated_std_dev(),
            full_price: 15.0,
            rush_unit_revenue: 12.0,
            rush_prob: 0.3,
            strike: q * 5.0,
            maturity: 4.0 / 52.0,
            rate: 0.05,
        };
        timer.start();
        let value = evaluate_scenario_with(
            &params,
            &SimulationConfig {
                trials: iterations,
                seed: 42,
            },
        );
        results.push(BenchmarkResult::timed(
            format!("Scenario value ({}k trials)", iterations / 1000),
            iterations as usize,
            timer.elapsed_ms(),
            value,
            None,
        ));
    }

    results
}

fn run_mixture_benchmark() -> BenchmarkResult {
    let scenarios = [
        DemandScenario::new(0.25, 0.7, 1.1),
        DemandScenario::new(0.5, 1.0, 1.0),
        DemandScenario::new(0.25, 1.3, 1.2),
    ];
    let base = InventoryOptionParams {
        base_mean_per_week: 100.0,
        base_std_dev_per_week: 20.0,
        weeks: 4.0,
        purchase: 5.0,
        margin: 10.0,
        rush_prob: 0.3,
        rush_save: 3.0,
        rate: 0.05,
        holding_cost: 0.05,
        trials: Some(2000),
        seed: Some(42),
        ..Default::default()
    };
    let grid: Vec<f64> = (0..100).map(|i| 300.0 + 2.0 * i as f64).collect();

    let mut timer = Timer::new();
    timer.start();
    let sweep = sweep_quantities(&grid, |q| {
        inventory_option_value(&InventoryOptionParams { q, ..base.clone() }, &scenarios)
    });
    let time_ms = timer.elapsed_ms();
    let best = sweep.iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max);

    BenchmarkResult::timed(
        format!("Mixture sweep ({} quantities)", grid.len()),
        grid.len() * scenarios.len() * 2000,
        time_ms,
        best,
        None,
    )
}

fn write_results_to_csv(results: &[BenchmarkResult], system_info: &SystemInfo, filename: &str) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Benchmark,Trials,Time_ms,Throughput_per_sec,Value,Reference_Value,Relative_Error"
    )?;
    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6},{},{}",
            result.name,
            result.trials,
            result.time_ms,
            result.throughput_per_sec,
            result.value,
            result
                .reference_value
                .map(|v| format!("{:.6}", v))
                .unwrap_or_else(|| "N/A".to_string()),
            result
                .relative_error
                .map(|e| format!("{:.6}", e))
                .unwrap_or_else(|| "N/A".to_string())
        )?;
    }
    file.flush()
}

fn main() {
    println!("stock-math Benchmark Suite");
    println!("==========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    println!("Running closed-form kernel benchmarks...");
    let mut all_results = run_kernel_benchmarks();

    println!("\nRunning Monte Carlo benchmarks...");
    all_results.extend(run_monte_carlo_benchmarks());

    println!("\nRunning scenario mixture benchmark...");
    all_results.push(run_mixture_benchmark());

    println!("\n{:=<80}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<80}", "");
    println!(
        "{:<32} {:>9} {:>11} {:>14} {:>12} {:>10} {:>10}",
        "Benchmark", "Trials", "Time (ms)", "Throughput", "Value", "Reference", "Rel Error"
    );
    println!("{:-<80}", "");
    for result in &all_results {
        println!(
            "{:<32} {:>9} {:>11.2} {:>14.0} {:>12.4} {:>10} {:>10}",
            result.name,
            result.trials,
            result.time_ms,
            result.throughput_per_sec,
            result.value,
            result
                .reference_value
                .map(|v| format!("{:.4}", v))
                .unwrap_or_else(|| "N/A".to_string()),
            result
                .relative_error
                .map(|e| format!("{:.2}%", e * 100.0))
                .unwrap_or_else(|| "N/A".to_string())
        );
    }
    println!("{:=<80}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    match write_results_to_csv(&all_results, &system_info, &filename) {
        Ok(_) => println!("\nResults saved to: {}", filename),
        Err(e) => eprintln!("\nError writing {}: {}", filename, e),
    }

    println!("\nTo reproduce these results:");
    println!("1. Use Rust version: {}", system_info.rust_version);
    println!("2. Set RUSTFLAGS: {}", system_info.rustc_flags);
    println!("3. Run: cargo run --bin benchmark --release");
}

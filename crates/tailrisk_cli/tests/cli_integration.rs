//! Integration tests for the `tailrisk` binary and command layer.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use tailrisk_cli::commands::analyse::analyse;
use tailrisk_cli::config::{build_config_with, AppConfig, CliArgs};
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

fn write_prices(dir: &Path, rows: usize) -> PathBuf {
    let mut csv = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    let mut date = start_date();
    let mut price = 50.0;
    for i in 0..rows {
        price *= 1.0 + 0.015 * (i as f64 * 0.7).sin();
        writeln!(
            csv,
            "{},{:.4},{:.4},{:.4},{:.4},{:.4},1000",
            date,
            price,
            price,
            price,
            price * 1.01,
            price
        )
        .unwrap();
        date = date.next_weekday();
    }
    let path = dir.join("prices.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

fn start_date() -> tailrisk_core::types::Date {
    tailrisk_core::types::Date::from_ymd(2022, 1, 3).unwrap()
}

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("tailrisk.toml");
    std::fs::write(
        &path,
        "log_level = \"warn\"\n\n[analysis]\nsymbol = \"CSVTEST\"\nhistorical_window = 200\n\
         days_to_simulate = 15\nnum_simulations = 400\n",
    )
    .unwrap();
    path
}

fn tailrisk() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tailrisk"));
    cmd.env_remove("TAILRISK_SEED")
        .env_remove("TAILRISK_NUM_SIMULATIONS")
        .env_remove("TAILRISK_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// Command layer
// =============================================================================

#[test]
fn test_analyse_uses_file_configuration() {
    let dir = TempDir::new().unwrap();
    let prices = write_prices(dir.path(), 260);
    let cli = CliArgs {
        config_file: Some(write_config(dir.path())),
        ..CliArgs::default()
    };
    let config = build_config_with(&cli, |_| None).unwrap();

    let result = analyse(&config, &prices).unwrap();
    assert_eq!(result.symbol(), "CSVTEST");
    assert_eq!(result.base_final_returns().len(), 400);
    assert_eq!(result.bands().days(), 15);
    assert_eq!(result.statistics().observations, 199);
}

#[test]
fn test_analyse_surfaces_short_history() {
    let dir = TempDir::new().unwrap();
    let prices = write_prices(dir.path(), 50);
    let err = analyse(&AppConfig::default(), &prices).unwrap_err();
    assert!(err.to_string().contains("need 1512"), "{}", err);
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn test_binary_writes_json_report() {
    let dir = TempDir::new().unwrap();
    let prices = write_prices(dir.path(), 260);
    let config = write_config(dir.path());
    let output = dir.path().join("out").join("report.json");

    let status = tailrisk()
        .arg("analyse")
        .arg("--config")
        .arg(&config)
        .arg("--prices")
        .arg(&prices)
        .args(["--target-price", "45", "--seed", "7", "--format", "json"])
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let json = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["config"]["symbol"], "CSVTEST");
    assert_eq!(value["config"]["seed"], 7);
    assert_eq!(value["config"]["target_price"], 45.0);
    assert_eq!(value["base_final_prices"].as_array().unwrap().len(), 400);
    assert_eq!(value["tail_shift"].as_array().unwrap().len(), 3);
}

#[test]
fn test_binary_table_report_on_stdout() {
    let dir = TempDir::new().unwrap();
    let prices = write_prices(dir.path(), 260);
    let config = write_config(dir.path());

    let output = tailrisk()
        .arg("analyse")
        .arg("-c")
        .arg(&config)
        .arg("-p")
        .arg(&prices)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Tail risk analysis: CSVTEST"));
    assert!(stdout.contains("Stress tail shift"));
}

#[test]
fn test_binary_env_override_and_check_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    let output = tailrisk()
        .env("TAILRISK_NUM_SIMULATIONS", "123")
        .arg("check-config")
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["num_simulations"], 123);
    assert_eq!(value["symbol"], "CSVTEST");
}

#[test]
fn test_binary_rejects_invalid_configuration() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[analysis]\newma_decay = 1.5\n").unwrap();

    let output = tailrisk()
        .arg("check-config")
        .arg("--config")
        .arg(&path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ewma_decay"));
}

//! CLI interface tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ONE_ROW: &str = "square_footage,bedrooms,price\n1500,3,420000\n";

/// The binary run inside `dir`, isolated from the caller's environment
fn house_price(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("house-price").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("HOUSE_PRICE_DATA")
        .env_remove("HOUSE_PRICE_MODEL")
        .env_remove("HOUSE_PRICE_LOG");
    cmd
}

#[test]
fn test_version_flag() {
    let temp_dir = TempDir::new().unwrap();
    house_price(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("house-price"));
}

#[test]
fn test_help_flag() {
    let temp_dir = TempDir::new().unwrap();
    house_price(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("predicting house prices"));
}

#[test]
fn test_fallback_formula_without_data() {
    let temp_dir = TempDir::new().unwrap();

    house_price(temp_dir.path())
        .args(["1000", "2"])
        .assert()
        .success()
        .stdout("300000\n")
        .stderr(predicate::str::contains("Error training model"));

    assert!(!temp_dir.path().join("model.bin").exists());
}

#[test]
fn test_predict_trains_on_demand() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("data.csv"), ONE_ROW).unwrap();

    house_price(temp_dir.path())
        .args(["1500", "3"])
        .assert()
        .success()
        .stdout("420000\n")
        .stderr(predicate::str::contains("Training model with 1 data points"));

    assert!(temp_dir.path().join("model.bin").exists());
}

#[test]
fn test_deleted_model_is_retrained() {
    let temp_dir = TempDir::new().unwrap();
    let model_path = temp_dir.path().join("model.bin");
    fs::write(temp_dir.path().join("data.csv"), ONE_ROW).unwrap();

    house_price(temp_dir.path()).args(["1500", "3"]).assert().success();
    assert!(model_path.exists());

    // With a saved model, no training happens.
    house_price(temp_dir.path())
        .args(["1500", "3"])
        .assert()
        .success()
        .stdout("420000\n")
        .stderr(predicate::str::contains("Training model").not());

    fs::remove_file(&model_path).unwrap();

    house_price(temp_dir.path())
        .args(["1500", "3"])
        .assert()
        .success()
        .stdout("420000\n")
        .stderr(predicate::str::contains("Training model with 1 data points"));
    assert!(model_path.exists());
}

#[test]
fn test_invalid_number_prints_zero() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("data.csv"), ONE_ROW).unwrap();

    house_price(temp_dir.path())
        .args(["abc", "3"])
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::contains("Inputs must be numbers"));

    assert!(!temp_dir.path().join("model.bin").exists());
}

#[test]
fn test_huge_price_prints_every_digit() {
    let temp_dir = TempDir::new().unwrap();

    let output = house_price(temp_dir.path())
        .args(["1e300", "1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let price = stdout.trim_end();
    assert!(price.len() > 300, "{price}");
    assert!(price.bytes().all(|b| b.is_ascii_digit()), "{price}");
}

#[test]
fn test_hyphenated_non_number_prints_zero() {
    let temp_dir = TempDir::new().unwrap();

    house_price(temp_dir.path())
        .args(["-abc", "3"])
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::contains("Inputs must be numbers"));
}

#[test]
fn test_wrong_argument_count() {
    let temp_dir = TempDir::new().unwrap();

    house_price(temp_dir.path())
        .arg("1000")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Usage"));

    house_price(temp_dir.path())
        .args(["1000", "2", "3"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_train_only() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("data.csv"), ONE_ROW).unwrap();

    house_price(temp_dir.path())
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Model trained successfully"));

    assert!(temp_dir.path().join("model.bin").exists());
}

#[test]
fn test_train_only_fails_without_data() {
    let temp_dir = TempDir::new().unwrap();

    house_price(temp_dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to train model"));

    assert!(!temp_dir.path().join("model.bin").exists());
}

#[test]
fn test_train_only_fails_on_empty_dataset() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("data.csv"), "square_footage,bedrooms,price\n").unwrap();

    house_price(temp_dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No valid data found"));
}

#[test]
fn test_corrupt_model_uses_fallback() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("data.csv"), ONE_ROW).unwrap();
    fs::write(temp_dir.path().join("model.bin"), "garbage").unwrap();

    house_price(temp_dir.path())
        .args(["1000", "2"])
        .assert()
        .success()
        .stdout("300000\n")
        .stderr(predicate::str::contains("Error loading model"));
}

#[test]
fn test_custom_paths_and_negative_values() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("input").join("homes.csv");
    let model_path = temp_dir.path().join("out").join("homes.bin");
    fs::create_dir_all(data_path.parent().unwrap()).unwrap();
    fs::write(&data_path, ONE_ROW).unwrap();

    house_price(temp_dir.path())
        .arg("--data")
        .arg(&data_path)
        .arg("--model")
        .arg(&model_path)
        .assert()
        .success();
    assert!(model_path.exists());

    // A one-row model predicts the row's price everywhere.
    house_price(temp_dir.path())
        .arg("--model")
        .arg(&model_path)
        .args(["-5", "2"])
        .assert()
        .success()
        .stdout("420000\n");
}

#[test]
fn test_config_file_and_prediction_log() {
    let temp_dir = TempDir::new().unwrap();
    let config = "model: ./state/model.bin\n\
                  prediction_log: ./state/predictions.json\n\
                  fallback:\n  base_price: 0\n";
    fs::write(temp_dir.path().join("house-price.yaml"), config).unwrap();

    // No dataset: the configured fallback formula answers.
    for _ in 0..2 {
        house_price(temp_dir.path())
            .args(["1000", "2"])
            .assert()
            .success()
            .stdout("200000\n");
    }

    let log = fs::read_to_string(temp_dir.path().join("state").join("predictions.json")).unwrap();
    let records: serde_json::Value = serde_json::from_str(&log).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);
    assert_eq!(records[1]["predictedPrice"], 200_000);
}

#[test]
fn test_missing_explicit_config() {
    let temp_dir = TempDir::new().unwrap();

    house_price(temp_dir.path())
        .args(["--config", "nonexistent.yaml", "1000", "2"])
        .assert()
        .failure()
        .code(3)
        .stdout("")
        .stderr(predicate::str::contains("Configuration file not found"));
}

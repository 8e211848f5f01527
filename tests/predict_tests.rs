//! Prediction tests against the in-memory filesystem

use house_price::config::Settings;
use house_price::error::PredictError;
use house_price::model::{FallbackFormula, LinearModel, encode_model};
use house_price::operations::Predictor;
use house_price::system::{MockSystem, System as _};
use std::path::{Path, PathBuf};

const DATA: &str = "/work/data.csv";
const MODEL: &str = "/work/model.bin";
const ONE_ROW: &str = "square_footage,bedrooms,price\n1500,3,420000\n";

fn settings() -> Settings {
    Settings {
        data_path: PathBuf::from(DATA),
        model_path: PathBuf::from(MODEL),
        ..Settings::default()
    }
}

#[test]
fn test_fallback_without_data_or_model() {
    let system = MockSystem::new();
    let settings = settings();

    let price = Predictor::new(&system, &settings).predict(1000.0, 2.0);

    assert_eq!(price, 300_000.0);
    assert!(!system.exists(Path::new(MODEL)));
}

#[test]
fn test_trains_on_demand() {
    let system = MockSystem::new().with_file(DATA, ONE_ROW.as_bytes()).unwrap();
    let settings = settings();

    let price = Predictor::new(&system, &settings).predict(1500.0, 3.0);

    assert_eq!(price, 420_000.0);
    assert!(system.exists(Path::new(MODEL)));
}

#[test]
fn test_uses_saved_model_without_retraining() {
    let saved = LinearModel::new([100.0, 10_000.0], 50_000.0);
    let system = MockSystem::new()
        .with_file(DATA, ONE_ROW.as_bytes())
        .unwrap()
        .with_file(MODEL, &encode_model(&saved).unwrap())
        .unwrap();
    let settings = settings();

    let price = Predictor::new(&system, &settings).predict(1800.0, 2.0);

    assert_eq!(price, 250_000.0);
    assert_eq!(
        system.file_contents(MODEL).unwrap(),
        encode_model(&saved).unwrap()
    );
}

#[test]
fn test_deleted_model_is_retrained() {
    let system = MockSystem::new().with_file(DATA, ONE_ROW.as_bytes()).unwrap();
    let settings = settings();
    let predictor = Predictor::new(&system, &settings);

    assert_eq!(predictor.predict(1500.0, 3.0), 420_000.0);
    system.remove_file(Path::new(MODEL)).unwrap();
    assert!(!system.exists(Path::new(MODEL)));

    assert_eq!(predictor.predict(1500.0, 3.0), 420_000.0);
    assert!(system.exists(Path::new(MODEL)));
}

#[test]
fn test_corrupt_model_falls_back_without_retraining() {
    let system = MockSystem::new()
        .with_file(DATA, ONE_ROW.as_bytes())
        .unwrap()
        .with_file(MODEL, b"definitely not a model")
        .unwrap();
    let settings = settings();

    let price = Predictor::new(&system, &settings).predict(1000.0, 2.0);

    assert_eq!(price, 300_000.0);
    assert_eq!(
        system.file_contents(MODEL).unwrap(),
        b"definitely not a model"
    );
}

#[test]
fn test_configured_fallback_formula() {
    let system = MockSystem::new();
    let settings = Settings {
        fallback: FallbackFormula {
            base_price: 50_000.0,
            price_per_sqft: 200.0,
            value_per_bedroom: 10_000.0,
        },
        ..settings()
    };

    let price = Predictor::new(&system, &settings).predict(1000.0, 2.0);

    assert_eq!(price, 270_000.0);
}

#[test]
fn test_non_finite_model_output_falls_back() {
    let saved = LinearModel::new([f64::MAX, 0.0], 0.0);
    let system = MockSystem::new()
        .with_file(MODEL, &encode_model(&saved).unwrap())
        .unwrap();
    let settings = settings();

    // f64::MAX * 1000 overflows to infinity
    let price = Predictor::new(&system, &settings).predict(1000.0, 2.0);

    assert_eq!(price, 300_000.0);
}

#[test]
fn test_invalid_input_skips_model() {
    let system = MockSystem::new().with_file(DATA, ONE_ROW.as_bytes()).unwrap();
    let settings = settings();

    let err = Predictor::new(&system, &settings)
        .predict_input("lots", "3")
        .unwrap_err();

    assert!(matches!(err, PredictError::Input { .. }));
    assert!(!system.exists(Path::new(MODEL)));
}

#[test]
fn test_predict_input_parses_strings() {
    let system = MockSystem::new();
    let settings = settings();

    let estimate = Predictor::new(&system, &settings)
        .predict_input("1000", " 2 ")
        .unwrap();

    assert_eq!(estimate.square_footage, 1000.0);
    assert_eq!(estimate.bedrooms, 2.0);
    assert_eq!(estimate.whole_price(), 300_000.0);
}

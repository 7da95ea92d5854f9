//! Tests for configuration models

use super::*;
use crate::error::WaveformError;

#[test]
fn test_defaults() {
    let config = ExtractionConfig::default();
    assert_eq!(config.classifier.hue_band, HueBand { lower: 50.0, upper: 70.0 });
    assert_eq!(config.smoothing.window, 13);
    assert_eq!(config.smoothing.sharpness, 10.0);
    assert_eq!(config.smoothing.resample_step, 0.01);
    assert_eq!(config.segmenter.selection, CrossingSelection::All);
    assert!(config.segmenter.force_zero_endpoints);
    assert!(config.validate().is_ok());
}

#[test]
fn test_hue_band_is_exclusive() {
    let band = HueBand::default();
    assert!(band.contains(60.0));
    assert!(!band.contains(50.0));
    assert!(!band.contains(70.0));
    assert!(!band.contains(80.0));
}

#[test]
fn test_fraction_band_resolution() {
    let band = RowBand::Fraction { start: 0.0, end: 0.1 };
    assert_eq!(band.resolve(200).unwrap(), RowRange { start: 0, end: 20 });

    let band = RowBand::Fraction { start: 0.495, end: 0.505 };
    let range = band.resolve(200).unwrap();
    assert_eq!(range, RowRange { start: 99, end: 101 });
    assert!(range.contains(100));
    assert!(!range.contains(101));
}

#[test]
fn test_row_band_beyond_height_fails_fast() {
    let band = RowBand::Rows { start: 500, end: 640 };
    assert!(band.resolve(640).is_ok());
    assert!(matches!(
        band.resolve(600),
        Err(WaveformError::DimensionMismatch(_))
    ));
}

#[test]
fn test_inverted_or_out_of_unit_bands_rejected() {
    assert!(RowBand::Rows { start: 10, end: 5 }.resolve(100).is_err());
    assert!(RowBand::Fraction { start: 0.6, end: 0.4 }.resolve(100).is_err());
    assert!(RowBand::Fraction { start: -0.1, end: 0.4 }.resolve(100).is_err());
    assert!(RowBand::Fraction { start: 0.1, end: f32::NAN }.resolve(100).is_err());
}

#[test]
fn test_calibration_mapping() {
    let calibration = Calibration {
        zero_row: 100.0,
        reference_row: 150.0,
        reference_value: 50.0,
    };
    assert_eq!(calibration.value_at(100), 0.0);
    assert_eq!(calibration.value_at(150), 50.0);
    assert_eq!(calibration.value_at(80), -20.0);
    assert!(calibration.validate(200).is_ok());
    assert!(matches!(
        calibration.validate(120),
        Err(WaveformError::DimensionMismatch(_))
    ));
}

#[test]
fn test_degenerate_calibration_rejected() {
    let calibration = Calibration {
        zero_row: 10.0,
        reference_row: 10.0,
        reference_value: 1.0,
    };
    assert!(calibration.validate(100).is_err());
}

#[test]
fn test_centered_calibration() {
    let calibration = Calibration::centered(200);
    assert_eq!(calibration.value_at(100), 0.0);
    assert_eq!(calibration.value_at(200), 1.0);
    assert_eq!(calibration.value_at(0), -1.0);
}

#[test]
fn test_heart_rate_bounds() {
    // 100 columns per second, 0.01 step -> 10_000 points per second
    let length = CycleLength::HeartRate {
        columns_per_second: 100.0,
        min_bpm: 40.0,
        max_bpm: 120.0,
    };
    assert_eq!(length.bounds(0.01).unwrap(), (5_000, 15_000));

    let bad = CycleLength::HeartRate {
        columns_per_second: 100.0,
        min_bpm: 120.0,
        max_bpm: 40.0,
    };
    assert!(bad.bounds(0.01).is_err());
}

#[test]
fn test_sanitize_forces_odd_window() {
    let mut config = ExtractionConfig::default();
    config.smoothing.window = 12;
    config.smoothing.resample_step = -1.0;
    config.segmenter.selection = CrossingSelection::Automatic {
        window: 30.0,
        ratio: 3.0,
    };
    let config = config.sanitize();
    assert_eq!(config.smoothing.window, 13);
    assert_eq!(config.smoothing.resample_step, 0.01);
    assert_eq!(
        config.segmenter.selection,
        CrossingSelection::Automatic {
            window: 30.0,
            ratio: 1.0
        }
    );
}

#[test]
fn test_tiny_resample_step() {
    let mut config = ExtractionConfig::default();
    config.smoothing.resample_step = 1e-9;
    assert!(matches!(
        config.validate(),
        Err(WaveformError::InvalidConfig(_))
    ));
    assert!(config.resolve(640, 480).is_err());

    let config = config.sanitize();
    assert_eq!(config.smoothing.resample_step, MIN_RESAMPLE_STEP);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_even_window() {
    let mut config = ExtractionConfig::default();
    config.smoothing.window = 4;
    assert!(matches!(
        config.validate(),
        Err(WaveformError::InvalidConfig(_))
    ));
}

#[test]
fn test_resolve_checks_expected_dimensions() {
    let config = ExtractionConfig {
        expected_dimensions: Some([800, 600]),
        ..Default::default()
    };
    assert!(config.resolve(800, 600).is_ok());
    assert!(matches!(
        config.resolve(1024, 768),
        Err(WaveformError::DimensionMismatch(_))
    ));
}

#[test]
fn test_resolve_defaults_to_centered_calibration() {
    let geometry = ExtractionConfig::default().resolve(10, 40).unwrap();
    assert_eq!(geometry.calibration, Calibration::centered(40));
    assert_eq!(geometry.cycle_bounds, (15_000, 30_000));
    assert!(geometry.exclusions.is_empty());
}

#[test]
fn test_yaml_partial_config() {
    let yaml = r#"
classifier:
  hue_band:
    lower: 40
  exclusions:
    - unit: fraction
      start: 0.0
      end: 0.05
    - unit: rows
      start: 300
      end: 304
  denoise:
    radius: 3
    border: clip
calibration:
  zero_row: 302
  reference_row: 402
  reference_value: -100
segmenter:
  selection:
    mode: manual
    indices: [0, 1, 2]
"#;
    let config: ExtractionConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.classifier.hue_band.lower, 40.0);
    assert_eq!(config.classifier.hue_band.upper, 70.0);
    assert_eq!(config.classifier.exclusions.len(), 2);
    assert_eq!(
        config.classifier.exclusions[1],
        RowBand::Rows { start: 300, end: 304 }
    );
    assert_eq!(config.classifier.denoise.radius, 3);
    assert_eq!(config.classifier.denoise.border, BorderPolicy::Clip);
    assert_eq!(config.classifier.denoise.dark_value, 0.35);
    assert_eq!(config.calibration.unwrap().reference_value, -100.0);
    assert_eq!(
        config.segmenter.selection,
        CrossingSelection::Manual {
            indices: vec![0, 1, 2]
        }
    );
    assert_eq!(config.smoothing.window, 13);
}

#[test]
fn test_yaml_automatic_selection_defaults() {
    let yaml = "segmenter:\n  selection:\n    mode: automatic\n";
    let config: ExtractionConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.segmenter.selection, CrossingSelection::automatic());
}

#[test]
fn test_yaml_roundtrip_of_defaults() {
    let yaml = serde_yaml::to_string(&ExtractionConfig::default()).unwrap();
    let back: ExtractionConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, ExtractionConfig::default());
}

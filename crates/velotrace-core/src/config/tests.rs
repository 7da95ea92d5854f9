use super::*;
use crate::models::{Calibration, CrossingSelection};

#[test]
fn test_explicit_path_is_first_candidate() {
    let path = Path::new("/tmp/custom.yml");
    let candidates = config_candidates(Some(path));
    assert_eq!(candidates[0], path);
    assert!(candidates
        .iter()
        .any(|c| c.ends_with("config/velotrace.yml")));
}

#[test]
fn test_load_explicit_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.yml");
    fs::write(
        &path,
        "calibration:\n  zero_row: 120\n  reference_row: 20\n  reference_value: 80\n\
         smoothing:\n  window: 8\n",
    )
    .unwrap();

    let handle = load_config(Some(&path));
    assert!(handle.source.is_some());
    assert!(handle.warnings.is_empty());
    assert_eq!(
        handle.config.calibration,
        Some(Calibration {
            zero_row: 120.0,
            reference_row: 20.0,
            reference_value: 80.0,
        })
    );
    // Even windows are bumped to the next odd width
    assert_eq!(handle.config.smoothing.window, 9);
}

#[test]
fn test_unparsable_config_is_skipped_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yml");
    fs::write(&path, "smoothing: [this is not a map").unwrap();

    let handle = load_config(Some(&path));
    assert!(handle
        .warnings
        .iter()
        .any(|w| w.contains("broken.yml")));
}

#[test]
fn test_load_config_file_reports_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.yml");
    assert!(matches!(
        load_config_file(&missing),
        Err(WaveformError::Io { .. })
    ));

    let broken = dir.path().join("broken.yml");
    fs::write(&broken, "segmenter:\n  selection:\n    mode: sideways\n").unwrap();
    assert!(matches!(
        load_config_file(&broken),
        Err(WaveformError::Config(_))
    ));
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("velotrace.yml");

    let mut config = ExtractionConfig::default();
    config.segmenter.selection = CrossingSelection::Manual {
        indices: vec![0, 2],
    };
    config.expected_dimensions = Some([1024, 768]);
    save_config(&config, &path).unwrap();

    assert_eq!(load_config_file(&path).unwrap(), config);
}

#[test]
fn test_default_yaml_is_loadable() {
    let yaml = to_yaml(&ExtractionConfig::default()).unwrap();
    assert!(yaml.contains("hue_band"));
    let parsed: ExtractionConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, ExtractionConfig::default());
}

use std::path::PathBuf;

use velotrace_core::config::{to_yaml, user_config_path};
use velotrace_core::models::ExtractionConfig;

const HEADER: &str = "\
# velotrace extraction configuration
#
# Row geometry (exclusions, calibration) depends on the export resolution
# of your ultrasound system. Set expected_dimensions to reject images of
# any other size.
";

/// Write the default extraction config.
///
/// Without `output` the file goes to `~/velotrace/velotrace.yml`, one of the
/// locations config discovery searches. Existing files are kept unless
/// `force` is true.
pub fn cmd_init(output: Option<PathBuf>, force: bool) -> Result<(), String> {
    let path = match output {
        Some(path) => path,
        None => user_config_path().ok_or("Could not determine home directory")?,
    };

    if path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }

    let yaml = to_yaml(&ExtractionConfig::default()).map_err(|e| e.to_string())?;
    std::fs::write(&path, format!("{}{}", HEADER, yaml))
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

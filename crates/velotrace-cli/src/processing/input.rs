//! Input file handling and path utilities.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use velotrace_core::decoders::SUPPORTED_EXTENSIONS;

/// Suffix appended to the input stem for cycle outputs
const CYCLE_SUFFIX: &str = "_cycle";

fn cycle_file_name(input: &Path, extension: &str) -> Result<String, String> {
    let stem = input
        .file_stem()
        .ok_or_else(|| format!("Invalid input filename: {}", input.display()))?
        .to_string_lossy();
    Ok(format!("{}{}.{}", stem, CYCLE_SUFFIX, extension))
}

/// Determine the cycle output path for `input`.
///
/// An existing directory for `out` receives `<stem>_cycle.<extension>`; any
/// other `out` is used as-is. Without `out` the file lands next to the input.
pub fn determine_output_path(
    input: &Path,
    out: Option<&Path>,
    extension: &str,
) -> Result<PathBuf, String> {
    match out {
        Some(out_path) if out_path.is_dir() => {
            Ok(out_path.join(cycle_file_name(input, extension)?))
        }
        Some(out_path) => Ok(out_path.to_path_buf()),
        None => {
            let parent = input.parent().unwrap_or(Path::new("."));
            Ok(parent.join(cycle_file_name(input, extension)?))
        }
    }
}

/// `<output_dir>/<stem>_cycle.json` for batch runs
pub fn batch_output_path(input: &Path, output_dir: &Path) -> Result<PathBuf, String> {
    Ok(output_dir.join(cycle_file_name(input, "json")?))
}

/// Batch output path for every input, in input order.
///
/// Inputs that share a stem (`a.png` and `a.tif`, or `x/a.png` and
/// `y/a.png` under a recursive scan) would write the same file, so they are
/// rejected before anything runs.
pub fn batch_output_paths(inputs: &[PathBuf], output_dir: &Path) -> Result<Vec<PathBuf>, String> {
    let mut owners: HashMap<PathBuf, &PathBuf> = HashMap::new();
    let mut outputs = Vec::with_capacity(inputs.len());

    for input in inputs {
        let output = batch_output_path(input, output_dir)?;
        if let Some(first) = owners.insert(output.clone(), input) {
            return Err(format!(
                "{} and {} would both write {}",
                first.display(),
                input.display(),
                output.display()
            ));
        }
        outputs.push(output);
    }
    Ok(outputs)
}

/// Expand a list of inputs (files and directories) into a list of image files.
///
/// Directories are scanned for supported image files (.png, .tif, .tiff,
/// .jpg, .jpeg, .bmp). If `recursive` is true, subdirectories are also scanned.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_images_from_dir(input, recursive, &mut files)?;
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(format!("Path not found: {}", input.display()));
        }
    }

    // Sort for consistent ordering
    files.sort();
    files.dedup();
    Ok(files)
}

fn collect_images_from_dir(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();

        if path.is_dir() && recursive {
            collect_images_from_dir(&path, recursive, files)?;
        } else if path.is_file() {
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                if SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
                    files.push(path);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_expand_inputs_filters_and_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        for name in ["a.png", "b.TIF", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::write(nested.join("c.jpg"), b"").unwrap();

        let flat = expand_inputs(&[dir.path().to_path_buf()], false).unwrap();
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(|p| p.parent() == Some(dir.path())));

        let deep = expand_inputs(&[dir.path().to_path_buf()], true).unwrap();
        assert_eq!(deep.len(), 3);
        assert!(deep.contains(&nested.join("c.jpg")));
    }

    #[test]
    fn test_expand_inputs_missing_path() {
        let err = expand_inputs(&[PathBuf::from("/nonexistent/scan.png")], false).unwrap_err();
        assert!(err.contains("Path not found"));
    }

    #[test]
    fn test_output_paths() {
        let dir = tempfile::tempdir().unwrap();
        let input = Path::new("/data/scans/patient_07.png");

        assert_eq!(
            determine_output_path(input, None, "json").unwrap(),
            PathBuf::from("/data/scans/patient_07_cycle.json")
        );
        assert_eq!(
            determine_output_path(input, Some(dir.path()), "txt").unwrap(),
            dir.path().join("patient_07_cycle.txt")
        );
        assert_eq!(
            determine_output_path(input, Some(Path::new("/tmp/out.json")), "json").unwrap(),
            PathBuf::from("/tmp/out.json")
        );
        assert_eq!(
            batch_output_path(input, Path::new("results")).unwrap(),
            PathBuf::from("results/patient_07_cycle.json")
        );
    }

    #[test]
    fn test_batch_outputs_reject_shared_stems() {
        let out = Path::new("results");
        let distinct = [PathBuf::from("x/a.png"), PathBuf::from("x/b.png")];
        assert_eq!(
            batch_output_paths(&distinct, out).unwrap(),
            vec![out.join("a_cycle.json"), out.join("b_cycle.json")]
        );

        let same_stem = [PathBuf::from("x/a.png"), PathBuf::from("x/a.tif")];
        let err = batch_output_paths(&same_stem, out).unwrap_err();
        assert!(err.contains("x/a.png") && err.contains("x/a.tif"), "{}", err);

        let nested = [PathBuf::from("x/a.png"), PathBuf::from("y/a.png")];
        assert!(batch_output_paths(&nested, out).is_err());
    }
}

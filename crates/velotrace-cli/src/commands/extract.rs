use std::path::PathBuf;

use velotrace_cli::{
    apply_overrides, determine_output_path, resolve_extraction_config, ExtractionOverrides,
    OutputFormat,
};
use velotrace_core::exporters::{
    write_cycle_json, write_cycle_text, write_mask_png, write_trace_json,
};
use velotrace_core::pipeline::{process_file, CycleOutcome};

/// Extract the representative cycle from one image.
///
/// A degenerate image still writes the sentinel array and succeeds.
pub fn cmd_extract(
    input: PathBuf,
    config_path: Option<PathBuf>,
    out: Option<PathBuf>,
    format: OutputFormat,
    trace: Option<PathBuf>,
    mask: Option<PathBuf>,
    overrides: ExtractionOverrides,
) -> Result<(), String> {
    let mut config = resolve_extraction_config(config_path.as_deref())?;
    apply_overrides(&mut config, &overrides)?;

    let result = process_file(&input, &config).map_err(|e| e.to_string())?;
    let outcome = result.outcome();

    let output_path = determine_output_path(&input, out.as_deref(), format.extension())?;
    let source = input.display().to_string();
    let written = match format {
        OutputFormat::Json => write_cycle_json(outcome, &source, &output_path),
        OutputFormat::Text => write_cycle_text(outcome, &output_path),
    };
    written.map_err(|e| e.to_string())?;

    if let Some(trace_path) = &trace {
        write_trace_json(&result.raw_trace, &result.trace, trace_path).map_err(|e| e.to_string())?;
        println!("Trace written to {}", trace_path.display());
    }
    if let Some(mask_path) = &mask {
        write_mask_png(&result.mask, mask_path).map_err(|e| e.to_string())?;
        println!("Mask written to {}", mask_path.display());
    }

    match outcome {
        CycleOutcome::Selected(cycle) => println!(
            "{} -> {} (cycle {} of {}, distance to mean {:.3})",
            input.display(),
            output_path.display(),
            cycle.candidate + 1,
            result.segmentation.cycles.len(),
            cycle.distance
        ),
        CycleOutcome::Degenerate(reason) => {
            eprintln!(
                "Warning: no cycle detected in {} ({}); wrote invalid-cycle marker to {}",
                input.display(),
                reason,
                output_path.display()
            );
        }
    }

    Ok(())
}

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use velotrace_cli::{batch_output_paths, expand_inputs, resolve_extraction_config};
use velotrace_core::exporters::write_cycle_json;
use velotrace_core::models::ExtractionConfig;
use velotrace_core::pipeline::process_file;

/// Result of one batch item that did not error
struct BatchItem {
    output: PathBuf,
    valid: bool,
}

fn process_one(input: &Path, config: &ExtractionConfig, output: &Path) -> Result<BatchItem, String> {
    let result = process_file(input, config).map_err(|e| e.to_string())?;
    write_cycle_json(result.outcome(), &input.display().to_string(), output)
        .map_err(|e| e.to_string())?;
    Ok(BatchItem {
        output: output.to_path_buf(),
        valid: result.outcome().is_valid(),
    })
}

/// Extract cycles from many images in parallel, one JSON file each.
pub fn cmd_batch(
    inputs: Vec<PathBuf>,
    recursive: bool,
    config_path: Option<PathBuf>,
    out: Option<PathBuf>,
    threads: Option<usize>,
) -> Result<(), String> {
    let batch_start = Instant::now();

    if inputs.is_empty() {
        return Err("No input files or directories specified".to_string());
    }

    // Expand directories to file lists
    let inputs = expand_inputs(&inputs, recursive)?;
    if inputs.is_empty() {
        return Err(
            "No supported image files found (supported: .png, .tif, .tiff, .jpg, .jpeg, .bmp)"
                .to_string(),
        );
    }
    println!("Found {} image files to process", inputs.len());

    let config = resolve_extraction_config(config_path.as_deref())?;

    let output_dir = out.unwrap_or_else(|| PathBuf::from("."));
    let outputs = batch_output_paths(&inputs, &output_dir)?;
    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create output directory: {}", e))?;
    }

    let mut pool_builder = rayon::ThreadPoolBuilder::new();
    if let Some(num_threads) = threads {
        pool_builder = pool_builder.num_threads(num_threads);
        println!("Using {} threads for parallel processing", num_threads);
    }
    let pool = pool_builder
        .build()
        .map_err(|e| format!("Failed to configure thread pool: {}", e))?;

    // Progress tracking
    let processed_count = AtomicUsize::new(0);
    let total_files = inputs.len();

    let results: Vec<Result<BatchItem, String>> = pool.install(|| {
        inputs
            .par_iter()
            .zip(outputs.par_iter())
            .map(|(input, output)| {
                let file_start = Instant::now();
                let item = process_one(input, &config, output);

                let count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
                let status = match &item {
                    Ok(item) if item.valid => format!("-> {}", item.output.display()),
                    Ok(item) => format!("-> {} (no cycle)", item.output.display()),
                    Err(_) => "failed".to_string(),
                };
                println!(
                    "[{}/{}] {} {} ({:.2}s)",
                    count,
                    total_files,
                    input.display(),
                    status,
                    file_start.elapsed().as_secs_f64()
                );
                item
            })
            .collect()
    });

    // Summarize results
    let mut selected_count = 0;
    let mut degenerate_count = 0;
    let mut errors: Vec<(&PathBuf, &String)> = Vec::new();

    for (input, result) in inputs.iter().zip(results.iter()) {
        match result {
            Ok(item) if item.valid => selected_count += 1,
            Ok(_) => degenerate_count += 1,
            Err(e) => errors.push((input, e)),
        }
    }

    println!("\n========================================");
    println!("BATCH EXTRACTION COMPLETE");
    println!("========================================");
    println!("  Cycle selected: {}", selected_count);
    println!("  No cycle:       {}", degenerate_count);
    println!("  Failed:         {}", errors.len());
    println!("  Output dir:     {}", output_dir.display());
    println!(
        "  Total time:     {:.2}s",
        batch_start.elapsed().as_secs_f64()
    );

    if !errors.is_empty() {
        println!("\nErrors:");
        for (path, error) in &errors {
            println!("  {}: {}", path.display(), error);
        }
        return Err(format!("{} files failed to process", errors.len()));
    }

    Ok(())
}

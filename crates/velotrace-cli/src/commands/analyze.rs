use serde::Serialize;
use std::path::PathBuf;

use velotrace_cli::resolve_extraction_config;
use velotrace_core::pipeline::{process_file, CycleOutcome, ExtractionResult};

/// Analysis result structure for JSON output.
#[derive(Serialize)]
pub struct AnalysisResult {
    pub file: String,
    pub dimensions: [u32; 2],
    pub mask_pixels: usize,
    pub mask_coverage: f64,
    pub data_columns: usize,
    pub signal_points: usize,
    pub crossings: Vec<usize>,
    /// Image column of each crossing
    pub crossing_columns: Vec<f64>,
    pub selected_crossings: Vec<usize>,
    pub candidate_cycles: usize,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<SelectionSummary>,
}

/// Where the representative cycle came from.
#[derive(Serialize)]
pub struct SelectionSummary {
    pub candidate: usize,
    pub distance: f64,
    pub start: usize,
    pub end: usize,
}

impl AnalysisResult {
    fn new(file: String, result: &ExtractionResult) -> Self {
        let total = result.width as usize * result.height as usize;
        let mask_pixels = result.mask.count();
        let segmentation = &result.segmentation;
        let (reason, selected) = match result.outcome() {
            CycleOutcome::Selected(cycle) => (
                None,
                Some(SelectionSummary {
                    candidate: cycle.candidate,
                    distance: cycle.distance,
                    start: cycle.start,
                    end: cycle.end,
                }),
            ),
            CycleOutcome::Degenerate(reason) => (Some(reason.to_string()), None),
        };

        Self {
            file,
            dimensions: [result.width, result.height],
            mask_pixels,
            mask_coverage: if total == 0 {
                0.0
            } else {
                mask_pixels as f64 / total as f64
            },
            data_columns: result.raw_trace.present_count(),
            signal_points: result.signal.len(),
            crossings: segmentation.crossings.clone(),
            crossing_columns: segmentation
                .crossings
                .iter()
                .map(|&i| result.signal.position(i))
                .collect(),
            selected_crossings: segmentation.selected_crossings.clone(),
            candidate_cycles: segmentation.cycles.len(),
            valid: result.outcome().is_valid(),
            reason,
            selected,
        }
    }
}

/// Run the pipeline on one image and report what it found without writing
/// any cycle files.
pub fn cmd_analyze(input: PathBuf, config_path: Option<PathBuf>, json: bool) -> Result<(), String> {
    let config = resolve_extraction_config(config_path.as_deref())?;
    let result = process_file(&input, &config).map_err(|e| e.to_string())?;
    let analysis = AnalysisResult::new(input.display().to_string(), &result);

    if json {
        let text = serde_json::to_string_pretty(&analysis)
            .map_err(|e| format!("Failed to serialize analysis: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    println!("File: {}", analysis.file);
    println!(
        "  Dimensions:     {}x{}",
        analysis.dimensions[0], analysis.dimensions[1]
    );
    println!(
        "  Trace pixels:   {} ({:.2}%)",
        analysis.mask_pixels,
        analysis.mask_coverage * 100.0
    );
    println!(
        "  Data columns:   {}/{}",
        analysis.data_columns, analysis.dimensions[0]
    );
    println!("  Signal points:  {}", analysis.signal_points);
    println!("  Crossings:      {:?}", analysis.crossings);
    if !analysis.crossing_columns.is_empty() {
        let columns: Vec<String> = analysis
            .crossing_columns
            .iter()
            .map(|c| format!("{:.2}", c))
            .collect();
        println!("  At columns:     [{}]", columns.join(", "));
    }
    if analysis.selected_crossings != analysis.crossings {
        println!("  Selected:       {:?}", analysis.selected_crossings);
    }
    println!("  Cycles:         {}", analysis.candidate_cycles);
    match (&analysis.selected, &analysis.reason) {
        (Some(sel), _) => println!(
            "  Outcome:        cycle {} (points {}..={}, distance to mean {:.3})",
            sel.candidate, sel.start, sel.end, sel.distance
        ),
        (None, Some(reason)) => println!("  Outcome:        no cycle ({})", reason),
        (None, None) => println!("  Outcome:        no cycle"),
    }

    Ok(())
}

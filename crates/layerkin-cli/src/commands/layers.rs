use crate::cli::LayersArgs;
use crate::config::{CliOverrides, FileConfig};
use crate::error::{CliError, Result};
use crate::progress::CliProgressHandler;
use layerkin::core::io::{com::ComFile, layer_files};
use layerkin::engine::config::AnalysisConfig;
use layerkin::engine::progress::{Progress, ProgressReporter};
use layerkin::workflows;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub fn run(args: LayersArgs) -> Result<()> {
    let overrides = CliOverrides {
        molecule_diameter: args.molecule_diameter,
        dec_origin_z: args.dec_origin_z,
        int_origin_z: args.int_origin_z,
        ..Default::default()
    };
    let config = FileConfig::load(args.config.as_deref())?.resolve(&overrides)?;

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    let total = args.inputs.len();
    reporter.report(Progress::BatchStart {
        total_files: total as u64,
    });

    // A file that fails validation aborts only its own analysis; the rest
    // of the batch still runs.
    let mut failed = 0;
    for input in &args.inputs {
        if let Err(e) = process_file(input, &config, &reporter) {
            error!("Skipping '{}': {}", input.display(), e);
            eprintln!("✗ {}: {}", input.display(), e);
            failed += 1;
        }
        reporter.report(Progress::BatchAdvance);
    }
    reporter.report(Progress::BatchFinish);

    if failed > 0 {
        return Err(CliError::Batch { failed, total });
    }
    Ok(())
}

fn process_file(
    input: &Path,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<()> {
    info!("Loading center-of-mass trajectory from {:?}.", input);
    let trajectory =
        ComFile::read_from_path(input).map_err(|e| CliError::file_parsing(input, e))?;
    info!(samples = trajectory.len(), "Trajectory loaded.");

    let assignments = workflows::layers::run(&trajectory, config, reporter)?;

    let out_dir = results_dir_for(input);
    std::fs::create_dir_all(&out_dir)?;

    layer_files::write_series(
        &out_dir.join("decLayer.dat"),
        "DecLayer",
        &assignments.dec_series,
    )?;
    layer_files::write_counts(
        &out_dir.join("decCount.dat"),
        "DecLayer",
        &assignments.dec_exposure,
    )?;
    layer_files::write_series(
        &out_dir.join("intLayer.dat"),
        "IntLayer",
        &assignments.int_series,
    )?;
    layer_files::write_counts(
        &out_dir.join("intCount.dat"),
        "IntLayer",
        &assignments.int_exposure,
    )?;

    println!(
        "✓ {} ({} samples) -> {}",
        input.display(),
        trajectory.len(),
        out_dir.display()
    );
    Ok(())
}

/// Result directory for one input: the part of the file name before the
/// first underscore plus `_results`, next to the input. `O_COM.out` maps to
/// `O_results`.
fn results_dir_for(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = match name.split_once('_') {
        Some((prefix, _)) if !prefix.is_empty() => prefix.to_string(),
        _ => Path::new(&name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "layerkin".to_string()),
    };

    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.join(format!("{stem}_results"))
        }
        _ => PathBuf::from(format!("{stem}_results")),
    }
}

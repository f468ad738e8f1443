use crate::cli::KineticsArgs;
use crate::config::{CliOverrides, FileConfig};
use crate::error::{CliError, Result};
use crate::progress::CliProgressHandler;
use layerkin::core::io::{layer_files, report};
use layerkin::core::models::layer::IntLayer;
use layerkin::engine::config::AnalysisConfig;
use layerkin::engine::progress::{Progress, ProgressReporter};
use layerkin::workflows;
use std::path::Path;
use tracing::{error, info, warn};

pub fn run(args: KineticsArgs) -> Result<()> {
    let overrides = CliOverrides {
        ignore_final_run: args.ignore_final_run,
        ..Default::default()
    };
    let config = FileConfig::load(args.config.as_deref())?.resolve(&overrides)?;

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    let total = args.results.len();
    reporter.report(Progress::BatchStart {
        total_files: total as u64,
    });

    let mut failed = 0;
    for dir in &args.results {
        if let Err(e) = process_dir(dir, &config, &reporter) {
            error!("Skipping '{}': {}", dir.display(), e);
            eprintln!("✗ {}: {}", dir.display(), e);
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

fn process_dir(dir: &Path, config: &AnalysisConfig, reporter: &ProgressReporter) -> Result<()> {
    if !dir.is_dir() {
        return Err(CliError::Argument(format!(
            "'{}' is not a directory",
            dir.display()
        )));
    }

    info!("Loading integer layer series from {:?}.", dir);
    let series = layer_files::read_int_series(&dir.join("intLayer.dat"))?;
    let exposure = layer_files::read_int_counts(&dir.join("intCount.dat"))?;

    if series.is_empty() {
        warn!("'{}' holds an empty layer series.", dir.display());
    }
    let layers: Vec<IntLayer> = series.iter().map(|&(_, layer)| layer).collect();

    let result = workflows::kinetics::run(&layers, &exposure, config, reporter)?;

    report::write_residence_separate(&dir.join("resTimeSepDist.csv"), &result.residence)?;
    report::write_residence_lumped(&dir.join("resTimeDist.csv"), &result.residence)?;
    report::write_hop_events(&dir.join("hopEventDict.csv"), &result.hops)?;
    report::write_rate_constants(&dir.join("rateConstDict.csv"), &result.rates)?;

    println!(
        "✓ {} ({} runs, {} layers) -> 4 report files",
        dir.display(),
        result.runs.len(),
        result.rates.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_inputs(dir: &Path) {
        std::fs::write(
            dir.join("intLayer.dat"),
            "# TimeStep\tIntLayer\n0\t1\n10\t1\n20\t2\n30\t2\n40\t2\n50\t1\n",
        )
        .unwrap();
        std::fs::write(dir.join("intCount.dat"), "# IntLayer\tCount\n1 3\n2 3\n").unwrap();
    }

    #[test]
    fn kinetics_writes_all_four_reports() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());

        let args = KineticsArgs {
            results: vec![dir.path().to_path_buf()],
            config: None,
            ignore_final_run: false,
        };
        run(args).unwrap();

        for name in [
            "resTimeSepDist.csv",
            "resTimeDist.csv",
            "hopEventDict.csv",
            "rateConstDict.csv",
        ] {
            assert!(dir.path().join(name).is_file(), "missing {name}");
        }

        let rates = std::fs::read_to_string(dir.path().join("rateConstDict.csv")).unwrap();
        let lines: Vec<&str> = rates.lines().collect();
        assert_eq!(lines[1], "1,B0F,0.00,B1R,66.67");
        assert_eq!(lines[2], "2,B1F,33.33,B2R,0.00");
    }

    #[test]
    fn missing_directory_counts_as_batch_failure() {
        let args = KineticsArgs {
            results: vec![PathBuf::from("/nonexistent/results")],
            config: None,
            ignore_final_run: false,
        };
        assert!(matches!(
            run(args),
            Err(CliError::Batch {
                failed: 1,
                total: 1
            })
        ));
    }
}

use std::collections::BTreeMap;

use tracing::{info, instrument};

use crate::core::models::layer::IntLayer;
use crate::core::models::run::Run;
use crate::core::models::tally::ExposureTally;
use crate::engine::aggregate::{self, HopTable, ResidenceTable};
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::rates::{self, RateConstants};
use crate::engine::{rle, transitions};

/// Everything pass 2 derives from one integer layer series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KineticsResult {
    pub runs: Vec<Run>,
    pub residence: ResidenceTable,
    pub hops: HopTable,
    pub rates: BTreeMap<IntLayer, RateConstants>,
}

/// Pass 2 of the pipeline: run-length encodes an integer layer series,
/// classifies the hops between runs, and derives residence-time tables and
/// per-layer rate constants normalized by the exposure tally.
#[instrument(skip_all, name = "kinetics_workflow")]
pub fn run(
    series: &[IntLayer],
    exposure: &ExposureTally<IntLayer>,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<KineticsResult, EngineError> {
    // === Phase 1: Run-length encoding ===
    reporter.report(Progress::PhaseStart {
        name: "Run-length encoding",
    });
    let runs = rle::encode(series);
    info!(samples = series.len(), runs = runs.len(), "Series encoded.");
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Hop classification and aggregation ===
    reporter.report(Progress::PhaseStart {
        name: "Hop classification",
    });
    let events = transitions::classify(&runs, config.final_run_policy);
    let aggregates = aggregate::aggregate(&events);
    info!(
        events = events.len(),
        layers = aggregates.residence.len(),
        "Hops classified."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Rate constants ===
    reporter.report(Progress::PhaseStart {
        name: "Rate constants",
    });
    let rates = rates::compute(&aggregates.hops, exposure, config);
    reporter.report(Progress::PhaseFinish);

    Ok(KineticsResult {
        runs,
        residence: aggregates.residence,
        hops: aggregates.hops,
        rates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate::HopCounts;

    fn test_config() -> AnalysisConfig {
        AnalysisConfig::builder()
            .origin_dec(5.958035)
            .origin_int(6.698035)
            .molecule_diameter(3.7)
            .dump_freq(10)
            .timestep_fs(1.0)
            .build()
            .unwrap()
    }

    fn series(values: &[i32]) -> (Vec<IntLayer>, ExposureTally<IntLayer>) {
        let layers: Vec<IntLayer> = values.iter().map(|&v| IntLayer(v)).collect();
        let mut exposure = ExposureTally::new();
        for &layer in &layers {
            exposure.record(layer);
        }
        (layers, exposure)
    }

    #[test]
    fn full_pass_over_reference_sequence() {
        let (layers, exposure) = series(&[1, 1, 2, 2, 2, 1]);
        let config = test_config();
        let result = run(&layers, &exposure, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.runs.len(), 3);
        assert_eq!(
            result.hops.get(IntLayer(1)),
            Some(HopCounts {
                forward: 0,
                reverse: 2
            })
        );
        assert_eq!(result.rates[&IntLayer(2)].forward, 33.33);
        assert_eq!(result.residence.get(IntLayer(1)).unwrap().lumped(), vec![2, 1]);
    }

    #[test]
    fn empty_series_yields_empty_result() {
        let (layers, exposure) = series(&[]);
        let result = run(&layers, &exposure, &test_config(), &ProgressReporter::new()).unwrap();
        assert!(result.runs.is_empty());
        assert!(result.residence.is_empty());
        assert!(result.rates.is_empty());
    }

    #[test]
    fn single_sample_series_records_one_forced_event() {
        let (layers, exposure) = series(&[4]);
        let result = run(&layers, &exposure, &test_config(), &ProgressReporter::new()).unwrap();
        assert_eq!(result.runs.len(), 1);
        assert_eq!(
            result.hops.get(IntLayer(4)),
            Some(HopCounts {
                forward: 0,
                reverse: 1
            })
        );
        assert_eq!(result.residence.get(IntLayer(4)).unwrap().reverse, vec![1]);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let (layers, exposure) = series(&[2, 3, 3, 1, 1, 2, 2]);
        let config = test_config();
        let first = run(&layers, &exposure, &config, &ProgressReporter::new()).unwrap();
        let second = run(&layers, &exposure, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(first, second);
    }
}

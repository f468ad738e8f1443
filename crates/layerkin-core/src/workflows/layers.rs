use tracing::{info, instrument};

use crate::core::models::trajectory::Trajectory;
use crate::engine::config::AnalysisConfig;
use crate::engine::discretize::{Discretizer, LayerAssignments};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};

/// Pass 1 of the pipeline: discretizes a center-of-mass trajectory into
/// decimal and integer layer series and accumulates the per-layer exposure
/// tallies that pass 2 uses for rate normalization.
#[instrument(skip_all, name = "layer_workflow")]
pub fn run(
    trajectory: &Trajectory,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<LayerAssignments, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Discretization",
    });
    info!(
        samples = trajectory.len(),
        origin_dec = config.origin_dec,
        origin_int = config.origin_int,
        "Assigning layer indices."
    );

    let assignments = Discretizer::new(config).assign(trajectory);

    info!(
        dec_layers = assignments.dec_exposure.len(),
        int_layers = assignments.int_exposure.len(),
        "Discretization complete."
    );
    reporter.report(Progress::PhaseFinish);

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::layer::IntLayer;
    use crate::core::models::trajectory::Sample;
    use nalgebra::Point3;

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

    #[test]
    fn workflow_produces_series_and_tallies() {
        let trajectory = Trajectory::from_samples(vec![
            Sample::new(0, Point3::new(0.0, 0.0, 6.0)),
            Sample::new(10, Point3::new(0.0, 0.0, 10.5)),
            Sample::new(20, Point3::new(0.0, 0.0, 6.1)),
        ])
        .unwrap();

        let assignments = run(&trajectory, &test_config(), &ProgressReporter::new()).unwrap();
        assert_eq!(assignments.int_series.len(), 3);
        assert_eq!(assignments.int_series[1].1, IntLayer(2));
        assert_eq!(assignments.int_exposure.total(), 3);
    }

    #[test]
    fn workflow_handles_empty_trajectory() {
        let assignments = run(
            &Trajectory::default(),
            &test_config(),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert!(assignments.dec_series.is_empty());
        assert!(assignments.int_exposure.is_empty());
    }
}

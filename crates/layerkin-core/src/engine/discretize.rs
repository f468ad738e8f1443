use super::config::AnalysisConfig;
use crate::core::models::layer::{DecLayer, IntLayer};
use crate::core::models::tally::ExposureTally;
use crate::core::models::trajectory::Trajectory;

/// Output of the batch discretization pass: both layer series in time order,
/// plus the per-layer sample tallies consumed by the rate normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerAssignments {
    pub dec_series: Vec<(u64, DecLayer)>,
    pub int_series: Vec<(u64, IntLayer)>,
    pub dec_exposure: ExposureTally<DecLayer>,
    pub int_exposure: ExposureTally<IntLayer>,
}

/// Maps z heights to discrete layer indices via ceiling-division binning.
///
/// Both mappings are pure functions of z under a fixed configuration; the
/// batch pass over a trajectory adds nothing but the occurrence tallies.
pub struct Discretizer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> Discretizer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Decimal-resolution layer for a z height: the number of tenth-diameter
    /// bands above the decimal origin, counted with a ceiling.
    pub fn dec_layer(&self, z: f64) -> DecLayer {
        let bands = ((z - self.config.origin_dec) / self.config.width_dec()).ceil();
        DecLayer(bands as i32)
    }

    /// Integer-resolution layer for a z height.
    ///
    /// A raw index of 0 folds into layer 1: the sub-layer between the decimal
    /// and integer origins belongs to the first full layer rather than to a
    /// separate "layer 0". The fold also absorbs the -0.0 ceiling artifact,
    /// which converts to 0.
    pub fn int_layer(&self, z: f64) -> IntLayer {
        let raw = ((z - self.config.origin_int) / self.config.width_int()).ceil() as i32;
        IntLayer(if raw == 0 { 1 } else { raw })
    }

    /// Assigns every sample of `trajectory` to its decimal and integer layer
    /// and tallies per-layer occupancy.
    pub fn assign(&self, trajectory: &Trajectory) -> LayerAssignments {
        let mut assignments = LayerAssignments {
            dec_series: Vec::with_capacity(trajectory.len()),
            int_series: Vec::with_capacity(trajectory.len()),
            ..Default::default()
        };

        for sample in trajectory.iter() {
            let dec = self.dec_layer(sample.z());
            let int = self.int_layer(sample.z());

            assignments.dec_series.push((sample.timestep, dec));
            assignments.int_series.push((sample.timestep, int));
            assignments.dec_exposure.record(dec);
            assignments.int_exposure.record(int);
        }

        assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn trajectory_from_z(zs: &[f64]) -> Trajectory {
        let samples = zs
            .iter()
            .enumerate()
            .map(|(i, &z)| Sample::new(i as u64 * 10, Point3::new(0.0, 0.0, z)))
            .collect();
        Trajectory::from_samples(samples).unwrap()
    }

    #[test]
    fn dec_layer_follows_ceiling_binning() {
        let config = test_config();
        let discretizer = Discretizer::new(&config);

        // Hand-computed against origin 5.958035 and width 0.37.
        assert_eq!(discretizer.dec_layer(5.958), DecLayer(0));
        assert_eq!(discretizer.dec_layer(6.0), DecLayer(1));
        assert_eq!(discretizer.dec_layer(6.4), DecLayer(2));
        assert_eq!(discretizer.dec_layer(6.0).to_string(), "0.1");
    }

    #[test]
    fn dec_layer_scenario_rises_then_falls() {
        let config = test_config();
        let discretizer = Discretizer::new(&config);
        let layers: Vec<String> = [5.958, 6.0, 6.4, 6.0]
            .iter()
            .map(|&z| discretizer.dec_layer(z).to_string())
            .collect();
        assert_eq!(layers, vec!["0.0", "0.1", "0.2", "0.1"]);
    }

    #[test]
    fn int_layer_zero_folds_into_layer_one() {
        let config = test_config();
        let discretizer = Discretizer::new(&config);

        // Exactly at the integer origin the ceiling is 0 (or -0.0); both
        // must fold into layer 1.
        assert_eq!(discretizer.int_layer(6.698035), IntLayer(1));
        assert_eq!(discretizer.int_layer(6.5), IntLayer(1));
        assert_eq!(discretizer.int_layer(6.698035 + 0.1), IntLayer(1));
        assert_eq!(discretizer.int_layer(6.698035 + 3.7), IntLayer(1));
        assert_eq!(discretizer.int_layer(6.698035 + 3.8), IntLayer(2));
    }

    #[test]
    fn int_layer_below_one_width_stays_negative() {
        let config = test_config();
        let discretizer = Discretizer::new(&config);
        // More than one full width below the integer origin is not folded.
        assert_eq!(discretizer.int_layer(6.698035 - 3.8), IntLayer(-1));
    }

    #[test]
    fn assign_builds_series_and_tallies() {
        let config = test_config();
        let trajectory = trajectory_from_z(&[6.0, 6.0, 10.5, 6.0]);
        let assignments = Discretizer::new(&config).assign(&trajectory);

        assert_eq!(assignments.int_series.len(), 4);
        assert_eq!(assignments.int_series[0], (0, IntLayer(1)));
        assert_eq!(assignments.int_series[2], (20, IntLayer(2)));
        assert_eq!(assignments.int_exposure.count(IntLayer(1)), 3);
        assert_eq!(assignments.int_exposure.count(IntLayer(2)), 1);
        assert_eq!(assignments.dec_exposure.total(), 4);
    }

    #[test]
    fn assign_on_empty_trajectory_is_empty() {
        let config = test_config();
        let assignments = Discretizer::new(&config).assign(&Trajectory::default());
        assert!(assignments.int_series.is_empty());
        assert!(assignments.int_exposure.is_empty());
    }

    #[test]
    fn assign_is_deterministic() {
        let config = test_config();
        let trajectory = trajectory_from_z(&[6.0, 7.2, 10.5, 6.0, 6.1]);
        let discretizer = Discretizer::new(&config);
        assert_eq!(
            discretizer.assign(&trajectory),
            discretizer.assign(&trajectory)
        );
    }
}

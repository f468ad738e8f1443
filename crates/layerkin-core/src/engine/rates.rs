use std::collections::BTreeMap;

use tracing::warn;

use super::aggregate::HopTable;
use super::config::AnalysisConfig;
use crate::core::models::layer::IntLayer;
use crate::core::models::tally::ExposureTally;

/// Apparent rate constants for leaving one layer, in 1/ps, rounded to two
/// decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateConstants {
    pub forward: f64,
    pub reverse: f64,
}

/// Computes per-layer hopping rate constants: hop count divided by the
/// layer's total exposure time.
///
/// Every layer of the exposure tally gets an entry, in ascending order. A
/// direction with no recorded hops contributes a rate of exactly 0.00. A
/// layer present in the tally but absent from the hop table means the series
/// and the tally do not describe the same trajectory; it is reported as a
/// coverage warning and written with zero rates rather than aborting.
pub fn compute(
    hops: &HopTable,
    exposure: &ExposureTally<IntLayer>,
    config: &AnalysisConfig,
) -> BTreeMap<IntLayer, RateConstants> {
    let mut rates = BTreeMap::new();

    for (layer, samples) in exposure.iter() {
        let counts = match hops.get(layer) {
            Some(counts) => counts,
            None => {
                warn!(
                    layer = %layer,
                    "layer has exposure but no hop events; incomplete coverage, writing zero rates"
                );
                rates.insert(layer, RateConstants::default());
                continue;
            }
        };

        let exposure_ps = samples as f64 * config.time_unit_ps();
        if exposure_ps <= 0.0 {
            warn!(layer = %layer, "layer has zero exposure time; writing zero rates");
            rates.insert(layer, RateConstants::default());
            continue;
        }

        rates.insert(
            layer,
            RateConstants {
                forward: round2(counts.forward as f64 / exposure_ps),
                reverse: round2(counts.reverse as f64 / exposure_ps),
            },
        );
    }

    rates
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

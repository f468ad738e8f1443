use super::config::FinalRunPolicy;
use crate::core::models::layer::{BinLabel, HopDirection, IntLayer};
use crate::core::models::run::Run;

/// A classified hop out of a run's layer, carrying the residence time the
/// molecule spent there before the hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopEvent {
    /// Layer the molecule occupied before the hop.
    pub source: IntLayer,
    pub direction: HopDirection,
    /// Length of the source run, in sample units.
    pub residence: u64,
    /// True for the assumed exit of the final run, which has no observed
    /// boundary.
    pub synthetic: bool,
}

impl HopEvent {
    /// Directional bin this event falls into; forward hops out of layer L
    /// bin as `B{L-1}F`, reverse hops as `B{L}R`.
    pub fn bin(&self) -> BinLabel {
        BinLabel::for_hop(self.source, self.direction)
    }
}

/// Classifies every run boundary as a forward or reverse hop.
///
/// A boundary is forward when the next run sits in a lower layer (toward the
/// surface), reverse otherwise; equal layers cannot occur between adjacent
/// runs. Under [`FinalRunPolicy::AssumeReverseExit`] the final run
/// contributes one synthetic reverse event, even for a single-run series.
pub fn classify(runs: &[Run], policy: FinalRunPolicy) -> Vec<HopEvent> {
    let mut events = Vec::with_capacity(runs.len());

    for pair in runs.windows(2) {
        let (run, next) = (pair[0], pair[1]);
        let direction = if run.layer > next.layer {
            HopDirection::Forward
        } else {
            HopDirection::Reverse
        };
        events.push(HopEvent {
            source: run.layer,
            direction,
            residence: run.length,
            synthetic: false,
        });
    }

    if policy == FinalRunPolicy::AssumeReverseExit {
        if let Some(last) = runs.last() {
            events.push(HopEvent {
                source: last.layer,
                direction: HopDirection::Reverse,
                residence: last.length,
                synthetic: true,
            });
        }
    }

    events
}

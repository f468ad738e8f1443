use std::collections::BTreeMap;

use super::transitions::HopEvent;
use crate::core::models::layer::{HopDirection, IntLayer};

/// Forward and reverse residence-time lists for one layer, in sample units
/// and event order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerResidence {
    pub forward: Vec<u64>,
    pub reverse: Vec<u64>,
}

impl LayerResidence {
    /// Lumped per-layer view: forward entries followed by reverse entries,
    /// preserving the order each list accumulated in.
    pub fn lumped(&self) -> Vec<u64> {
        self.forward
            .iter()
            .chain(self.reverse.iter())
            .copied()
            .collect()
    }
}

/// Per-layer residence-time distributions, keyed by source layer and
/// iterated in ascending layer order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidenceTable {
    layers: BTreeMap<IntLayer, LayerResidence>,
}

impl ResidenceTable {
    pub fn get(&self, layer: IntLayer) -> Option<&LayerResidence> {
        self.layers.get(&layer)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IntLayer, &LayerResidence)> {
        self.layers.iter().map(|(&layer, residence)| (layer, residence))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn record(&mut self, event: &HopEvent) {
        let entry = self.layers.entry(event.source).or_default();
        match event.direction {
            HopDirection::Forward => entry.forward.push(event.residence),
            HopDirection::Reverse => entry.reverse.push(event.residence),
        }
    }
}

/// Forward and reverse hop counts out of one layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HopCounts {
    pub forward: u64,
    pub reverse: u64,
}

/// Per-layer hop-event counts, keyed by source layer and iterated in
/// ascending layer order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HopTable {
    layers: BTreeMap<IntLayer, HopCounts>,
}

impl HopTable {
    pub fn get(&self, layer: IntLayer) -> Option<HopCounts> {
        self.layers.get(&layer).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IntLayer, HopCounts)> + '_ {
        self.layers.iter().map(|(&layer, &counts)| (layer, counts))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn record(&mut self, event: &HopEvent) {
        let entry = self.layers.entry(event.source).or_default();
        match event.direction {
            HopDirection::Forward => entry.forward += 1,
            HopDirection::Reverse => entry.reverse += 1,
        }
    }
}

/// Residence distributions and hop counts accumulated from one event stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub residence: ResidenceTable,
    pub hops: HopTable,
}

/// Folds a classified event stream into the residence and hop-event tables.
///
/// Per-layer records are created on first reference, so a layer seen only as
/// the final run still gets a well-formed entry.
pub fn aggregate(events: &[HopEvent]) -> Aggregates {
    let mut aggregates = Aggregates::default();
    for event in events {
        aggregates.residence.record(event);
        aggregates.hops.record(event);
    }
    aggregates
}

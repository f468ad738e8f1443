use std::collections::BTreeMap;

/// Per-layer sample census accumulated during discretization.
///
/// Counts how many samples fell into each layer; the total residence time a
/// layer accumulated over the whole trajectory, in sample units. Iteration is
/// always in ascending layer order, which fixes the output ordering of every
/// downstream table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposureTally<L: Ord> {
    counts: BTreeMap<L, u64>,
}

impl<L: Ord> Default for ExposureTally<L> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<L: Ord + Copy> ExposureTally<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one sample observed in `layer`.
    pub fn record(&mut self, layer: L) {
        *self.counts.entry(layer).or_insert(0) += 1;
    }

    /// Sets the count for `layer` outright; used when loading a tally back
    /// from a count file.
    pub fn insert(&mut self, layer: L, count: u64) {
        self.counts.insert(layer, count);
    }

    pub fn count(&self, layer: L) -> u64 {
        self.counts.get(&layer).copied().unwrap_or(0)
    }

    /// Ascending-layer iteration.
    pub fn iter(&self) -> impl Iterator<Item = (L, u64)> + '_ {
        self.counts.iter().map(|(&layer, &count)| (layer, count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of samples across all layers.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl<L: Ord + Copy> FromIterator<(L, u64)> for ExposureTally<L> {
    fn from_iter<T: IntoIterator<Item = (L, u64)>>(iter: T) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

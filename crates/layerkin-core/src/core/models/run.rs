use super::layer::IntLayer;

/// A maximal contiguous span of samples sharing one integer layer.
///
/// Runs partition a layer series exactly: their lengths sum to the series
/// length and adjacent runs always carry distinct layer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Layer occupied for the whole span.
    pub layer: IntLayer,
    /// Number of samples in the span.
    pub length: u64,
    /// Index of the first sample of the span within the series.
    pub start: usize,
}

impl Run {
    pub fn new(layer: IntLayer, length: u64, start: usize) -> Self {
        Self {
            layer,
            length,
            start,
        }
    }
}

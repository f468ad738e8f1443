use std::fmt;

/// Integer-resolution layer index, one molecule diameter per band.
///
/// Layer 1 is the band directly above the surface; the discretizer folds the
/// thin sub-layer below the integer origin into it, so an index of 0 never
/// appears in a discretized series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntLayer(pub i32);

impl fmt::Display for IntLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decimal-resolution layer index, one tenth of a molecule diameter per band.
///
/// Stored as an exact count of tenths so that ordering and equality are free
/// of float comparison; [`DecLayer::value`] and `Display` expose the
/// one-decimal-place form used in the output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecLayer(pub i32);

impl DecLayer {
    pub fn value(&self) -> f64 {
        f64::from(self.0) * 0.1
    }
}

impl fmt::Display for DecLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

/// Direction of a hop out of a layer, relative to the surface below layer 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HopDirection {
    /// Toward the surface: the next layer index is lower.
    Forward,
    /// Away from the surface: the next layer index is higher.
    Reverse,
}

/// Directional bin identifier for a hop, e.g. `B1F` or `B2R`.
///
/// A forward hop out of layer L crosses the boundary below it and is binned
/// as `B{L-1}F`; a reverse hop crosses the boundary above and is binned as
/// `B{L}R`. The same labels key both the residence-time and hop-event tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinLabel {
    pub boundary: i32,
    pub direction: HopDirection,
}

impl BinLabel {
    pub fn forward_from(source: IntLayer) -> Self {
        Self {
            boundary: source.0 - 1,
            direction: HopDirection::Forward,
        }
    }

    pub fn reverse_from(source: IntLayer) -> Self {
        Self {
            boundary: source.0,
            direction: HopDirection::Reverse,
        }
    }

    pub fn for_hop(source: IntLayer, direction: HopDirection) -> Self {
        match direction {
            HopDirection::Forward => Self::forward_from(source),
            HopDirection::Reverse => Self::reverse_from(source),
        }
    }
}

impl fmt::Display for BinLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.direction {
            HopDirection::Forward => 'F',
            HopDirection::Reverse => 'R',
        };
        write!(f, "B{}{}", self.boundary, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dec_layer_displays_one_decimal_place() {
        assert_eq!(DecLayer(2).to_string(), "0.2");
        assert_eq!(DecLayer(0).to_string(), "0.0");
        assert_eq!(DecLayer(-3).to_string(), "-0.3");
        assert_eq!(DecLayer(14).to_string(), "1.4");
    }

    #[test]
    fn dec_layer_orders_by_tenths() {
        assert!(DecLayer(-1) < DecLayer(0));
        assert!(DecLayer(9) < DecLayer(10));
    }

    #[test]
    fn bin_labels_follow_source_layer() {
        assert_eq!(BinLabel::forward_from(IntLayer(2)).to_string(), "B1F");
        assert_eq!(BinLabel::reverse_from(IntLayer(2)).to_string(), "B2R");
        assert_eq!(
            BinLabel::for_hop(IntLayer(1), HopDirection::Reverse).to_string(),
            "B1R"
        );
    }
}

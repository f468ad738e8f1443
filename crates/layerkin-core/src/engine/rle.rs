use crate::core::models::layer::IntLayer;
use crate::core::models::run::Run;

/// Run-length encodes an integer-layer series in one linear pass.
///
/// The output runs partition the input exactly: lengths sum to the input
/// length and adjacent runs carry distinct layers. An empty series encodes
/// to an empty run list.
pub fn encode(layers: &[IntLayer]) -> Vec<Run> {
    let Some((&first, rest)) = layers.split_first() else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut current = Run::new(first, 1, 0);

    for (offset, &layer) in rest.iter().enumerate() {
        if layer == current.layer {
            current.length += 1;
        } else {
            runs.push(current);
            current = Run::new(layer, 1, offset + 1);
        }
    }
    runs.push(current);

    runs
}

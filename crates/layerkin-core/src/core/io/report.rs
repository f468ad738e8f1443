use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::core::models::layer::{BinLabel, IntLayer};
use crate::engine::aggregate::{HopTable, ResidenceTable};
use crate::engine::rates::RateConstants;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

fn csv_err(path: &Path, source: csv::Error) -> ReportError {
    ReportError::Csv {
        path: path.to_string_lossy().to_string(),
        source,
    }
}

#[derive(Debug, Serialize)]
struct HopEventRow {
    layer: i32,
    forward_bin: String,
    forward_count: u64,
    reverse_bin: String,
    reverse_count: u64,
}

#[derive(Debug, Serialize)]
struct RateConstantRow {
    layer: i32,
    forward_bin: String,
    forward_rate: String,
    reverse_bin: String,
    reverse_rate: String,
}

/// Writes the direction-separated residence-time distributions, one row per
/// layer and bin, run lengths space-separated in sample units.
pub fn write_residence_separate(path: &Path, table: &ResidenceTable) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_err(path, e))?;

    writer
        .write_record(["layer", "bin", "residence_samples"])
        .map_err(|e| csv_err(path, e))?;
    for (layer, residence) in table.iter() {
        let rows = [
            (BinLabel::forward_from(layer), &residence.forward),
            (BinLabel::reverse_from(layer), &residence.reverse),
        ];
        for (bin, times) in rows {
            writer
                .write_record([
                    layer.to_string(),
                    bin.to_string(),
                    join_times(times),
                ])
                .map_err(|e| csv_err(path, e))?;
        }
    }

    writer.flush().map_err(csv::Error::from).map_err(|e| csv_err(path, e))
}

/// Writes the lumped per-layer residence-time distributions, forward entries
/// before reverse entries.
pub fn write_residence_lumped(path: &Path, table: &ResidenceTable) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_err(path, e))?;

    writer
        .write_record(["layer", "residence_samples"])
        .map_err(|e| csv_err(path, e))?;
    for (layer, residence) in table.iter() {
        writer
            .write_record([layer.to_string(), join_times(&residence.lumped())])
            .map_err(|e| csv_err(path, e))?;
    }

    writer.flush().map_err(csv::Error::from).map_err(|e| csv_err(path, e))
}

/// Writes the per-layer directional hop-event counts.
pub fn write_hop_events(path: &Path, hops: &HopTable) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_err(path, e))?;

    for (layer, counts) in hops.iter() {
        writer
            .serialize(HopEventRow {
                layer: layer.0,
                forward_bin: BinLabel::forward_from(layer).to_string(),
                forward_count: counts.forward,
                reverse_bin: BinLabel::reverse_from(layer).to_string(),
                reverse_count: counts.reverse,
            })
            .map_err(|e| csv_err(path, e))?;
    }

    writer.flush().map_err(csv::Error::from).map_err(|e| csv_err(path, e))
}

/// Writes the per-layer directional rate constants, two decimal places, in
/// 1/ps.
pub fn write_rate_constants(
    path: &Path,
    rates: &BTreeMap<IntLayer, RateConstants>,
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_err(path, e))?;

    for (&layer, rate) in rates {
        writer
            .serialize(RateConstantRow {
                layer: layer.0,
                forward_bin: BinLabel::forward_from(layer).to_string(),
                forward_rate: format!("{:.2}", rate.forward),
                reverse_bin: BinLabel::reverse_from(layer).to_string(),
                reverse_rate: format!("{:.2}", rate.reverse),
            })
            .map_err(|e| csv_err(path, e))?;
    }

    writer.flush().map_err(csv::Error::from).map_err(|e| csv_err(path, e))
}

fn join_times(times: &[u64]) -> String {
    times
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::FinalRunPolicy;
    use crate::engine::{aggregate, rle, transitions};
    use tempfile::tempdir;

    fn reference_tables() -> (ResidenceTable, HopTable) {
        let series: Vec<IntLayer> = [1, 1, 2, 2, 2, 1].iter().map(|&v| IntLayer(v)).collect();
        let runs = rle::encode(&series);
        let events = transitions::classify(&runs, FinalRunPolicy::AssumeReverseExit);
        let aggregates = aggregate::aggregate(&events);
        (aggregates.residence, aggregates.hops)
    }

    #[test]
    fn residence_separate_lists_both_bins_per_layer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resTimeSepDist.csv");
        let (residence, _) = reference_tables();

        write_residence_separate(&path, &residence).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "layer,bin,residence_samples");
        assert_eq!(lines[1], "1,B0F,");
        assert_eq!(lines[2], "1,B1R,2 1");
        assert_eq!(lines[3], "2,B1F,3");
        assert_eq!(lines[4], "2,B2R,");
    }

    #[test]
    fn residence_lumped_concatenates_forward_then_reverse() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resTimeDist.csv");
        let (residence, _) = reference_tables();

        write_residence_lumped(&path, &residence).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "1,2 1");
        assert_eq!(lines[2], "2,3");
    }

    #[test]
    fn hop_events_serialize_with_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hopEventDict.csv");
        let (_, hops) = reference_tables();

        write_hop_events(&path, &hops).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "layer,forward_bin,forward_count,reverse_bin,reverse_count"
        );
        assert_eq!(lines[1], "1,B0F,0,B1R,2");
        assert_eq!(lines[2], "2,B1F,1,B2R,0");
    }

    #[test]
    fn rate_constants_write_two_decimal_places() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rateConstDict.csv");

        let mut rates = BTreeMap::new();
        rates.insert(
            IntLayer(1),
            RateConstants {
                forward: 0.0,
                reverse: 66.67,
            },
        );
        rates.insert(
            IntLayer(2),
            RateConstants {
                forward: 33.33,
                reverse: 0.0,
            },
        );

        write_rate_constants(&path, &rates).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "layer,forward_bin,forward_rate,reverse_bin,reverse_rate"
        );
        assert_eq!(lines[1], "1,B0F,0.00,B1R,66.67");
        assert_eq!(lines[2], "2,B1F,33.33,B2R,0.00");
    }
}

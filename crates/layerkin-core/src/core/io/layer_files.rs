use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::core::models::layer::IntLayer;
use crate::core::models::tally::ExposureTally;

#[derive(Debug, Error)]
pub enum LayerFileError {
    #[error("I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Parse error in '{path}' line {line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },
}

impl LayerFileError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }

    fn parse(path: &Path, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_string_lossy().to_string(),
            line,
            message: message.into(),
        }
    }
}

/// Writes a layer series as tab-separated `timestep layer` lines under a
/// commented header, e.g. `decLayer.dat` / `intLayer.dat`.
pub fn write_series<L: Display>(
    path: &Path,
    label: &str,
    series: &[(u64, L)],
) -> Result<(), LayerFileError> {
    let file = File::create(path).map_err(|e| LayerFileError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    (|| -> std::io::Result<()> {
        writeln!(writer, "# TimeStep\t{label}")?;
        for (timestep, layer) in series {
            writeln!(writer, "{timestep}\t{layer}")?;
        }
        writer.flush()
    })()
    .map_err(|e| LayerFileError::io(path, e))
}

/// Writes a per-layer count file as `layer count` lines in ascending layer
/// order, e.g. `decCount.dat` / `intCount.dat`.
pub fn write_counts<L: Display + Ord + Copy>(
    path: &Path,
    label: &str,
    tally: &ExposureTally<L>,
) -> Result<(), LayerFileError> {
    let file = File::create(path).map_err(|e| LayerFileError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    (|| -> std::io::Result<()> {
        writeln!(writer, "# {label}\tCount")?;
        for (layer, count) in tally.iter() {
            writeln!(writer, "{layer} {count}")?;
        }
        writer.flush()
    })()
    .map_err(|e| LayerFileError::io(path, e))
}

/// Reads an integer layer series file back; the inverse of [`write_series`].
/// Lines starting with `#` are comments.
pub fn read_int_series(path: &Path) -> Result<Vec<(u64, IntLayer)>, LayerFileError> {
    let file = File::open(path).map_err(|e| LayerFileError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut series = Vec::new();
    for (index, line_res) in reader.lines().enumerate() {
        let line = line_res.map_err(|e| LayerFileError::io(path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line_num = index + 1;
        let mut fields = trimmed.split_whitespace();
        let timestep = parse_field::<u64>(&mut fields, path, line_num, "timestep")?;
        let layer = parse_field::<i32>(&mut fields, path, line_num, "layer index")?;
        series.push((timestep, IntLayer(layer)));
    }

    Ok(series)
}

/// Reads an integer layer count file back; the inverse of [`write_counts`].
pub fn read_int_counts(path: &Path) -> Result<ExposureTally<IntLayer>, LayerFileError> {
    let file = File::open(path).map_err(|e| LayerFileError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut tally = ExposureTally::new();
    for (index, line_res) in reader.lines().enumerate() {
        let line = line_res.map_err(|e| LayerFileError::io(path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line_num = index + 1;
        let mut fields = trimmed.split_whitespace();
        let layer = parse_field::<i32>(&mut fields, path, line_num, "layer index")?;
        let count = parse_field::<u64>(&mut fields, path, line_num, "count")?;
        tally.insert(IntLayer(layer), count);
    }

    Ok(tally)
}

fn parse_field<T: std::str::FromStr>(
    fields: &mut std::str::SplitWhitespace<'_>,
    path: &Path,
    line_num: usize,
    what: &str,
) -> Result<T, LayerFileError> {
    let field = fields
        .next()
        .ok_or_else(|| LayerFileError::parse(path, line_num, format!("missing {what}")))?;
    field
        .parse::<T>()
        .map_err(|_| LayerFileError::parse(path, line_num, format!("invalid {what}: '{field}'")))
}
